use crate::storage::{Allocations, IMMEDIATE_SHARE_DIVISOR, PRICE_SCALE};

/// Tokens bought by a currency payment, truncated
///
/// Formula: tokens = amount × PRICE_SCALE / price
///
/// Example:
/// - amount: 10 currency (100,000,000 base units)
/// - price: 169,789,000,000 (0.000000169789 currency per token base unit)
/// - tokens: 588,966,305,237,677 base units (~58.9M tokens at 7 decimals)
pub fn tokens_for_payment(amount: i128, price: i128) -> Option<i128> {
    amount.checked_mul(PRICE_SCALE)?.checked_div(price)
}

/// Currency charged for a token amount, rounded up so the sale is never short
///
/// Formula: cost = ceil(tokens × price / PRICE_SCALE)
pub fn cost_of_tokens(tokens: i128, price: i128) -> Option<i128> {
    let numerator = tokens.checked_mul(price)?;
    let cost = numerator.checked_div(PRICE_SCALE)?;
    if numerator % PRICE_SCALE == 0 {
        Some(cost)
    } else {
        cost.checked_add(1)
    }
}

/// Currency returned for a token contribution when the sale fails, truncated
///
/// Formula: refund = tokens × price / PRICE_SCALE
pub fn refund_for_tokens(tokens: i128, price: i128) -> Option<i128> {
    tokens.checked_mul(price)?.checked_div(PRICE_SCALE)
}

/// Split a successful contribution into (immediate, vested).
/// The division remainder stays in the vested part.
///
/// Example: 10 tokens → (2, 8)
pub fn split_claim(tokens: i128) -> (i128, i128) {
    let immediate = tokens / IMMEDIATE_SHARE_DIVISOR;
    (immediate, tokens - immediate)
}

/// Sum of all allocations
pub fn total_supply(allocations: &Allocations) -> Option<i128> {
    allocations
        .team
        .checked_add(allocations.dao_treasury)?
        .checked_add(allocations.airdrop)?
        .checked_add(allocations.liquidity)?
        .checked_add(allocations.public_sale)
}
