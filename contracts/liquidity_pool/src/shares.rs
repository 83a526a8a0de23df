use crate::storage::Pool;

/// Integer square root (floor) by Newton's method
pub fn isqrt(value: i128) -> Option<i128> {
    if value < 0 {
        return None;
    }
    if value < 2 {
        return Some(value);
    }

    let mut x = value;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + value / x) / 2;
    }
    Some(x)
}

/// Shares minted for a deposit
///
/// Formula:
/// - empty pool: sqrt(amount_a × amount_b)
/// - otherwise: min(amount_a × S / reserve_a, amount_b × S / reserve_b)
///
/// Example:
/// - reserves: 1,000 A / 4,000 B, S = 2,000
/// - deposit 100 A / 400 B → 200 shares
pub fn shares_for_deposit(pool: &Pool, amount_a: i128, amount_b: i128) -> Option<i128> {
    if pool.total_shares == 0 {
        return isqrt(amount_a.checked_mul(amount_b)?);
    }

    let by_a = amount_a
        .checked_mul(pool.total_shares)?
        .checked_div(pool.reserve_a)?;
    let by_b = amount_b
        .checked_mul(pool.total_shares)?
        .checked_div(pool.reserve_b)?;

    Some(by_a.min(by_b))
}

/// Reserves paid out for burning `shares`, pro rata
pub fn amounts_for_shares(pool: &Pool, shares: i128) -> Option<(i128, i128)> {
    let amount_a = pool
        .reserve_a
        .checked_mul(shares)?
        .checked_div(pool.total_shares)?;
    let amount_b = pool
        .reserve_b
        .checked_mul(shares)?
        .checked_div(pool.total_shares)?;

    Some((amount_a, amount_b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::{testutils::Address as _, Address, Env};

    fn pool(env: &Env, reserve_a: i128, reserve_b: i128, total_shares: i128) -> Pool {
        Pool {
            pool_id: 1,
            token_a: Address::generate(env),
            token_b: Address::generate(env),
            reserve_a,
            reserve_b,
            total_shares,
        }
    }

    #[test]
    fn test_isqrt() {
        assert_eq!(isqrt(0), Some(0));
        assert_eq!(isqrt(1), Some(1));
        assert_eq!(isqrt(15), Some(3));
        assert_eq!(isqrt(16), Some(4));
        assert_eq!(isqrt(1_000_000_000_000), Some(1_000_000));
        assert_eq!(isqrt(-4), None);
    }

    #[test]
    fn test_first_deposit() {
        let env = Env::default();
        let p = pool(&env, 0, 0, 0);

        assert_eq!(shares_for_deposit(&p, 1_000, 4_000), Some(2_000));
    }

    #[test]
    fn test_proportional_deposit() {
        let env = Env::default();
        let p = pool(&env, 1_000, 4_000, 2_000);

        assert_eq!(shares_for_deposit(&p, 100, 400), Some(200));
        // Unbalanced deposit is credited on the scarcer side
        assert_eq!(shares_for_deposit(&p, 100, 100), Some(50));
    }

    #[test]
    fn test_withdraw_pro_rata() {
        let env = Env::default();
        let p = pool(&env, 1_000, 4_000, 2_000);

        assert_eq!(amounts_for_shares(&p, 500), Some((250, 1_000)));
        assert_eq!(amounts_for_shares(&p, 2_000), Some((1_000, 4_000)));
    }
}
