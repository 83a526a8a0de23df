use soroban_sdk::{contracttype, Address};

// Constants
pub const PRICE_SCALE: i128 = 1_000_000_000_000_000_000; // 18-decimal fixed point
pub const IMMEDIATE_SHARE_DIVISOR: i128 = 4; // 1/4 of a claim is paid out at once
pub const PUBLIC_CLIFF_COUNT: u32 = 3; // buyers' remainder unlocks after 3 weeks

/// Mirrors the vesting engine's unit enum on the wire
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DurationUnit {
    Days = 0,
    Weeks = 1,
    Months = 2,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingTerms {
    /// Units before the first release
    pub cliff_count: u32,
    /// Units of linear release after the cliff (0 = all at the cliff)
    pub linear_count: u32,
    pub unit: DurationUnit,
}

/// Token supply split, in token base units. The parts sum to the total supply.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Allocations {
    pub team: i128,
    pub dao_treasury: i128,
    pub airdrop: i128,
    pub liquidity: i128,
    /// Hard cap of the public sale
    pub public_sale: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Beneficiaries {
    /// Receives net proceeds, unlocked liquidity and unsold tokens
    pub project: Address,
    pub team: Address,
    pub dao: Address,
    pub airdrop: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleConfig {
    /// Token being sold
    pub token: Address,
    /// Currency contributions are paid in
    pub currency: Address,
    pub vesting_engine: Address,
    pub liquidity_bridge: Address,
    /// Purchases accepted in [start_time, end_time]
    pub start_time: u64,
    pub end_time: u64,
    /// LP shares held until strictly after this timestamp
    pub liquidity_unlock_time: u64,
    /// Currency base units per token base unit, scaled by PRICE_SCALE
    pub price_per_token: i128,
    /// Minimum currency raise for the sale to succeed
    pub soft_cap: i128,
    /// Currency paired with the liquidity allocation on success
    pub liquidity_currency: i128,
    /// Minimum LP shares accepted from the bridge
    pub min_liquidity_out: i128,
    pub allocations: Allocations,
    pub beneficiaries: Beneficiaries,
    pub team_vesting: VestingTerms,
    pub dao_vesting: VestingTerms,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SalePhase {
    /// Accepting purchases
    Open = 0,
    /// Settled, terminal
    Closed = 1,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SaleOutcome {
    /// Sale still open
    Undetermined = 0,
    /// Soft cap reached: tokens plus vesting for buyers
    Success = 1,
    /// Soft cap missed: currency refunds
    Failure = 2,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleState {
    /// Currency accepted so far, frozen at close
    pub total_raised: i128,
    /// Tokens credited to buyers, never above the public allocation
    pub total_tokens_sold: i128,
    /// Tokens whose contribution has been claimed or refunded
    pub settled_tokens: i128,
    pub phase: SalePhase,
    /// Set once at close
    pub outcome: SaleOutcome,
    pub liquidity_pool: Option<u32>,
    /// LP shares received when liquidity was locked
    pub liquidity_shares: i128,
    pub liquidity_locked: bool,
    pub liquidity_unlocked: bool,
}

impl SaleState {
    pub fn new() -> Self {
        SaleState {
            total_raised: 0,
            total_tokens_sold: 0,
            settled_tokens: 0,
            phase: SalePhase::Open,
            outcome: SaleOutcome::Undetermined,
            liquidity_pool: None,
            liquidity_shares: 0,
            liquidity_locked: false,
            liquidity_unlocked: false,
        }
    }
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Config,
    State,
    Contribution(Address), // buyer → tokens purchased, unsettled
    Initialized,
    Paused,
}
