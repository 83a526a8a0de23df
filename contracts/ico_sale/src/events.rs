use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug)]
pub struct PurchaseEvent {
    pub buyer: Address,
    pub tokens_accepted: i128,
    pub amount_paid: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct SaleClosedEvent {
    pub total_sold: i128,
    pub total_raised: i128,
    pub soft_cap_reached: bool,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ClaimedEvent {
    pub beneficiary: Address,
    pub immediate_amount: i128,
    pub vested_amount: i128,
    pub schedule_id: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct RefundedEvent {
    pub beneficiary: Address,
    pub currency_amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct LiquidityLockedEvent {
    pub pool_id: u32,
    pub token_amount: i128,
    pub currency_amount: i128,
    pub shares: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct LiquidityUnlockedEvent {
    pub pool_id: u32,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct UnsoldWithdrawnEvent {
    pub recipient: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ResidualWithdrawnEvent {
    pub recipient: Address,
    pub amount: i128,
}
