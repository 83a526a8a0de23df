use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub pool_id: u32,
    pub token_a: Address,
    pub token_b: Address,
    pub reserve_a: i128,
    pub reserve_b: i128,
    /// Outstanding LP shares
    pub total_shares: i128,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    PoolCounter,
    Pool(u32),
    PairPool(Address, Address), // (token_a, token_b) → pool_id
    Reserves(Address),          // token → amount owed to all pools
    Shares(u32, Address),       // (pool_id, holder)
}
