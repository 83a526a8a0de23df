use soroban_sdk::{contractclient, Address, Env};

use crate::storage::DurationUnit;

/// Vesting engine entry points the sale drives
#[contractclient(name = "VestingClient")]
pub trait VestingInterface {
    fn token(env: Env) -> Address;

    fn create_schedule(
        env: Env,
        funder: Address,
        beneficiary: Address,
        start_time: u64,
        cliff_count: u32,
        unit: DurationUnit,
        total_amount: i128,
    ) -> u64;

    fn create_linear_schedule(
        env: Env,
        funder: Address,
        beneficiary: Address,
        start_time: u64,
        cliff_count: u32,
        linear_count: u32,
        unit: DurationUnit,
        total_amount: i128,
    ) -> u64;
}

/// Pool service the sale seeds and holds LP shares in
#[contractclient(name = "LiquidityBridgeClient")]
pub trait LiquidityBridgeInterface {
    fn create_pool(env: Env, token_a: Address, token_b: Address) -> u32;

    fn pool_for_pair(env: Env, token_a: Address, token_b: Address) -> Option<u32>;

    fn add_liquidity(
        env: Env,
        provider: Address,
        pool_id: u32,
        amount_a: i128,
        amount_b: i128,
        min_shares: i128,
    ) -> i128;

    fn balance_of(env: Env, pool_id: u32, holder: Address) -> i128;

    fn transfer(env: Env, pool_id: u32, from: Address, to: Address, amount: i128);
}
