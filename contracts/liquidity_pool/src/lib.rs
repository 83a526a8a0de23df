#![no_std]

mod error;
mod events;
mod shares;
mod storage;


pub use error::Error;
pub use storage::Pool;

use events::{LiquidityAddedEvent, LiquidityRemovedEvent, PoolCreatedEvent, TransferEvent};
use shares::{amounts_for_shares, shares_for_deposit};
use storage::DataKey;

use soroban_sdk::{contract, contractimpl, token, Address, Env, Symbol};

#[contract]
pub struct LiquidityPool;

#[contractimpl]
impl LiquidityPool {
    /// Create a pool for an ordered token pair
    ///
    /// # Errors
    /// - `InvalidPair`: Both sides are the same token
    /// - `PoolExists`: The pair already has a pool
    pub fn create_pool(env: Env, token_a: Address, token_b: Address) -> Result<u32, Error> {
        if token_a == token_b {
            return Err(Error::InvalidPair);
        }

        let pair_key = DataKey::PairPool(token_a.clone(), token_b.clone());
        if env.storage().persistent().has(&pair_key) {
            return Err(Error::PoolExists);
        }

        let pool_id: u32 = env
            .storage()
            .instance()
            .get(&DataKey::PoolCounter)
            .unwrap_or(0);
        let new_pool_id = pool_id + 1;

        let pool = Pool {
            pool_id: new_pool_id,
            token_a: token_a.clone(),
            token_b: token_b.clone(),
            reserve_a: 0,
            reserve_b: 0,
            total_shares: 0,
        };

        env.storage()
            .persistent()
            .set(&DataKey::Pool(new_pool_id), &pool);
        env.storage().persistent().set(&pair_key, &new_pool_id);
        env.storage()
            .instance()
            .set(&DataKey::PoolCounter, &new_pool_id);

        env.events().publish(
            (Symbol::new(&env, "pool_created"), new_pool_id),
            PoolCreatedEvent {
                pool_id: new_pool_id,
                token_a,
                token_b,
            },
        );

        Ok(new_pool_id)
    }

    /// Deposit both sides of a pool and mint LP shares to the provider.
    /// Both amounts must already sit in this contract's balance.
    ///
    /// # Errors
    /// - `PoolNotFound`: Pool doesn't exist
    /// - `InvalidAmount`: Amounts must be positive
    /// - `InsufficientDeposit`: Tokens were not pushed before the call
    /// - `SlippageExceeded`: Fewer than `min_shares` would be minted
    pub fn add_liquidity(
        env: Env,
        provider: Address,
        pool_id: u32,
        amount_a: i128,
        amount_b: i128,
        min_shares: i128,
    ) -> Result<i128, Error> {
        if amount_a <= 0 || amount_b <= 0 {
            return Err(Error::InvalidAmount);
        }

        provider.require_auth();

        let mut pool = Self::get_pool(env.clone(), pool_id)?;

        Self::claim_deposit(&env, &pool.token_a, amount_a)?;
        Self::claim_deposit(&env, &pool.token_b, amount_b)?;

        let shares = shares_for_deposit(&pool, amount_a, amount_b).ok_or(Error::InvalidAmount)?;
        if shares <= 0 || shares < min_shares {
            return Err(Error::SlippageExceeded);
        }

        pool.reserve_a = pool
            .reserve_a
            .checked_add(amount_a)
            .ok_or(Error::InvalidAmount)?;
        pool.reserve_b = pool
            .reserve_b
            .checked_add(amount_b)
            .ok_or(Error::InvalidAmount)?;
        pool.total_shares = pool
            .total_shares
            .checked_add(shares)
            .ok_or(Error::InvalidAmount)?;

        let holder_balance = Self::balance_of(env.clone(), pool_id, provider.clone());
        let new_holder_balance = holder_balance
            .checked_add(shares)
            .ok_or(Error::InvalidAmount)?;

        env.storage().persistent().set(&DataKey::Pool(pool_id), &pool);
        env.storage()
            .persistent()
            .set(&DataKey::Shares(pool_id, provider.clone()), &new_holder_balance);

        env.events().publish(
            (Symbol::new(&env, "liquidity_added"), pool_id),
            LiquidityAddedEvent {
                pool_id,
                provider,
                amount_a,
                amount_b,
                shares,
            },
        );

        Ok(shares)
    }

    /// Burn LP shares and pay out the holder's pro-rata reserves
    ///
    /// # Errors
    /// - `PoolNotFound`: Pool doesn't exist
    /// - `InvalidAmount`: Shares must be positive
    /// - `InsufficientBalance`: Holder has fewer shares
    pub fn remove_liquidity(
        env: Env,
        holder: Address,
        pool_id: u32,
        shares: i128,
    ) -> Result<(i128, i128), Error> {
        if shares <= 0 {
            return Err(Error::InvalidAmount);
        }

        holder.require_auth();

        let mut pool = Self::get_pool(env.clone(), pool_id)?;

        let holder_balance = Self::balance_of(env.clone(), pool_id, holder.clone());
        if holder_balance < shares {
            return Err(Error::InsufficientBalance);
        }

        let (amount_a, amount_b) =
            amounts_for_shares(&pool, shares).ok_or(Error::InvalidAmount)?;

        pool.reserve_a -= amount_a;
        pool.reserve_b -= amount_b;
        pool.total_shares -= shares;

        Self::set_shares(&env, pool_id, &holder, holder_balance - shares);
        env.storage().persistent().set(&DataKey::Pool(pool_id), &pool);
        Self::release_reserve(&env, &pool.token_a, amount_a)?;
        Self::release_reserve(&env, &pool.token_b, amount_b)?;

        let contract = env.current_contract_address();
        token::Client::new(&env, &pool.token_a).transfer(&contract, &holder, &amount_a);
        token::Client::new(&env, &pool.token_b).transfer(&contract, &holder, &amount_b);

        env.events().publish(
            (Symbol::new(&env, "liquidity_removed"), pool_id),
            LiquidityRemovedEvent {
                pool_id,
                holder,
                amount_a,
                amount_b,
                shares,
            },
        );

        Ok((amount_a, amount_b))
    }

    /// Transfer LP shares between holders
    ///
    /// # Errors
    /// - `InvalidAmount`: Amount <= 0
    /// - `InsufficientBalance`: Not enough shares
    pub fn transfer(
        env: Env,
        pool_id: u32,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), Error> {
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        from.require_auth();

        let from_balance = Self::balance_of(env.clone(), pool_id, from.clone());
        if from_balance < amount {
            return Err(Error::InsufficientBalance);
        }
        if from == to {
            return Ok(());
        }

        let to_balance = Self::balance_of(env.clone(), pool_id, to.clone());
        let new_to_balance = to_balance
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;

        Self::set_shares(&env, pool_id, &from, from_balance - amount);
        Self::set_shares(&env, pool_id, &to, new_to_balance);

        env.events().publish(
            (Symbol::new(&env, "transfer"), pool_id),
            TransferEvent {
                pool_id,
                from,
                to,
                amount,
            },
        );

        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    /// LP shares held in a pool
    pub fn balance_of(env: Env, pool_id: u32, holder: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Shares(pool_id, holder))
            .unwrap_or(0)
    }

    pub fn total_shares(env: Env, pool_id: u32) -> Result<i128, Error> {
        Ok(Self::get_pool(env, pool_id)?.total_shares)
    }

    pub fn get_pool(env: Env, pool_id: u32) -> Result<Pool, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Pool(pool_id))
            .ok_or(Error::PoolNotFound)
    }

    pub fn pool_for_pair(env: Env, token_a: Address, token_b: Address) -> Option<u32> {
        env.storage()
            .persistent()
            .get(&DataKey::PairPool(token_a, token_b))
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn set_shares(env: &Env, pool_id: u32, holder: &Address, amount: i128) {
        let key = DataKey::Shares(pool_id, holder.clone());
        if amount == 0 {
            env.storage().persistent().remove(&key);
        } else {
            env.storage().persistent().set(&key, &amount);
        }
    }

    fn reserves(env: &Env, token: &Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Reserves(token.clone()))
            .unwrap_or(0)
    }

    /// Attribute `amount` of unclaimed balance in `token` to a pool
    fn claim_deposit(env: &Env, token: &Address, amount: i128) -> Result<(), Error> {
        let owed = Self::reserves(env, token)
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;
        let held = token::Client::new(env, token).balance(&env.current_contract_address());
        if held < owed {
            return Err(Error::InsufficientDeposit);
        }

        env.storage()
            .persistent()
            .set(&DataKey::Reserves(token.clone()), &owed);
        Ok(())
    }

    fn release_reserve(env: &Env, token: &Address, amount: i128) -> Result<(), Error> {
        let owed = Self::reserves(env, token)
            .checked_sub(amount)
            .ok_or(Error::InvalidAmount)?;
        env.storage()
            .persistent()
            .set(&DataKey::Reserves(token.clone()), &owed);
        Ok(())
    }
}
