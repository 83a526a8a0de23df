#![no_std]

mod error;
mod events;
mod interfaces;
mod pricing;
mod storage;


pub use error::Error;
pub use storage::{
    Allocations, Beneficiaries, DurationUnit, SaleConfig, SaleOutcome, SalePhase, SaleState,
    VestingTerms, PRICE_SCALE,
};

use events::*;
use interfaces::{LiquidityBridgeClient, VestingClient};
use pricing::{cost_of_tokens, refund_for_tokens, split_claim, tokens_for_payment, total_supply};
use storage::{DataKey, PUBLIC_CLIFF_COUNT};

use soroban_sdk::{contract, contractimpl, token, Address, Env, Symbol, Vec};

#[contract]
pub struct IcoSale;

#[contractimpl]
impl IcoSale {
    // ============================================
    // INITIALIZATION & ADMIN
    // ============================================

    /// Initialize the sale
    ///
    /// The sale contract must hold the full token supply before settlement.
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    /// - `InvalidConfig`: Window, price, caps or allocations are inconsistent,
    ///   or the vesting engine is bound to another token
    pub fn initialize(env: Env, admin: Address, config: SaleConfig) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        Self::validate_config(&config)?;

        // The engine must escrow the token this sale hands out
        match VestingClient::new(&env, &config.vesting_engine).try_token() {
            Ok(Ok(token)) if token == config.token => {}
            _ => return Err(Error::InvalidConfig),
        }

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Config, &config);
        env.storage().instance().set(&DataKey::State, &SaleState::new());
        env.storage().instance().set(&DataKey::Paused, &false);

        Ok(())
    }

    /// Pause purchases (emergency). Settlement stays available.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn pause(env: Env) -> Result<(), Error> {
        let admin = Self::admin(&env)?;
        admin.require_auth();

        env.storage().instance().set(&DataKey::Paused, &true);
        Ok(())
    }

    /// Resume purchases
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn unpause(env: Env) -> Result<(), Error> {
        let admin = Self::admin(&env)?;
        admin.require_auth();

        env.storage().instance().set(&DataKey::Paused, &false);
        Ok(())
    }

    // ============================================
    // PURCHASE
    // ============================================

    /// Buy tokens with `amount` of currency. Returns the tokens credited.
    ///
    /// Below the hard cap the whole amount is taken. A purchase that reaches
    /// the cap is filled with the remaining capacity, only its (rounded up)
    /// cost is taken, and the sale closes in the same call.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `ContractPaused`: Contract is paused
    /// - `InvalidAmount`: amount must be positive
    /// - `SaleClosed`: Sale already closed
    /// - `SaleNotStarted`: Before start_time
    /// - `SaleEnded`: After end_time
    /// - `PurchaseTooSmall`: amount buys zero tokens
    pub fn buy(env: Env, buyer: Address, amount: i128) -> Result<i128, Error> {
        Self::check_not_paused(&env)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        buyer.require_auth();

        let config = Self::config(&env)?;
        let mut state = Self::state(&env)?;

        if state.phase == SalePhase::Closed {
            return Err(Error::SaleClosed);
        }

        let now = env.ledger().timestamp();
        if now < config.start_time {
            return Err(Error::SaleNotStarted);
        }
        if now > config.end_time {
            return Err(Error::SaleEnded);
        }

        let requested =
            tokens_for_payment(amount, config.price_per_token).ok_or(Error::InvalidAmount)?;
        if requested == 0 {
            return Err(Error::PurchaseTooSmall);
        }

        let remaining = config.allocations.public_sale - state.total_tokens_sold;
        let hits_cap = requested >= remaining;
        let (accepted, charged) = if hits_cap {
            let cost =
                cost_of_tokens(remaining, config.price_per_token).ok_or(Error::InvalidAmount)?;
            (remaining, cost.min(amount))
        } else {
            (requested, amount)
        };

        let contribution_key = DataKey::Contribution(buyer.clone());
        let contribution: i128 = env
            .storage()
            .persistent()
            .get(&contribution_key)
            .unwrap_or(0);
        let new_contribution = contribution
            .checked_add(accepted)
            .ok_or(Error::InvalidAmount)?;

        state.total_tokens_sold = state
            .total_tokens_sold
            .checked_add(accepted)
            .ok_or(Error::InvalidAmount)?;
        state.total_raised = state
            .total_raised
            .checked_add(charged)
            .ok_or(Error::InvalidAmount)?;

        env.storage()
            .persistent()
            .set(&contribution_key, &new_contribution);
        Self::save_state(&env, &state);

        let currency_client = token::Client::new(&env, &config.currency);
        currency_client.transfer(&buyer, &env.current_contract_address(), &charged);

        env.events().publish(
            (Symbol::new(&env, "purchase"), buyer.clone()),
            PurchaseEvent {
                buyer,
                tokens_accepted: accepted,
                amount_paid: charged,
            },
        );

        if hits_cap {
            Self::settle_sale(&env, &config, &mut state)?;
        }

        Ok(accepted)
    }

    // ============================================
    // SETTLEMENT
    // ============================================

    /// Close the sale and settle it. Callable by anyone once the window is
    /// over or the hard cap is sold out.
    ///
    /// On success: team/DAO/airdrop allocations are escrowed into vesting,
    /// liquidity is locked, and raised currency minus the liquidity reserve
    /// goes to the project. On failure nothing moves; buyers claim refunds.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `AlreadyClosed`: Sale was already closed
    /// - `SaleStillOpen`: Window open and cap not reached
    /// - `TransferFailed`: Proceeds transfer failed
    pub fn close_sale(env: Env) -> Result<SaleOutcome, Error> {
        let config = Self::config(&env)?;
        let mut state = Self::state(&env)?;

        if state.phase == SalePhase::Closed {
            return Err(Error::AlreadyClosed);
        }

        let now = env.ledger().timestamp();
        let sold_out = state.total_tokens_sold >= config.allocations.public_sale;
        if now <= config.end_time && !sold_out {
            return Err(Error::SaleStillOpen);
        }

        Self::settle_sale(&env, &config, &mut state)?;

        Ok(state.outcome)
    }

    /// Settle the caller's contribution: tokens (one quarter now, the rest
    /// vesting) on success, currency refund on failure. Returns the amount
    /// paid out immediately.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `SaleNotClosed`: Sale not closed yet
    /// - `NothingToClaim`: No unsettled contribution
    /// - `TransferFailed`: Token transfer failed
    /// - `RefundFailed`: Currency refund failed
    pub fn claim(env: Env, claimant: Address) -> Result<i128, Error> {
        claimant.require_auth();

        let config = Self::config(&env)?;
        let mut state = Self::state(&env)?;

        if state.phase != SalePhase::Closed {
            return Err(Error::SaleNotClosed);
        }

        if Self::contribution_of(env.clone(), claimant.clone()) == 0 {
            return Err(Error::NothingToClaim);
        }

        Self::settle_account(&env, &config, &mut state, &claimant)
    }

    /// Admin batch version of `claim`. Addresses without a contribution are
    /// skipped. Returns how many addresses were settled.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `SaleNotClosed`: Sale not closed yet
    /// - `TransferFailed` / `RefundFailed`: Any payout failed (whole batch reverts)
    pub fn airdrop(env: Env, addresses: Vec<Address>) -> Result<u32, Error> {
        let admin = Self::admin(&env)?;
        admin.require_auth();

        let config = Self::config(&env)?;
        let mut state = Self::state(&env)?;

        if state.phase != SalePhase::Closed {
            return Err(Error::SaleNotClosed);
        }

        let mut settled: u32 = 0;
        for account in addresses.iter() {
            if Self::contribution_of(env.clone(), account.clone()) == 0 {
                continue;
            }
            Self::settle_account(&env, &config, &mut state, &account)?;
            settled += 1;
        }

        Ok(settled)
    }

    /// Sweep the locked LP shares to the project once the unlock time has
    /// passed. One-shot. Returns the shares moved.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `LiquidityNotLocked`: No liquidity was locked
    /// - `LiquidityAlreadyUnlocked`: Already swept
    /// - `LiquidityStillLocked`: Unlock time not passed
    pub fn unlock_liquidity(env: Env) -> Result<i128, Error> {
        let config = Self::config(&env)?;
        let mut state = Self::state(&env)?;

        if !state.liquidity_locked {
            return Err(Error::LiquidityNotLocked);
        }
        if state.liquidity_unlocked {
            return Err(Error::LiquidityAlreadyUnlocked);
        }
        if env.ledger().timestamp() <= config.liquidity_unlock_time {
            return Err(Error::LiquidityStillLocked);
        }

        let pool_id = state.liquidity_pool.ok_or(Error::LiquidityNotLocked)?;
        let bridge = LiquidityBridgeClient::new(&env, &config.liquidity_bridge);
        let contract = env.current_contract_address();
        let amount = bridge.balance_of(&pool_id, &contract);

        state.liquidity_unlocked = true;
        Self::save_state(&env, &state);

        if amount > 0 {
            bridge.transfer(&pool_id, &contract, &config.beneficiaries.project, &amount);
        }

        env.events().publish(
            (Symbol::new(&env, "liquidity_unlocked"), pool_id),
            LiquidityUnlockedEvent { pool_id, amount },
        );

        Ok(amount)
    }

    /// Send sale tokens not owed to buyers to the project
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `SaleNotClosed`: Sale not closed yet
    /// - `NothingToWithdraw`: No surplus
    /// - `TransferFailed`: Token transfer failed
    pub fn withdraw_unsold(env: Env) -> Result<i128, Error> {
        let config = Self::config(&env)?;
        let state = Self::state(&env)?;

        let project = config.beneficiaries.project.clone();
        project.require_auth();

        if state.phase != SalePhase::Closed {
            return Err(Error::SaleNotClosed);
        }

        let owed = if state.outcome == SaleOutcome::Success {
            state.total_tokens_sold - state.settled_tokens
        } else {
            0
        };

        let token_client = token::Client::new(&env, &config.token);
        let held = token_client.balance(&env.current_contract_address());
        let surplus = held - owed;
        if surplus <= 0 {
            return Err(Error::NothingToWithdraw);
        }

        Self::pay(
            &env,
            &config.token,
            &project,
            surplus,
            Error::TransferFailed,
        )?;

        env.events().publish(
            (Symbol::new(&env, "unsold_withdrawn"),),
            UnsoldWithdrawnEvent {
                recipient: project,
                amount: surplus,
            },
        );

        Ok(surplus)
    }

    /// Send currency still held by the sale to the project. On failure this
    /// is the refund rounding dust and is only released once every
    /// contribution has been refunded.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `SaleNotClosed`: Sale not closed yet
    /// - `RefundsPending`: Failed sale with unsettled contributions
    /// - `NothingToWithdraw`: No currency left
    /// - `TransferFailed`: Currency transfer failed
    pub fn withdraw_residual(env: Env) -> Result<i128, Error> {
        let config = Self::config(&env)?;
        let state = Self::state(&env)?;

        let project = config.beneficiaries.project.clone();
        project.require_auth();

        if state.phase != SalePhase::Closed {
            return Err(Error::SaleNotClosed);
        }
        if state.outcome == SaleOutcome::Failure && state.settled_tokens < state.total_tokens_sold
        {
            return Err(Error::RefundsPending);
        }

        let currency_client = token::Client::new(&env, &config.currency);
        let held = currency_client.balance(&env.current_contract_address());
        if held <= 0 {
            return Err(Error::NothingToWithdraw);
        }

        Self::pay(&env, &config.currency, &project, held, Error::TransferFailed)?;

        env.events().publish(
            (Symbol::new(&env, "residual_withdrawn"),),
            ResidualWithdrawnEvent {
                recipient: project,
                amount: held,
            },
        );

        Ok(held)
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn get_config(env: Env) -> Result<SaleConfig, Error> {
        Self::config(&env)
    }

    pub fn get_state(env: Env) -> Result<SaleState, Error> {
        Self::state(&env)
    }

    /// Unsettled tokens purchased by an address
    pub fn contribution_of(env: Env, buyer: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Contribution(buyer))
            .unwrap_or(0)
    }

    /// Maximum tokens the public sale can sell
    pub fn hard_cap_tokens(env: Env) -> Result<i128, Error> {
        Ok(Self::config(&env)?.allocations.public_sale)
    }

    /// Currency needed to buy out the public sale
    pub fn hard_cap_amount(env: Env) -> Result<i128, Error> {
        let config = Self::config(&env)?;
        cost_of_tokens(config.allocations.public_sale, config.price_per_token)
            .ok_or(Error::InvalidAmount)
    }

    pub fn total_supply(env: Env) -> Result<i128, Error> {
        total_supply(&Self::config(&env)?.allocations).ok_or(Error::InvalidAmount)
    }

    pub fn soft_cap_reached(env: Env) -> Result<bool, Error> {
        let config = Self::config(&env)?;
        Ok(Self::state(&env)?.total_raised >= config.soft_cap)
    }

    pub fn liquidity_pool(env: Env) -> Result<Option<u32>, Error> {
        Ok(Self::state(&env)?.liquidity_pool)
    }

    pub fn is_paused(env: Env) -> bool {
        env.storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::Paused)
            .unwrap_or(false)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn check_not_paused(env: &Env) -> Result<(), Error> {
        if Self::is_paused(env.clone()) {
            return Err(Error::ContractPaused);
        }
        Ok(())
    }

    fn admin(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    fn config(env: &Env) -> Result<SaleConfig, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(Error::NotInitialized)
    }

    fn state(env: &Env) -> Result<SaleState, Error> {
        env.storage()
            .instance()
            .get(&DataKey::State)
            .ok_or(Error::NotInitialized)
    }

    fn save_state(env: &Env, state: &SaleState) {
        env.storage().instance().set(&DataKey::State, state);
    }

    fn validate_config(config: &SaleConfig) -> Result<(), Error> {
        if config.start_time >= config.end_time
            || config.end_time > config.liquidity_unlock_time
        {
            return Err(Error::InvalidConfig);
        }

        if config.price_per_token <= 0 {
            return Err(Error::InvalidConfig);
        }

        let a = &config.allocations;
        if a.team < 0 || a.dao_treasury < 0 || a.airdrop < 0 || a.liquidity < 0 {
            return Err(Error::InvalidConfig);
        }
        if a.public_sale <= 0 {
            return Err(Error::InvalidConfig);
        }
        total_supply(a).ok_or(Error::InvalidConfig)?;

        if config.team_vesting.cliff_count == 0 || config.dao_vesting.cliff_count == 0 {
            return Err(Error::InvalidConfig);
        }

        // Liquidity needs both sides or neither
        if config.liquidity_currency < 0 || (a.liquidity == 0) != (config.liquidity_currency == 0)
        {
            return Err(Error::InvalidConfig);
        }

        let hard_cap_amount =
            cost_of_tokens(a.public_sale, config.price_per_token).ok_or(Error::InvalidConfig)?;
        if config.soft_cap <= 0
            || config.soft_cap > hard_cap_amount
            || config.liquidity_currency > config.soft_cap
        {
            return Err(Error::InvalidConfig);
        }

        Ok(())
    }

    /// Transfer `amount` of `token` out of the sale, mapping failure to `err`
    fn pay(env: &Env, token: &Address, to: &Address, amount: i128, err: Error) -> Result<(), Error> {
        let client = token::Client::new(env, token);
        match client.try_transfer(&env.current_contract_address(), to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => Err(err),
        }
    }

    /// Open → Closed transition. Runs exactly once.
    fn settle_sale(env: &Env, config: &SaleConfig, state: &mut SaleState) -> Result<(), Error> {
        let soft_cap_reached = state.total_raised >= config.soft_cap;

        state.phase = SalePhase::Closed;
        state.outcome = if soft_cap_reached {
            SaleOutcome::Success
        } else {
            SaleOutcome::Failure
        };
        Self::save_state(env, state);

        env.events().publish(
            (Symbol::new(env, "sale_closed"),),
            SaleClosedEvent {
                total_sold: state.total_tokens_sold,
                total_raised: state.total_raised,
                soft_cap_reached,
            },
        );

        if !soft_cap_reached {
            return Ok(());
        }

        Self::vest_allocations(env, config)?;
        Self::lock_liquidity(env, config, state)?;

        let proceeds = state.total_raised - config.liquidity_currency;
        if proceeds > 0 {
            Self::pay(
                env,
                &config.currency,
                &config.beneficiaries.project,
                proceeds,
                Error::TransferFailed,
            )?;
        }

        Ok(())
    }

    /// Escrow the team, DAO and airdrop allocations into vesting
    fn vest_allocations(env: &Env, config: &SaleConfig) -> Result<(), Error> {
        let vesting = VestingClient::new(env, &config.vesting_engine);
        let contract = env.current_contract_address();
        let now = env.ledger().timestamp();
        let b = &config.beneficiaries;
        let a = &config.allocations;

        for (beneficiary, amount, terms) in [
            (&b.team, a.team, &config.team_vesting),
            (&b.dao, a.dao_treasury, &config.dao_vesting),
        ] {
            if amount == 0 {
                continue;
            }
            Self::pay(env, &config.token, &config.vesting_engine, amount, Error::TransferFailed)?;
            vesting.create_linear_schedule(
                &contract,
                beneficiary,
                &now,
                &terms.cliff_count,
                &terms.linear_count,
                &terms.unit,
                &amount,
            );
        }

        // Airdrop allocation has no lock
        if a.airdrop > 0 {
            Self::pay(env, &config.token, &config.vesting_engine, a.airdrop, Error::TransferFailed)?;
            vesting.create_schedule(
                &contract,
                &b.airdrop,
                &now,
                &0,
                &DurationUnit::Days,
                &a.airdrop,
            );
        }

        Ok(())
    }

    /// Seed the (token, currency) pool and keep the LP shares in custody
    fn lock_liquidity(env: &Env, config: &SaleConfig, state: &mut SaleState) -> Result<(), Error> {
        if state.liquidity_locked || state.outcome != SaleOutcome::Success {
            return Ok(());
        }

        let token_amount = config.allocations.liquidity;
        let currency_amount = config.liquidity_currency;
        if token_amount == 0 {
            return Ok(());
        }

        // Anyone can open the pair ahead of settlement; seed that pool instead
        let bridge = LiquidityBridgeClient::new(env, &config.liquidity_bridge);
        let pool_id = match bridge.pool_for_pair(&config.token, &config.currency) {
            Some(pool_id) => pool_id,
            None => bridge.create_pool(&config.token, &config.currency),
        };

        state.liquidity_pool = Some(pool_id);
        state.liquidity_locked = true;
        Self::save_state(env, state);

        Self::pay(env, &config.token, &config.liquidity_bridge, token_amount, Error::TransferFailed)?;
        Self::pay(
            env,
            &config.currency,
            &config.liquidity_bridge,
            currency_amount,
            Error::TransferFailed,
        )?;

        let shares = bridge.add_liquidity(
            &env.current_contract_address(),
            &pool_id,
            &token_amount,
            &currency_amount,
            &config.min_liquidity_out,
        );

        state.liquidity_shares = shares;
        Self::save_state(env, state);

        env.events().publish(
            (Symbol::new(env, "liquidity_locked"), pool_id),
            LiquidityLockedEvent {
                pool_id,
                token_amount,
                currency_amount,
                shares,
            },
        );

        Ok(())
    }

    /// Settle one address with a non-zero contribution
    fn settle_account(
        env: &Env,
        config: &SaleConfig,
        state: &mut SaleState,
        account: &Address,
    ) -> Result<i128, Error> {
        let contribution = Self::contribution_of(env.clone(), account.clone());

        // Zero the contribution before anything leaves the contract
        env.storage()
            .persistent()
            .remove(&DataKey::Contribution(account.clone()));
        state.settled_tokens = state
            .settled_tokens
            .checked_add(contribution)
            .ok_or(Error::InvalidAmount)?;
        Self::save_state(env, state);

        match state.outcome {
            SaleOutcome::Success => {
                let (immediate, vested) = split_claim(contribution);

                if immediate > 0 {
                    Self::pay(env, &config.token, account, immediate, Error::TransferFailed)?;
                }

                Self::pay(env, &config.token, &config.vesting_engine, vested, Error::TransferFailed)?;
                let schedule_id = VestingClient::new(env, &config.vesting_engine).create_schedule(
                    &env.current_contract_address(),
                    account,
                    &env.ledger().timestamp(),
                    &PUBLIC_CLIFF_COUNT,
                    &DurationUnit::Weeks,
                    &vested,
                );

                env.events().publish(
                    (Symbol::new(env, "claimed"), account.clone()),
                    ClaimedEvent {
                        beneficiary: account.clone(),
                        immediate_amount: immediate,
                        vested_amount: vested,
                        schedule_id,
                    },
                );

                Ok(immediate)
            }
            _ => {
                let refund = refund_for_tokens(contribution, config.price_per_token)
                    .ok_or(Error::InvalidAmount)?;

                if refund > 0 {
                    Self::pay(env, &config.currency, account, refund, Error::RefundFailed)?;
                }

                env.events().publish(
                    (Symbol::new(env, "refunded"), account.clone()),
                    RefundedEvent {
                        beneficiary: account.clone(),
                        currency_amount: refund,
                    },
                );

                Ok(refund)
            }
        }
    }
}
