#![no_std]

mod error;
mod events;
mod schedule;
mod storage;

#[cfg(test)]
mod test;

pub use error::Error;
pub use storage::{DurationUnit, VestingSchedule};

use events::*;
use schedule::releasable_amount;
use storage::DataKey;

use soroban_sdk::{contract, contractimpl, token, Address, Env, Symbol, Vec};

#[contract]
pub struct VestingEngine;

#[contractimpl]
impl VestingEngine {
    // ============================================
    // INITIALIZATION
    // ============================================

    /// Bind the engine to the token it holds in custody
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, admin: Address, token: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Token, &token);
        env.storage().instance().set(&DataKey::ScheduleCounter, &0u64);
        env.storage().instance().set(&DataKey::LockedTotal, &0i128);

        Ok(())
    }

    // ============================================
    // SCHEDULE CREATION
    // ============================================

    /// Create a cliff schedule: nothing before `cliff_count` units, everything after.
    /// `cliff_count == 0` makes the whole amount releasable at `start_time`.
    ///
    /// The funder must have moved `total_amount` into this contract beforehand.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: total_amount must be positive
    /// - `InsufficientEscrow`: Unlocked custody balance is below total_amount
    pub fn create_schedule(
        env: Env,
        funder: Address,
        beneficiary: Address,
        start_time: u64,
        cliff_count: u32,
        unit: DurationUnit,
        total_amount: i128,
    ) -> Result<u64, Error> {
        Self::create(
            &env,
            funder,
            beneficiary,
            start_time,
            cliff_count,
            0,
            unit,
            total_amount,
        )
    }

    /// Create a schedule that releases linearly over `linear_count` units once
    /// the cliff has passed.
    ///
    /// # Errors
    /// Same as `create_schedule`.
    pub fn create_linear_schedule(
        env: Env,
        funder: Address,
        beneficiary: Address,
        start_time: u64,
        cliff_count: u32,
        linear_count: u32,
        unit: DurationUnit,
        total_amount: i128,
    ) -> Result<u64, Error> {
        Self::create(
            &env,
            funder,
            beneficiary,
            start_time,
            cliff_count,
            linear_count,
            unit,
            total_amount,
        )
    }

    // ============================================
    // RELEASE
    // ============================================

    /// Pay out whatever has vested on a schedule since the last release.
    /// Anyone may call; nothing releasable returns 0.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidSchedule`: Unknown schedule or wrong beneficiary
    /// - `TransferFailed`: Token transfer reverted
    pub fn release(env: Env, beneficiary: Address, schedule_id: u64) -> Result<i128, Error> {
        let token = Self::token(env.clone())?;
        Self::release_one(&env, &token, &beneficiary, schedule_id)
    }

    /// Release every schedule held by `beneficiary`, returning the total paid
    ///
    /// # Errors
    /// Same as `release`.
    pub fn release_all(env: Env, beneficiary: Address) -> Result<i128, Error> {
        let token = Self::token(env.clone())?;

        let mut total: i128 = 0;
        for schedule_id in Self::schedules_of(env.clone(), beneficiary.clone()).iter() {
            let released = Self::release_one(&env, &token, &beneficiary, schedule_id)?;
            total = total.checked_add(released).ok_or(Error::InvalidAmount)?;
        }

        Ok(total)
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn get_schedule(env: Env, schedule_id: u64) -> Result<VestingSchedule, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Schedule(schedule_id))
            .ok_or(Error::InvalidSchedule)
    }

    pub fn schedules_of(env: Env, beneficiary: Address) -> Vec<u64> {
        env.storage()
            .persistent()
            .get(&DataKey::BeneficiarySchedules(beneficiary))
            .unwrap_or(Vec::new(&env))
    }

    /// Amount a release would pay right now
    pub fn releasable(env: Env, beneficiary: Address, schedule_id: u64) -> Result<i128, Error> {
        let schedule = Self::owned_schedule(&env, &beneficiary, schedule_id)?;
        releasable_amount(&schedule, env.ledger().timestamp()).ok_or(Error::InvalidAmount)
    }

    /// Tokens still owed to beneficiaries across all schedules
    pub fn locked_total(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::LockedTotal)
            .unwrap_or(0)
    }

    pub fn admin(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    pub fn token(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Token)
            .ok_or(Error::NotInitialized)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn create(
        env: &Env,
        funder: Address,
        beneficiary: Address,
        start_time: u64,
        cliff_count: u32,
        linear_count: u32,
        unit: DurationUnit,
        total_amount: i128,
    ) -> Result<u64, Error> {
        let token = Self::token(env.clone())?;

        if total_amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        funder.require_auth();

        // Custody must already cover every open schedule plus this one
        let locked = Self::locked_total(env.clone());
        let custody = token::Client::new(env, &token).balance(&env.current_contract_address());
        let new_locked = locked
            .checked_add(total_amount)
            .ok_or(Error::InvalidAmount)?;
        if custody < new_locked {
            return Err(Error::InsufficientEscrow);
        }

        let schedule_id: u64 = env
            .storage()
            .instance()
            .get(&DataKey::ScheduleCounter)
            .unwrap_or(0);
        let new_schedule_id = schedule_id + 1;

        let schedule = VestingSchedule {
            id: new_schedule_id,
            beneficiary: beneficiary.clone(),
            total_amount,
            start_time,
            cliff_count,
            linear_count,
            unit,
            released_amount: 0,
        };

        let mut ids = Self::schedules_of(env.clone(), beneficiary.clone());
        ids.push_back(new_schedule_id);

        env.storage()
            .persistent()
            .set(&DataKey::Schedule(new_schedule_id), &schedule);
        env.storage()
            .persistent()
            .set(&DataKey::BeneficiarySchedules(beneficiary.clone()), &ids);
        env.storage()
            .instance()
            .set(&DataKey::ScheduleCounter, &new_schedule_id);
        env.storage()
            .instance()
            .set(&DataKey::LockedTotal, &new_locked);

        env.events().publish(
            (Symbol::new(env, "schedule_created"), beneficiary.clone()),
            ScheduleCreatedEvent {
                schedule_id: new_schedule_id,
                beneficiary,
                total_amount,
                start_time,
                cliff_count,
                linear_count,
                unit,
            },
        );

        Ok(new_schedule_id)
    }

    fn owned_schedule(
        env: &Env,
        beneficiary: &Address,
        schedule_id: u64,
    ) -> Result<VestingSchedule, Error> {
        let schedule = Self::get_schedule(env.clone(), schedule_id)?;
        if &schedule.beneficiary != beneficiary {
            return Err(Error::InvalidSchedule);
        }
        Ok(schedule)
    }

    fn release_one(
        env: &Env,
        token: &Address,
        beneficiary: &Address,
        schedule_id: u64,
    ) -> Result<i128, Error> {
        let mut schedule = Self::owned_schedule(env, beneficiary, schedule_id)?;

        let releasable =
            releasable_amount(&schedule, env.ledger().timestamp()).ok_or(Error::InvalidAmount)?;
        if releasable == 0 {
            return Ok(0);
        }

        // Book the release before paying out
        schedule.released_amount = schedule
            .released_amount
            .checked_add(releasable)
            .ok_or(Error::InvalidAmount)?;
        let locked = Self::locked_total(env.clone())
            .checked_sub(releasable)
            .ok_or(Error::InvalidAmount)?;

        env.storage()
            .persistent()
            .set(&DataKey::Schedule(schedule_id), &schedule);
        env.storage().instance().set(&DataKey::LockedTotal, &locked);

        let token_client = token::Client::new(env, token);
        match token_client.try_transfer(&env.current_contract_address(), beneficiary, &releasable) {
            Ok(Ok(())) => {}
            _ => return Err(Error::TransferFailed),
        }

        env.events().publish(
            (Symbol::new(env, "released"), schedule_id),
            ReleasedEvent {
                schedule_id,
                beneficiary: beneficiary.clone(),
                amount: releasable,
                released_total: schedule.released_amount,
            },
        );

        Ok(releasable)
    }
}
