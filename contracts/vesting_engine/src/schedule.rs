use crate::storage::VestingSchedule;

/// Whole units elapsed since `start_time`, zero before it.
pub fn elapsed_units(schedule: &VestingSchedule, now: u64) -> u64 {
    now.saturating_sub(schedule.start_time) / schedule.unit.seconds()
}

/// Cumulative amount vested at `now`
///
/// Formula:
/// - cliff_count == 0: total_amount from start_time on
/// - elapsed < cliff_count: 0
/// - linear_count == 0: total_amount
/// - otherwise: total_amount × min(elapsed - cliff_count, linear_count) / linear_count
///
/// Example:
/// - total: 1,200, cliff: 3 weeks, linear: 4 weeks
/// - week 2: 0
/// - week 5: 1,200 × 2 / 4 = 600
/// - week 9: 1,200
pub fn vested_amount(schedule: &VestingSchedule, now: u64) -> Option<i128> {
    if schedule.cliff_count == 0 {
        return if now >= schedule.start_time {
            Some(schedule.total_amount)
        } else {
            Some(0)
        };
    }

    let elapsed = elapsed_units(schedule, now);
    let cliff = schedule.cliff_count as u64;
    if elapsed < cliff {
        return Some(0);
    }

    if schedule.linear_count == 0 {
        return Some(schedule.total_amount);
    }

    let linear = schedule.linear_count as u64;
    let vested_units = (elapsed - cliff).min(linear);

    schedule
        .total_amount
        .checked_mul(vested_units as i128)?
        .checked_div(linear as i128)
}

/// Amount that a release at `now` would pay out
pub fn releasable_amount(schedule: &VestingSchedule, now: u64) -> Option<i128> {
    if schedule.is_complete() {
        return Some(0);
    }

    let vested = vested_amount(schedule, now)?;
    Some(vested.saturating_sub(schedule.released_amount).max(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{DurationUnit, SECONDS_PER_DAY, SECONDS_PER_WEEK};
    use soroban_sdk::{testutils::Address as _, Address, Env};

    fn schedule(env: &Env, cliff_count: u32, linear_count: u32, unit: DurationUnit) -> VestingSchedule {
        VestingSchedule {
            id: 1,
            beneficiary: Address::generate(env),
            total_amount: 1_200,
            start_time: 1_000,
            cliff_count,
            linear_count,
            unit,
            released_amount: 0,
        }
    }

    #[test]
    fn test_nothing_before_cliff() {
        let env = Env::default();
        let s = schedule(&env, 3, 0, DurationUnit::Weeks);

        assert_eq!(vested_amount(&s, 0), Some(0));
        assert_eq!(vested_amount(&s, 1_000), Some(0));
        assert_eq!(vested_amount(&s, 1_000 + 3 * SECONDS_PER_WEEK - 1), Some(0));
    }

    #[test]
    fn test_everything_at_cliff() {
        let env = Env::default();
        let s = schedule(&env, 3, 0, DurationUnit::Weeks);

        assert_eq!(vested_amount(&s, 1_000 + 3 * SECONDS_PER_WEEK), Some(1_200));
        assert_eq!(vested_amount(&s, 1_000 + 50 * SECONDS_PER_WEEK), Some(1_200));
    }

    #[test]
    fn test_zero_cliff_is_instant() {
        let env = Env::default();
        let s = schedule(&env, 0, 0, DurationUnit::Days);

        assert_eq!(vested_amount(&s, 999), Some(0));
        assert_eq!(vested_amount(&s, 1_000), Some(1_200));
    }

    #[test]
    fn test_linear_tail() {
        let env = Env::default();
        let s = schedule(&env, 3, 4, DurationUnit::Weeks);

        assert_eq!(vested_amount(&s, 1_000 + 3 * SECONDS_PER_WEEK), Some(0));
        assert_eq!(vested_amount(&s, 1_000 + 4 * SECONDS_PER_WEEK), Some(300));
        assert_eq!(vested_amount(&s, 1_000 + 5 * SECONDS_PER_WEEK), Some(600));
        assert_eq!(vested_amount(&s, 1_000 + 7 * SECONDS_PER_WEEK), Some(1_200));
        assert_eq!(vested_amount(&s, 1_000 + 70 * SECONDS_PER_WEEK), Some(1_200));
    }

    #[test]
    fn test_partial_units_round_down() {
        let env = Env::default();
        let s = schedule(&env, 1, 2, DurationUnit::Days);

        // 2.5 days elapsed → 2 whole units → 1 unit past the cliff
        let now = 1_000 + 2 * SECONDS_PER_DAY + SECONDS_PER_DAY / 2;
        assert_eq!(vested_amount(&s, now), Some(600));
    }

    #[test]
    fn test_releasable_subtracts_released() {
        let env = Env::default();
        let mut s = schedule(&env, 3, 4, DurationUnit::Weeks);
        s.released_amount = 300;

        let now = 1_000 + 5 * SECONDS_PER_WEEK;
        assert_eq!(releasable_amount(&s, now), Some(300));

        s.released_amount = 1_200;
        assert_eq!(releasable_amount(&s, now), Some(0));
    }
}
