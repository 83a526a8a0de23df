use super::*;
use crate::storage::{SECONDS_PER_DAY, SECONDS_PER_MONTH, SECONDS_PER_WEEK};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env,
};

const SCALE: i128 = 10_000_000;
const START: u64 = 1_000_000;

struct Setup<'a> {
    env: Env,
    engine: VestingEngineClient<'a>,
    token: token::Client<'a>,
    token_admin: token::StellarAssetClient<'a>,
    funder: Address,
}

fn setup<'a>() -> Setup<'a> {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START);

    let issuer = Address::generate(&env);
    let token_id = env.register_stellar_asset_contract_v2(issuer).address();

    let admin = Address::generate(&env);
    let engine_id = env.register(VestingEngine, ());
    let engine = VestingEngineClient::new(&env, &engine_id);
    engine.initialize(&admin, &token_id);

    let funder = Address::generate(&env);
    let token_admin = token::StellarAssetClient::new(&env, &token_id);
    token_admin.mint(&funder, &(1_000_000 * SCALE));

    Setup {
        token: token::Client::new(&env, &token_id),
        token_admin,
        engine,
        funder,
        env,
    }
}

fn fund(s: &Setup, amount: i128) {
    s.token.transfer(&s.funder, &s.engine.address, &amount);
}

#[test]
fn test_initialize_once() {
    let s = setup();
    let admin = Address::generate(&s.env);
    let result = s.engine.try_initialize(&admin, &s.token.address);
    assert_eq!(result, Err(Ok(Error::AlreadyInitialized)));
}

#[test]
fn test_initialize_requires_admin_auth() {
    let env = Env::default();
    let admin = Address::generate(&env);
    let token_id = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let engine = VestingEngineClient::new(&env, &env.register(VestingEngine, ()));

    // No auth mocked: the admin signature is missing
    assert!(engine.try_initialize(&admin, &token_id).is_err());
    assert_eq!(engine.try_token(), Err(Ok(Error::NotInitialized)));

    env.mock_all_auths();
    engine.initialize(&admin, &token_id);
    assert_eq!(engine.admin(), admin);
    assert_eq!(engine.token(), token_id);
}

#[test]
fn test_create_requires_escrow() {
    let s = setup();
    let beneficiary = Address::generate(&s.env);

    let result = s.engine.try_create_schedule(
        &s.funder,
        &beneficiary,
        &START,
        &3,
        &DurationUnit::Weeks,
        &(100 * SCALE),
    );
    assert_eq!(result, Err(Ok(Error::InsufficientEscrow)));

    fund(&s, 100 * SCALE);
    let id = s.engine.create_schedule(
        &s.funder,
        &beneficiary,
        &START,
        &3,
        &DurationUnit::Weeks,
        &(100 * SCALE),
    );
    assert_eq!(id, 1);
    assert_eq!(s.engine.locked_total(), 100 * SCALE);

    // Same escrow cannot back a second schedule
    let result = s.engine.try_create_schedule(
        &s.funder,
        &beneficiary,
        &START,
        &3,
        &DurationUnit::Weeks,
        &(1 * SCALE),
    );
    assert_eq!(result, Err(Ok(Error::InsufficientEscrow)));
}

#[test]
fn test_create_rejects_zero_amount() {
    let s = setup();
    let beneficiary = Address::generate(&s.env);

    let result = s.engine.try_create_schedule(
        &s.funder,
        &beneficiary,
        &START,
        &3,
        &DurationUnit::Weeks,
        &0,
    );
    assert_eq!(result, Err(Ok(Error::InvalidAmount)));
}

#[test]
fn test_release_before_cliff_is_noop() {
    let s = setup();
    let beneficiary = Address::generate(&s.env);
    fund(&s, 90 * SCALE);
    let id = s.engine.create_schedule(
        &s.funder,
        &beneficiary,
        &START,
        &3,
        &DurationUnit::Weeks,
        &(90 * SCALE),
    );

    s.env.ledger().set_timestamp(START + 3 * SECONDS_PER_WEEK - 1);
    assert_eq!(s.engine.release(&beneficiary, &id), 0);
    assert_eq!(s.token.balance(&beneficiary), 0);
    assert_eq!(s.engine.get_schedule(&id).released_amount, 0);
}

#[test]
fn test_release_after_cliff_pays_everything_once() {
    let s = setup();
    let beneficiary = Address::generate(&s.env);
    fund(&s, 90 * SCALE);
    let id = s.engine.create_schedule(
        &s.funder,
        &beneficiary,
        &START,
        &3,
        &DurationUnit::Weeks,
        &(90 * SCALE),
    );

    s.env.ledger().set_timestamp(START + 3 * SECONDS_PER_WEEK);
    assert_eq!(s.engine.release(&beneficiary, &id), 90 * SCALE);
    assert_eq!(s.token.balance(&beneficiary), 90 * SCALE);
    assert_eq!(s.engine.locked_total(), 0);

    // Terminal: further releases pay nothing
    s.env.ledger().set_timestamp(START + 30 * SECONDS_PER_WEEK);
    assert_eq!(s.engine.release(&beneficiary, &id), 0);
    assert_eq!(s.token.balance(&beneficiary), 90 * SCALE);
}

#[test]
fn test_zero_cliff_releases_at_start() {
    let s = setup();
    let beneficiary = Address::generate(&s.env);
    fund(&s, 10 * SCALE);
    let id = s.engine.create_schedule(
        &s.funder,
        &beneficiary,
        &START,
        &0,
        &DurationUnit::Days,
        &(10 * SCALE),
    );

    assert_eq!(s.engine.release(&beneficiary, &id), 10 * SCALE);
}

#[test]
fn test_linear_release_is_monotone_and_bounded() {
    let s = setup();
    let beneficiary = Address::generate(&s.env);
    let total = 1_200 * SCALE;
    fund(&s, total);
    let id = s.engine.create_linear_schedule(
        &s.funder,
        &beneficiary,
        &START,
        &2,
        &4,
        &DurationUnit::Months,
        &total,
    );

    let mut last_released = 0;
    for month in 0..10u64 {
        s.env.ledger().set_timestamp(START + month * SECONDS_PER_MONTH);
        s.engine.release(&beneficiary, &id);

        let schedule = s.engine.get_schedule(&id);
        assert!(schedule.released_amount >= last_released);
        assert!(schedule.released_amount <= total);
        last_released = schedule.released_amount;
    }

    assert_eq!(last_released, total);
    assert_eq!(s.token.balance(&beneficiary), total);
}

#[test]
fn test_release_wrong_beneficiary() {
    let s = setup();
    let beneficiary = Address::generate(&s.env);
    let stranger = Address::generate(&s.env);
    fund(&s, 10 * SCALE);
    let id = s.engine.create_schedule(
        &s.funder,
        &beneficiary,
        &START,
        &0,
        &DurationUnit::Days,
        &(10 * SCALE),
    );

    assert_eq!(
        s.engine.try_release(&stranger, &id),
        Err(Ok(Error::InvalidSchedule))
    );
    assert_eq!(
        s.engine.try_release(&beneficiary, &99),
        Err(Ok(Error::InvalidSchedule))
    );
}

#[test]
fn test_release_all_sums_schedules() {
    let s = setup();
    let beneficiary = Address::generate(&s.env);
    fund(&s, 30 * SCALE);

    s.engine.create_schedule(
        &s.funder,
        &beneficiary,
        &START,
        &0,
        &DurationUnit::Days,
        &(10 * SCALE),
    );
    s.engine.create_schedule(
        &s.funder,
        &beneficiary,
        &START,
        &2,
        &DurationUnit::Days,
        &(20 * SCALE),
    );
    assert_eq!(s.engine.schedules_of(&beneficiary).len(), 2);

    assert_eq!(s.engine.release_all(&beneficiary), 10 * SCALE);

    s.env.ledger().set_timestamp(START + 2 * SECONDS_PER_DAY);
    assert_eq!(s.engine.release_all(&beneficiary), 20 * SCALE);
    assert_eq!(s.token.balance(&beneficiary), 30 * SCALE);
}

#[test]
fn test_donations_do_not_break_accounting() {
    let s = setup();
    let beneficiary = Address::generate(&s.env);
    s.token_admin.mint(&s.engine.address, &(5 * SCALE));
    fund(&s, 10 * SCALE);

    let id = s.engine.create_schedule(
        &s.funder,
        &beneficiary,
        &START,
        &0,
        &DurationUnit::Days,
        &(15 * SCALE),
    );
    assert_eq!(s.engine.releasable(&beneficiary, &id), 15 * SCALE);
}
