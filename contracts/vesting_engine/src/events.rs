use soroban_sdk::{contracttype, Address};

use crate::storage::DurationUnit;

#[contracttype]
#[derive(Clone, Debug)]
pub struct ScheduleCreatedEvent {
    pub schedule_id: u64,
    pub beneficiary: Address,
    pub total_amount: i128,
    pub start_time: u64,
    pub cliff_count: u32,
    pub linear_count: u32,
    pub unit: DurationUnit,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ReleasedEvent {
    pub schedule_id: u64,
    pub beneficiary: Address,
    pub amount: i128,
    pub released_total: i128,
}
