use soroban_sdk::{contracttype, Address};

// Seconds per duration unit. Months are a fixed 30 days, not calendar months.
pub const SECONDS_PER_DAY: u64 = 86_400;
pub const SECONDS_PER_WEEK: u64 = 7 * SECONDS_PER_DAY;
pub const SECONDS_PER_MONTH: u64 = 30 * SECONDS_PER_DAY;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DurationUnit {
    Days = 0,
    Weeks = 1,
    Months = 2,
}

impl DurationUnit {
    pub fn seconds(&self) -> u64 {
        match self {
            DurationUnit::Days => SECONDS_PER_DAY,
            DurationUnit::Weeks => SECONDS_PER_WEEK,
            DurationUnit::Months => SECONDS_PER_MONTH,
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingSchedule {
    /// Unique schedule ID
    pub id: u64,
    /// Address receiving released tokens
    pub beneficiary: Address,
    /// Tokens escrowed for this schedule
    pub total_amount: i128,
    /// Timestamp the cliff is counted from
    pub start_time: u64,
    /// Units before the first release (0 = releasable at start_time)
    pub cliff_count: u32,
    /// Units of linear release after the cliff (0 = everything at the cliff)
    pub linear_count: u32,
    pub unit: DurationUnit,
    /// Tokens already paid out, never above total_amount
    pub released_amount: i128,
}

impl VestingSchedule {
    pub fn is_complete(&self) -> bool {
        self.released_amount >= self.total_amount
    }
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Admin,
    Token,
    ScheduleCounter,
    LockedTotal,                    // Σ (total_amount - released_amount)
    Schedule(u64),                  // Schedule ID → VestingSchedule
    BeneficiarySchedules(Address),  // Beneficiary → Vec<u64>
}
