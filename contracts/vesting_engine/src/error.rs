use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-5)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,

    // ============================================
    // SCHEDULE ERRORS (20-29)
    // ============================================
    /// Schedule id unknown, or it belongs to another beneficiary
    InvalidSchedule = 20,

    // ============================================
    // AMOUNT ERRORS (30-39)
    // ============================================
    /// Amount must be positive
    InvalidAmount = 30,
    /// Engine custody does not cover the new schedule
    InsufficientEscrow = 31,

    // ============================================
    // TRANSFER ERRORS (40-49)
    // ============================================
    /// Token transfer to the beneficiary failed
    TransferFailed = 40,
}
