use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // POOL ERRORS (20-29)
    // ============================================
    /// Pool not found
    PoolNotFound = 20,
    /// The token pair already has a pool
    PoolExists = 21,
    /// Both sides of the pair are the same token
    InvalidPair = 22,

    // ============================================
    // BALANCE ERRORS (30-39)
    // ============================================
    /// Holder owns fewer LP shares than requested
    InsufficientBalance = 30,
    /// Amount must be positive
    InvalidAmount = 31,
    /// Deposit was not pushed to the pool before the call
    InsufficientDeposit = 32,
    /// Deposit would mint fewer shares than the caller's minimum
    SlippageExceeded = 33,
}
