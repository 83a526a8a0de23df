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
    /// Sale configuration rejected at initialization
    InvalidConfig = 3,

    // ============================================
    // TIMING ERRORS (20-29)
    // ============================================
    /// Sale window has not opened yet
    SaleNotStarted = 20,
    /// Sale window is over
    SaleEnded = 21,
    /// Cannot close: window still open and hard cap not reached
    SaleStillOpen = 22,
    /// Liquidity unlock time not reached
    LiquidityStillLocked = 23,

    // ============================================
    // STATE ERRORS (30-39)
    // ============================================
    /// Sale is closed, no more purchases
    SaleClosed = 30,
    /// Sale was already closed
    AlreadyClosed = 31,
    /// Settlement not available before the sale closes
    SaleNotClosed = 32,
    /// Address has no contribution left to settle
    NothingToClaim = 33,
    /// No liquidity position was locked
    LiquidityNotLocked = 34,
    /// Liquidity position already swept
    LiquidityAlreadyUnlocked = 35,
    /// No surplus tokens held by the sale
    NothingToWithdraw = 36,
    /// Failed sale still owes refunds
    RefundsPending = 37,

    // ============================================
    // AMOUNT ERRORS (40-49)
    // ============================================
    /// Amount must be positive
    InvalidAmount = 40,
    /// Payment converts to zero tokens
    PurchaseTooSmall = 41,

    // ============================================
    // TRANSFER ERRORS (50-59)
    // ============================================
    /// Token transfer out of the sale failed
    TransferFailed = 50,
    /// Currency refund failed
    RefundFailed = 51,

    // ============================================
    // OPERATIONAL ERRORS (60-69)
    // ============================================
    /// Contract is paused
    ContractPaused = 60,
}
