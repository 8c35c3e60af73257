use anchor_lang::prelude::*;

#[error_code]
pub enum HouseError {
    #[msg("Caller is not an operator or administrator of this pool")]
    NotAuthorized,
    #[msg("Amount must be greater than zero")]
    InvalidAmount,
    #[msg("Deposit too small — rounds to zero shares")]
    SharesTooSmall,
    #[msg("Position holds fewer shares than requested")]
    InsufficientShares,
    #[msg("Pool custody cannot cover this payout")]
    InsufficientBalance,
    #[msg("Requested amount exceeds the published off-chain balance")]
    ExceedsBalance,
    #[msg("Published balance is older than the freshness window")]
    StaleBalance,
    #[msg("Balance nonce must be strictly greater than the stored nonce")]
    InvalidNonce,
    #[msg("Pool is paused")]
    OperationPaused,
    #[msg("Pool must be paused first")]
    NotPaused,
    #[msg("Operator set is full")]
    OperatorSetFull,
    #[msg("Identity is not in the operator set")]
    OperatorNotFound,
    #[msg("Fee rate exceeds the hard cap")]
    InvalidFeeRate,
    #[msg("Batch entries do not match the accounts supplied")]
    BatchMismatch,
    #[msg("Re-entrant call rejected")]
    ReentrantCall,
    #[msg("Math overflow")]
    MathOverflow,
}
