//! SDK error type.

use solana_sdk::pubkey::Pubkey;

/// All errors returned by the HousePool SDK.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ── RPC / network ────────────────────────────────────────────────────────
    /// A Solana JSON-RPC call failed.
    #[error("RPC error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),

    // ── Account discovery ────────────────────────────────────────────────────
    /// No pool exists for the given asset mint.
    #[error("Pool not found for mint {0}")]
    PoolNotFound(Pubkey),

    /// The owner has no position in this pool.
    #[error("Position not found for owner {0}")]
    PositionNotFound(Pubkey),

    /// The user has never deposited into this pool.
    #[error("User account not found for {0}")]
    UserAccountNotFound(Pubkey),

    // ── Preflight checks ─────────────────────────────────────────────────────
    /// A withdrawal preflight detected a balance older than the expiry window.
    #[error("Published balance is stale: {age_slots} slots old, window is {window} slots")]
    StaleBalance { age_slots: u64, window: u64 },

    /// A preflight detected the requested amount exceeds the published balance.
    #[error("Requested {requested} exceeds published balance {balance}")]
    ExceedsBalance { requested: u64, balance: u64 },

    /// A publication preflight detected a nonce at or below the stored one.
    #[error("Nonce {proposed} does not exceed stored nonce {stored}")]
    InvalidNonce { stored: u64, proposed: u64 },

    // ── Arithmetic ───────────────────────────────────────────────────────────
    #[error("Integer overflow in share / reward math")]
    MathOverflow,

    // ── Account parsing ──────────────────────────────────────────────────────
    /// Raw account bytes could not be deserialized.
    #[error("Account parse error at offset {offset}: {reason}")]
    ParseError { offset: usize, reason: String },

    // ── Validation ───────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience alias so every module can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;
