/// PDA seeds
pub const POOL_SEED: &[u8] = b"pool";
pub const POSITION_SEED: &[u8] = b"position";
pub const USER_ACCOUNT_SEED: &[u8] = b"user_account";
pub const POOL_AUTHORITY_SEED: &[u8] = b"pool_authority";
pub const TREASURY_SEED: &[u8] = b"treasury";

/// Denominator for basis-point math (u128 to avoid up-cast noise)
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Platform fee on liquidity add/remove and reward harvests: 2.5 %
pub const PLATFORM_FEE_DEFAULT_BPS: u16 = 250;
/// Hard cap on the platform fee: 10 %
pub const PLATFORM_FEE_MAX_BPS: u16 = 1_000;

/// Default settlement split: 2 % of every wager outcome to LPs…
pub const LP_FEE_DEFAULT_BPS: u16 = 200;
/// …and 1 % to the platform treasury.
pub const PLATFORM_RAKE_DEFAULT_BPS: u16 = 100;
/// Hard cap on lp_fee_bps + platform_rake_bps combined
pub const SETTLEMENT_FEE_MAX_BPS: u16 = 1_000;

/// Reward accumulator scale (decimal 1e12 fixed-point).
///
/// A fee of f against s outstanding shares credits f * ACC_SCALE / s to the
/// accumulator; once s exceeds f * ACC_SCALE the credit truncates to zero
/// and the fee survives only as rounding dust in accumulated_fees.
/// See reward_math tests for the boundary.
pub const ACC_SCALE: u128 = 1_000_000_000_000;

/// How long a published balance can authorize withdrawals, in slots.
/// ~1 hour at 400 ms slots. Boundary-inclusive: an update exactly this old
/// is still fresh.
pub const BALANCE_EXPIRY_SLOTS: u64 = 9_000;

/// Capacity of the trusted operator set stored in the pool
pub const MAX_OPERATORS: usize = 8;

/// Upper bound on entries in one batched balance publication
pub const MAX_BATCH_UPDATES: usize = 24;
