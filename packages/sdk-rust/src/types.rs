//! Public parameter and result types.

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

// ─── Oracle updates ───────────────────────────────────────────────────────────

/// One entry of a batched balance publication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceUpdate {
    pub owner:   Pubkey,
    pub balance: u64,
    /// Must be strictly greater than the on-chain nonce for this user.
    pub nonce:   u64,
}

// ─── Previews (off-chain math, no transaction) ────────────────────────────────

/// What a `provide_liquidity` call would do at current pool state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProvidePreview {
    /// Platform fee skimmed off the top.
    pub fee:    u64,
    /// Amount actually entering custody.
    pub net:    u64,
    /// Shares that would be minted.
    pub shares: u64,
}

/// Preflight result for a withdrawal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WithdrawPreview {
    pub amount:            u64,
    pub remaining_balance: u64,
    /// Age of the published balance at preview time, in slots.
    pub age_slots:         u64,
}

/// Fee breakdown of a wager settlement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SettlePreview {
    pub bet_amount:   u64,
    pub win_amount:   u64,
    /// Share of the settled amount routed to LP rewards.
    pub lp_fee:       u64,
    /// Share of the settled amount raked to the treasury.
    pub platform_fee: u64,
    /// Amount that moves custody (loss) or the user balance (win).
    pub net:          u64,
    /// Projected `total_custody` after settlement (signed for visibility —
    /// a negative value means the settlement would be rejected on-chain).
    pub custody_after: i128,
}

// ─── Read-side views ──────────────────────────────────────────────────────────

/// Snapshot of a pool, enriched with the vault's actual token balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolInfo {
    pub address:              Pubkey,
    pub token_mint:           Pubkey,
    pub total_custody:        u64,
    pub total_shares:         u64,
    /// Tokens physically held by the vault (custody + undistributed rewards).
    pub vault_balance:        u64,
    pub accumulated_fees:     u64,
    pub platform_fee_bps:     u16,
    pub lp_fee_bps:           u16,
    pub platform_rake_bps:    u16,
    pub paused:               bool,
    pub operators:            Vec<Pubkey>,
}

/// Snapshot of an LP position, with current redemption value and pending
/// rewards computed off-chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionInfo {
    pub address:         Pubkey,
    pub owner:           Pubkey,
    pub pool:            Pubkey,
    pub shares:          u64,
    /// Tokens these shares redeem for right now (before the removal fee).
    pub redeemable:      u64,
    pub pending_rewards: u64,
}

/// Snapshot of a user's published off-chain balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccountInfo {
    pub address:          Pubkey,
    pub owner:            Pubkey,
    pub pool:             Pubkey,
    pub balance:          u64,
    pub nonce:            u64,
    pub last_update_slot: u64,
    /// Slots since the last publication, at query time.
    pub age_slots:        u64,
    /// Whether a withdrawal would pass the freshness gate right now.
    pub fresh:            bool,
}

// ─── Transaction results ──────────────────────────────────────────────────────

/// Outcome of a submitted transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxResult {
    pub signature: String,
}
