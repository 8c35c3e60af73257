/// HousePool — per-asset custodial bankroll with off-chain balance
/// reconciliation.
///
/// Liquidity providers stake into a shared bankroll and earn a pro-rata cut
/// of house revenue through a 1e12-scaled reward accumulator. Trusted
/// operators settle wagers and publish nonce-ordered balance updates; users
/// withdraw against the freshest published balance.
///
/// 14 instructions:
///   initialize_pool     — create the pool for one asset mint (creator = admin)
///   provide_liquidity   — stake into the bankroll, receive shares
///   remove_liquidity    — burn shares, withdraw pro-rata custody
///   harvest_rewards     — claim accrued LP rewards
///   deposit             — user deposit: custody in, balance credited
///   withdraw            — user withdrawal against a fresh published balance
///   publish_balance     — operator balance update (strictly increasing nonce)
///   publish_balances    — batched variant, all-or-nothing
///   settle_wager        — operator applies a wager outcome atomically
///   set_paused          — admin gate over deposits/withdrawals/adds/settlement
///   add_operator        — admin: extend the trusted operator set
///   remove_operator     — admin: shrink the trusted operator set
///   update_fees         — admin: re-configure fees under hard caps
///   emergency_drain     — admin, paused-only: move the vault out, zero the pool

// ─── Security contact ─────────────────────────────────────────────────────────

use solana_security_txt::security_txt;

#[cfg(not(feature = "no-entrypoint"))]
security_txt! {
    name:             "HousePool",
    project_url:      "https://github.com/house-pool/house-pool",
    contacts:         "email:security@housepool.dev",
    policy:           "Please report security vulnerabilities by emailing security@housepool.dev. \
                       We aim to respond within 48 hours.",
    source_code:      "https://github.com/house-pool/house-pool",
    preferred_languages: "en"
}

// ─── Capability card ──────────────────────────────────────────────────────────
//
// Machine-readable description of the operator/LP surface. Off-chain
// publisher and settlement processes read this constant (or the Anchor IDL)
// to discover the fee model and the oracle contract.

/// Machine-readable capability description for operator tooling.
pub const HOUSE_CAPABILITY_CARD: &str = r#"{
  "name": "HousePool",
  "version": "0.1.0",
  "description": "Per-asset custodial bankroll on Solana. Share-based LP accounting with accumulator reward distribution, a nonce-gated off-chain balance oracle with slot expiry, and operator-settled wagers.",
  "programId": "4ZAwemu4ZWouMfny7bJ97T1nEAnKVz4kBLeBipHcPZog",
  "network": "solana",
  "sdks": {
    "rust": "house-pool-sdk"
  },
  "feeModel": {
    "platformFeeBps": 250,
    "platformFeeMaxBps": 1000,
    "lpFeeBps": 200,
    "platformRakeBps": 100,
    "note": "platform fee on liquidity add/remove and harvests; lp_fee + rake carved from every settled wager amount"
  },
  "oracle": {
    "nonce": "strictly increasing per user; stale or replayed nonces rejected",
    "expirySlots": 9000,
    "freshness": "withdrawals require now - last_update_slot <= expirySlots (inclusive)"
  },
  "skills": [
    { "id": "provide_liquidity", "tags": ["bankroll", "lp"] },
    { "id": "remove_liquidity",  "tags": ["bankroll", "lp"], "note": "available while paused" },
    { "id": "harvest_rewards",   "tags": ["bankroll", "lp", "rewards"] },
    { "id": "deposit",           "tags": ["user", "custody"] },
    { "id": "withdraw",          "tags": ["user", "custody", "oracle-gated"] },
    { "id": "publish_balance",   "tags": ["operator", "oracle"] },
    { "id": "publish_balances",  "tags": ["operator", "oracle", "batch", "all-or-nothing"] },
    { "id": "settle_wager",      "tags": ["operator", "settlement"] }
  ]
}"#;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;

use anchor_lang::prelude::*;
pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("4ZAwemu4ZWouMfny7bJ97T1nEAnKVz4kBLeBipHcPZog");

#[program]
pub mod house_pool {
    use super::*;

    /// Create the custodial pool for one asset mint. Creator becomes admin.
    pub fn initialize_pool(
        ctx: Context<InitializePool>,
        platform_fee_bps: u16,
        lp_fee_bps: u16,
        platform_rake_bps: u16,
    ) -> Result<()> {
        initialize_pool::handler(ctx, platform_fee_bps, lp_fee_bps, platform_rake_bps)
    }

    /// Stake into the bankroll. Net of the platform fee; shares at the
    /// current custody/share ratio (1:1 bootstrap).
    pub fn provide_liquidity(ctx: Context<ProvideLiquidity>, amount: u64) -> Result<()> {
        provide_liquidity::handler(ctx, amount)
    }

    /// Burn shares and withdraw pro-rata custody. Works while paused.
    pub fn remove_liquidity(ctx: Context<RemoveLiquidity>, share_amount: u64) -> Result<()> {
        remove_liquidity::handler(ctx, share_amount)
    }

    /// Claim accrued LP rewards. No-op when nothing is pending.
    pub fn harvest_rewards(ctx: Context<HarvestRewards>) -> Result<()> {
        harvest_rewards::handler(ctx)
    }

    /// User deposit: tokens into custody, off-chain balance credited.
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        deposit::handler(ctx, amount)
    }

    /// User withdrawal, authorized by published balance + freshness window.
    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        withdraw::handler(ctx, amount)
    }

    /// Operator publishes one user's off-chain balance under a strictly
    /// increasing nonce.
    pub fn publish_balance(
        ctx: Context<PublishBalance>,
        user: Pubkey,
        new_balance: u64,
        new_nonce: u64,
    ) -> Result<()> {
        publish_balance::handler(ctx, user, new_balance, new_nonce)
    }

    /// Batched balance publication; any invalid entry aborts the batch.
    pub fn publish_balances<'info>(
        ctx: Context<'_, '_, 'info, 'info, PublishBalances<'info>>,
        updates: Vec<BalanceUpdate>,
    ) -> Result<()> {
        publish_balance::handler_batch(ctx, updates)
    }

    /// Operator applies a wager outcome: debit the bet, split fees,
    /// credit net winnings, update custody and LP rewards — atomically.
    pub fn settle_wager(
        ctx: Context<SettleWager>,
        bet_amount: u64,
        win_amount: u64,
    ) -> Result<()> {
        settle_wager::handler(ctx, bet_amount, win_amount)
    }

    /// Admin: flip the operational pause gate.
    pub fn set_paused(ctx: Context<SetPaused>, paused: bool) -> Result<()> {
        set_paused::handler(ctx, paused)
    }

    /// Admin: add a trusted operator.
    pub fn add_operator(ctx: Context<UpdateOperators>, operator: Pubkey) -> Result<()> {
        update_operators::handler_add(ctx, operator)
    }

    /// Admin: remove a trusted operator.
    pub fn remove_operator(ctx: Context<UpdateOperators>, operator: Pubkey) -> Result<()> {
        update_operators::handler_remove(ctx, operator)
    }

    /// Admin: re-configure fees under the hard caps.
    pub fn update_fees(
        ctx: Context<UpdateFees>,
        platform_fee_bps: u16,
        lp_fee_bps: u16,
        platform_rake_bps: u16,
    ) -> Result<()> {
        update_fees::handler(ctx, platform_fee_bps, lp_fee_bps, platform_rake_bps)
    }

    /// Admin, paused-only: drain the vault to the treasury and zero all
    /// pool accounting. Irreversible.
    pub fn emergency_drain(ctx: Context<EmergencyDrain>) -> Result<()> {
        emergency_drain::handler(ctx)
    }
}
