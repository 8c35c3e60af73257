//! Fee constants and preview math.
//!
//! Mirrors the on-chain arithmetic exactly so off-chain estimates match
//! on-chain results: truncating division everywhere, 1e12 accumulator scale,
//! divide-first accumulator deltas.

use crate::error::{Error, Result};
use crate::state::{PoolState, PositionState, UserAccountState};
use crate::types::{ProvidePreview, SettlePreview, WithdrawPreview};

// ─── Constants ────────────────────────────────────────────────────────────────

/// Basis-point denominator.
pub const BPS_DENOMINATOR: u128 = 10_000;
/// Reward accumulator scale (decimal 1e12 fixed-point).
pub const ACC_SCALE: u128 = 1_000_000_000_000;
/// Freshness window for published balances, in slots.
pub const BALANCE_EXPIRY_SLOTS: u64 = 9_000;

/// `amount * bps / 10_000`, truncating — identical to the on-chain fee math.
pub fn bps_fee(amount: u64, bps: u16) -> u64 {
    ((amount as u128) * (bps as u128) / BPS_DENOMINATOR) as u64
}

// ─── Pending rewards ──────────────────────────────────────────────────────────

/// Rewards a position has accrued since its last interaction.
///
/// Mirrors the on-chain accrual:
/// `pending = shares × acc_reward_per_share / 1e12 − reward_debt`
pub fn pending_rewards_for_position(pos: &PositionState, pool: &PoolState) -> u64 {
    let accrued = (pos.shares as u128)
        .saturating_mul(pool.acc_reward_per_share)
        / ACC_SCALE;
    accrued.saturating_sub(pos.reward_debt) as u64
}

// ─── Previews ─────────────────────────────────────────────────────────────────

/// Shares a `provide_liquidity(amount)` call would mint right now.
pub fn preview_provide(pool: &PoolState, amount: u64) -> Result<ProvidePreview> {
    if amount == 0 {
        return Err(Error::InvalidArgument("amount must be > 0".into()));
    }
    let fee = bps_fee(amount, pool.platform_fee_bps);
    let net = amount - fee;
    let shares = if pool.total_shares == 0 {
        net
    } else {
        if pool.total_custody == 0 {
            return Err(Error::InvalidArgument(
                "pool has outstanding shares but no custody".into(),
            ));
        }
        ((net as u128) * (pool.total_shares as u128) / (pool.total_custody as u128)) as u64
    };
    Ok(ProvidePreview { fee, net, shares })
}

/// Preflight a withdrawal: replicates the on-chain freshness, balance and
/// solvency guards so callers see the same rejection before paying for a
/// transaction.
pub fn preview_withdraw(
    pool: &PoolState,
    account: &UserAccountState,
    amount: u64,
    now_slot: u64,
) -> Result<WithdrawPreview> {
    let age_slots = now_slot.saturating_sub(account.last_update_slot);
    if age_slots > BALANCE_EXPIRY_SLOTS {
        return Err(Error::StaleBalance { age_slots, window: BALANCE_EXPIRY_SLOTS });
    }
    if amount > account.balance {
        return Err(Error::ExceedsBalance { requested: amount, balance: account.balance });
    }
    if amount > pool.total_custody {
        return Err(Error::InvalidArgument(
            "pool custody cannot cover this withdrawal".into(),
        ));
    }
    Ok(WithdrawPreview {
        amount,
        remaining_balance: account.balance - amount,
        age_slots,
    })
}

/// Preflight a balance publication: the program accepts a nonce only if it
/// strictly exceeds the stored one, so an operator replaying an older
/// publication is rejected before paying for the transaction.
pub fn preview_publish(account: &UserAccountState, new_nonce: u64) -> Result<()> {
    if new_nonce <= account.nonce {
        return Err(Error::InvalidNonce { stored: account.nonce, proposed: new_nonce });
    }
    Ok(())
}

/// Fee breakdown of a `settle_wager(bet, win)` call.
/// Conservation holds exactly: `lp_fee + platform_fee + net == settled amount`.
pub fn preview_settle(pool: &PoolState, bet_amount: u64, win_amount: u64) -> SettlePreview {
    let settled = if win_amount > 0 { win_amount } else { bet_amount };
    let lp_fee = bps_fee(settled, pool.lp_fee_bps);
    let platform_fee = bps_fee(settled, pool.platform_rake_bps);
    let net = settled - lp_fee - platform_fee;
    SettlePreview {
        bet_amount,
        win_amount,
        lp_fee,
        platform_fee,
        net,
        custody_after: if win_amount > 0 {
            (pool.total_custody as i128) - (win_amount as i128) + (lp_fee as i128)
        } else {
            (pool.total_custody as i128) + (net as i128)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::pubkey::Pubkey;

    fn pool(custody: u64, shares: u64, acc: u128) -> PoolState {
        PoolState {
            admin: Pubkey::new_unique(),
            token_mint: Pubkey::new_unique(),
            token_vault: Pubkey::new_unique(),
            total_custody: custody,
            total_shares: shares,
            acc_reward_per_share: acc,
            accumulated_fees: 0,
            platform_fee_bps: 250,
            lp_fee_bps: 200,
            platform_rake_bps: 100,
            paused: false,
            operators: vec![],
        }
    }

    #[test]
    fn provide_preview_matches_bootstrap_mint() {
        let p = preview_provide(&pool(0, 0, 0), 1_000).unwrap();
        assert_eq!((p.fee, p.net, p.shares), (25, 975, 975));
    }

    #[test]
    fn settle_preview_conserves_loss() {
        let s = preview_settle(&pool(1_000, 975, 0), 100, 0);
        assert_eq!((s.lp_fee, s.platform_fee, s.net), (2, 1, 97));
        assert_eq!(s.custody_after, 1_097);
    }

    #[test]
    fn settle_preview_win_reclaims_lp_fee_only() {
        let s = preview_settle(&pool(1_000, 975, 0), 10, 100);
        assert_eq!(s.lp_fee + s.platform_fee + s.net, 100);
        assert_eq!(s.custody_after, 1_000 - 100 + s.lp_fee as i128);
    }

    #[test]
    fn settle_preview_flags_win_exceeding_custody() {
        // A win the pool cannot cover shows up as negative projected custody,
        // matching the on-chain rejection.
        let s = preview_settle(&pool(1_000, 975, 0), 10, 5_000);
        assert!(s.custody_after < 0);
    }

    #[test]
    fn withdraw_preview_freshness_boundary_is_inclusive() {
        let p = pool(10_000, 0, 0);
        let ua = UserAccountState {
            owner: Pubkey::new_unique(),
            pool: Pubkey::new_unique(),
            balance: 500,
            nonce: 3,
            last_update_slot: 1_000,
        };
        // Exactly at the window: still fresh
        assert!(preview_withdraw(&p, &ua, 100, 1_000 + BALANCE_EXPIRY_SLOTS).is_ok());
        // One slot past: stale
        let err = preview_withdraw(&p, &ua, 100, 1_000 + BALANCE_EXPIRY_SLOTS + 1);
        assert!(matches!(err, Err(Error::StaleBalance { .. })));
    }

    #[test]
    fn withdraw_preview_rejects_over_balance() {
        let p = pool(10_000, 0, 0);
        let ua = UserAccountState {
            owner: Pubkey::new_unique(),
            pool: Pubkey::new_unique(),
            balance: 500,
            nonce: 3,
            last_update_slot: 1_000,
        };
        let err = preview_withdraw(&p, &ua, 501, 1_000);
        assert!(matches!(err, Err(Error::ExceedsBalance { .. })));
    }

    #[test]
    fn publish_preview_requires_strictly_increasing_nonce() {
        let ua = UserAccountState {
            owner: Pubkey::new_unique(),
            pool: Pubkey::new_unique(),
            balance: 500,
            nonce: 7,
            last_update_slot: 1_000,
        };
        assert!(matches!(
            preview_publish(&ua, 7),
            Err(Error::InvalidNonce { stored: 7, proposed: 7 })
        ));
        assert!(matches!(preview_publish(&ua, 3), Err(Error::InvalidNonce { .. })));
        assert!(preview_publish(&ua, 8).is_ok());
        assert!(preview_publish(&ua, 1_000).is_ok()); // gaps are fine
    }

    #[test]
    fn pending_rewards_mirror_on_chain_truncation() {
        // 975 shares, accumulator from a 2-unit fee over 975 shares
        let acc = 2u128 * ACC_SCALE / 975;
        let p = pool(975, 975, acc);
        let pos = PositionState {
            owner: Pubkey::new_unique(),
            pool: Pubkey::new_unique(),
            shares: 975,
            reward_debt: 0,
        };
        assert_eq!(pending_rewards_for_position(&pos, &p), 1); // truncated from 1.99…
    }
}
