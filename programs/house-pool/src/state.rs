use anchor_lang::prelude::*;

use crate::constants::MAX_OPERATORS;
use crate::error::HouseError;

// ─── Pool ──────────────────────────────────────────────────────────────────
// One custodial bankroll per asset mint.
// The vault (owned by a PDA) physically holds everything: LP custody,
// unharvested LP rewards, and user entitlements. total_custody tracks only
// the LP-attributable portion plus user deposits not yet settled away.
#[account]
pub struct Pool {
    /// Administrator — may pause, drain, and manage the operator set
    pub admin: Pubkey,                      // 32
    /// PDA that owns token_vault
    pub authority: Pubkey,                  // 32
    pub authority_bump: u8,                 // 1
    pub token_mint: Pubkey,                 // 32
    pub token_vault: Pubkey,                // 32
    /// Tokens held on behalf of LPs and depositors, net of settled payouts
    pub total_custody: u64,                 // 8
    /// LP shares outstanding (tracked in Pool, not via a mint)
    pub total_shares: u64,                  // 8
    /// Cumulative reward per LP share, scaled by 1e12
    pub acc_reward_per_share: u128,         // 16
    /// Reward pool booked to LPs but not yet harvested
    pub accumulated_fees: u64,              // 8
    /// Fee on liquidity add/remove and harvests, in bps (cap 1000)
    pub platform_fee_bps: u16,              // 2
    /// LP share of every settled wager, in bps
    pub lp_fee_bps: u16,                    // 2
    /// Treasury share of every settled wager, in bps
    pub platform_rake_bps: u16,             // 2
    /// Gate over deposits, withdrawals, liquidity adds, and settlement
    pub paused: bool,                       // 1
    /// Re-entrancy latch, held for the duration of any mutating handler.
    /// The runtime already refuses CPI re-entry into an executing program;
    /// this flag is the in-account image of that rule.
    pub locked: bool,                       // 1
    /// Trusted operator set (first operator_count entries are live)
    pub operators: [Pubkey; MAX_OPERATORS], // 256
    pub operator_count: u8,                 // 1
    pub bump: u8,                           // 1
}

impl Pool {
    // 8 discriminator + 32+32+1+32+32+8+8+16+8+2+2+2+1+1+256+1+1 = 443
    pub const LEN: usize = 443;

    pub fn is_admin(&self, key: &Pubkey) -> bool {
        self.admin == *key
    }

    /// Operator OR admin — the admin can always act as an operator.
    pub fn is_operator(&self, key: &Pubkey) -> bool {
        self.is_admin(key)
            || self.operators[..self.operator_count as usize].contains(key)
    }
}

// ─── Position ──────────────────────────────────────────────────────────────
// One liquidity provider's stake in a pool. Persists at zero shares so the
// reward_debt baseline survives a full exit.
#[account]
pub struct Position {
    pub owner: Pubkey,        // 32
    pub pool: Pubkey,         // 32
    pub shares: u64,          // 8
    /// Rewards already accounted for: shares × acc_reward_per_share / 1e12
    /// as of the last interaction
    pub reward_debt: u128,    // 16
    pub bump: u8,             // 1
}

impl Position {
    // 8 + 32+32+8+16+1 = 97
    pub const LEN: usize = 97;
}

// ─── UserAccount ───────────────────────────────────────────────────────────
// The on-chain image of one user's off-chain balance: the amount they are
// entitled to withdraw, a strictly increasing nonce that orders updates and
// defeats replay, and the slot of the last accepted update (freshness clock).
#[account]
pub struct UserAccount {
    pub owner: Pubkey,            // 32
    pub pool: Pubkey,             // 32
    pub balance: u64,             // 8
    pub nonce: u64,               // 8
    pub last_update_slot: u64,    // 8
    pub bump: u8,                 // 1
}

impl UserAccount {
    // 8 + 32+32+8+8+8+1 = 97
    pub const LEN: usize = 97;

    /// Boundary-inclusive freshness check: an update exactly `window`
    /// slots old still authorizes.
    pub fn is_fresh(&self, now_slot: u64, window: u64) -> bool {
        now_slot.saturating_sub(self.last_update_slot) <= window
    }

    /// Accept an operator-published update. The nonce must strictly
    /// increase; a replayed or out-of-order publication fails with
    /// InvalidNonce and leaves the stored balance untouched.
    pub fn apply_update(&mut self, new_balance: u64, new_nonce: u64, now_slot: u64) -> Result<()> {
        require!(new_nonce > self.nonce, HouseError::InvalidNonce);
        self.balance = new_balance;
        self.nonce = new_nonce;
        self.last_update_slot = now_slot;
        Ok(())
    }
}

/// One entry of a batched operator balance publication.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct BalanceUpdate {
    pub owner: Pubkey,
    pub balance: u64,
    pub nonce: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BALANCE_EXPIRY_SLOTS;

    fn user_account(balance: u64, nonce: u64, slot: u64) -> UserAccount {
        UserAccount {
            owner: Pubkey::new_unique(),
            pool: Pubkey::new_unique(),
            balance,
            nonce,
            last_update_slot: slot,
            bump: 255,
        }
    }

    #[test]
    fn update_rejects_non_increasing_nonce() {
        let mut ua = user_account(500, 7, 100);
        // Equal and older nonces are both replays
        assert!(ua.apply_update(9_999, 7, 200).is_err());
        assert!(ua.apply_update(9_999, 6, 200).is_err());
        // Rejection leaves balance, nonce and clock untouched
        assert_eq!((ua.balance, ua.nonce, ua.last_update_slot), (500, 7, 100));
    }

    #[test]
    fn update_with_higher_nonce_replaces_balance_and_clock() {
        let mut ua = user_account(500, 7, 100);
        ua.apply_update(1_250, 8, 321).unwrap();
        assert_eq!((ua.balance, ua.nonce, ua.last_update_slot), (1_250, 8, 321));
        // Nonces need not be consecutive, only increasing
        ua.apply_update(0, 40, 400).unwrap();
        assert_eq!((ua.balance, ua.nonce), (0, 40));
    }

    #[test]
    fn freshness_window_is_boundary_inclusive() {
        let ua = user_account(500, 1, 1_000);
        assert!(ua.is_fresh(1_000 + BALANCE_EXPIRY_SLOTS, BALANCE_EXPIRY_SLOTS));
        assert!(!ua.is_fresh(1_000 + BALANCE_EXPIRY_SLOTS + 1, BALANCE_EXPIRY_SLOTS));
        // A clock behind the publication slot still counts as fresh
        assert!(ua.is_fresh(999, BALANCE_EXPIRY_SLOTS));
    }
}
