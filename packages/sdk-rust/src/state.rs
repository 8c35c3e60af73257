//! On-chain account deserialization.
//!
//! Parses raw account bytes for `Pool` (443 bytes), `Position` (97 bytes)
//! and `UserAccount` (97 bytes). Byte offsets mirror the Anchor
//! `#[account]` layout exactly.

use solana_sdk::pubkey::Pubkey;
use crate::error::{Error, Result};

/// Capacity of the on-chain operator set.
pub const MAX_OPERATORS: usize = 8;

// ─── Pool ─────────────────────────────────────────────────────────────────────

/// Deserialized `Pool` account state.
///
/// Layout (after 8-byte Anchor discriminator):
/// ```text
/// admin(32)  authority(32)  authority_bump(1)  token_mint(32)  token_vault(32)
/// total_custody(8)  total_shares(8)  acc_reward_per_share(16)
/// accumulated_fees(8)  platform_fee_bps(2)  lp_fee_bps(2)  platform_rake_bps(2)
/// paused(1)  locked(1)  operators(8×32)  operator_count(1)  bump(1)  = 443 bytes
/// ```
#[derive(Debug, Clone)]
pub struct PoolState {
    pub admin:                Pubkey,
    pub token_mint:           Pubkey,
    pub token_vault:          Pubkey,
    pub total_custody:        u64,
    pub total_shares:         u64,
    /// Cumulative reward per LP share, scaled by 1e12.
    pub acc_reward_per_share: u128,
    pub accumulated_fees:     u64,
    pub platform_fee_bps:     u16,
    pub lp_fee_bps:           u16,
    pub platform_rake_bps:    u16,
    pub paused:               bool,
    /// Live operator identities (operator_count entries).
    pub operators:            Vec<Pubkey>,
}

/// Deserialize a `Pool` account from raw bytes.
pub fn parse_pool(data: &[u8]) -> Result<PoolState> {
    const EXPECTED: usize = 443;
    if data.len() < EXPECTED {
        return Err(Error::ParseError {
            offset: 0,
            reason: format!("Pool account is {} bytes; expected {}", data.len(), EXPECTED),
        });
    }
    let operator_count = data[441] as usize;
    let mut operators = Vec::with_capacity(operator_count.min(MAX_OPERATORS));
    for i in 0..operator_count.min(MAX_OPERATORS) {
        operators.push(read_pubkey(data, 185 + i * 32)?);
    }
    Ok(PoolState {
        admin:                read_pubkey(data, 8)?,
        token_mint:           read_pubkey(data, 73)?,
        token_vault:          read_pubkey(data, 105)?,
        total_custody:        read_u64(data, 137)?,
        total_shares:         read_u64(data, 145)?,
        acc_reward_per_share: read_u128(data, 153)?,
        accumulated_fees:     read_u64(data, 169)?,
        platform_fee_bps:     read_u16(data, 177)?,
        lp_fee_bps:           read_u16(data, 179)?,
        platform_rake_bps:    read_u16(data, 181)?,
        paused:               data[183] != 0,
        operators,
    })
}

// ─── Position ─────────────────────────────────────────────────────────────────

/// Deserialized `Position` account state.
///
/// Layout (after 8-byte Anchor discriminator):
/// ```text
/// owner(32)  pool(32)  shares(8)  reward_debt(16)  bump(1)  = 97 bytes
/// ```
#[derive(Debug, Clone)]
pub struct PositionState {
    pub owner:       Pubkey,
    pub pool:        Pubkey,
    pub shares:      u64,
    /// Rewards already accounted for at the last interaction (1e12-scaled).
    pub reward_debt: u128,
}

/// Deserialize a `Position` account from raw bytes.
pub fn parse_position(data: &[u8]) -> Result<PositionState> {
    const EXPECTED: usize = 97;
    if data.len() < EXPECTED {
        return Err(Error::ParseError {
            offset: 0,
            reason: format!("Position account is {} bytes; expected {}", data.len(), EXPECTED),
        });
    }
    Ok(PositionState {
        owner:       read_pubkey(data, 8)?,
        pool:        read_pubkey(data, 40)?,
        shares:      read_u64(data, 72)?,
        reward_debt: read_u128(data, 80)?,
    })
}

// ─── UserAccount ──────────────────────────────────────────────────────────────

/// Deserialized `UserAccount` (off-chain balance oracle) state.
///
/// Layout (after 8-byte Anchor discriminator):
/// ```text
/// owner(32)  pool(32)  balance(8)  nonce(8)  last_update_slot(8)  bump(1)
/// = 97 bytes
/// ```
#[derive(Debug, Clone)]
pub struct UserAccountState {
    pub owner:            Pubkey,
    pub pool:             Pubkey,
    pub balance:          u64,
    pub nonce:            u64,
    pub last_update_slot: u64,
}

/// Deserialize a `UserAccount` from raw bytes.
pub fn parse_user_account(data: &[u8]) -> Result<UserAccountState> {
    const EXPECTED: usize = 97;
    if data.len() < EXPECTED {
        return Err(Error::ParseError {
            offset: 0,
            reason: format!(
                "UserAccount is {} bytes; expected {}",
                data.len(),
                EXPECTED
            ),
        });
    }
    Ok(UserAccountState {
        owner:            read_pubkey(data, 8)?,
        pool:             read_pubkey(data, 40)?,
        balance:          read_u64(data, 72)?,
        nonce:            read_u64(data, 80)?,
        last_update_slot: read_u64(data, 88)?,
    })
}

// ─── SPL token account ────────────────────────────────────────────────────────

/// Read the `amount` field from a packed SPL token account.
///
/// Token account layout: `mint(32) owner(32) amount(8) …`
pub fn parse_token_amount(data: &[u8]) -> Result<u64> {
    if data.len() < 72 {
        return Err(Error::ParseError {
            offset: 64,
            reason: format!("Token account is {} bytes; need at least 72", data.len()),
        });
    }
    read_u64(data, 64)
}

// ─── Byte-slice primitives ────────────────────────────────────────────────────

pub(crate) fn read_pubkey(data: &[u8], offset: usize) -> Result<Pubkey> {
    let b: [u8; 32] = data[offset..offset + 32]
        .try_into()
        .map_err(|_| Error::ParseError {
            offset,
            reason: "slice too short for Pubkey (32 bytes)".into(),
        })?;
    Ok(Pubkey::from(b))
}

pub(crate) fn read_u16(data: &[u8], offset: usize) -> Result<u16> {
    let b: [u8; 2] = data[offset..offset + 2]
        .try_into()
        .map_err(|_| Error::ParseError { offset, reason: "slice too short for u16".into() })?;
    Ok(u16::from_le_bytes(b))
}

pub(crate) fn read_u64(data: &[u8], offset: usize) -> Result<u64> {
    let b: [u8; 8] = data[offset..offset + 8]
        .try_into()
        .map_err(|_| Error::ParseError { offset, reason: "slice too short for u64".into() })?;
    Ok(u64::from_le_bytes(b))
}

pub(crate) fn read_u128(data: &[u8], offset: usize) -> Result<u128> {
    let b: [u8; 16] = data[offset..offset + 16]
        .try_into()
        .map_err(|_| Error::ParseError { offset, reason: "slice too short for u128".into() })?;
    Ok(u128::from_le_bytes(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put(buf: &mut [u8], offset: usize, bytes: &[u8]) {
        buf[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    #[test]
    fn parses_pool_round_trip() {
        let mut buf = vec![0u8; 443];
        let admin = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let op = Pubkey::new_unique();
        put(&mut buf, 8, admin.as_ref());
        put(&mut buf, 73, mint.as_ref());
        put(&mut buf, 137, &1_097u64.to_le_bytes());
        put(&mut buf, 145, &975u64.to_le_bytes());
        put(&mut buf, 153, &2_051_282_051u128.to_le_bytes());
        put(&mut buf, 169, &2u64.to_le_bytes());
        put(&mut buf, 177, &250u16.to_le_bytes());
        put(&mut buf, 179, &200u16.to_le_bytes());
        put(&mut buf, 181, &100u16.to_le_bytes());
        buf[183] = 1; // paused
        put(&mut buf, 185, op.as_ref());
        buf[441] = 1; // operator_count

        let pool = parse_pool(&buf).expect("parse");
        assert_eq!(pool.admin, admin);
        assert_eq!(pool.token_mint, mint);
        assert_eq!(pool.total_custody, 1_097);
        assert_eq!(pool.total_shares, 975);
        assert_eq!(pool.acc_reward_per_share, 2_051_282_051);
        assert_eq!(pool.accumulated_fees, 2);
        assert_eq!(
            (pool.platform_fee_bps, pool.lp_fee_bps, pool.platform_rake_bps),
            (250, 200, 100)
        );
        assert!(pool.paused);
        assert_eq!(pool.operators, vec![op]);
    }

    #[test]
    fn parses_user_account_round_trip() {
        let mut buf = vec![0u8; 97];
        let owner = Pubkey::new_unique();
        put(&mut buf, 8, owner.as_ref());
        put(&mut buf, 72, &500u64.to_le_bytes());
        put(&mut buf, 80, &7u64.to_le_bytes());
        put(&mut buf, 88, &123_456u64.to_le_bytes());

        let ua = parse_user_account(&buf).expect("parse");
        assert_eq!(ua.owner, owner);
        assert_eq!((ua.balance, ua.nonce, ua.last_update_slot), (500, 7, 123_456));
    }

    #[test]
    fn rejects_truncated_accounts() {
        assert!(parse_pool(&[0u8; 100]).is_err());
        assert!(parse_position(&[0u8; 96]).is_err());
        assert!(parse_user_account(&[0u8; 42]).is_err());
        assert!(parse_token_amount(&[0u8; 64]).is_err());
    }
}
