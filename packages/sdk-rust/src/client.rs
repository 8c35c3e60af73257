//! High-level async client.
//!
//! Wraps a nonblocking RPC client, derives every PDA and token account from
//! the caller's keypair + the pool's asset mint, and submits fully-signed
//! transactions. One method per program instruction, plus read-side views.

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::instructions::*;
use crate::math;
use crate::state::{parse_pool, parse_position, parse_token_amount, parse_user_account};
use crate::types::*;

/// Deployed program ID.
pub const PROGRAM_ID: &str = "4ZAwemu4ZWouMfny7bJ97T1nEAnKVz4kBLeBipHcPZog";

/// Async HousePool client.
///
/// All write methods derive the pool PDA from `token_mint`, read the pool
/// account to locate the vault and treasury token accounts, and sign with
/// the provided keypair.
pub struct HousePoolClient {
    rpc:        RpcClient,
    program_id: Pubkey,
}

impl HousePoolClient {
    /// Connect to a custom RPC endpoint.
    pub fn new(rpc_url: &str) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(
                rpc_url.to_string(),
                CommitmentConfig::confirmed(),
            ),
            program_id: Pubkey::from_str(PROGRAM_ID).unwrap(),
        }
    }

    /// Connect to Solana devnet.
    pub fn devnet() -> Self {
        Self::new("https://api.devnet.solana.com")
    }

    /// Connect to Solana mainnet-beta.
    pub fn mainnet() -> Self {
        Self::new("https://api.mainnet-beta.solana.com")
    }

    /// Override the program ID (local validators, forks).
    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    // ─── Pool lifecycle ──────────────────────────────────────────────────────

    /// Create the pool for an asset mint. The signer becomes pool admin.
    ///
    /// Generates fresh keypairs for the vault and the treasury token account;
    /// both sign the creation transaction and are thereafter owned by PDAs.
    pub async fn create_pool(
        &self,
        admin: &Keypair,
        token_mint: Pubkey,
        platform_fee_bps: u16,
        lp_fee_bps: u16,
        platform_rake_bps: u16,
    ) -> Result<TxResult> {
        let token_vault = Keypair::new();
        let treasury_token = Keypair::new();

        let ix = initialize_pool_ix(
            &self.program_id,
            &admin.pubkey(),
            &token_mint,
            &token_vault.pubkey(),
            &treasury_token.pubkey(),
            platform_fee_bps,
            lp_fee_bps,
            platform_rake_bps,
        );
        self.sign_and_send(&[ix], admin, &[&token_vault, &treasury_token])
            .await
    }

    // ─── Liquidity provider methods ──────────────────────────────────────────

    /// Stake `amount` into the bankroll, receiving shares net of the
    /// platform fee.
    pub async fn provide_liquidity(
        &self,
        provider: &Keypair,
        token_mint: Pubkey,
        amount: u64,
    ) -> Result<TxResult> {
        let (pool_addr, pool) = self.fetch_pool(&token_mint).await?;
        let treasury_token = self.treasury_token(&pool).await?;
        let ix = provide_liquidity_ix(
            &self.program_id,
            &provider.pubkey(),
            &pool_addr,
            &pool.token_vault,
            &derive_ata(&provider.pubkey(), &token_mint),
            &treasury_token,
            amount,
        );
        self.sign_and_send(&[ix], provider, &[]).await
    }

    /// Burn `share_amount` shares for pro-rata custody. Works while paused.
    pub async fn remove_liquidity(
        &self,
        provider: &Keypair,
        token_mint: Pubkey,
        share_amount: u64,
    ) -> Result<TxResult> {
        let (pool_addr, pool) = self.fetch_pool(&token_mint).await?;
        let treasury_token = self.treasury_token(&pool).await?;
        let ix = remove_liquidity_ix(
            &self.program_id,
            &provider.pubkey(),
            &pool_addr,
            &pool.token_vault,
            &derive_ata(&provider.pubkey(), &token_mint),
            &treasury_token,
            share_amount,
        );
        self.sign_and_send(&[ix], provider, &[]).await
    }

    /// Claim accrued LP rewards (net of the platform skim).
    pub async fn harvest_rewards(
        &self,
        provider: &Keypair,
        token_mint: Pubkey,
    ) -> Result<TxResult> {
        let (pool_addr, pool) = self.fetch_pool(&token_mint).await?;
        let treasury_token = self.treasury_token(&pool).await?;
        let ix = harvest_rewards_ix(
            &self.program_id,
            &provider.pubkey(),
            &pool_addr,
            &pool.token_vault,
            &derive_ata(&provider.pubkey(), &token_mint),
            &treasury_token,
        );
        self.sign_and_send(&[ix], provider, &[]).await
    }

    // ─── User custody methods ────────────────────────────────────────────────

    /// Deposit tokens into custody; the off-chain balance is credited 1:1.
    pub async fn deposit(
        &self,
        user: &Keypair,
        token_mint: Pubkey,
        amount: u64,
    ) -> Result<TxResult> {
        let (pool_addr, pool) = self.fetch_pool(&token_mint).await?;
        let ix = deposit_ix(
            &self.program_id,
            &user.pubkey(),
            &pool_addr,
            &pool.token_vault,
            &derive_ata(&user.pubkey(), &token_mint),
            amount,
        );
        self.sign_and_send(&[ix], user, &[]).await
    }

    /// Withdraw against the published balance. Runs the freshness and
    /// balance preflight locally first so a doomed transaction is never paid
    /// for.
    pub async fn withdraw(
        &self,
        user: &Keypair,
        token_mint: Pubkey,
        amount: u64,
    ) -> Result<TxResult> {
        let (pool_addr, pool) = self.fetch_pool(&token_mint).await?;
        let ua = self.fetch_user_account(&pool_addr, &user.pubkey()).await?;
        let now_slot = self.rpc.get_slot().await?;
        math::preview_withdraw(&pool, &ua, amount, now_slot)?;

        let ix = withdraw_ix(
            &self.program_id,
            &user.pubkey(),
            &pool_addr,
            &pool.token_vault,
            &derive_ata(&user.pubkey(), &token_mint),
            amount,
        );
        self.sign_and_send(&[ix], user, &[]).await
    }

    // ─── Operator methods ────────────────────────────────────────────────────

    /// Publish one user's off-chain balance under a strictly increasing
    /// nonce. The nonce preflight runs locally first, same as the withdraw
    /// preflight.
    pub async fn publish_balance(
        &self,
        operator: &Keypair,
        token_mint: Pubkey,
        user: Pubkey,
        new_balance: u64,
        new_nonce: u64,
    ) -> Result<TxResult> {
        let (pool_addr, _) = derive_pool(&token_mint, &self.program_id);
        let ua = self.fetch_user_account(&pool_addr, &user).await?;
        math::preview_publish(&ua, new_nonce)?;

        let ix = publish_balance_ix(
            &self.program_id,
            &operator.pubkey(),
            &pool_addr,
            &user,
            new_balance,
            new_nonce,
        );
        self.sign_and_send(&[ix], operator, &[]).await
    }

    /// Publish a batch of balance updates atomically — one stale nonce
    /// aborts the whole batch.
    pub async fn publish_balances(
        &self,
        operator: &Keypair,
        token_mint: Pubkey,
        updates: &[BalanceUpdate],
    ) -> Result<TxResult> {
        if updates.is_empty() {
            return Err(Error::InvalidArgument("empty update batch".into()));
        }
        let (pool_addr, _) = derive_pool(&token_mint, &self.program_id);
        let ix = publish_balances_ix(&self.program_id, &operator.pubkey(), &pool_addr, updates);
        self.sign_and_send(&[ix], operator, &[]).await
    }

    /// Settle a wager outcome. `win_amount == 0` marks a loss.
    pub async fn settle_wager(
        &self,
        operator: &Keypair,
        token_mint: Pubkey,
        user: Pubkey,
        bet_amount: u64,
        win_amount: u64,
    ) -> Result<TxResult> {
        let (pool_addr, pool) = self.fetch_pool(&token_mint).await?;
        let treasury_token = self.treasury_token(&pool).await?;
        let ix = settle_wager_ix(
            &self.program_id,
            &operator.pubkey(),
            &pool_addr,
            &user,
            &pool.token_vault,
            &treasury_token,
            bet_amount,
            win_amount,
        );
        self.sign_and_send(&[ix], operator, &[]).await
    }

    // ─── Admin methods ───────────────────────────────────────────────────────

    /// Flip the operational pause gate.
    pub async fn set_paused(
        &self,
        admin: &Keypair,
        token_mint: Pubkey,
        paused: bool,
    ) -> Result<TxResult> {
        let (pool_addr, _) = derive_pool(&token_mint, &self.program_id);
        let ix = set_paused_ix(&self.program_id, &admin.pubkey(), &pool_addr, paused);
        self.sign_and_send(&[ix], admin, &[]).await
    }

    /// Add a trusted operator.
    pub async fn add_operator(
        &self,
        admin: &Keypair,
        token_mint: Pubkey,
        operator: Pubkey,
    ) -> Result<TxResult> {
        let (pool_addr, _) = derive_pool(&token_mint, &self.program_id);
        let ix = add_operator_ix(&self.program_id, &admin.pubkey(), &pool_addr, &operator);
        self.sign_and_send(&[ix], admin, &[]).await
    }

    /// Remove a trusted operator.
    pub async fn remove_operator(
        &self,
        admin: &Keypair,
        token_mint: Pubkey,
        operator: Pubkey,
    ) -> Result<TxResult> {
        let (pool_addr, _) = derive_pool(&token_mint, &self.program_id);
        let ix = remove_operator_ix(&self.program_id, &admin.pubkey(), &pool_addr, &operator);
        self.sign_and_send(&[ix], admin, &[]).await
    }

    /// Re-configure fees under the hard caps.
    pub async fn update_fees(
        &self,
        admin: &Keypair,
        token_mint: Pubkey,
        platform_fee_bps: u16,
        lp_fee_bps: u16,
        platform_rake_bps: u16,
    ) -> Result<TxResult> {
        let (pool_addr, _) = derive_pool(&token_mint, &self.program_id);
        let ix = update_fees_ix(
            &self.program_id,
            &admin.pubkey(),
            &pool_addr,
            platform_fee_bps,
            lp_fee_bps,
            platform_rake_bps,
        );
        self.sign_and_send(&[ix], admin, &[]).await
    }

    /// Drain the vault to the treasury and zero pool accounting.
    /// Only valid while paused. Irreversible.
    pub async fn emergency_drain(
        &self,
        admin: &Keypair,
        token_mint: Pubkey,
    ) -> Result<TxResult> {
        let (pool_addr, pool) = self.fetch_pool(&token_mint).await?;
        let treasury_token = self.treasury_token(&pool).await?;
        let ix = emergency_drain_ix(
            &self.program_id,
            &admin.pubkey(),
            &pool_addr,
            &pool.token_vault,
            &treasury_token,
        );
        self.sign_and_send(&[ix], admin, &[]).await
    }

    // ─── Read-side views ─────────────────────────────────────────────────────

    /// Pool accounting snapshot, plus the vault's actual token balance.
    pub async fn pool_info(&self, token_mint: Pubkey) -> Result<PoolInfo> {
        let (pool_addr, pool) = self.fetch_pool(&token_mint).await?;
        let vault_data = self.rpc.get_account_data(&pool.token_vault).await?;
        let vault_balance = parse_token_amount(&vault_data)?;
        Ok(PoolInfo {
            address:           pool_addr,
            token_mint:        pool.token_mint,
            total_custody:     pool.total_custody,
            total_shares:      pool.total_shares,
            vault_balance,
            accumulated_fees:  pool.accumulated_fees,
            platform_fee_bps:  pool.platform_fee_bps,
            lp_fee_bps:        pool.lp_fee_bps,
            platform_rake_bps: pool.platform_rake_bps,
            paused:            pool.paused,
            operators:         pool.operators,
        })
    }

    /// LP position snapshot with redemption value and pending rewards.
    pub async fn position_info(
        &self,
        token_mint: Pubkey,
        owner: Pubkey,
    ) -> Result<PositionInfo> {
        let (pool_addr, pool) = self.fetch_pool(&token_mint).await?;
        let (pos_addr, _) = derive_position(&pool_addr, &owner, &self.program_id);
        let data = self
            .rpc
            .get_account_data(&pos_addr)
            .await
            .map_err(|_| Error::PositionNotFound(owner))?;
        let pos = parse_position(&data)?;

        let redeemable = if pool.total_shares == 0 {
            0
        } else {
            ((pos.shares as u128) * (pool.total_custody as u128)
                / (pool.total_shares as u128)) as u64
        };
        Ok(PositionInfo {
            address:         pos_addr,
            owner:           pos.owner,
            pool:            pos.pool,
            shares:          pos.shares,
            redeemable,
            pending_rewards: math::pending_rewards_for_position(&pos, &pool),
        })
    }

    /// Published balance snapshot with freshness evaluated at the current
    /// slot.
    pub async fn user_account_info(
        &self,
        token_mint: Pubkey,
        owner: Pubkey,
    ) -> Result<UserAccountInfo> {
        let (pool_addr, _) = derive_pool(&token_mint, &self.program_id);
        let ua = self.fetch_user_account(&pool_addr, &owner).await?;
        let (ua_addr, _) = derive_user_account(&pool_addr, &owner, &self.program_id);
        let now_slot = self.rpc.get_slot().await?;
        let age_slots = now_slot.saturating_sub(ua.last_update_slot);
        Ok(UserAccountInfo {
            address:          ua_addr,
            owner:            ua.owner,
            pool:             ua.pool,
            balance:          ua.balance,
            nonce:            ua.nonce,
            last_update_slot: ua.last_update_slot,
            age_slots,
            fresh:            age_slots <= math::BALANCE_EXPIRY_SLOTS,
        })
    }

    /// Off-chain preview of a `provide_liquidity` call.
    pub async fn preview_provide(
        &self,
        token_mint: Pubkey,
        amount: u64,
    ) -> Result<ProvidePreview> {
        let (_, pool) = self.fetch_pool(&token_mint).await?;
        math::preview_provide(&pool, amount)
    }

    /// Off-chain fee breakdown of a `settle_wager` call.
    pub async fn preview_settle(
        &self,
        token_mint: Pubkey,
        bet_amount: u64,
        win_amount: u64,
    ) -> Result<SettlePreview> {
        let (_, pool) = self.fetch_pool(&token_mint).await?;
        Ok(math::preview_settle(&pool, bet_amount, win_amount))
    }

    // ─── Internals ───────────────────────────────────────────────────────────

    async fn fetch_pool(&self, token_mint: &Pubkey) -> Result<(Pubkey, crate::state::PoolState)> {
        let (pool_addr, _) = derive_pool(token_mint, &self.program_id);
        let data = self
            .rpc
            .get_account_data(&pool_addr)
            .await
            .map_err(|_| Error::PoolNotFound(*token_mint))?;
        Ok((pool_addr, parse_pool(&data)?))
    }

    async fn fetch_user_account(
        &self,
        pool: &Pubkey,
        owner: &Pubkey,
    ) -> Result<crate::state::UserAccountState> {
        let (ua_addr, _) = derive_user_account(pool, owner, &self.program_id);
        let data = self
            .rpc
            .get_account_data(&ua_addr)
            .await
            .map_err(|_| Error::UserAccountNotFound(*owner))?;
        parse_user_account(&data)
    }

    /// The treasury's token account for this pool's mint — the ATA of the
    /// treasury PDA, falling back to the account created at pool init if the
    /// ATA does not exist.
    async fn treasury_token(&self, pool: &crate::state::PoolState) -> Result<Pubkey> {
        let (treasury, _) = derive_treasury(&self.program_id);
        let ata = derive_ata(&treasury, &pool.token_mint);
        if self.rpc.get_account(&ata).await.is_ok() {
            return Ok(ata);
        }
        // Pool-init treasury token account: scan the treasury PDA's token
        // accounts for the pool's mint.
        let accounts = self
            .rpc
            .get_token_accounts_by_owner(
                &treasury,
                solana_client::rpc_request::TokenAccountsFilter::Mint(pool.token_mint),
            )
            .await?;
        accounts
            .first()
            .map(|a| Pubkey::from_str(&a.pubkey).map_err(|_| Error::InvalidArgument(
                "RPC returned an unparseable treasury token account".into(),
            )))
            .transpose()?
            .ok_or(Error::InvalidArgument(
                "no treasury token account for this mint".into(),
            ))
    }

    async fn sign_and_send(
        &self,
        instructions: &[solana_sdk::instruction::Instruction],
        payer: &Keypair,
        extra_signers: &[&Keypair],
    ) -> Result<TxResult> {
        let blockhash = self.rpc.get_latest_blockhash().await?;
        let mut signers: Vec<&Keypair> = vec![payer];
        signers.extend_from_slice(extra_signers);
        let tx = Transaction::new_signed_with_payer(
            instructions,
            Some(&payer.pubkey()),
            &signers,
            blockhash,
        );
        let signature = self.rpc.send_and_confirm_transaction(&tx).await?;
        Ok(TxResult { signature: signature.to_string() })
    }
}
