use anchor_lang::prelude::*;
use crate::{constants::*, error::HouseError, state::{BalanceUpdate, Pool, UserAccount}};

/// Operator-published balance update for one user.
///
/// The nonce must be strictly greater than the stored one — an operator (or
/// a compromised relay) replaying an older, more favorable balance after a
/// newer publication is rejected with InvalidNonce. Publications are NOT
/// pause-gated: the oracle keeps converging even while the pool is frozen.
pub fn handler(
    ctx: Context<PublishBalance>,
    _user: Pubkey,
    new_balance: u64,
    new_nonce: u64,
) -> Result<()> {
    require!(
        ctx.accounts.pool.is_operator(&ctx.accounts.operator.key()),
        HouseError::NotAuthorized
    );

    let account = &mut ctx.accounts.user_account;
    account.apply_update(new_balance, new_nonce, Clock::get()?.slot)?;

    msg!(
        "Balance published: user={} balance={} nonce={}",
        account.owner, new_balance, new_nonce
    );
    Ok(())
}

#[derive(Accounts)]
#[instruction(user: Pubkey)]
pub struct PublishBalance<'info> {
    pub operator: Signer<'info>,

    pub pool: Account<'info, Pool>,

    #[account(
        mut,
        seeds = [USER_ACCOUNT_SEED, pool.key().as_ref(), user.as_ref()],
        bump = user_account.bump,
        constraint = user_account.owner == user,
        constraint = user_account.pool == pool.key(),
    )]
    pub user_account: Account<'info, UserAccount>,
}

/// Batched variant: one update per remaining account, all-or-nothing.
/// A single stale nonce or mismatched account aborts the whole transaction,
/// so a batch can never be applied partially.
pub fn handler_batch<'info>(
    ctx: Context<'_, '_, 'info, 'info, PublishBalances<'info>>,
    updates: Vec<BalanceUpdate>,
) -> Result<()> {
    require!(
        ctx.accounts.pool.is_operator(&ctx.accounts.operator.key()),
        HouseError::NotAuthorized
    );
    require!(
        !updates.is_empty() && updates.len() <= MAX_BATCH_UPDATES,
        HouseError::BatchMismatch
    );
    require!(
        updates.len() == ctx.remaining_accounts.len(),
        HouseError::BatchMismatch
    );

    let pool_key = ctx.accounts.pool.key();
    let now_slot = Clock::get()?.slot;

    for (update, info) in updates.iter().zip(ctx.remaining_accounts.iter()) {
        let mut account: Account<UserAccount> = Account::try_from(info)?;
        require!(account.owner == update.owner, HouseError::BatchMismatch);
        require!(account.pool == pool_key, HouseError::BatchMismatch);
        account.apply_update(update.balance, update.nonce, now_slot)?;
        account.exit(&crate::ID)?;
    }

    msg!("Balances published: count={}", updates.len());
    Ok(())
}

#[derive(Accounts)]
pub struct PublishBalances<'info> {
    pub operator: Signer<'info>,

    pub pool: Account<'info, Pool>,
    // Remaining accounts: the UserAccount for each update, same order.
}
