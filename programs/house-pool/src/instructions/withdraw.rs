use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::{constants::*, error::HouseError, state::{Pool, UserAccount}};

/// Withdraw against the published off-chain balance.
///
/// Authorization is two-ledger: the amount must fit inside the published
/// balance (ExceedsBalance), the publication must be inside the freshness
/// window (StaleBalance), and pool custody must actually cover the payout
/// (InsufficientBalance). The debit bumps the nonce so any in-flight
/// operator publication built on the old balance is rejected as a replay.
pub fn handler(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    require!(!ctx.accounts.pool.paused, HouseError::OperationPaused);
    require!(!ctx.accounts.pool.locked, HouseError::ReentrantCall);
    require!(amount > 0, HouseError::InvalidAmount);
    ctx.accounts.pool.locked = true;

    let now_slot = Clock::get()?.slot;
    let pool_key = ctx.accounts.pool.key();
    let authority_bump = ctx.accounts.pool.authority_bump;

    {
        let account = &ctx.accounts.user_account;
        require!(
            account.is_fresh(now_slot, BALANCE_EXPIRY_SLOTS),
            HouseError::StaleBalance
        );
        require!(amount <= account.balance, HouseError::ExceedsBalance);
    }
    require!(
        amount <= ctx.accounts.pool.total_custody,
        HouseError::InsufficientBalance
    );

    {
        let account = &mut ctx.accounts.user_account;
        account.balance -= amount;
        account.nonce = account
            .nonce
            .checked_add(1)
            .ok_or(HouseError::MathOverflow)?;
        account.last_update_slot = now_slot;
    }
    ctx.accounts.pool.total_custody -= amount;

    let seeds: &[&[u8]] = &[POOL_AUTHORITY_SEED, pool_key.as_ref(), &[authority_bump]];
    let signer = &[seeds];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.token_vault.to_account_info(),
                to: ctx.accounts.user_token.to_account_info(),
                authority: ctx.accounts.pool_authority.to_account_info(),
            },
            signer,
        ),
        amount,
    )?;

    ctx.accounts.pool.locked = false;
    msg!(
        "Withdraw: amount={} balance={} nonce={}",
        amount,
        ctx.accounts.user_account.balance,
        ctx.accounts.user_account.nonce
    );
    Ok(())
}

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(mut)]
    pub pool: Account<'info, Pool>,

    /// CHECK: PDA vault authority
    #[account(
        seeds = [POOL_AUTHORITY_SEED, pool.key().as_ref()],
        bump = pool.authority_bump,
    )]
    pub pool_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [USER_ACCOUNT_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump = user_account.bump,
        constraint = user_account.owner == user.key(),
        constraint = user_account.pool == pool.key(),
    )]
    pub user_account: Account<'info, UserAccount>,

    #[account(
        mut,
        constraint = token_vault.key() == pool.token_vault @ HouseError::NotAuthorized,
    )]
    pub token_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = user_token.mint == pool.token_mint @ HouseError::NotAuthorized,
        constraint = user_token.owner == user.key(),
    )]
    pub user_token: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}
