use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::{constants::*, error::HouseError, state::{Pool, UserAccount}};

/// Deposit tokens into pool custody and credit the user's off-chain balance
/// image. The credit bumps the nonce internally (it is not operator-supplied)
/// and refreshes the freshness clock, so a fresh depositor can withdraw
/// without waiting for an operator publication.
pub fn handler(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    require!(!ctx.accounts.pool.paused, HouseError::OperationPaused);
    require!(!ctx.accounts.pool.locked, HouseError::ReentrantCall);
    require!(amount > 0, HouseError::InvalidAmount);
    ctx.accounts.pool.locked = true;

    let pool_key = ctx.accounts.pool.key();
    let now_slot = Clock::get()?.slot;

    {
        let pool = &mut ctx.accounts.pool;
        pool.total_custody = pool
            .total_custody
            .checked_add(amount)
            .ok_or(HouseError::MathOverflow)?;
    }
    {
        let account = &mut ctx.accounts.user_account;
        if account.owner == Pubkey::default() {
            // Lazily created on first deposit
            account.owner = ctx.accounts.user.key();
            account.pool = pool_key;
            account.bump = ctx.bumps.user_account;
        }
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or(HouseError::MathOverflow)?;
        account.nonce = account
            .nonce
            .checked_add(1)
            .ok_or(HouseError::MathOverflow)?;
        account.last_update_slot = now_slot;
    }

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.user_token.to_account_info(),
                to: ctx.accounts.token_vault.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ),
        amount,
    )?;

    ctx.accounts.pool.locked = false;
    msg!(
        "Deposit: amount={} balance={} nonce={}",
        amount,
        ctx.accounts.user_account.balance,
        ctx.accounts.user_account.nonce
    );
    Ok(())
}

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(mut)]
    pub pool: Account<'info, Pool>,

    #[account(
        init_if_needed,
        payer = user,
        space = UserAccount::LEN,
        seeds = [USER_ACCOUNT_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump,
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
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
