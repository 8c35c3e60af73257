use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::{constants::*, error::HouseError, state::Pool};

/// Total-shutdown recovery path. Admin-only, and only while paused.
///
/// Moves the entire vault to the treasury and zeroes all pool accounting.
/// Destructive and irreversible: LP shares become worthless and UserAccount
/// balances are left standing with no custody behind them — outstanding
/// entitlements must be made whole procedurally, outside this program.
pub fn handler(ctx: Context<EmergencyDrain>) -> Result<()> {
    require!(
        ctx.accounts.pool.is_admin(&ctx.accounts.admin.key()),
        HouseError::NotAuthorized
    );
    require!(ctx.accounts.pool.paused, HouseError::NotPaused);

    let pool_key = ctx.accounts.pool.key();
    let authority_bump = ctx.accounts.pool.authority_bump;
    let vault_amount = ctx.accounts.token_vault.amount;

    {
        let pool = &mut ctx.accounts.pool;
        pool.total_custody = 0;
        pool.total_shares = 0;
        pool.acc_reward_per_share = 0;
        pool.accumulated_fees = 0;
    }

    if vault_amount > 0 {
        let seeds: &[&[u8]] = &[POOL_AUTHORITY_SEED, pool_key.as_ref(), &[authority_bump]];
        let signer = &[seeds];
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.token_vault.to_account_info(),
                    to: ctx.accounts.treasury_token.to_account_info(),
                    authority: ctx.accounts.pool_authority.to_account_info(),
                },
                signer,
            ),
            vault_amount,
        )?;
    }

    msg!("Emergency drain: amount={}", vault_amount);
    Ok(())
}

#[derive(Accounts)]
pub struct EmergencyDrain<'info> {
    pub admin: Signer<'info>,

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
        constraint = token_vault.key() == pool.token_vault @ HouseError::NotAuthorized,
    )]
    pub token_vault: Box<Account<'info, TokenAccount>>,

    /// CHECK: global treasury PDA — platform fee sink authority
    #[account(
        seeds = [TREASURY_SEED],
        bump,
    )]
    pub treasury: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = treasury_token.mint == pool.token_mint @ HouseError::NotAuthorized,
        constraint = treasury_token.owner == treasury.key() @ HouseError::NotAuthorized,
    )]
    pub treasury_token: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}
