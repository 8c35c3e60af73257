use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::{constants::*, error::HouseError, state::{Pool, Position}};
use super::reward_math;

/// Pay out the rewards a position has accrued since its last interaction.
/// No-op (not an error) when nothing is pending. The platform skims
/// platform_fee_bps off the harvested amount; accumulated_fees drops by the
/// pre-skim pending.
pub fn handler(ctx: Context<HarvestRewards>) -> Result<()> {
    require!(!ctx.accounts.pool.locked, HouseError::ReentrantCall);
    ctx.accounts.pool.locked = true;

    let acc = ctx.accounts.pool.acc_reward_per_share;
    let platform_fee_bps = ctx.accounts.pool.platform_fee_bps;
    let pool_key = ctx.accounts.pool.key();
    let authority_bump = ctx.accounts.pool.authority_bump;

    let pending = reward_math::pending_rewards(
        ctx.accounts.position.shares,
        acc,
        ctx.accounts.position.reward_debt,
    )?;

    if pending == 0 {
        ctx.accounts.pool.locked = false;
        msg!("No rewards to harvest");
        return Ok(());
    }

    let skim = reward_math::bps_fee(pending, platform_fee_bps)?;

    ctx.accounts.pool.accumulated_fees =
        ctx.accounts.pool.accumulated_fees.saturating_sub(pending);
    ctx.accounts.position.reward_debt =
        reward_math::reward_debt(ctx.accounts.position.shares, acc)?;

    let seeds: &[&[u8]] = &[POOL_AUTHORITY_SEED, pool_key.as_ref(), &[authority_bump]];
    let signer = &[seeds];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.token_vault.to_account_info(),
                to: ctx.accounts.provider_token.to_account_info(),
                authority: ctx.accounts.pool_authority.to_account_info(),
            },
            signer,
        ),
        pending - skim,
    )?;
    if skim > 0 {
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
            skim,
        )?;
    }

    ctx.accounts.pool.locked = false;
    msg!("Rewards harvested: gross={} skim={}", pending, skim);
    Ok(())
}

#[derive(Accounts)]
pub struct HarvestRewards<'info> {
    #[account(mut)]
    pub provider: Signer<'info>,

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
        seeds = [POSITION_SEED, pool.key().as_ref(), provider.key().as_ref()],
        bump = position.bump,
        constraint = position.owner == provider.key(),
        constraint = position.pool == pool.key(),
    )]
    pub position: Account<'info, Position>,

    #[account(
        mut,
        constraint = token_vault.key() == pool.token_vault @ HouseError::NotAuthorized,
    )]
    pub token_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = provider_token.mint == pool.token_mint @ HouseError::NotAuthorized,
        constraint = provider_token.owner == provider.key(),
    )]
    pub provider_token: Box<Account<'info, TokenAccount>>,

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
