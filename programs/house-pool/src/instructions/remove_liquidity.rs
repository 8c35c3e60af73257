use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::{constants::*, error::HouseError, state::{Pool, Position}};
use super::reward_math;

/// Burn shares and withdraw the proportional slice of custody.
///
/// Pending rewards are harvested first. The platform fee comes off the gross
/// token value, but custody is decremented by the gross — rounding and fees
/// always favor the remaining holders.
///
/// Deliberately NOT gated on pause: LP exit stays available even when the
/// administrator has frozen deposits and settlement.
pub fn handler(ctx: Context<RemoveLiquidity>, share_amount: u64) -> Result<()> {
    require!(!ctx.accounts.pool.locked, HouseError::ReentrantCall);
    require!(share_amount > 0, HouseError::InvalidAmount);
    require!(
        ctx.accounts.position.shares >= share_amount,
        HouseError::InsufficientShares
    );
    ctx.accounts.pool.locked = true;

    // Read pool state into locals before any mutable borrows
    let total_shares = ctx.accounts.pool.total_shares;
    let total_custody = ctx.accounts.pool.total_custody;
    let acc = ctx.accounts.pool.acc_reward_per_share;
    let platform_fee_bps = ctx.accounts.pool.platform_fee_bps;
    let pool_key = ctx.accounts.pool.key();
    let authority_bump = ctx.accounts.pool.authority_bump;

    let gross = reward_math::tokens_for_shares(share_amount, total_shares, total_custody)?;
    let fee = reward_math::bps_fee(gross, platform_fee_bps)?;
    let net = gross - fee;

    let pending = reward_math::pending_rewards(
        ctx.accounts.position.shares,
        acc,
        ctx.accounts.position.reward_debt,
    )?;
    let skim = reward_math::bps_fee(pending, platform_fee_bps)?;

    {
        let pool = &mut ctx.accounts.pool;
        pool.total_custody = pool
            .total_custody
            .checked_sub(gross)
            .ok_or(HouseError::InsufficientBalance)?;
        pool.total_shares = pool.total_shares.saturating_sub(share_amount);
        pool.accumulated_fees = pool.accumulated_fees.saturating_sub(pending);
    }
    {
        let pos = &mut ctx.accounts.position;
        pos.shares = pos.shares.saturating_sub(share_amount);
        pos.reward_debt = reward_math::reward_debt(pos.shares, acc)?;
    }

    let seeds: &[&[u8]] = &[POOL_AUTHORITY_SEED, pool_key.as_ref(), &[authority_bump]];
    let signer = &[seeds];

    // Net principal plus harvested rewards to the provider
    let payout = net
        .checked_add(pending - skim)
        .ok_or(HouseError::MathOverflow)?;
    if payout > 0 {
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
            payout,
        )?;
    }
    // Removal fee and reward skim to the treasury
    let treasury_cut = fee.checked_add(skim).ok_or(HouseError::MathOverflow)?;
    if treasury_cut > 0 {
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
            treasury_cut,
        )?;
    }

    ctx.accounts.pool.locked = false;
    msg!(
        "Liquidity removed: shares={} gross={} fee={} harvested={}",
        share_amount, gross, fee, pending
    );
    Ok(())
}

#[derive(Accounts)]
pub struct RemoveLiquidity<'info> {
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
