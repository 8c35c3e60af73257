use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::{constants::*, error::HouseError, state::{Pool, Position}};
use super::reward_math;

/// Add liquidity to the bankroll.
///
/// The platform fee is carved off the top; the net amount buys shares at the
/// current custody/share ratio (1:1 on bootstrap). Pending rewards of an
/// existing position are harvested first so the new reward_debt baseline is
/// clean — nothing retroactive is ever claimable.
pub fn handler(ctx: Context<ProvideLiquidity>, amount: u64) -> Result<()> {
    require!(!ctx.accounts.pool.paused, HouseError::OperationPaused);
    require!(!ctx.accounts.pool.locked, HouseError::ReentrantCall);
    require!(amount > 0, HouseError::InvalidAmount);
    ctx.accounts.pool.locked = true;

    // Read pool state into locals before any mutable borrows
    let total_shares = ctx.accounts.pool.total_shares;
    let total_custody = ctx.accounts.pool.total_custody;
    let acc = ctx.accounts.pool.acc_reward_per_share;
    let platform_fee_bps = ctx.accounts.pool.platform_fee_bps;
    let pool_key = ctx.accounts.pool.key();
    let authority_bump = ctx.accounts.pool.authority_bump;

    let fee = reward_math::bps_fee(amount, platform_fee_bps)?;
    let net = amount - fee; // fee <= amount always (bps <= 1000)

    let minted = reward_math::shares_for_deposit(net, total_shares, total_custody)?;
    require!(minted > 0, HouseError::SharesTooSmall);

    // Harvest pending rewards before the share change
    let pending = {
        let pos = &mut ctx.accounts.position;
        if pos.shares > 0 {
            reward_math::pending_rewards(pos.shares, acc, pos.reward_debt)?
        } else {
            // New position — initialise fields
            pos.owner = ctx.accounts.provider.key();
            pos.pool = pool_key;
            pos.bump = ctx.bumps.position;
            0
        }
    };
    let skim = reward_math::bps_fee(pending, platform_fee_bps)?;

    // Commit share and custody bookkeeping
    {
        let pool = &mut ctx.accounts.pool;
        pool.total_custody = pool
            .total_custody
            .checked_add(net)
            .ok_or(HouseError::MathOverflow)?;
        pool.total_shares = pool
            .total_shares
            .checked_add(minted)
            .ok_or(HouseError::MathOverflow)?;
        pool.accumulated_fees = pool.accumulated_fees.saturating_sub(pending);
    }
    {
        let pos = &mut ctx.accounts.position;
        pos.shares = pos
            .shares
            .checked_add(minted)
            .ok_or(HouseError::MathOverflow)?;
        pos.reward_debt =
            reward_math::reward_debt(pos.shares, ctx.accounts.pool.acc_reward_per_share)?;
    }

    // Net deposit into the vault
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.provider_token.to_account_info(),
                to: ctx.accounts.token_vault.to_account_info(),
                authority: ctx.accounts.provider.to_account_info(),
            },
        ),
        net,
    )?;
    // Platform fee straight to the treasury
    if fee > 0 {
        token::transfer(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.provider_token.to_account_info(),
                    to: ctx.accounts.treasury_token.to_account_info(),
                    authority: ctx.accounts.provider.to_account_info(),
                },
            ),
            fee,
        )?;
    }

    // Pay out harvested rewards (PDA-signed), skim to treasury
    if pending > 0 {
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
    }

    ctx.accounts.pool.locked = false;
    msg!(
        "Liquidity added: shares={} net={} fee={} harvested={}",
        minted, net, fee, pending
    );
    Ok(())
}

#[derive(Accounts)]
pub struct ProvideLiquidity<'info> {
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
        init_if_needed,
        payer = provider,
        space = Position::LEN,
        seeds = [POSITION_SEED, pool.key().as_ref(), provider.key().as_ref()],
        bump,
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
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
