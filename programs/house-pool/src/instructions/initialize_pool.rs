use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::{constants::*, error::HouseError, state::Pool};

/// Create the custodial pool for one asset mint.
/// The creator becomes the pool administrator; the vault is owned by a PDA
/// so no human key controls custody. One pool per mint (PDA-enforced).
pub fn handler(
    ctx: Context<InitializePool>,
    platform_fee_bps: u16,
    lp_fee_bps: u16,
    platform_rake_bps: u16,
) -> Result<()> {
    require!(platform_fee_bps <= PLATFORM_FEE_MAX_BPS, HouseError::InvalidFeeRate);
    require!(
        lp_fee_bps.saturating_add(platform_rake_bps) <= SETTLEMENT_FEE_MAX_BPS,
        HouseError::InvalidFeeRate
    );

    let pool = &mut ctx.accounts.pool;
    pool.admin = ctx.accounts.creator.key();
    pool.authority = ctx.accounts.pool_authority.key();
    pool.authority_bump = ctx.bumps.pool_authority;
    pool.token_mint = ctx.accounts.token_mint.key();
    pool.token_vault = ctx.accounts.token_vault.key();
    pool.total_custody = 0;
    pool.total_shares = 0;
    pool.acc_reward_per_share = 0;
    pool.accumulated_fees = 0;
    pool.platform_fee_bps = platform_fee_bps;
    pool.lp_fee_bps = lp_fee_bps;
    pool.platform_rake_bps = platform_rake_bps;
    pool.paused = false;
    pool.locked = false;
    pool.operators = [Pubkey::default(); MAX_OPERATORS];
    pool.operator_count = 0;
    pool.bump = ctx.bumps.pool;

    msg!(
        "Pool created: mint={} platform_fee={}bps lp_fee={}bps rake={}bps",
        ctx.accounts.token_mint.key(),
        platform_fee_bps,
        lp_fee_bps,
        platform_rake_bps
    );
    Ok(())
}

#[derive(Accounts)]
pub struct InitializePool<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    pub token_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = creator,
        space = Pool::LEN,
        seeds = [POOL_SEED, token_mint.key().as_ref()],
        bump,
    )]
    pub pool: Account<'info, Pool>,

    /// CHECK: PDA vault authority — owns the vault, holds no data
    #[account(
        seeds = [POOL_AUTHORITY_SEED, pool.key().as_ref()],
        bump,
    )]
    pub pool_authority: UncheckedAccount<'info>,

    /// CHECK: global treasury PDA — platform fee sink authority, holds no data
    #[account(
        seeds = [TREASURY_SEED],
        bump,
    )]
    pub treasury: UncheckedAccount<'info>,

    #[account(
        init,
        payer = creator,
        token::mint = token_mint,
        token::authority = pool_authority,
    )]
    pub token_vault: Account<'info, TokenAccount>,

    #[account(
        init,
        payer = creator,
        token::mint = token_mint,
        token::authority = treasury,
    )]
    pub treasury_token: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
