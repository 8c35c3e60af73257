use anchor_lang::prelude::*;
use crate::{constants::*, error::HouseError, state::Pool};

/// Re-configure the fee schedule, under the same hard caps as pool creation.
pub fn handler(
    ctx: Context<UpdateFees>,
    platform_fee_bps: u16,
    lp_fee_bps: u16,
    platform_rake_bps: u16,
) -> Result<()> {
    require!(
        ctx.accounts.pool.is_admin(&ctx.accounts.admin.key()),
        HouseError::NotAuthorized
    );
    require!(platform_fee_bps <= PLATFORM_FEE_MAX_BPS, HouseError::InvalidFeeRate);
    require!(
        lp_fee_bps.saturating_add(platform_rake_bps) <= SETTLEMENT_FEE_MAX_BPS,
        HouseError::InvalidFeeRate
    );

    let pool = &mut ctx.accounts.pool;
    pool.platform_fee_bps = platform_fee_bps;
    pool.lp_fee_bps = lp_fee_bps;
    pool.platform_rake_bps = platform_rake_bps;
    msg!(
        "Fees updated: platform={}bps lp={}bps rake={}bps",
        platform_fee_bps, lp_fee_bps, platform_rake_bps
    );
    Ok(())
}

#[derive(Accounts)]
pub struct UpdateFees<'info> {
    pub admin: Signer<'info>,

    #[account(mut)]
    pub pool: Account<'info, Pool>,
}
