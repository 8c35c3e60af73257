use anchor_lang::prelude::*;
use crate::{error::HouseError, state::Pool};

/// Flip the operational gate. While paused: deposits, withdrawals,
/// liquidity adds, and settlement are rejected. Liquidity removal,
/// harvesting, and oracle publications remain available.
pub fn handler(ctx: Context<SetPaused>, paused: bool) -> Result<()> {
    require!(
        ctx.accounts.pool.is_admin(&ctx.accounts.admin.key()),
        HouseError::NotAuthorized
    );
    ctx.accounts.pool.paused = paused;
    msg!("Pool paused={}", paused);
    Ok(())
}

#[derive(Accounts)]
pub struct SetPaused<'info> {
    pub admin: Signer<'info>,

    #[account(mut)]
    pub pool: Account<'info, Pool>,
}
