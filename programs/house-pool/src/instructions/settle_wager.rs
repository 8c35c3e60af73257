use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::{constants::*, error::HouseError, state::{Pool, UserAccount}};
use super::reward_math;

/// Apply one wager outcome atomically against the pool and the user's
/// published balance.
///
/// No tokens move for the wager itself — the stake is already inside
/// custody from an earlier deposit. Settlement only re-books entitlements:
/// the bet is debited from the user's balance, and on a win the net payout
/// is credited back while custody absorbs the gross win minus the LP fee.
/// The platform rake is the only amount that physically leaves the vault.
pub fn handler(ctx: Context<SettleWager>, bet_amount: u64, win_amount: u64) -> Result<()> {
    require!(
        ctx.accounts.pool.is_operator(&ctx.accounts.operator.key()),
        HouseError::NotAuthorized
    );
    require!(!ctx.accounts.pool.paused, HouseError::OperationPaused);
    require!(!ctx.accounts.pool.locked, HouseError::ReentrantCall);
    require!(bet_amount > 0, HouseError::InvalidAmount);
    require!(
        bet_amount <= ctx.accounts.user_account.balance,
        HouseError::InsufficientBalance
    );
    ctx.accounts.pool.locked = true;

    let lp_fee_bps = ctx.accounts.pool.lp_fee_bps;
    let platform_rake_bps = ctx.accounts.pool.platform_rake_bps;
    let pool_key = ctx.accounts.pool.key();
    let authority_bump = ctx.accounts.pool.authority_bump;
    let now_slot = Clock::get()?.slot;

    // Split and solvency check up front — nothing is mutated until every
    // guard has passed, so a failed settlement leaves no trace.
    let split = if win_amount > 0 {
        let split = reward_math::settlement_split(win_amount, lp_fee_bps, platform_rake_bps)?;
        require!(
            split.net <= ctx.accounts.pool.total_custody,
            HouseError::InsufficientBalance
        );
        split
    } else {
        reward_math::settlement_split(bet_amount, lp_fee_bps, platform_rake_bps)?
    };

    // Oracle debit (and credit on a win)
    {
        let account = &mut ctx.accounts.user_account;
        account.balance -= bet_amount;
        if win_amount > 0 {
            account.balance = account
                .balance
                .checked_add(split.net)
                .ok_or(HouseError::MathOverflow)?;
        }
        account.nonce = account
            .nonce
            .checked_add(1)
            .ok_or(HouseError::MathOverflow)?;
        account.last_update_slot = now_slot;
    }

    // Custody and reward bookkeeping
    {
        let pool = &mut ctx.accounts.pool;
        if win_amount > 0 {
            // Pool pays the gross win and reclaims only the LP-fee slice;
            // the rake leaves custody entirely.
            pool.total_custody = pool
                .total_custody
                .checked_add(split.lp_fee)
                .ok_or(HouseError::MathOverflow)?
                .checked_sub(win_amount)
                .ok_or(HouseError::InsufficientBalance)?;
        } else {
            pool.total_custody = pool
                .total_custody
                .checked_add(split.net)
                .ok_or(HouseError::MathOverflow)?;
        }

        // distribute(lp_fee): booked even with no share base — the fee then
        // sits in accumulated_fees until shares exist to accrue against.
        pool.accumulated_fees = pool
            .accumulated_fees
            .checked_add(split.lp_fee)
            .ok_or(HouseError::MathOverflow)?;
        let delta = reward_math::accumulator_delta(split.lp_fee, pool.total_shares)?;
        pool.acc_reward_per_share = pool
            .acc_reward_per_share
            .checked_add(delta)
            .ok_or(HouseError::MathOverflow)?;
    }

    // Rake out of the vault to the treasury
    if split.platform_fee > 0 {
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
            split.platform_fee,
        )?;
    }

    ctx.accounts.pool.locked = false;
    msg!(
        "Wager settled: user={} bet={} win={} lp_fee={} rake={} custody={}",
        ctx.accounts.user_account.owner,
        bet_amount,
        win_amount,
        split.lp_fee,
        split.platform_fee,
        ctx.accounts.pool.total_custody
    );
    Ok(())
}

#[derive(Accounts)]
pub struct SettleWager<'info> {
    pub operator: Signer<'info>,

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
        constraint = user_account.pool == pool.key(),
    )]
    pub user_account: Account<'info, UserAccount>,

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
