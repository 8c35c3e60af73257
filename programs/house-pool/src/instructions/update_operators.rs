use anchor_lang::prelude::*;
use crate::{constants::MAX_OPERATORS, error::HouseError, state::Pool};

/// Add an identity to the trusted operator set. Idempotent: adding an
/// existing operator is a no-op.
pub fn handler_add(ctx: Context<UpdateOperators>, operator: Pubkey) -> Result<()> {
    require!(
        ctx.accounts.pool.is_admin(&ctx.accounts.admin.key()),
        HouseError::NotAuthorized
    );

    let pool = &mut ctx.accounts.pool;
    let count = pool.operator_count as usize;
    if pool.operators[..count].contains(&operator) {
        return Ok(());
    }
    require!(count < MAX_OPERATORS, HouseError::OperatorSetFull);

    pool.operators[count] = operator;
    pool.operator_count += 1;
    msg!("Operator added: {} count={}", operator, pool.operator_count);
    Ok(())
}

/// Remove an identity from the trusted operator set.
pub fn handler_remove(ctx: Context<UpdateOperators>, operator: Pubkey) -> Result<()> {
    require!(
        ctx.accounts.pool.is_admin(&ctx.accounts.admin.key()),
        HouseError::NotAuthorized
    );

    let pool = &mut ctx.accounts.pool;
    let count = pool.operator_count as usize;
    let idx = pool.operators[..count]
        .iter()
        .position(|k| *k == operator)
        .ok_or(HouseError::OperatorNotFound)?;

    // Order is not meaningful; move the last live entry into the hole.
    pool.operators[idx] = pool.operators[count - 1];
    pool.operators[count - 1] = Pubkey::default();
    pool.operator_count -= 1;
    msg!("Operator removed: {} count={}", operator, pool.operator_count);
    Ok(())
}

#[derive(Accounts)]
pub struct UpdateOperators<'info> {
    pub admin: Signer<'info>,

    #[account(mut)]
    pub pool: Account<'info, Pool>,
}
