use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::adapters::{AccountStore, VaultPort};
use crate::constants::{LEDGER_SEED, VAULT_SEED};
use crate::engine::{AdminKey, VestingEngine};
use crate::error::VestingError;
use crate::state::LedgerState;

/// Withdraws everything not committed to a schedule. An empty sweep is a
/// no-op and still emits `AdminWithdrawn { amount: 0 }`.
pub fn handler(ctx: Context<SweepUncommitted>) -> Result<()> {
    require_keys_eq!(
        ctx.accounts.admin_destination.owner,
        ctx.accounts.admin.key(),
        VestingError::InvalidTokenAccount
    );

    let admin = ctx.accounts.admin.key();
    let vault = VaultPort::new(
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.vault.amount,
        ctx.accounts.ledger.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.ledger.mint,
        ctx.accounts.ledger.bump,
    )
    .with_destination(admin, ctx.accounts.admin_destination.to_account_info());
    let custodian = ctx.accounts.vault.key();
    let authority = AdminKey(ctx.accounts.ledger.admin);

    let store = AccountStore::new(&mut ctx.accounts.ledger);
    let mut engine = VestingEngine::new(store, vault, authority, Clock::get()?, custodian);

    let swept = engine.sweep(&admin)?;
    if swept.amount == 0 {
        msg!("nothing uncommitted to sweep");
    }
    emit!(swept);

    Ok(())
}

#[derive(Accounts)]
pub struct SweepUncommitted<'info> {
    #[account(mut, seeds = [LEDGER_SEED, ledger.mint.as_ref()], bump = ledger.bump)]
    pub ledger: Account<'info, LedgerState>,

    #[account(
        mut,
        seeds = [VAULT_SEED, ledger.key().as_ref()],
        bump = ledger.vault_bump,
        constraint = vault.mint == ledger.mint @ VestingError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = admin_destination.mint == ledger.mint @ VestingError::InvalidTokenMint,
    )]
    pub admin_destination: Account<'info, TokenAccount>,

    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
}
