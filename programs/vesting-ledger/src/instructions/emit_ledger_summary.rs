use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::adapters::{AccountStore, VaultPort};
use crate::constants::{LEDGER_SEED, REGISTRY_SEED, VAULT_SEED};
use crate::engine::{AdminKey, VestingEngine};
use crate::state::{LedgerState, ScheduleRegistry};

pub fn handler(ctx: Context<EmitLedgerSummary>) -> Result<()> {
    let vault = VaultPort::new(
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.vault.amount,
        ctx.accounts.ledger.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.ledger.mint,
        ctx.accounts.ledger.bump,
    );
    let custodian = ctx.accounts.vault.key();
    let admin = AdminKey(ctx.accounts.ledger.admin);

    let mut ledger = (*ctx.accounts.ledger).clone();
    let mut registry = (**ctx.accounts.registry).clone();
    let store = AccountStore::new(&mut ledger).with_registry(&mut registry);
    let engine = VestingEngine::new(store, vault, admin, Clock::get()?, custodian);

    let summary = engine.summary()?;
    if engine.check_solvency().is_err() {
        msg!(
            "ledger insolvent: committed {} exceeds vault balance {}",
            summary.committed_total,
            summary.vault_balance
        );
    }
    emit!(summary);

    Ok(())
}

#[derive(Accounts)]
pub struct EmitLedgerSummary<'info> {
    #[account(seeds = [LEDGER_SEED, ledger.mint.as_ref()], bump = ledger.bump)]
    pub ledger: Account<'info, LedgerState>,

    #[account(seeds = [REGISTRY_SEED, ledger.key().as_ref()], bump)]
    pub registry: Box<Account<'info, ScheduleRegistry>>,

    #[account(seeds = [VAULT_SEED, ledger.key().as_ref()], bump = ledger.vault_bump)]
    pub vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}
