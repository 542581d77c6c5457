use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::adapters::{AccountStore, VaultPort};
use crate::constants::{LEDGER_SEED, SCHEDULE_SEED, VAULT_SEED};
use crate::engine::{AdminKey, VestingEngine};
use crate::state::{LedgerState, VestingSchedule};
use crate::utils::schedule_id::schedule_id;

pub fn handler(ctx: Context<EmitVestingQuote>, beneficiary: Pubkey) -> Result<()> {
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
    let id = schedule_id(&beneficiary);

    // Read-only: the engine works on snapshots of the accounts.
    let mut ledger = (*ctx.accounts.ledger).clone();
    let mut schedule = (*ctx.accounts.schedule).clone();
    let store = AccountStore::new(&mut ledger).with_slot(id, &mut schedule);
    let engine = VestingEngine::new(store, vault, admin, Clock::get()?, custodian);

    emit!(engine.quote(&id)?);

    Ok(())
}

#[derive(Accounts)]
#[instruction(beneficiary: Pubkey)]
pub struct EmitVestingQuote<'info> {
    #[account(seeds = [LEDGER_SEED, ledger.mint.as_ref()], bump = ledger.bump)]
    pub ledger: Account<'info, LedgerState>,

    #[account(
        seeds = [SCHEDULE_SEED, ledger.key().as_ref(), schedule_id(&beneficiary).as_ref()],
        bump
    )]
    pub schedule: Account<'info, VestingSchedule>,

    #[account(seeds = [VAULT_SEED, ledger.key().as_ref()], bump = ledger.vault_bump)]
    pub vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}
