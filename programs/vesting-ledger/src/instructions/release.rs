use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::adapters::{AccountStore, VaultPort};
use crate::constants::{LEDGER_SEED, SCHEDULE_SEED, VAULT_SEED};
use crate::engine::{AdminKey, VestingEngine};
use crate::error::VestingError;
use crate::state::{LedgerState, VestingSchedule};
use crate::utils::schedule_id::schedule_id;

pub fn handler(ctx: Context<Release>, beneficiary: Pubkey, amount: u64) -> Result<()> {
    require_keys_eq!(
        ctx.accounts.beneficiary_token_account.owner,
        beneficiary,
        VestingError::InvalidTokenAccount
    );

    // Avoid borrow checker conflicts: capture AccountInfos/keys before taking mutable borrows.
    let vault = VaultPort::new(
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.vault.amount,
        ctx.accounts.ledger.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.ledger.mint,
        ctx.accounts.ledger.bump,
    )
    .with_destination(
        beneficiary,
        ctx.accounts.beneficiary_token_account.to_account_info(),
    );
    let custodian = ctx.accounts.vault.key();
    let admin = AdminKey(ctx.accounts.ledger.admin);
    let caller = ctx.accounts.caller.key();
    let id = schedule_id(&beneficiary);

    let store = AccountStore::new(&mut ctx.accounts.ledger)
        .with_slot(id, &mut ctx.accounts.schedule);
    let mut engine = VestingEngine::new(store, vault, admin, Clock::get()?, custodian);

    let released = engine.release(&caller, &id, amount)?;

    msg!(
        "released {} to {} (vested {}, released total {})",
        released.amount,
        released.beneficiary,
        released.vested,
        released.released_total
    );
    emit!(released);

    Ok(())
}

#[derive(Accounts)]
#[instruction(beneficiary: Pubkey)]
pub struct Release<'info> {
    #[account(mut, seeds = [LEDGER_SEED, ledger.mint.as_ref()], bump = ledger.bump)]
    pub ledger: Account<'info, LedgerState>,

    #[account(
        mut,
        seeds = [SCHEDULE_SEED, ledger.key().as_ref(), schedule_id(&beneficiary).as_ref()],
        bump
    )]
    pub schedule: Account<'info, VestingSchedule>,

    #[account(
        mut,
        seeds = [VAULT_SEED, ledger.key().as_ref()],
        bump = ledger.vault_bump,
        constraint = vault.mint == ledger.mint @ VestingError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = beneficiary_token_account.mint == ledger.mint @ VestingError::InvalidTokenMint,
    )]
    pub beneficiary_token_account: Account<'info, TokenAccount>,

    /// Beneficiary or admin.
    pub caller: Signer<'info>,

    pub token_program: Program<'info, Token>,
}
