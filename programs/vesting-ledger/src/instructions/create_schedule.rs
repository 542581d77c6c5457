use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::adapters::{AccountStore, VaultPort};
use crate::constants::{LEDGER_SEED, REGISTRY_SEED, SCHEDULE_SEED, VAULT_SEED};
use crate::engine::{AdminKey, NewSchedule, VestingEngine};
use crate::error::VestingError;
use crate::state::{LedgerState, ScheduleRegistry, VestingSchedule};
use crate::utils::schedule_id::schedule_id;

pub fn handler(
    ctx: Context<CreateSchedule>,
    beneficiary: Pubkey,
    start_ts: i64,
    cliff_seconds: u64,
    duration_seconds: u64,
    total_amount: u64,
) -> Result<()> {
    // Capture AccountInfos/keys before the store takes mutable borrows.
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
    let caller = ctx.accounts.admin.key();
    let id = schedule_id(&beneficiary);

    let store = AccountStore::new(&mut ctx.accounts.ledger)
        .with_registry(&mut ctx.accounts.registry)
        .with_slot(id, &mut ctx.accounts.schedule);
    let mut engine = VestingEngine::new(store, vault, admin, Clock::get()?, custodian);

    let (_, created) = engine.admit(
        &caller,
        NewSchedule {
            beneficiary,
            start_ts,
            cliff_seconds,
            duration_seconds,
            total_amount,
        },
    )?;
    let committed_total = engine.committed_total();
    let schedule_count = engine.schedule_count();

    msg!(
        "schedule created for {}: total {} committed {} schedules {}",
        beneficiary,
        total_amount,
        committed_total,
        schedule_count
    );
    emit!(created);

    Ok(())
}

#[derive(Accounts)]
#[instruction(beneficiary: Pubkey)]
pub struct CreateSchedule<'info> {
    #[account(mut, seeds = [LEDGER_SEED, ledger.mint.as_ref()], bump = ledger.bump)]
    pub ledger: Account<'info, LedgerState>,

    #[account(
        mut,
        seeds = [REGISTRY_SEED, ledger.key().as_ref()],
        bump
    )]
    pub registry: Box<Account<'info, ScheduleRegistry>>,

    #[account(
        init_if_needed,
        payer = admin,
        space = 8 + VestingSchedule::SIZE,
        seeds = [SCHEDULE_SEED, ledger.key().as_ref(), schedule_id(&beneficiary).as_ref()],
        bump
    )]
    pub schedule: Account<'info, VestingSchedule>,

    #[account(
        seeds = [VAULT_SEED, ledger.key().as_ref()],
        bump = ledger.vault_bump,
        constraint = vault.mint == ledger.mint @ VestingError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}
