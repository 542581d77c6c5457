use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{LEDGER_SEED, MAX_SCHEDULES, REGISTRY_SEED, VAULT_SEED};
use crate::state::{LedgerState, ScheduleRegistry};

pub fn handler(ctx: Context<InitializeLedger>) -> Result<()> {
    let ledger = &mut ctx.accounts.ledger;
    ledger.mint = ctx.accounts.mint.key();
    ledger.admin = ctx.accounts.admin.key();
    ledger.vault = ctx.accounts.vault.key();
    ledger.committed_total = 0;
    ledger.bump = ctx.bumps.ledger;
    ledger.vault_bump = ctx.bumps.vault;

    ctx.accounts.registry.ids = Vec::with_capacity(MAX_SCHEDULES);

    msg!("vesting ledger initialized for mint {}", ledger.mint);
    emit!(LedgerInitialized {
        mint: ledger.mint,
        admin: ledger.admin,
        vault: ledger.vault,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeLedger<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + LedgerState::SIZE,
        seeds = [LEDGER_SEED, mint.key().as_ref()],
        bump
    )]
    pub ledger: Account<'info, LedgerState>,

    #[account(
        init,
        payer = admin,
        space = ScheduleRegistry::space(),
        seeds = [REGISTRY_SEED, ledger.key().as_ref()],
        bump
    )]
    pub registry: Box<Account<'info, ScheduleRegistry>>,

    #[account(
        init,
        payer = admin,
        token::mint = mint,
        token::authority = ledger,
        seeds = [VAULT_SEED, ledger.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct LedgerInitialized {
    pub mint: Pubkey,
    pub admin: Pubkey,
    pub vault: Pubkey,
}
