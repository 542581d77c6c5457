use anchor_lang::prelude::*;

pub mod adapters;
pub mod constants;
pub mod engine;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

pub use instructions::*;

declare_id!("9M2gKU8uuh1DRY3ryjvYJyyViL5hpxk8aKZyLUVVya2T");

#[program]
pub mod vesting_ledger {
    use super::*;

    pub fn initialize_ledger(ctx: Context<InitializeLedger>) -> Result<()> {
        initialize_ledger::handler(ctx)
    }

    pub fn deposit_tokens(ctx: Context<DepositTokens>, amount: u64) -> Result<()> {
        deposit_tokens::handler(ctx, amount)
    }

    pub fn create_schedule(
        ctx: Context<CreateSchedule>,
        beneficiary: Pubkey,
        start_ts: i64,
        cliff_seconds: u64,
        duration_seconds: u64,
        total_amount: u64,
    ) -> Result<()> {
        create_schedule::handler(
            ctx,
            beneficiary,
            start_ts,
            cliff_seconds,
            duration_seconds,
            total_amount,
        )
    }

    /// Signed by the beneficiary or the admin.
    pub fn release(ctx: Context<Release>, beneficiary: Pubkey, amount: u64) -> Result<()> {
        release::handler(ctx, beneficiary, amount)
    }

    pub fn admin_withdraw(ctx: Context<AdminWithdraw>, amount: u64) -> Result<()> {
        admin_withdraw::handler(ctx, amount)
    }

    pub fn sweep_uncommitted(ctx: Context<SweepUncommitted>) -> Result<()> {
        sweep_uncommitted::handler(ctx)
    }

    pub fn emit_vesting_quote(ctx: Context<EmitVestingQuote>, beneficiary: Pubkey) -> Result<()> {
        emit_vesting_quote::handler(ctx, beneficiary)
    }

    pub fn emit_ledger_summary(ctx: Context<EmitLedgerSummary>) -> Result<()> {
        emit_ledger_summary::handler(ctx)
    }

    pub fn transfer_admin(ctx: Context<TransferAdmin>, new_admin: Pubkey) -> Result<()> {
        transfer_admin::handler(ctx, new_admin)
    }
}
