use anchor_lang::prelude::*;

use crate::constants::LEDGER_SEED;
use crate::error::VestingError;
use crate::state::LedgerState;

pub fn handler(ctx: Context<TransferAdmin>, new_admin: Pubkey) -> Result<()> {
    require!(new_admin != Pubkey::default(), VestingError::InvalidPubkey);

    let ledger_key = ctx.accounts.ledger.key();
    let ledger = &mut ctx.accounts.ledger;
    require_keys_eq!(ctx.accounts.admin.key(), ledger.admin, VestingError::UnauthorizedAdmin);

    // The ledger PDA and its vault cannot sign, so they can never act as admin.
    require!(new_admin != ledger_key, VestingError::InvalidPubkey);
    require!(new_admin != ledger.vault, VestingError::InvalidPubkey);
    require!(new_admin != crate::ID, VestingError::InvalidPubkey);

    let old_admin = ledger.admin;
    ledger.admin = new_admin;

    emit!(AdminTransferred {
        old_admin,
        new_admin,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct TransferAdmin<'info> {
    #[account(mut, seeds = [LEDGER_SEED, ledger.mint.as_ref()], bump = ledger.bump)]
    pub ledger: Account<'info, LedgerState>,

    pub admin: Signer<'info>,
}

#[event]
pub struct AdminTransferred {
    pub old_admin: Pubkey,
    pub new_admin: Pubkey,
}
