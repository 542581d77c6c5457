use anchor_lang::prelude::*;

/// Ledger-wide state PDA, one per mint.
#[account]
#[derive(Debug, Default)]
pub struct LedgerState {
    /// Token mint held by the vault.
    pub mint: Pubkey,
    /// Administrator capability holder.
    pub admin: Pubkey,
    /// Vault token account (authority = this PDA).
    pub vault: Pubkey,
    /// Sum of `total_amount - released` over every live schedule.
    pub committed_total: u64,
    pub bump: u8,
    pub vault_bump: u8,
}

impl LedgerState {
    pub const SIZE: usize =
        32 + // mint
        32 + // admin
        32 + // vault
        8 +  // committed_total
        1 +  // bump
        1;   // vault_bump
}
