//! Events produced by the vesting engine; instruction handlers `emit!` them.

use anchor_lang::prelude::*;

#[event]
pub struct ScheduleCreated {
    pub beneficiary: Pubkey,
    pub schedule_id: [u8; 32],
    pub start_ts: i64,
    pub cliff_seconds: u64,
    pub duration_seconds: u64,
    pub total_amount: u64,
}

#[event]
pub struct TokensReleased {
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub vested: u64,
    pub released_total: u64,
}

#[event]
pub struct AdminWithdrawn {
    pub admin: Pubkey,
    pub amount: u64,
}

#[event]
pub struct VestingQuote {
    pub beneficiary: Pubkey,
    pub now_ts: i64,
    pub total_amount: u64,
    pub vested_amount: u64,
    pub released_amount: u64,
    pub claimable: u64,
}

#[event]
pub struct LedgerSummary {
    pub vault_balance: u64,
    pub committed_total: u64,
    pub withdrawable: u64,
    pub schedule_count: u32,
}
