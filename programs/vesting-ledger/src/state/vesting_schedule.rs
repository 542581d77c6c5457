use anchor_lang::prelude::*;

use crate::error::VestingError;
use crate::utils::time;

/// Per-beneficiary vesting schedule PDA.
///
/// Window fields are written once at admission; only `released` moves
/// afterwards. A zeroed account (`initialized == false`) means "no schedule".
#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct VestingSchedule {
    pub initialized: bool,
    /// Recipient of released tokens.
    pub beneficiary: Pubkey,
    /// Delay after `start_ts` before anything vests.
    pub cliff_seconds: u64,
    /// Vesting clock origin (Unix seconds, UTC).
    pub start_ts: i64,
    /// Linear vesting span after the cliff (> 0).
    pub duration_seconds: u64,
    /// Total amount ultimately releasable (> 0).
    pub total_amount: u64,
    /// Cumulative amount transferred out; never exceeds `total_amount`.
    pub released: u64,
}

impl VestingSchedule {
    pub const SIZE: usize =
        1 +  // initialized
        32 + // beneficiary
        8 +  // cliff_seconds
        8 +  // start_ts
        8 +  // duration_seconds
        8 +  // total_amount
        8;   // released

    pub fn new(
        beneficiary: Pubkey,
        start_ts: i64,
        cliff_seconds: u64,
        duration_seconds: u64,
        total_amount: u64,
    ) -> Self {
        Self {
            initialized: true,
            beneficiary,
            cliff_seconds,
            start_ts,
            duration_seconds,
            total_amount,
            released: 0,
        }
    }

    pub fn cliff_end(&self) -> std::result::Result<i64, VestingError> {
        time::cliff_end(self.start_ts, self.cliff_seconds)
    }

    pub fn vesting_end(&self) -> std::result::Result<i64, VestingError> {
        time::vesting_end(self.start_ts, self.cliff_seconds, self.duration_seconds)
    }

    /// Portion of `total_amount` still owed to the beneficiary.
    pub fn unreleased(&self) -> u64 {
        self.total_amount.saturating_sub(self.released)
    }

    pub fn is_fully_released(&self) -> bool {
        self.released >= self.total_amount
    }
}
