//! Seams between the engine and the world it runs in.

use anchor_lang::prelude::{Clock, Pubkey};

use crate::error::VestingError;

/// Fungible asset ledger the engine holds its balance in.
///
/// `transfer` moves funds out of the engine's custody and must be
/// all-or-nothing; a rejected move is reported as `TransferFailed`.
pub trait AssetPort {
    fn balance_of(&self, holder: &Pubkey) -> Result<u64, VestingError>;
    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<(), VestingError>;
}

pub trait Authorization {
    fn is_administrator(&self, caller: &Pubkey) -> bool;
}

pub trait TimeSource {
    /// Current Unix timestamp in seconds.
    fn now(&self) -> i64;
}

/// Single-key administrator capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdminKey(pub Pubkey);

impl Authorization for AdminKey {
    fn is_administrator(&self, caller: &Pubkey) -> bool {
        self.0 == *caller
    }
}

impl TimeSource for Clock {
    fn now(&self) -> i64 {
        self.unix_timestamp
    }
}

/// Clock pinned to one instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub i64);

impl TimeSource for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}
