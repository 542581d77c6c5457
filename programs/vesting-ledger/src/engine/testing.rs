//! Mock ports for engine tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use anchor_lang::prelude::Pubkey;

use super::{AdminKey, AssetPort, MemoryStore, ReentrancyLock, TimeSource, VestingEngine};
use crate::error::VestingError;

pub type TestEngine = VestingEngine<MemoryStore, MockAsset, AdminKey, ManualClock>;

/// Admin identity plus a vault pre-funded with `amount`.
pub struct Harness {
    pub admin: Pubkey,
    pub custodian: Pubkey,
    pub amount: u64,
}

impl Harness {
    pub fn funded(amount: u64) -> Self {
        Self {
            admin: Pubkey::new_unique(),
            custodian: Pubkey::new_unique(),
            amount,
        }
    }

    pub fn engine(&self) -> TestEngine {
        VestingEngine::new(
            MemoryStore::new(),
            MockAsset::with_balance(self.custodian, self.amount),
            AdminKey(self.admin),
            ManualClock::default(),
            self.custodian,
        )
    }
}

/// In-memory token ledger. Transfers always debit the custodian.
#[derive(Debug, Default)]
pub struct MockAsset {
    custodian: Pubkey,
    balances: RefCell<HashMap<Pubkey, u64>>,
    transfers: RefCell<Vec<(Pubkey, u64)>>,
    fail_next: Cell<bool>,
    probe: RefCell<Option<ReentrancyLock>>,
    reentry_attempts: RefCell<Vec<bool>>,
}

impl MockAsset {
    pub fn with_balance(custodian: Pubkey, amount: u64) -> Self {
        let asset = Self {
            custodian,
            ..Self::default()
        };
        asset.balances.borrow_mut().insert(custodian, amount);
        asset
    }

    pub fn balance(&self, holder: &Pubkey) -> u64 {
        self.balances.borrow().get(holder).copied().unwrap_or(0)
    }

    pub fn transfers(&self) -> Vec<(Pubkey, u64)> {
        self.transfers.borrow().clone()
    }

    /// Reject the next transfer without moving anything.
    pub fn fail_next_transfer(&self) {
        self.fail_next.set(true);
    }

    /// During each transfer, try to take `lock` the way a re-entering
    /// recipient would and record whether that was refused.
    pub fn probe_lock(&self, lock: ReentrancyLock) {
        *self.probe.borrow_mut() = Some(lock);
    }

    pub fn reentry_attempts(&self) -> Vec<bool> {
        self.reentry_attempts.borrow().clone()
    }

    /// Remove funds behind the engine's back.
    pub fn drain(&self, holder: &Pubkey, amount: u64) {
        let mut balances = self.balances.borrow_mut();
        let entry = balances.entry(*holder).or_insert(0);
        *entry = entry.saturating_sub(amount);
    }
}

impl AssetPort for MockAsset {
    fn balance_of(&self, holder: &Pubkey) -> Result<u64, VestingError> {
        Ok(self.balance(holder))
    }

    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<(), VestingError> {
        if let Some(lock) = self.probe.borrow().as_ref() {
            self.reentry_attempts
                .borrow_mut()
                .push(lock.acquire().is_err());
        }
        if self.fail_next.replace(false) {
            return Err(VestingError::TransferFailed);
        }

        let mut balances = self.balances.borrow_mut();
        let from = balances.get(&self.custodian).copied().unwrap_or(0);
        let remaining = from
            .checked_sub(amount)
            .ok_or(VestingError::TransferFailed)?;
        balances.insert(self.custodian, remaining);
        *balances.entry(*to).or_insert(0) += amount;
        self.transfers.borrow_mut().push((*to, amount));
        Ok(())
    }
}

/// Test clock moved by hand.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<i64>,
}

impl ManualClock {
    pub fn set(&self, now_ts: i64) {
        self.now.set(now_ts);
    }

    pub fn advance(&self, seconds: i64) {
        self.now.set(self.now.get() + seconds);
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> i64 {
        self.now.get()
    }
}
