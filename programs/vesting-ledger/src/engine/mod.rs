//! Vesting schedule engine: admission, release, withdraw and queries over a
//! schedule store, an asset port, an administrator capability and a clock.
//!
//! Every operation runs all of its checks before touching state. Release and
//! withdraw hold the re-entrancy lock for their whole duration, apply their
//! state changes before the outgoing transfer, and restore them if the
//! transfer is rejected.

pub mod calculator;
pub mod guard;
pub mod ports;
pub mod store;

#[cfg(test)]
pub mod testing;

use anchor_lang::prelude::Pubkey;

use crate::error::VestingError;
use crate::events::{AdminWithdrawn, LedgerSummary, ScheduleCreated, TokensReleased, VestingQuote};
use crate::state::VestingSchedule;
use crate::utils::schedule_id::{schedule_id, ScheduleId};
use crate::utils::time;

pub use guard::{LockGuard, ReentrancyLock};
pub use ports::{AdminKey, AssetPort, Authorization, FixedClock, TimeSource};
pub use store::{MemoryStore, ScheduleStore};

/// Admission request for one beneficiary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NewSchedule {
    pub beneficiary: Pubkey,
    pub start_ts: i64,
    pub cliff_seconds: u64,
    pub duration_seconds: u64,
    pub total_amount: u64,
}

pub struct VestingEngine<S, A, Z, T> {
    store: S,
    asset: A,
    authority: Z,
    clock: T,
    /// Holder whose asset balance backs every schedule (the vault).
    custodian: Pubkey,
    lock: ReentrancyLock,
}

impl<S, A, Z, T> VestingEngine<S, A, Z, T>
where
    S: ScheduleStore,
    A: AssetPort,
    Z: Authorization,
    T: TimeSource,
{
    pub fn new(store: S, asset: A, authority: Z, clock: T, custodian: Pubkey) -> Self {
        Self {
            store,
            asset,
            authority,
            clock,
            custodian,
            lock: ReentrancyLock::new(),
        }
    }

    /// Shares `lock` with the caller instead of a private one.
    pub fn with_lock(mut self, lock: ReentrancyLock) -> Self {
        self.lock = lock;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn asset(&self) -> &A {
        &self.asset
    }

    pub fn clock(&self) -> &T {
        &self.clock
    }

    pub fn custodian(&self) -> Pubkey {
        self.custodian
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // ADMISSION

    pub fn admit(
        &mut self,
        caller: &Pubkey,
        params: NewSchedule,
    ) -> Result<(ScheduleId, ScheduleCreated), VestingError> {
        if !self.authority.is_administrator(caller) {
            return Err(VestingError::UnauthorizedAdmin);
        }
        if params.duration_seconds == 0 {
            return Err(VestingError::InvalidDuration);
        }
        if params.total_amount == 0 {
            return Err(VestingError::InvalidAmount);
        }
        if params.beneficiary == Pubkey::default() {
            return Err(VestingError::InvalidPubkey);
        }
        if params.start_ts <= 0 {
            return Err(VestingError::InvalidTimestamp);
        }
        // Reject windows whose end cannot be represented.
        time::vesting_end(
            params.start_ts,
            params.cliff_seconds,
            params.duration_seconds,
        )?;

        if self.withdrawable()? < params.total_amount {
            return Err(VestingError::InsufficientUncommittedBalance);
        }

        let id = schedule_id(&params.beneficiary);
        match self.store.get(&id) {
            Ok(prior) if !prior.is_fully_released() => {
                return Err(VestingError::ScheduleStillVesting)
            }
            Ok(_) | Err(VestingError::ScheduleNotFound) => {}
            Err(err) => return Err(err),
        }
        self.store.check_push_id()?;
        let committed = self
            .store
            .committed_total()
            .checked_add(params.total_amount)
            .ok_or(VestingError::MathOverflow)?;

        self.store.insert(
            id,
            VestingSchedule::new(
                params.beneficiary,
                params.start_ts,
                params.cliff_seconds,
                params.duration_seconds,
                params.total_amount,
            ),
        )?;
        self.store.push_id(id)?;
        self.store.set_committed_total(committed);

        Ok((
            id,
            ScheduleCreated {
                beneficiary: params.beneficiary,
                schedule_id: id,
                start_ts: params.start_ts,
                cliff_seconds: params.cliff_seconds,
                duration_seconds: params.duration_seconds,
                total_amount: params.total_amount,
            },
        ))
    }

    // RELEASE / WITHDRAW

    /// Moves `amount` of vested, unreleased tokens to the schedule's
    /// beneficiary. Callable by the beneficiary or the administrator.
    pub fn release(
        &mut self,
        caller: &Pubkey,
        id: &ScheduleId,
        amount: u64,
    ) -> Result<TokensReleased, VestingError> {
        let _guard = self.lock.acquire()?;
        let now = self.clock.now();

        let schedule = self.store.get(id)?;
        if *caller != schedule.beneficiary && !self.authority.is_administrator(caller) {
            return Err(VestingError::Unauthorized);
        }
        if amount == 0 {
            return Err(VestingError::InvalidAmount);
        }
        let vested = calculator::releasable(schedule, now)?;
        let unclaimed = vested
            .checked_sub(schedule.released)
            .ok_or(VestingError::MathOverflow)?;
        if amount > unclaimed {
            return Err(VestingError::InsufficientVestedAmount);
        }

        let beneficiary = schedule.beneficiary;
        let prev_released = schedule.released;
        let prev_committed = self.store.committed_total();
        let released = prev_released
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        let committed = prev_committed
            .checked_sub(amount)
            .ok_or(VestingError::MathOverflow)?;

        self.store.get_mut(id)?.released = released;
        self.store.set_committed_total(committed);

        if let Err(err) = self.asset.transfer(&beneficiary, amount) {
            self.store.set_committed_total(prev_committed);
            if let Ok(schedule) = self.store.get_mut(id) {
                schedule.released = prev_released;
            }
            return Err(err);
        }

        Ok(TokensReleased {
            beneficiary,
            amount,
            vested,
            released_total: released,
        })
    }

    /// Sends `amount` of the uncommitted balance to the calling administrator.
    pub fn withdraw(&mut self, caller: &Pubkey, amount: u64) -> Result<AdminWithdrawn, VestingError> {
        let _guard = self.lock.acquire()?;
        if !self.authority.is_administrator(caller) {
            return Err(VestingError::UnauthorizedAdmin);
        }
        if amount == 0 {
            return Err(VestingError::InvalidAmount);
        }
        if amount > self.withdrawable()? {
            return Err(VestingError::InsufficientWithdrawableFunds);
        }

        self.asset.transfer(caller, amount)?;

        Ok(AdminWithdrawn {
            admin: *caller,
            amount,
        })
    }

    /// Withdraws the whole uncommitted balance. Nothing to sweep is a no-op,
    /// reported as a zero-amount withdrawal.
    pub fn sweep(&mut self, caller: &Pubkey) -> Result<AdminWithdrawn, VestingError> {
        let _guard = self.lock.acquire()?;
        if !self.authority.is_administrator(caller) {
            return Err(VestingError::UnauthorizedAdmin);
        }

        let amount = self.withdrawable()?;
        if amount > 0 {
            self.asset.transfer(caller, amount)?;
        }

        Ok(AdminWithdrawn {
            admin: *caller,
            amount,
        })
    }

    // QUERIES

    pub fn committed_total(&self) -> u64 {
        self.store.committed_total()
    }

    pub fn balance(&self) -> Result<u64, VestingError> {
        self.asset.balance_of(&self.custodian)
    }

    /// Held balance minus committed total.
    pub fn withdrawable(&self) -> Result<u64, VestingError> {
        self.balance()?
            .checked_sub(self.store.committed_total())
            .ok_or(VestingError::CommittedExceedsBalance)
    }

    pub fn schedule_count(&self) -> usize {
        self.store.ids().len()
    }

    pub fn schedule_ids(&self) -> &[ScheduleId] {
        self.store.ids()
    }

    pub fn schedule(&self, id: &ScheduleId) -> Result<&VestingSchedule, VestingError> {
        self.store.get(id)
    }

    /// Cumulative vested amount as of now.
    pub fn releasable(&self, id: &ScheduleId) -> Result<u64, VestingError> {
        calculator::releasable(self.store.get(id)?, self.clock.now())
    }

    /// Vested amount not yet released.
    pub fn claimable(&self, id: &ScheduleId) -> Result<u64, VestingError> {
        calculator::claimable(self.store.get(id)?, self.clock.now())
    }

    pub fn quote(&self, id: &ScheduleId) -> Result<VestingQuote, VestingError> {
        let schedule = self.store.get(id)?;
        let now = self.clock.now();
        let vested = calculator::releasable(schedule, now)?;
        Ok(VestingQuote {
            beneficiary: schedule.beneficiary,
            now_ts: now,
            total_amount: schedule.total_amount,
            vested_amount: vested,
            released_amount: schedule.released,
            claimable: vested
                .checked_sub(schedule.released)
                .ok_or(VestingError::MathOverflow)?,
        })
    }

    /// Snapshot of the ledger totals. An insolvent ledger reports zero
    /// withdrawable rather than failing.
    pub fn summary(&self) -> Result<LedgerSummary, VestingError> {
        let vault_balance = self.balance()?;
        let committed_total = self.store.committed_total();
        Ok(LedgerSummary {
            vault_balance,
            committed_total,
            withdrawable: vault_balance.saturating_sub(committed_total),
            schedule_count: u32::try_from(self.schedule_count())
                .map_err(|_| VestingError::MathOverflow)?,
        })
    }

    /// Committed funds must be covered by the held balance.
    pub fn check_solvency(&self) -> Result<(), VestingError> {
        self.withdrawable().map(|_| ())
    }

    /// The committed total must equal the unreleased remainder of every
    /// record (when the store can enumerate them) and be covered by the
    /// held balance.
    pub fn check_invariants(&self) -> Result<(), VestingError> {
        if let Some(outstanding) = self.store.outstanding_total() {
            if u128::from(self.store.committed_total()) != outstanding {
                return Err(VestingError::CommittedTotalMismatch);
            }
        }
        self.check_solvency()
    }
}
