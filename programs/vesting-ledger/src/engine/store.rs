//! Keyed schedule storage plus the aggregate committed counter.

use std::collections::BTreeMap;

use crate::error::VestingError;
use crate::state::VestingSchedule;
use crate::utils::schedule_id::ScheduleId;

pub trait ScheduleStore {
    /// Fails `ScheduleNotFound` unless the slot holds an initialized schedule.
    fn get(&self, id: &ScheduleId) -> Result<&VestingSchedule, VestingError>;
    fn get_mut(&mut self, id: &ScheduleId) -> Result<&mut VestingSchedule, VestingError>;
    /// Writes `schedule` into the slot for `id`, replacing whatever was there.
    fn insert(&mut self, id: ScheduleId, schedule: VestingSchedule) -> Result<(), VestingError>;

    fn committed_total(&self) -> u64;
    fn set_committed_total(&mut self, total: u64);

    /// Registry of admitted ids in admission order (not deduplicated).
    fn ids(&self) -> &[ScheduleId];
    fn push_id(&mut self, id: ScheduleId) -> Result<(), VestingError>;
    /// Fails with the error `push_id` would return, without appending.
    fn check_push_id(&self) -> Result<(), VestingError> {
        Ok(())
    }

    /// `Σ(total_amount - released)` over the records, `None` when the store
    /// cannot enumerate them.
    fn outstanding_total(&self) -> Option<u128> {
        None
    }
}

/// In-memory store, used for off-chain simulation and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    schedules: BTreeMap<ScheduleId, VestingSchedule>,
    ids: Vec<ScheduleId>,
    committed_total: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedules(&self) -> impl Iterator<Item = (&ScheduleId, &VestingSchedule)> {
        self.schedules.iter().filter(|(_, s)| s.initialized)
    }
}

impl ScheduleStore for MemoryStore {
    fn get(&self, id: &ScheduleId) -> Result<&VestingSchedule, VestingError> {
        self.schedules
            .get(id)
            .filter(|s| s.initialized)
            .ok_or(VestingError::ScheduleNotFound)
    }

    fn get_mut(&mut self, id: &ScheduleId) -> Result<&mut VestingSchedule, VestingError> {
        self.schedules
            .get_mut(id)
            .filter(|s| s.initialized)
            .ok_or(VestingError::ScheduleNotFound)
    }

    fn insert(&mut self, id: ScheduleId, schedule: VestingSchedule) -> Result<(), VestingError> {
        self.schedules.insert(id, schedule);
        Ok(())
    }

    fn committed_total(&self) -> u64 {
        self.committed_total
    }

    fn set_committed_total(&mut self, total: u64) {
        self.committed_total = total;
    }

    fn ids(&self) -> &[ScheduleId] {
        &self.ids
    }

    fn push_id(&mut self, id: ScheduleId) -> Result<(), VestingError> {
        self.ids.push(id);
        Ok(())
    }

    fn outstanding_total(&self) -> Option<u128> {
        Some(
            self.schedules()
                .map(|(_, s)| u128::from(s.unreleased()))
                .sum(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::prelude::Pubkey;

    #[test]
    fn uninitialized_slot_reads_as_missing() {
        let mut store = MemoryStore::new();
        let id = [7u8; 32];
        assert!(matches!(store.get(&id), Err(VestingError::ScheduleNotFound)));
        store.insert(id, VestingSchedule::default()).unwrap();
        assert!(matches!(store.get(&id), Err(VestingError::ScheduleNotFound)));
        assert!(matches!(store.get_mut(&id), Err(VestingError::ScheduleNotFound)));
    }

    #[test]
    fn insert_overwrites_and_registry_keeps_duplicates() {
        let mut store = MemoryStore::new();
        let id = [1u8; 32];
        let owner = Pubkey::new_unique();
        store.insert(id, VestingSchedule::new(owner, 10, 0, 10, 50)).unwrap();
        store.push_id(id).unwrap();
        store.insert(id, VestingSchedule::new(owner, 20, 0, 10, 80)).unwrap();
        store.push_id(id).unwrap();

        assert_eq!(store.get(&id).unwrap().total_amount, 80);
        assert_eq!(store.ids(), &[id, id]);
        assert_eq!(store.schedules().count(), 1);
    }

    #[test]
    fn outstanding_total_sums_unreleased() {
        let mut store = MemoryStore::new();
        let mut a = VestingSchedule::new(Pubkey::new_unique(), 1, 0, 10, 100);
        a.released = 40;
        let b = VestingSchedule::new(Pubkey::new_unique(), 1, 0, 10, 25);
        store.insert([1u8; 32], a).unwrap();
        store.insert([2u8; 32], b).unwrap();
        store.insert([3u8; 32], VestingSchedule::default()).unwrap();
        assert_eq!(store.outstanding_total(), Some(85));
    }
}
