//! Engine ports backed by the accounts of a single instruction.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

use crate::constants::{LEDGER_SEED, MAX_SCHEDULES};
use crate::engine::{AssetPort, ScheduleStore};
use crate::error::VestingError;
use crate::state::{LedgerState, ScheduleRegistry, VestingSchedule};
use crate::utils::schedule_id::ScheduleId;

/// Store view over the ledger PDA plus whichever registry and schedule slot
/// the instruction loaded. Ids other than the loaded slot read as missing.
pub struct AccountStore<'a> {
    ledger: &'a mut LedgerState,
    registry: Option<&'a mut ScheduleRegistry>,
    slot: Option<(ScheduleId, &'a mut VestingSchedule)>,
}

impl<'a> AccountStore<'a> {
    pub fn new(ledger: &'a mut LedgerState) -> Self {
        Self {
            ledger,
            registry: None,
            slot: None,
        }
    }

    pub fn with_registry(mut self, registry: &'a mut ScheduleRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_slot(mut self, id: ScheduleId, schedule: &'a mut VestingSchedule) -> Self {
        self.slot = Some((id, schedule));
        self
    }
}

impl ScheduleStore for AccountStore<'_> {
    fn get(&self, id: &ScheduleId) -> std::result::Result<&VestingSchedule, VestingError> {
        match self.slot.as_ref() {
            Some((slot_id, schedule)) if slot_id == id && schedule.initialized => Ok(&**schedule),
            _ => Err(VestingError::ScheduleNotFound),
        }
    }

    fn get_mut(
        &mut self,
        id: &ScheduleId,
    ) -> std::result::Result<&mut VestingSchedule, VestingError> {
        match self.slot.as_mut() {
            Some((slot_id, schedule)) if *slot_id == *id && schedule.initialized => {
                Ok(&mut **schedule)
            }
            _ => Err(VestingError::ScheduleNotFound),
        }
    }

    fn insert(
        &mut self,
        id: ScheduleId,
        schedule: VestingSchedule,
    ) -> std::result::Result<(), VestingError> {
        match self.slot.as_mut() {
            Some((slot_id, slot)) if *slot_id == id => {
                **slot = schedule;
                Ok(())
            }
            _ => Err(VestingError::MissingAccount),
        }
    }

    fn committed_total(&self) -> u64 {
        self.ledger.committed_total
    }

    fn set_committed_total(&mut self, total: u64) {
        self.ledger.committed_total = total;
    }

    fn ids(&self) -> &[ScheduleId] {
        self.registry
            .as_ref()
            .map(|r| r.ids.as_slice())
            .unwrap_or(&[])
    }

    fn push_id(&mut self, id: ScheduleId) -> std::result::Result<(), VestingError> {
        self.check_push_id()?;
        let registry = self
            .registry
            .as_mut()
            .ok_or(VestingError::MissingAccount)?;
        registry.ids.push(id);
        Ok(())
    }

    fn check_push_id(&self) -> std::result::Result<(), VestingError> {
        let registry = self
            .registry
            .as_ref()
            .ok_or(VestingError::MissingAccount)?;
        if registry.ids.len() >= MAX_SCHEDULES {
            return Err(VestingError::RegistryFull);
        }
        Ok(())
    }
}

/// SPL token vault owned by the ledger PDA. Transfers are CPIs signed with
/// the ledger seeds and may only go to the destination the instruction
/// supplied.
pub struct VaultPort<'info> {
    vault_key: Pubkey,
    vault_amount: u64,
    vault: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
    mint: Pubkey,
    ledger_bump: u8,
    destination: Option<(Pubkey, AccountInfo<'info>)>,
}

impl<'info> VaultPort<'info> {
    pub fn new(
        vault: AccountInfo<'info>,
        vault_amount: u64,
        authority: AccountInfo<'info>,
        token_program: AccountInfo<'info>,
        mint: Pubkey,
        ledger_bump: u8,
    ) -> Self {
        Self {
            vault_key: *vault.key,
            vault_amount,
            vault,
            authority,
            token_program,
            mint,
            ledger_bump,
            destination: None,
        }
    }

    /// `owner` is the wallet that owns `account`.
    pub fn with_destination(mut self, owner: Pubkey, account: AccountInfo<'info>) -> Self {
        self.destination = Some((owner, account));
        self
    }
}

impl AssetPort for VaultPort<'_> {
    fn balance_of(&self, holder: &Pubkey) -> std::result::Result<u64, VestingError> {
        if *holder != self.vault_key {
            return Err(VestingError::InvalidTokenAccount);
        }
        Ok(self.vault_amount)
    }

    fn transfer(&mut self, to: &Pubkey, amount: u64) -> std::result::Result<(), VestingError> {
        let (owner, destination) = self
            .destination
            .as_ref()
            .ok_or(VestingError::MissingAccount)?;
        if owner != to {
            return Err(VestingError::InvalidTokenAccount);
        }

        let bump = [self.ledger_bump];
        let seeds: &[&[u8]] = &[LEDGER_SEED, self.mint.as_ref(), &bump];
        let signer_seeds = &[seeds];
        token::transfer(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                Transfer {
                    from: self.vault.clone(),
                    to: destination.clone(),
                    authority: self.authority.clone(),
                },
                signer_seeds,
            ),
            amount,
        )
        .map_err(|err| {
            msg!("vault transfer of {} failed: {}", amount, err);
            VestingError::TransferFailed
        })?;

        self.vault_amount = self
            .vault_amount
            .checked_sub(amount)
            .ok_or(VestingError::MathOverflow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::MockAsset;
    use crate::engine::{AdminKey, FixedClock, NewSchedule, VestingEngine};
    use crate::utils::schedule_id::schedule_id;

    fn sample_ledger() -> LedgerState {
        LedgerState {
            committed_total: 70,
            ..LedgerState::default()
        }
    }

    #[test]
    fn only_the_loaded_slot_is_visible() {
        let mut ledger = sample_ledger();
        let alice = Pubkey::new_unique();
        let id = schedule_id(&alice);
        let mut slot = VestingSchedule::new(alice, 10, 0, 10, 70);
        let store = AccountStore::new(&mut ledger).with_slot(id, &mut slot);

        assert_eq!(store.get(&id).unwrap().total_amount, 70);
        assert!(matches!(
            store.get(&schedule_id(&Pubkey::new_unique())),
            Err(VestingError::ScheduleNotFound)
        ));
        assert_eq!(store.committed_total(), 70);
    }

    #[test]
    fn zeroed_slot_reads_as_missing_until_inserted() {
        let mut ledger = sample_ledger();
        let mut registry = ScheduleRegistry::default();
        let alice = Pubkey::new_unique();
        let id = schedule_id(&alice);
        let mut slot = VestingSchedule::default();
        {
            let mut store = AccountStore::new(&mut ledger)
                .with_registry(&mut registry)
                .with_slot(id, &mut slot);
            assert!(matches!(store.get(&id), Err(VestingError::ScheduleNotFound)));
            store
                .insert(id, VestingSchedule::new(alice, 10, 0, 10, 5))
                .unwrap();
            store.push_id(id).unwrap();
            store.set_committed_total(75);
            assert_eq!(store.ids(), &[id]);
        }
        assert!(slot.initialized);
        assert_eq!(slot.total_amount, 5);
        assert_eq!(registry.ids, vec![id]);
        assert_eq!(ledger.committed_total, 75);
    }

    #[test]
    fn insert_into_foreign_slot_is_refused() {
        let mut ledger = sample_ledger();
        let mut slot = VestingSchedule::default();
        let mut store = AccountStore::new(&mut ledger).with_slot([1u8; 32], &mut slot);
        assert!(matches!(
            store.insert([2u8; 32], VestingSchedule::default()),
            Err(VestingError::MissingAccount)
        ));
    }

    #[test]
    fn registry_is_bounded() {
        let mut ledger = sample_ledger();
        let mut registry = ScheduleRegistry {
            ids: vec![[0u8; 32]; MAX_SCHEDULES],
        };
        let mut store = AccountStore::new(&mut ledger).with_registry(&mut registry);
        assert!(matches!(store.check_push_id(), Err(VestingError::RegistryFull)));
        assert!(matches!(
            store.push_id([1u8; 32]),
            Err(VestingError::RegistryFull)
        ));
    }

    #[test]
    fn store_without_registry_reports_no_ids() {
        let mut ledger = sample_ledger();
        let mut store = AccountStore::new(&mut ledger);
        assert!(store.ids().is_empty());
        assert!(matches!(
            store.push_id([1u8; 32]),
            Err(VestingError::MissingAccount)
        ));
    }

    #[test]
    fn admission_without_registry_leaves_slot_untouched() {
        let admin = Pubkey::new_unique();
        let vault = Pubkey::new_unique();
        let mut ledger = LedgerState {
            admin,
            vault,
            ..LedgerState::default()
        };
        let alice = Pubkey::new_unique();
        let id = schedule_id(&alice);
        let mut slot = VestingSchedule::default();

        let store = AccountStore::new(&mut ledger).with_slot(id, &mut slot);
        let mut engine = VestingEngine::new(
            store,
            MockAsset::with_balance(vault, 1_000),
            AdminKey(admin),
            FixedClock(200),
            vault,
        );
        let result = engine.admit(
            &admin,
            NewSchedule {
                beneficiary: alice,
                start_ts: 100,
                cliff_seconds: 0,
                duration_seconds: 10,
                total_amount: 600,
            },
        );
        assert!(matches!(result, Err(VestingError::MissingAccount)));
        drop(engine);

        assert!(!slot.initialized);
        assert_eq!(slot, VestingSchedule::default());
        assert_eq!(ledger.committed_total, 0);
    }

    #[test]
    fn engine_runs_against_instruction_accounts() {
        let admin = Pubkey::new_unique();
        let vault = Pubkey::new_unique();
        let mut ledger = LedgerState {
            admin,
            vault,
            ..LedgerState::default()
        };
        let mut registry = ScheduleRegistry::default();
        let alice = Pubkey::new_unique();
        let id = schedule_id(&alice);
        let mut slot = VestingSchedule::default();
        let schedule = |beneficiary, total_amount| NewSchedule {
            beneficiary,
            start_ts: 100,
            cliff_seconds: 0,
            duration_seconds: 10,
            total_amount,
        };

        let store = AccountStore::new(&mut ledger)
            .with_registry(&mut registry)
            .with_slot(id, &mut slot);
        let mut engine = VestingEngine::new(
            store,
            MockAsset::with_balance(vault, 1_000),
            AdminKey(admin),
            FixedClock(200),
            vault,
        );
        engine.admit(&admin, schedule(alice, 600)).unwrap();
        // Only alice's slot was loaded by this instruction.
        assert!(matches!(
            engine.admit(&admin, schedule(Pubkey::new_unique(), 100)),
            Err(VestingError::MissingAccount)
        ));
        engine.release(&alice, &id, 600).unwrap();
        assert_eq!(engine.asset().balance(&alice), 600);
        // Account-backed stores cannot enumerate, so only solvency is checked.
        engine.check_invariants().unwrap();
        drop(engine);

        assert_eq!(ledger.committed_total, 0);
        assert_eq!(registry.ids, vec![id]);
        assert_eq!(slot.total_amount, 600);
        assert_eq!(slot.released, 600);
    }
}
