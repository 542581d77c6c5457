//! Program-wide constants.

/// Seed for the ledger state PDA (one per mint).
pub const LEDGER_SEED: &[u8] = b"ledger";

/// Seed for the vault token account PDA owned by the ledger.
pub const VAULT_SEED: &[u8] = b"vault";

/// Seed for the append-only schedule id registry PDA.
pub const REGISTRY_SEED: &[u8] = b"registry";

/// Seed for per-beneficiary schedule PDAs.
pub const SCHEDULE_SEED: &[u8] = b"schedule";

/// Max schedule ids the on-chain registry can hold (re-admissions count again).
pub const MAX_SCHEDULES: usize = 128;

/// Domain tag mixed into the schedule id hash.
pub const SCHEDULE_ID_DOMAIN: [u8; 8] = *b"vest-id1";
