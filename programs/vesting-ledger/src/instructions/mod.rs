pub mod initialize_ledger;
pub mod deposit_tokens;
pub mod create_schedule;
pub mod release;
pub mod admin_withdraw;
pub mod sweep_uncommitted;
pub mod emit_vesting_quote;
pub mod emit_ledger_summary;
pub mod transfer_admin;

pub use initialize_ledger::*;
pub use deposit_tokens::*;
pub use create_schedule::*;
pub use release::*;
pub use admin_withdraw::*;
pub use sweep_uncommitted::*;
pub use emit_vesting_quote::*;
pub use emit_ledger_summary::*;
pub use transfer_admin::*;
