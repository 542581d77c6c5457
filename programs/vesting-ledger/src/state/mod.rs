pub mod ledger_state;
pub mod schedule_registry;
pub mod vesting_schedule;

pub use ledger_state::*;
pub use schedule_registry::*;
pub use vesting_schedule::*;
