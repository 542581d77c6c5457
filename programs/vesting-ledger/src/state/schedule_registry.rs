use anchor_lang::prelude::*;

use crate::constants::MAX_SCHEDULES;
use crate::utils::schedule_id::ScheduleId;

/// Append-only list of admitted schedule ids, in admission order.
/// Re-admitting a beneficiary appends its id again.
#[account]
#[derive(Debug, Default)]
pub struct ScheduleRegistry {
    pub ids: Vec<ScheduleId>,
}

impl ScheduleRegistry {
    /// Space for discriminator + vec header + `MAX_SCHEDULES` ids.
    pub const fn space() -> usize {
        8 + 4 + MAX_SCHEDULES * 32
    }
}
