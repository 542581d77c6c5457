//! Cliff + linear release curve.
//!
//! - `now < cliff_end`            => 0
//! - `now >= cliff_end + duration` => total_amount
//! - otherwise                    => floor(total * (now - cliff_end) / duration)
//!
//! The result is cumulative (vested to date), independent of `released`.

use crate::error::VestingError;
use crate::state::VestingSchedule;
use crate::utils::time;

pub fn releasable(schedule: &VestingSchedule, now_ts: i64) -> Result<u64, VestingError> {
    let cliff_end = schedule.cliff_end()?;
    if now_ts < cliff_end {
        return Ok(0);
    }
    if now_ts >= schedule.vesting_end()? {
        return Ok(schedule.total_amount);
    }
    // cliff_end <= now < vesting_end, so duration_seconds > 0 here.
    let elapsed = time::seconds_since(now_ts, cliff_end) as u128;
    let vested = (schedule.total_amount as u128)
        .checked_mul(elapsed)
        .ok_or(VestingError::MathOverflow)?
        .checked_div(schedule.duration_seconds as u128)
        .ok_or(VestingError::MathOverflow)?;
    u64::try_from(vested).map_err(|_| VestingError::MathOverflow)
}

/// Vested but not yet released.
pub fn claimable(schedule: &VestingSchedule, now_ts: i64) -> Result<u64, VestingError> {
    releasable(schedule, now_ts)?
        .checked_sub(schedule.released)
        .ok_or(VestingError::MathOverflow)
}
