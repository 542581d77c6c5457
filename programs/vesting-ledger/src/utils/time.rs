//! Vesting window boundaries in Unix seconds.
//! - cliff_end   = start + cliff
//! - vesting_end = start + cliff + duration
//! Both are computed with checked math; a window that does not fit in `i64`
//! is rejected instead of wrapping.

use crate::error::VestingError;

pub fn cliff_end(start_ts: i64, cliff_seconds: u64) -> Result<i64, VestingError> {
    start_ts
        .checked_add_unsigned(cliff_seconds)
        .ok_or(VestingError::MathOverflow)
}

pub fn vesting_end(
    start_ts: i64,
    cliff_seconds: u64,
    duration_seconds: u64,
) -> Result<i64, VestingError> {
    cliff_end(start_ts, cliff_seconds)?
        .checked_add_unsigned(duration_seconds)
        .ok_or(VestingError::MathOverflow)
}

/// Seconds elapsed since `from`, zero if `now` is earlier.
pub fn seconds_since(now_ts: i64, from_ts: i64) -> u64 {
    if now_ts <= from_ts {
        return 0;
    }
    // now > from, so the difference is positive and fits in u64.
    (now_ts as i128 - from_ts as i128) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_boundaries() {
        let start = 1_767_225_600; // 2026-01-01
        assert_eq!(cliff_end(start, 1_000).unwrap(), start + 1_000);
        assert_eq!(vesting_end(start, 1_000, 10_000).unwrap(), start + 11_000);
    }

    #[test]
    fn overflowing_window_is_rejected() {
        assert!(matches!(
            vesting_end(i64::MAX - 10, 5, 10),
            Err(VestingError::MathOverflow)
        ));
        assert!(matches!(
            cliff_end(0, u64::MAX),
            Err(VestingError::MathOverflow)
        ));
    }

    #[test]
    fn seconds_since_clamps_at_zero() {
        assert_eq!(seconds_since(100, 200), 0);
        assert_eq!(seconds_since(200, 200), 0);
        assert_eq!(seconds_since(250, 200), 50);
        assert_eq!(seconds_since(i64::MAX, i64::MIN), u64::MAX);
    }
}
