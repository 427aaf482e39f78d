//! Bounded-wait policy for store calls.
//!
//! Single-row operations get a fixed deadline; batch creation scales the
//! deadline with the number of submitted rows.

use std::time::Duration;

/// Deadline for find/exists calls on a single row.
pub const SINGLE_ROW_WAIT: Duration = Duration::from_millis(1000);

/// Per-element allowance for batch creation.
pub const BATCH_WAIT_PER_ROW: Duration = Duration::from_millis(100);

/// Total deadline for saving a batch of `rows` elements.
pub fn batch_wait(rows: usize) -> Duration {
    let rows = u32::try_from(rows).unwrap_or(u32::MAX);
    BATCH_WAIT_PER_ROW.saturating_mul(rows)
}

/// Milliseconds in `d`, saturating, for log and error fields.
pub fn as_millis_u64(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_wait_scales_linearly() {
        assert_eq!(batch_wait(1), Duration::from_millis(100));
        assert_eq!(batch_wait(25), Duration::from_millis(2500));
    }

    #[test]
    fn empty_batch_has_no_wait() {
        assert_eq!(batch_wait(0), Duration::ZERO);
    }

    #[test]
    fn huge_batch_saturates() {
        assert!(batch_wait(usize::MAX) >= batch_wait(1_000_000));
    }
}
