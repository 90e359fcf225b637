use chrono::{Duration, Timelike};

use crate::interval::{in_half_open, UnitWindow, Window};
use crate::timepoint::DateTime;

// -----------------------------------------------------------------------------
// Second
// -----------------------------------------------------------------------------
/// Second-aligned window engine over a `(target, reference)` pair.
///
/// Boundaries are the reference shifted by the offset and truncated to the
/// whole second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Second {
    target: DateTime,
    reference: DateTime,
}

impl Second {
    #[inline]
    pub fn new(target: DateTime, reference: DateTime) -> Self {
        Self { target, reference }
    }

    /// Second of the minute of the target (0-59).
    #[inline]
    pub fn value(&self) -> u32 {
        self.target.second()
    }
}

impl UnitWindow for Second {
    fn contains(&self, window: Window) -> bool {
        let bound = |n: i64| {
            let shifted = self.reference.checked_add_signed(Duration::try_seconds(n)?)?;
            shifted.with_nanosecond(0)
        };
        let (Some(start), Some(end)) = (bound(window.start()), bound(window.end())) else {
            return false;
        };
        in_half_open(start, self.target, end)
    }
}
