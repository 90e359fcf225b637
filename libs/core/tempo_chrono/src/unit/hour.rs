use chrono::{Duration, Timelike};

use crate::interval::{in_half_open, UnitWindow, Window};
use crate::timepoint::DateTime;

// -----------------------------------------------------------------------------
// Hour
// -----------------------------------------------------------------------------
/// Hour-aligned window engine over a `(target, reference)` pair.
///
/// Boundaries are the reference shifted by the offset and truncated to the
/// whole hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hour {
    target: DateTime,
    reference: DateTime,
}

impl Hour {
    #[inline]
    pub fn new(target: DateTime, reference: DateTime) -> Self {
        Self { target, reference }
    }

    /// Hour of the day of the target (0-23).
    #[inline]
    pub fn value(&self) -> u32 {
        self.target.hour()
    }
}

impl UnitWindow for Hour {
    fn contains(&self, window: Window) -> bool {
        let bound = |n: i64| {
            let shifted = self.reference.checked_add_signed(Duration::try_hours(n)?)?;
            shifted.date().and_hms_opt(shifted.hour(), 0, 0)
        };
        let (Some(start), Some(end)) = (bound(window.start()), bound(window.end())) else {
            return false;
        };
        in_half_open(start, self.target, end)
    }
}
