use chrono::Datelike;

use crate::interval::{in_half_open, UnitWindow, Window};
use crate::timepoint::DateTime;

// -----------------------------------------------------------------------------
// Year
// -----------------------------------------------------------------------------
/// Calendar-year window engine over a `(target, reference)` pair.
///
/// Membership compares plain year numbers, the degenerate case of the
/// month-index scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Year {
    target: DateTime,
    reference: DateTime,
}

impl Year {
    #[inline]
    pub fn new(target: DateTime, reference: DateTime) -> Self {
        Self { target, reference }
    }

    /// Year number of the target.
    #[inline]
    pub fn value(&self) -> i32 {
        self.target.year()
    }

    /// Ordinal day of the year of the target (1-366).
    #[inline]
    pub fn day_of_year(&self) -> u32 {
        self.target.ordinal()
    }

    /// Tests whether the target falls on the `n`-th day of its year.
    #[inline]
    pub fn is_day_of_year(&self, n: u32) -> bool {
        self.day_of_year() == n
    }
}

impl UnitWindow for Year {
    fn contains(&self, window: Window) -> bool {
        let base = i64::from(self.reference.year());
        let (Some(start), Some(end)) = (
            base.checked_add(window.start()),
            base.checked_add(window.end()),
        ) else {
            return false;
        };
        in_half_open(start, i64::from(self.target.year()), end)
    }
}
