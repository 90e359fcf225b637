use chrono::{Duration, Timelike};

use crate::interval::{in_half_open, UnitWindow, Window};
use crate::timepoint::DateTime;

// -----------------------------------------------------------------------------
// Minute
// -----------------------------------------------------------------------------
/// Minute-aligned window engine over a `(target, reference)` pair.
///
/// Boundaries are the reference shifted by the offset and truncated to the
/// whole minute, so the window covers full clock minutes.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use tempo_chrono::interval::UnitWindow;
/// use tempo_chrono::unit::Minute;
///
/// let reference = NaiveDate::from_ymd_opt(2024, 1, 1)
///     .unwrap()
///     .and_hms_opt(12, 30, 45)
///     .unwrap();
/// let target = reference - chrono::Duration::seconds(50);
///
/// // 12:29:55 is inside the previous clock minute
/// assert!(Minute::new(target, reference).within(-1, None).unwrap());
/// assert!(!Minute::new(target, reference).within(0, None).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Minute {
    target: DateTime,
    reference: DateTime,
}

impl Minute {
    #[inline]
    pub fn new(target: DateTime, reference: DateTime) -> Self {
        Self { target, reference }
    }

    /// Minute of the hour of the target (0-59).
    #[inline]
    pub fn value(&self) -> u32 {
        self.target.minute()
    }
}

impl UnitWindow for Minute {
    fn contains(&self, window: Window) -> bool {
        let bound = |n: i64| {
            let shifted = self.reference.checked_add_signed(Duration::try_minutes(n)?)?;
            shifted
                .date()
                .and_hms_opt(shifted.hour(), shifted.minute(), 0)
        };
        let (Some(start), Some(end)) = (bound(window.start()), bound(window.end())) else {
            return false;
        };
        in_half_open(start, self.target, end)
    }
}
