use chrono::{Datelike, Duration};

use crate::interval::{in_half_open, UnitWindow, Window};
use crate::timepoint::{DateTime, Weekday};

// -----------------------------------------------------------------------------
// Week
// -----------------------------------------------------------------------------
/// Week window engine over a `(target, reference)` pair.
///
/// Boundaries are week starts: the first day of the reference's week shifted
/// by the offset in whole weeks. Which weekday opens a week is configurable
/// and defaults to Monday.
///
/// # Examples
/// ```
/// use chrono::{NaiveDate, Weekday};
/// use tempo_chrono::interval::UnitWindow;
/// use tempo_chrono::unit::Week;
///
/// // 2024-01-03 is a Wednesday, 2024-01-08 the following Monday
/// let target = NaiveDate::from_ymd_opt(2024, 1, 3)
///     .unwrap()
///     .and_hms_opt(9, 0, 0)
///     .unwrap();
/// let reference = NaiveDate::from_ymd_opt(2024, 1, 8)
///     .unwrap()
///     .and_hms_opt(9, 0, 0)
///     .unwrap();
///
/// assert!(Week::new(target, reference).within(-1, Some(0)).unwrap());
/// assert!(!Week::new(target, reference).within(0, None).unwrap());
///
/// // with Sunday-opened weeks the target falls two weeks back
/// let week = Week::with_week_start(target, reference, Weekday::Sun);
/// assert!(week.within(-1, Some(0)).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Week {
    target: DateTime,
    reference: DateTime,
    week_start: Weekday,
}

impl Week {
    #[inline]
    pub fn new(target: DateTime, reference: DateTime) -> Self {
        Self::with_week_start(target, reference, Weekday::Mon)
    }

    #[inline]
    pub fn with_week_start(target: DateTime, reference: DateTime, week_start: Weekday) -> Self {
        Self {
            target,
            reference,
            week_start,
        }
    }

    /// ISO week number of the target (1-53).
    #[inline]
    pub fn value(&self) -> u32 {
        self.target.iso_week().week()
    }
}

impl UnitWindow for Week {
    fn contains(&self, window: Window) -> bool {
        let into_week = i64::from(
            (self.reference.weekday().num_days_from_monday() as i32
                - self.week_start.num_days_from_monday() as i32)
                .rem_euclid(7),
        );
        let bound = |n: i64| {
            let days = n.checked_mul(7)?.checked_sub(into_week)?;
            self.reference
                .date()
                .checked_add_signed(Duration::try_days(days)?)
        };
        let (Some(start), Some(end)) = (bound(window.start()), bound(window.end())) else {
            return false;
        };
        in_half_open(start, self.target.date(), end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timepoint::Date;

    fn at(y: i32, m: u32, d: u32) -> DateTime {
        Date::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_half_open_boundaries() {
        // 2024-01-10 is a Wednesday; its Monday-opened week is [Jan 8, Jan 15)
        let reference = at(2024, 1, 10);

        assert!(Week::new(at(2024, 1, 8), reference).within(0, None).unwrap());
        assert!(Week::new(at(2024, 1, 14), reference).within(0, None).unwrap());
        assert!(!Week::new(at(2024, 1, 15), reference).within(0, None).unwrap());
        assert!(!Week::new(at(2024, 1, 7), reference).within(0, None).unwrap());
    }

    #[test]
    fn test_last_week() {
        let reference = at(2024, 1, 10);

        assert!(Week::new(at(2024, 1, 1), reference).within(-1, Some(0)).unwrap());
        assert!(!Week::new(at(2023, 12, 31), reference)
            .within(-1, Some(0))
            .unwrap());
    }

    #[test]
    fn test_sunday_opened_weeks() {
        // with Sunday as week start the reference week is [Jan 7, Jan 14)
        let reference = at(2024, 1, 10);

        let week = |t| Week::with_week_start(t, reference, Weekday::Sun);
        assert!(week(at(2024, 1, 7)).within(0, None).unwrap());
        assert!(week(at(2024, 1, 13)).within(0, None).unwrap());
        assert!(!week(at(2024, 1, 14)).within(0, None).unwrap());
    }

    #[test]
    fn test_reference_on_week_start() {
        let reference = at(2024, 1, 8); // a Monday

        assert!(Week::new(at(2024, 1, 8), reference).within(0, None).unwrap());
        assert!(Week::new(at(2024, 1, 7), reference).within(-1, Some(0)).unwrap());
    }

    #[test]
    fn test_value() {
        assert_eq!(Week::new(at(2024, 1, 10), at(2024, 1, 1)).value(), 2);
    }
}
