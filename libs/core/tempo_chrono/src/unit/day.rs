use chrono::{Datelike, Duration};

use crate::interval::{in_half_open, UnitWindow, Window};
use crate::timepoint::DateTime;

// -----------------------------------------------------------------------------
// Day
// -----------------------------------------------------------------------------
/// Calendar-day window engine over a `(target, reference)` pair.
///
/// Boundaries are calendar dates: the reference's date shifted by the
/// offset. The target's time of day is irrelevant, only its date is
/// compared.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use tempo_chrono::interval::UnitWindow;
/// use tempo_chrono::unit::Day;
///
/// let target = NaiveDate::from_ymd_opt(2024, 1, 1)
///     .unwrap()
///     .and_hms_opt(12, 0, 0)
///     .unwrap();
/// let reference = NaiveDate::from_ymd_opt(2024, 1, 2)
///     .unwrap()
///     .and_hms_opt(12, 0, 0)
///     .unwrap();
///
/// let day = Day::new(target, reference);
/// assert!(day.within(-1, Some(0)).unwrap());
/// assert!(!day.within(0, None).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Day {
    target: DateTime,
    reference: DateTime,
}

impl Day {
    #[inline]
    pub fn new(target: DateTime, reference: DateTime) -> Self {
        Self { target, reference }
    }

    /// ISO weekday of the target (1 = Monday .. 7 = Sunday).
    #[inline]
    pub fn value(&self) -> u32 {
        self.target.weekday().number_from_monday()
    }

    /// English weekday name of the target, e.g. `"Monday"`.
    #[inline]
    pub fn name(&self) -> String {
        self.target.format("%A").to_string()
    }
}

impl UnitWindow for Day {
    fn contains(&self, window: Window) -> bool {
        let bound = |n: i64| {
            self.reference
                .date()
                .checked_add_signed(Duration::try_days(n)?)
        };
        let (Some(start), Some(end)) = (bound(window.start()), bound(window.end())) else {
            return false;
        };
        in_half_open(start, self.target.date(), end)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::timepoint::Date;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime {
        Date::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_yesterday_window() {
        let target = at(2024, 1, 1, 12);
        let reference = at(2024, 1, 2, 12);

        let day = Day::new(target, reference);

        assert!(day.within(-1, Some(0)).unwrap());
        assert!(!day.within(0, None).unwrap());
    }

    #[rstest]
    #[case(at(2024, 1, 2, 0), true)] // lower boundary (midnight) included
    #[case(at(2024, 1, 2, 23), true)]
    #[case(at(2024, 1, 3, 0), false)] // upper boundary excluded
    #[case(at(2024, 1, 1, 23), false)] // just before lower boundary
    fn test_half_open_boundaries(#[case] target: DateTime, #[case] expected: bool) {
        let reference = at(2024, 1, 2, 12);

        assert_eq!(Day::new(target, reference).within(0, None).unwrap(), expected);
    }

    #[test]
    fn test_window_crosses_month_end() {
        let reference = at(2024, 1, 31, 12);

        assert!(Day::new(at(2024, 2, 1, 0), reference).within(1, None).unwrap());
        assert!(Day::new(at(2024, 2, 29, 0), reference)
            .within(1, Some(30))
            .unwrap());
    }

    #[test]
    fn test_value_and_name() {
        let day = Day::new(at(2024, 1, 1, 0), at(2024, 1, 1, 0)); // a Monday

        assert_eq!(day.value(), 1);
        assert_eq!(day.name(), "Monday");
    }
}
