use anyhow::{ensure, Context};
use chrono::Datelike;

use crate::interval::{in_half_open, UnitWindow, Window};
use crate::timepoint::{Date, DateTime, Weekday};

// -----------------------------------------------------------------------------
// Month
// -----------------------------------------------------------------------------
/// Month window engine over a `(target, reference)` pair.
///
/// Membership compares monotonic month indices (`year * 12 + month`) instead
/// of shifted calendar dates, so windows spanning many years never touch
/// variable month lengths.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use tempo_chrono::interval::UnitWindow;
/// use tempo_chrono::unit::Month;
///
/// let target = NaiveDate::from_ymd_opt(2022, 5, 15)
///     .unwrap()
///     .and_hms_opt(0, 0, 0)
///     .unwrap();
/// let reference = NaiveDate::from_ymd_opt(2024, 1, 15)
///     .unwrap()
///     .and_hms_opt(0, 0, 0)
///     .unwrap();
///
/// // 20 months before January 2024 is May 2022
/// assert!(Month::new(target, reference).within(-20, Some(-19)).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month {
    target: DateTime,
    reference: DateTime,
}

fn month_index(d: &DateTime) -> i64 {
    i64::from(d.year()) * 12 + i64::from(d.month())
}

impl Month {
    #[inline]
    pub fn new(target: DateTime, reference: DateTime) -> Self {
        Self { target, reference }
    }

    /// Month of the year of the target (1-12).
    #[inline]
    pub fn value(&self) -> u32 {
        self.target.month()
    }

    /// English month name of the target, e.g. `"January"`.
    #[inline]
    pub fn name(&self) -> String {
        self.target.format("%B").to_string()
    }

    /// Day of the month of the target (1-31).
    #[inline]
    pub fn day_of_month(&self) -> u32 {
        self.target.day()
    }

    /// Date of the `n`-th occurrence of `weekday` in the reference's month.
    ///
    /// Fails when the month has no such occurrence (every month has four of
    /// each weekday, only some have a fifth).
    pub fn nth_weekday(&self, weekday: Weekday, n: u32) -> anyhow::Result<Date> {
        ensure!(1 <= n, "occurrence number must be positive: {n}");
        let first = self
            .reference
            .date()
            .with_day(1)
            .context("first day of the month must exist")?;
        let offset = (weekday.num_days_from_monday() as i32
            - first.weekday().num_days_from_monday() as i32)
            .rem_euclid(7) as u32;
        let day = 1 + offset + 7 * (n - 1);
        first.with_day(day).with_context(|| {
            format!(
                "no {n}th {weekday} in {:04}-{:02}",
                first.year(),
                first.month()
            )
        })
    }

    /// Tests whether the target falls on the `n`-th occurrence of `weekday`
    /// in the reference's month.
    pub fn is_nth_weekday(&self, weekday: Weekday, n: u32) -> bool {
        self.nth_weekday(weekday, n)
            .is_ok_and(|d| d == self.target.date())
    }
}

impl UnitWindow for Month {
    fn contains(&self, window: Window) -> bool {
        let base = month_index(&self.reference);
        let (Some(start), Some(end)) = (
            base.checked_add(window.start()),
            base.checked_add(window.end()),
        ) else {
            return false;
        };
        in_half_open(start, month_index(&self.target), end)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn at(y: i32, m: u32, d: u32) -> DateTime {
        Date::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_half_open_boundaries() {
        let reference = at(2024, 1, 15);

        assert!(Month::new(at(2024, 1, 1), reference).within(0, None).unwrap());
        assert!(Month::new(at(2024, 1, 31), reference).within(0, None).unwrap());
        assert!(!Month::new(at(2024, 2, 1), reference).within(0, None).unwrap());
        assert!(!Month::new(at(2023, 12, 31), reference).within(0, None).unwrap());
    }

    #[test]
    fn test_window_crosses_year_end() {
        let reference = at(2024, 1, 15);

        assert!(Month::new(at(2023, 12, 5), reference).within(-1, Some(0)).unwrap());
        assert!(Month::new(at(2023, 11, 30), reference)
            .within(-2, Some(-1))
            .unwrap());
    }

    #[rstest]
    #[case(-20, at(2022, 5, 1))]
    #[case(-120, at(2014, 1, 1))]
    #[case(120, at(2034, 1, 1))]
    fn test_index_matches_calendar_distance(#[case] offset: i64, #[case] target: DateTime) {
        let reference = at(2024, 1, 15);

        let month = Month::new(target, reference);
        assert!(month.within(offset, None).unwrap());
        assert!(!month.within(offset + 1, None).unwrap());
    }

    #[test]
    fn test_value_name_day() {
        let month = Month::new(at(2024, 3, 17), at(2024, 1, 1));

        assert_eq!(month.value(), 3);
        assert_eq!(month.name(), "March");
        assert_eq!(month.day_of_month(), 17);
    }

    #[rstest]
    #[case(Weekday::Mon, 1, Some(at(2024, 1, 1)))]
    #[case(Weekday::Mon, 5, Some(at(2024, 1, 29)))]
    #[case(Weekday::Wed, 5, Some(at(2024, 1, 31)))]
    #[case(Weekday::Thu, 5, None)]
    fn test_nth_weekday(
        #[case] weekday: Weekday,
        #[case] n: u32,
        #[case] expected: Option<DateTime>,
    ) {
        let month = Month::new(at(2024, 1, 1), at(2024, 1, 15));

        let res = month.nth_weekday(weekday, n);
        match expected {
            Some(d) => assert_eq!(res.unwrap(), d.date()),
            None => assert!(res.is_err()),
        }
    }

    #[test]
    fn test_is_nth_weekday() {
        // 2024-01-15 is the third Monday of January 2024
        let month = Month::new(at(2024, 1, 15), at(2024, 1, 2));

        assert!(month.is_nth_weekday(Weekday::Mon, 3));
        assert!(!month.is_nth_weekday(Weekday::Mon, 2));
        assert!(!month.is_nth_weekday(Weekday::Tue, 3));
    }
}
