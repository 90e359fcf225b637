use chrono::Datelike;

use crate::interval::{in_half_open, UnitWindow, Window};
use crate::timepoint::DateTime;

// -----------------------------------------------------------------------------
// Quarter
// -----------------------------------------------------------------------------
/// Calendar-quarter window engine over a `(target, reference)` pair.
///
/// Membership compares monotonic quarter indices
/// (`year * 4 + zero_based_quarter`), the same scheme the month engine uses
/// at month granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quarter {
    target: DateTime,
    reference: DateTime,
}

fn quarter_index(d: &DateTime) -> i64 {
    i64::from(d.year()) * 4 + i64::from((d.month() - 1) / 3)
}

impl Quarter {
    #[inline]
    pub fn new(target: DateTime, reference: DateTime) -> Self {
        Self { target, reference }
    }

    /// Calendar quarter of the target (1-4).
    #[inline]
    pub fn value(&self) -> u32 {
        (self.target.month() - 1) / 3 + 1
    }

    /// Quarter label of the target, e.g. `"Q3"`.
    #[inline]
    pub fn name(&self) -> String {
        format!("Q{}", self.value())
    }
}

impl UnitWindow for Quarter {
    fn contains(&self, window: Window) -> bool {
        let base = quarter_index(&self.reference);
        let (Some(start), Some(end)) = (
            base.checked_add(window.start()),
            base.checked_add(window.end()),
        ) else {
            return false;
        };
        in_half_open(start, quarter_index(&self.target), end)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

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
        let reference = at(2024, 5, 15); // Q2: [Apr 1, Jul 1)

        assert!(Quarter::new(at(2024, 4, 1), reference).within(0, None).unwrap());
        assert!(Quarter::new(at(2024, 6, 30), reference).within(0, None).unwrap());
        assert!(!Quarter::new(at(2024, 7, 1), reference).within(0, None).unwrap());
        assert!(!Quarter::new(at(2024, 3, 31), reference).within(0, None).unwrap());
    }

    #[test]
    fn test_window_crosses_year_end() {
        let reference = at(2024, 2, 1); // Q1 2024

        assert!(Quarter::new(at(2023, 12, 31), reference)
            .within(-1, Some(0))
            .unwrap());
        assert!(Quarter::new(at(2023, 10, 1), reference)
            .within(-1, Some(0))
            .unwrap());
        assert!(!Quarter::new(at(2023, 9, 30), reference)
            .within(-1, Some(0))
            .unwrap());
    }

    #[rstest]
    #[case(-80, at(2004, 5, 1))]
    #[case(80, at(2044, 5, 1))]
    fn test_index_matches_calendar_distance(#[case] offset: i64, #[case] target: DateTime) {
        let reference = at(2024, 5, 15);

        let quarter = Quarter::new(target, reference);
        assert!(quarter.within(offset, None).unwrap());
        assert!(!quarter.within(offset + 1, None).unwrap());
    }

    #[rstest]
    #[case(at(2024, 1, 1), 1, "Q1")]
    #[case(at(2024, 6, 30), 2, "Q2")]
    #[case(at(2024, 12, 31), 4, "Q4")]
    fn test_value_and_name(#[case] target: DateTime, #[case] value: u32, #[case] name: &str) {
        let quarter = Quarter::new(target, at(2024, 1, 1));

        assert_eq!(quarter.value(), value);
        assert_eq!(quarter.name(), name);
    }
}
