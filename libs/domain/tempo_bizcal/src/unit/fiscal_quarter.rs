use tempo_chrono::interval::{in_half_open, UnitWindow, Window};
use tempo_chrono::timepoint::DateTime;

use crate::fiscal::{fiscal_quarter, fiscal_quarter_index};
use crate::policy::CalendarPolicy;

// -----------------------------------------------------------------------------
// FiscalQuarter
// -----------------------------------------------------------------------------
/// Fiscal-quarter window engine over a `(target, reference)` pair.
///
/// Membership compares monotonic fiscal quarter indices derived from the
/// policy's fiscal-year start month, the same integer-index scheme the
/// calendar quarter engine uses.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use tempo_bizcal::policy::CalendarPolicy;
/// use tempo_bizcal::unit::FiscalQuarter;
/// use tempo_chrono::interval::UnitWindow;
///
/// let policy = CalendarPolicy::builder()
///     .with_fiscal_year_start_month(4)
///     .build()
///     .unwrap();
///
/// // 2024-03-31 is the last day of fiscal Q4; 2024-04-01 opens fiscal Q1
/// let target = NaiveDate::from_ymd_opt(2024, 3, 31)
///     .unwrap()
///     .and_hms_opt(23, 0, 0)
///     .unwrap();
/// let reference = NaiveDate::from_ymd_opt(2024, 4, 1)
///     .unwrap()
///     .and_hms_opt(0, 0, 0)
///     .unwrap();
///
/// let quarter = FiscalQuarter::new(target, reference, policy);
/// assert!(quarter.within(-1, Some(0)).unwrap());
/// assert!(!quarter.within(0, None).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiscalQuarter {
    target: DateTime,
    reference: DateTime,
    policy: CalendarPolicy,
}

impl FiscalQuarter {
    #[inline]
    pub fn new(target: DateTime, reference: DateTime, policy: CalendarPolicy) -> Self {
        Self {
            target,
            reference,
            policy,
        }
    }

    /// Fiscal quarter of the target (1-4).
    #[inline]
    pub fn value(&self) -> u32 {
        fiscal_quarter(self.target, self.policy.fiscal_year_start_month())
    }

    /// Fiscal quarter label of the target, e.g. `"Q1"`.
    #[inline]
    pub fn name(&self) -> String {
        format!("Q{}", self.value())
    }
}

impl UnitWindow for FiscalQuarter {
    fn contains(&self, window: Window) -> bool {
        let start_month = self.policy.fiscal_year_start_month();
        let base = fiscal_quarter_index(self.reference, start_month);
        let (Some(start), Some(end)) = (
            base.checked_add(window.start()),
            base.checked_add(window.end()),
        ) else {
            return false;
        };
        in_half_open(start, fiscal_quarter_index(self.target, start_month), end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempo_chrono::timepoint::Date;

    fn at(y: i32, m: u32, d: u32) -> DateTime {
        Date::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn april_policy() -> CalendarPolicy {
        CalendarPolicy::builder()
            .with_fiscal_year_start_month(4)
            .build()
            .unwrap()
    }

    #[test]
    fn test_half_open_boundaries() {
        // fiscal Q1 of an April-start year is [Apr 1, Jul 1)
        let reference = at(2024, 5, 15);

        let quarter = |t| FiscalQuarter::new(t, reference, april_policy());
        assert!(quarter(at(2024, 4, 1)).within(0, None).unwrap());
        assert!(quarter(at(2024, 6, 30)).within(0, None).unwrap());
        assert!(!quarter(at(2024, 7, 1)).within(0, None).unwrap());
        assert!(!quarter(at(2024, 3, 31)).within(0, None).unwrap());
    }

    #[test]
    fn test_window_crosses_fiscal_year_end() {
        // reference in fiscal Q1; previous quarter is last year's Q4
        let reference = at(2024, 4, 10);

        let quarter = FiscalQuarter::new(at(2024, 2, 1), reference, april_policy());

        assert!(quarter.within(-1, Some(0)).unwrap());
        assert!(!quarter.within(0, None).unwrap());
    }

    #[test]
    fn test_value_and_name() {
        let quarter = FiscalQuarter::new(at(2024, 3, 31), at(2024, 1, 1), april_policy());

        assert_eq!(quarter.value(), 4);
        assert_eq!(quarter.name(), "Q4");
    }
}
