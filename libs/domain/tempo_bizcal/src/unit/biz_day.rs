use chrono::Datelike;

use tempo_chrono::interval::{UnitWindow, Window};
use tempo_chrono::timepoint::DateTime;

use super::contains_counted;
use crate::policy::CalendarPolicy;
use crate::stepper::DayRule;

// -----------------------------------------------------------------------------
// BizDay
// -----------------------------------------------------------------------------
/// Business-day window engine over a `(target, reference)` pair.
///
/// Offsets are counted in business days (workdays that are not holidays),
/// so a window of `-1` reaches back over weekends and holidays to the
/// previous day that actually counts.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use tempo_bizcal::policy::CalendarPolicy;
/// use tempo_bizcal::unit::BizDay;
/// use tempo_chrono::interval::UnitWindow;
///
/// // Friday against the following Monday: one business day apart
/// let target = NaiveDate::from_ymd_opt(2025, 12, 5)
///     .unwrap()
///     .and_hms_opt(12, 0, 0)
///     .unwrap();
/// let reference = NaiveDate::from_ymd_opt(2025, 12, 8)
///     .unwrap()
///     .and_hms_opt(12, 0, 0)
///     .unwrap();
///
/// let day = BizDay::new(target, reference, CalendarPolicy::default());
/// assert!(day.within(-1, Some(0)).unwrap());
/// assert!(!day.within(0, None).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BizDay {
    target: DateTime,
    reference: DateTime,
    policy: CalendarPolicy,
}

impl BizDay {
    #[inline]
    pub fn new(target: DateTime, reference: DateTime, policy: CalendarPolicy) -> Self {
        Self {
            target,
            reference,
            policy,
        }
    }

    /// ISO weekday of the target (1 = Monday .. 7 = Sunday).
    #[inline]
    pub fn value(&self) -> u32 {
        self.target.weekday().number_from_monday()
    }

    /// English weekday name of the target.
    #[inline]
    pub fn name(&self) -> String {
        self.target.format("%A").to_string()
    }
}

impl UnitWindow for BizDay {
    fn contains(&self, window: Window) -> bool {
        contains_counted(
            &self.policy,
            DayRule::Business,
            self.target,
            self.reference,
            window,
        )
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

    fn ymd(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_previous_business_day_over_weekend() {
        // reference Monday, target the preceding Friday
        let day = BizDay::new(at(2025, 12, 5), at(2025, 12, 8), CalendarPolicy::default());

        assert!(day.within(-1, Some(0)).unwrap());
        assert!(!day.within(0, None).unwrap());
    }

    #[test]
    fn test_weekend_target_never_member() {
        let day = BizDay::new(at(2025, 12, 6), at(2025, 12, 8), CalendarPolicy::default());

        assert!(!day.within(-5, Some(5)).unwrap());
    }

    #[test]
    fn test_holiday_target_never_member() {
        let policy = CalendarPolicy::builder()
            .with_holidays([ymd(2025, 12, 8)])
            .build()
            .unwrap();

        let day = BizDay::new(at(2025, 12, 8), at(2025, 12, 8), policy);

        assert!(!day.within(0, None).unwrap());
    }

    #[test]
    fn test_holiday_shifts_boundaries() {
        // with Monday a holiday, the business day after the reference
        // Friday is Tuesday
        let policy = CalendarPolicy::builder()
            .with_holidays([ymd(2025, 12, 8)])
            .build()
            .unwrap();

        let day = BizDay::new(at(2025, 12, 9), at(2025, 12, 5), policy);

        assert!(day.within(1, None).unwrap());
    }

    #[test]
    fn test_value_and_name() {
        let day = BizDay::new(at(2025, 12, 5), at(2025, 12, 5), CalendarPolicy::default());

        assert_eq!(day.value(), 5);
        assert_eq!(day.name(), "Friday");
    }
}
