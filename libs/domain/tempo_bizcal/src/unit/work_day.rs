use chrono::Datelike;

use tempo_chrono::interval::{UnitWindow, Window};
use tempo_chrono::timepoint::DateTime;

use super::contains_counted;
use crate::policy::CalendarPolicy;
use crate::stepper::DayRule;

// -----------------------------------------------------------------------------
// WorkDay
// -----------------------------------------------------------------------------
/// Working-day window engine over a `(target, reference)` pair.
///
/// Like [`BizDay`](super::BizDay) but counting policy workdays only,
/// with holidays ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkDay {
    target: DateTime,
    reference: DateTime,
    policy: CalendarPolicy,
}

impl WorkDay {
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

impl UnitWindow for WorkDay {
    fn contains(&self, window: Window) -> bool {
        contains_counted(
            &self.policy,
            DayRule::Working,
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
    fn test_holiday_is_still_a_workday() {
        let policy = CalendarPolicy::builder()
            .with_holidays([ymd(2025, 12, 8)])
            .build()
            .unwrap();

        let day = WorkDay::new(at(2025, 12, 8), at(2025, 12, 8), policy);

        assert!(day.within(0, None).unwrap());
    }

    #[test]
    fn test_weekend_target_never_member() {
        let day = WorkDay::new(at(2025, 12, 7), at(2025, 12, 8), CalendarPolicy::default());

        assert!(!day.within(-5, Some(5)).unwrap());
    }

    #[test]
    fn test_previous_workday_over_weekend() {
        let day = WorkDay::new(at(2025, 12, 5), at(2025, 12, 8), CalendarPolicy::default());

        assert!(day.within(-1, Some(0)).unwrap());
        assert!(!day.within(0, None).unwrap());
    }

    #[test]
    fn test_custom_workday_set() {
        // Saturday counts when the policy says so
        let policy = CalendarPolicy::builder()
            .with_workdays([chrono::Weekday::Sat])
            .build()
            .unwrap();

        let day = WorkDay::new(at(2025, 12, 13), at(2025, 12, 6), policy);

        assert!(day.within(1, None).unwrap());
    }
}
