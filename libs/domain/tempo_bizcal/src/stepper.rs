use chrono::Duration;

use tempo_chrono::timepoint::{Date, DateTime};

use crate::policy::CalendarPolicy;

// -----------------------------------------------------------------------------
// DayRule
// -----------------------------------------------------------------------------
/// Which days count when stepping or accumulating over a calendar.
///
/// [`Business`] days are workdays that are not holidays; [`Working`] days
/// ignore holidays entirely.
///
/// [`Business`]: DayRule::Business
/// [`Working`]: DayRule::Working
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    serde::Serialize,
    serde::Deserialize,
    schemars::JsonSchema,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DayRule {
    Business,
    Working,
}

impl DayRule {
    /// Check if the given date counts as a full day under this rule.
    #[inline]
    pub fn counts(&self, policy: &CalendarPolicy, date: Date) -> bool {
        match self {
            DayRule::Business => policy.is_business_day(date),
            DayRule::Working => policy.is_workday(date),
        }
    }

    /// Fraction of the day elapsed at the given instant under this rule.
    #[inline]
    pub fn fraction_at(&self, policy: &CalendarPolicy, at: DateTime) -> f64 {
        match self {
            DayRule::Business => policy.business_day_fraction(at),
            DayRule::Working => policy.workday_fraction(at),
        }
    }
}

// -----------------------------------------------------------------------------
// advance_counted_days
// -----------------------------------------------------------------------------
/// Move `n` counted days away from `start`, one calendar day at a time in
/// the sign of `n`, counting only days the rule accepts.
///
/// `n == 0` returns `start` unchanged, whether or not it counts itself.
/// Returns [`None`] when no day can ever count (the policy has an empty
/// workday set) or the walk runs off the representable date range.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use tempo_bizcal::policy::CalendarPolicy;
/// use tempo_bizcal::stepper::{advance_counted_days, DayRule};
///
/// let policy = CalendarPolicy::default();
/// // 2025-12-05 is a Friday: 3 business days on is Wednesday 2025-12-10
/// let start = NaiveDate::from_ymd_opt(2025, 12, 5).unwrap();
///
/// assert_eq!(
///     advance_counted_days(&policy, start, 3, DayRule::Business),
///     NaiveDate::from_ymd_opt(2025, 12, 10),
/// );
/// ```
pub fn advance_counted_days(
    policy: &CalendarPolicy,
    start: Date,
    n: i64,
    rule: DayRule,
) -> Option<Date> {
    if n == 0 {
        return Some(start);
    }
    if policy.workdays().is_empty() {
        return None;
    }

    let step = Duration::try_days(n.signum())?;
    let mut remaining = n.unsigned_abs();
    let mut current = start;
    while remaining > 0 {
        current = current.checked_add_signed(step)?;
        if rule.counts(policy, current) {
            remaining -= 1;
        }
    }
    Some(current)
}
