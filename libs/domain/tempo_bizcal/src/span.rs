use tempo_chrono::interval::{UnitWindow, WindowError};
use tempo_chrono::timepoint::{time_pair, DateTime, TimeLike};

use crate::fiscal::{fiscal_quarter, fiscal_year};
use crate::policy::CalendarPolicy;
use crate::stepper::DayRule;
use crate::unit::{BizDay, FiscalQuarter, FiscalYear, WorkDay};

// -----------------------------------------------------------------------------
// BizSpan
// -----------------------------------------------------------------------------
/// Policy-aware view over a `(target, reference)` pair.
///
/// Fans out into the business window engines and runs the fractional-day
/// accumulator. All fractional results are signed and symmetric: a target
/// after the reference yields the negated magnitude of the swapped pair,
/// never an error.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use tempo_bizcal::policy::CalendarPolicy;
/// use tempo_bizcal::span::BizSpan;
///
/// let at = |d: u32, h: u32| {
///     NaiveDate::from_ymd_opt(2024, 1, d)
///         .unwrap()
///         .and_hms_opt(h, 0, 0)
///         .unwrap()
/// };
///
/// // Mon 12:00 to Thu 15:00 under the default 09:00-17:00 policy
/// let span = BizSpan::new(at(1, 12), at(4, 15), CalendarPolicy::default());
/// assert_eq!(span.business_days(), 3.375);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BizSpan {
    target: DateTime,
    reference: DateTime,
    policy: CalendarPolicy,
}

//
// ctor
//
impl BizSpan {
    #[inline]
    pub fn new(target: DateTime, reference: DateTime, policy: CalendarPolicy) -> Self {
        Self {
            target,
            reference,
            policy,
        }
    }

    /// Builds from heterogeneous inputs. An absent reference means "now",
    /// an absent policy the default policy.
    pub fn from_timelike(
        target: impl Into<TimeLike>,
        reference: Option<TimeLike>,
        policy: Option<CalendarPolicy>,
        formats: Option<&[&str]>,
    ) -> anyhow::Result<Self> {
        let (target, reference) = time_pair(target.into(), reference, formats)?;
        Ok(Self {
            target,
            reference,
            policy: policy.unwrap_or_default(),
        })
    }
}

//
// getters
//
impl BizSpan {
    #[inline]
    pub fn target(&self) -> DateTime {
        self.target
    }

    #[inline]
    pub fn reference(&self) -> DateTime {
        self.reference
    }

    #[inline]
    pub fn policy(&self) -> &CalendarPolicy {
        &self.policy
    }

    #[inline]
    pub fn biz_day(&self) -> BizDay {
        BizDay::new(self.target, self.reference, self.policy.clone())
    }

    #[inline]
    pub fn work_day(&self) -> WorkDay {
        WorkDay::new(self.target, self.reference, self.policy.clone())
    }

    #[inline]
    pub fn fiscal_quarter(&self) -> FiscalQuarter {
        FiscalQuarter::new(self.target, self.reference, self.policy.clone())
    }

    #[inline]
    pub fn fiscal_year(&self) -> FiscalYear {
        FiscalYear::new(self.target, self.reference, self.policy.clone())
    }
}

//
// target predicates
//
impl BizSpan {
    /// The target falls on a workday weekday.
    #[inline]
    pub fn is_workday(&self) -> bool {
        self.policy.is_workday(self.target.date())
    }

    /// The target falls on a holiday.
    #[inline]
    pub fn is_holiday(&self) -> bool {
        self.policy.is_holiday(self.target.date())
    }

    /// The target falls on a business day.
    #[inline]
    pub fn is_business_day(&self) -> bool {
        self.policy.is_business_day(self.target.date())
    }

    /// Fiscal year of the target.
    #[inline]
    pub fn fiscal_year_of_target(&self) -> i32 {
        fiscal_year(self.target, self.policy.fiscal_year_start_month())
    }

    /// Fiscal quarter of the target (1-4).
    #[inline]
    pub fn fiscal_quarter_of_target(&self) -> u32 {
        fiscal_quarter(self.target, self.policy.fiscal_year_start_month())
    }
}

//
// fractional day accumulator
//
impl BizSpan {
    /// Fractional business days from target to reference, signed.
    ///
    /// Positive when the target precedes the reference. Each business day
    /// in the span contributes its business-hours overlap with the span as
    /// a fraction of the full business day; holidays and non-workdays
    /// contribute nothing.
    #[inline]
    pub fn business_days(&self) -> f64 {
        self.counted_days(DayRule::Business)
    }

    /// Fractional working days from target to reference, signed.
    ///
    /// Like [`business_days`](Self::business_days) but holidays count as
    /// ordinary workdays, so the result is invariant to the holiday set.
    #[inline]
    pub fn working_days(&self) -> f64 {
        self.counted_days(DayRule::Working)
    }

    fn counted_days(&self, rule: DayRule) -> f64 {
        let (start, end, sign) = if self.target <= self.reference {
            (self.target, self.reference, 1.0)
        } else {
            (self.reference, self.target, -1.0)
        };
        if start == end {
            return 0.0;
        }

        let sob = self.policy.start_of_business();
        let eob = self.policy.end_of_business();

        let mut total = 0.0;
        let mut current = start.date();
        loop {
            if rule.counts(&self.policy, current) {
                let day_start = if current == start.date() {
                    start
                } else {
                    current.and_time(sob)
                };
                let day_end = if current == start.date() {
                    end.min(current.and_time(eob))
                } else if current == end.date() {
                    end
                } else {
                    current.and_time(eob)
                };
                let frac = rule.fraction_at(&self.policy, day_end)
                    - rule.fraction_at(&self.policy, day_start);
                total += frac.max(0.0);
            }
            if current == end.date() {
                break;
            }
            let Some(next) = current.succ_opt() else {
                break;
            };
            current = next;
        }
        sign * total
    }
}

//
// window membership
//
impl BizSpan {
    /// The target is within the business-day window `[start, end)` around
    /// the reference. An absent end means `start + 1`.
    #[inline]
    pub fn in_business_days(&self, start: i64, end: Option<i64>) -> Result<bool, WindowError> {
        self.biz_day().within(start, end)
    }

    /// The target is within the working-day window `[start, end)` around
    /// the reference.
    #[inline]
    pub fn in_working_days(&self, start: i64, end: Option<i64>) -> Result<bool, WindowError> {
        self.work_day().within(start, end)
    }

    /// The target is within the fiscal-quarter window `[start, end)` around
    /// the reference.
    #[inline]
    pub fn in_fiscal_quarters(&self, start: i64, end: Option<i64>) -> Result<bool, WindowError> {
        self.fiscal_quarter().within(start, end)
    }

    /// The target is within the fiscal-year window `[start, end)` around
    /// the reference.
    #[inline]
    pub fn in_fiscal_years(&self, start: i64, end: Option<i64>) -> Result<bool, WindowError> {
        self.fiscal_year().within(start, end)
    }
}

//
// shortcuts
//
// single-unit windows at fixed offsets never construct an empty window
impl BizSpan {
    fn at_offset(&self, engine: &impl UnitWindow, offset: i64) -> bool {
        engine
            .within(offset, None)
            .expect("single-unit window must be valid")
    }

    #[inline]
    pub fn is_business_last_day(&self) -> bool {
        self.at_offset(&self.biz_day(), -1)
    }

    #[inline]
    pub fn is_business_this_day(&self) -> bool {
        self.at_offset(&self.biz_day(), 0)
    }

    #[inline]
    pub fn is_business_next_day(&self) -> bool {
        self.at_offset(&self.biz_day(), 1)
    }

    #[inline]
    pub fn is_workday_last_day(&self) -> bool {
        self.at_offset(&self.work_day(), -1)
    }

    #[inline]
    pub fn is_workday_this_day(&self) -> bool {
        self.at_offset(&self.work_day(), 0)
    }

    #[inline]
    pub fn is_workday_next_day(&self) -> bool {
        self.at_offset(&self.work_day(), 1)
    }

    #[inline]
    pub fn is_last_fiscal_quarter(&self) -> bool {
        self.at_offset(&self.fiscal_quarter(), -1)
    }

    #[inline]
    pub fn is_this_fiscal_quarter(&self) -> bool {
        self.at_offset(&self.fiscal_quarter(), 0)
    }

    #[inline]
    pub fn is_next_fiscal_quarter(&self) -> bool {
        self.at_offset(&self.fiscal_quarter(), 1)
    }

    #[inline]
    pub fn is_last_fiscal_year(&self) -> bool {
        self.at_offset(&self.fiscal_year(), -1)
    }

    #[inline]
    pub fn is_this_fiscal_year(&self) -> bool {
        self.at_offset(&self.fiscal_year(), 0)
    }

    #[inline]
    pub fn is_next_fiscal_year(&self) -> bool {
        self.at_offset(&self.fiscal_year(), 1)
    }
}
