use tempo_chrono::interval::{in_half_open, UnitWindow, Window};
use tempo_chrono::timepoint::DateTime;

use crate::fiscal::fiscal_year;
use crate::policy::CalendarPolicy;

// -----------------------------------------------------------------------------
// FiscalYear
// -----------------------------------------------------------------------------
/// Fiscal-year window engine over a `(target, reference)` pair.
///
/// Membership compares fiscal year numbers derived from the policy's
/// fiscal-year start month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiscalYear {
    target: DateTime,
    reference: DateTime,
    policy: CalendarPolicy,
}

impl FiscalYear {
    #[inline]
    pub fn new(target: DateTime, reference: DateTime, policy: CalendarPolicy) -> Self {
        Self {
            target,
            reference,
            policy,
        }
    }

    /// Fiscal year of the target.
    #[inline]
    pub fn value(&self) -> i32 {
        fiscal_year(self.target, self.policy.fiscal_year_start_month())
    }
}

impl UnitWindow for FiscalYear {
    fn contains(&self, window: Window) -> bool {
        let start_month = self.policy.fiscal_year_start_month();
        let base = i64::from(fiscal_year(self.reference, start_month));
        let (Some(start), Some(end)) = (
            base.checked_add(window.start()),
            base.checked_add(window.end()),
        ) else {
            return false;
        };
        in_half_open(
            start,
            i64::from(fiscal_year(self.target, start_month)),
            end,
        )
    }
}
