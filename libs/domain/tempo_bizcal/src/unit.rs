mod biz_day;
mod fiscal_quarter;
mod fiscal_year;
mod work_day;

pub use biz_day::BizDay;
pub use fiscal_quarter::FiscalQuarter;
pub use fiscal_year::FiscalYear;
pub use work_day::WorkDay;

use tempo_chrono::interval::{in_half_open, Window};
use tempo_chrono::timepoint::DateTime;

use crate::policy::CalendarPolicy;
use crate::stepper::{advance_counted_days, DayRule};

/// Shared membership logic for the counted-day windows.
///
/// Boundaries are reached by stepping counted days from the reference date;
/// a target whose own date does not count under the rule is never a member,
/// whatever the window.
fn contains_counted(
    policy: &CalendarPolicy,
    rule: DayRule,
    target: DateTime,
    reference: DateTime,
    window: Window,
) -> bool {
    if !rule.counts(policy, target.date()) {
        return false;
    }
    let bound = |n: i64| advance_counted_days(policy, reference.date(), n, rule);
    let (Some(start), Some(end)) = (bound(window.start()), bound(window.end())) else {
        return false;
    };
    in_half_open(start, target.date(), end)
}
