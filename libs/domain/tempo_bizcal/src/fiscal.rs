use chrono::Datelike;

// -----------------------------------------------------------------------------
// fiscal indexing
// -----------------------------------------------------------------------------
/// The fiscal year a date falls in, for a fiscal year beginning on
/// `fy_start_month` (1-12).
///
/// A fiscal year is labelled by the calendar year it starts in: with an
/// April start, 2024-03-31 belongs to fiscal year 2023 and 2024-04-01 to
/// fiscal year 2024.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use tempo_bizcal::fiscal::fiscal_year;
///
/// let d = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
/// assert_eq!(fiscal_year(d, 4), 2023);
/// assert_eq!(fiscal_year(d, 1), 2024);
/// ```
#[inline]
pub fn fiscal_year(date: impl Datelike, fy_start_month: u32) -> i32 {
    if date.month() >= fy_start_month {
        date.year()
    } else {
        date.year() - 1
    }
}

/// The fiscal quarter (1-4) a date falls in, for a fiscal year beginning on
/// `fy_start_month` (1-12).
#[inline]
pub fn fiscal_quarter(date: impl Datelike, fy_start_month: u32) -> u32 {
    let offset = (date.month() as i32 - fy_start_month as i32).rem_euclid(12) as u32;
    offset / 3 + 1
}

/// Monotonic fiscal quarter index, `fiscal_year * 4 + (fiscal_quarter - 1)`.
///
/// Index differences equal true quarter distances across year boundaries,
/// which lets window membership run on plain integer comparison.
#[inline]
pub fn fiscal_quarter_index(date: impl Datelike + Copy, fy_start_month: u32) -> i64 {
    i64::from(fiscal_year(date, fy_start_month)) * 4
        + i64::from(fiscal_quarter(date, fy_start_month)) - 1
}
