use anyhow::{bail, Context};

use super::{Date, DateTime, Time};

/// Default patterns tried, in order, when parsing a datetime string.
///
/// Patterns with time components are matched first at each step; a pattern
/// without them yields midnight of the parsed date.
pub const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y",
];

// -----------------------------------------------------------------------------
// TimeLike
// -----------------------------------------------------------------------------
/// A heterogeneous time input accepted at the API boundary.
///
/// Callers may hand over a ready-made [`DateTime`], a bare [`Date`]
/// (interpreted as midnight), a POSIX timestamp in seconds (interpreted as
/// UTC), or a formatted string matched against an ordered pattern list.
/// Timezone-bearing strings are a hard error, never silently stripped.
///
/// # Examples
/// ```
/// use tempo_chrono::timepoint::TimeLike;
///
/// let parsed = TimeLike::from("2024-05-01 13:30:00").to_datetime(None).unwrap();
/// let direct = TimeLike::from(parsed).to_datetime(None).unwrap();
/// assert_eq!(parsed, direct);
///
/// // zone-aware input is rejected outright
/// assert!(TimeLike::from("2024-05-01T13:30:00+02:00").to_datetime(None).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum TimeLike {
    DateTime(DateTime),
    Date(Date),
    Stamp(f64),
    Text(String),
}

//
// conversion
//
impl From<DateTime> for TimeLike {
    #[inline]
    fn from(value: DateTime) -> Self {
        TimeLike::DateTime(value)
    }
}
impl From<Date> for TimeLike {
    #[inline]
    fn from(value: Date) -> Self {
        TimeLike::Date(value)
    }
}
impl From<f64> for TimeLike {
    #[inline]
    fn from(value: f64) -> Self {
        TimeLike::Stamp(value)
    }
}
impl From<i64> for TimeLike {
    #[inline]
    fn from(value: i64) -> Self {
        TimeLike::Stamp(value as f64)
    }
}
impl From<&str> for TimeLike {
    #[inline]
    fn from(value: &str) -> Self {
        TimeLike::Text(value.to_owned())
    }
}
impl From<String> for TimeLike {
    #[inline]
    fn from(value: String) -> Self {
        TimeLike::Text(value)
    }
}

//
// methods
//
impl TimeLike {
    /// Normalize to a zone-naive [`DateTime`].
    ///
    /// `formats` overrides [`DATETIME_FORMATS`] for string inputs.
    ///
    /// # Errors
    /// - A string matching none of the patterns.
    /// - A string carrying a timezone offset (RFC 3339 style).
    /// - A timestamp outside the representable range.
    pub fn to_datetime(&self, formats: Option<&[&str]>) -> anyhow::Result<DateTime> {
        match self {
            TimeLike::DateTime(dt) => Ok(*dt),
            TimeLike::Date(d) => Ok(d.and_time(Time::MIN)),
            TimeLike::Stamp(ts) => from_timestamp(*ts),
            TimeLike::Text(s) => parse_text(s, formats.unwrap_or(DATETIME_FORMATS)),
        }
    }
}

fn from_timestamp(ts: f64) -> anyhow::Result<DateTime> {
    if !ts.is_finite() {
        bail!("timestamp must be finite: {ts}");
    }
    let millis = (ts * 1_000.0).round();
    if millis < i64::MIN as f64 || millis > i64::MAX as f64 {
        bail!("timestamp out of range: {ts}");
    }
    chrono::DateTime::from_timestamp_millis(millis as i64)
        .map(|dt| dt.naive_utc())
        .with_context(|| format!("timestamp out of range: {ts}"))
}

fn parse_text(s: &str, formats: &[&str]) -> anyhow::Result<DateTime> {
    if chrono::DateTime::parse_from_rfc3339(s).is_ok() {
        bail!("timezone-bearing input is not supported: {s}");
    }
    for fmt in formats {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
        // date-only pattern: midnight of the parsed date
        if let Ok(d) = Date::parse_from_str(s, fmt) {
            return Ok(d.and_time(Time::MIN));
        }
    }
    bail!("unrecognized datetime string format: {s}")
}

// -----------------------------------------------------------------------------
// time_pair
// -----------------------------------------------------------------------------
/// Normalize a `(target, reference)` input pair.
///
/// An absent reference defaults to the current local time, resolved once so
/// both sides of a pair can never observe different "now" values.
///
/// # Examples
/// ```
/// use tempo_chrono::timepoint::{time_pair, TimeLike};
///
/// let (target, reference) = time_pair(
///     TimeLike::from("2024-01-01"),
///     Some(TimeLike::from("2024-02-01")),
///     None,
/// )
/// .unwrap();
/// assert!(target < reference);
/// ```
pub fn time_pair(
    target: TimeLike,
    reference: Option<TimeLike>,
    formats: Option<&[&str]>,
) -> anyhow::Result<(DateTime, DateTime)> {
    let target = target
        .to_datetime(formats)
        .context("normalizing target time")?;
    let reference = match reference {
        Some(reference) => reference
            .to_datetime(formats)
            .context("normalizing reference time")?,
        None => chrono::Local::now().naive_local(),
    };
    Ok((target, reference))
}
