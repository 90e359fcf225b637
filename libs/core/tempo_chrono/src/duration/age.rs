use std::sync::OnceLock;

use anyhow::{bail, Context};
use chrono::Datelike;
use regex::Regex;

use super::{
    DAYS_PER_MONTH, DAYS_PER_WEEK, DAYS_PER_YEAR, SECONDS_PER_DAY, SECONDS_PER_HOUR,
    SECONDS_PER_MINUTE, SECONDS_PER_MONTH, SECONDS_PER_WEEK, SECONDS_PER_YEAR,
};
use crate::timepoint::{time_pair, Date, DateTime, TimeLike};

// -----------------------------------------------------------------------------
// Age
// -----------------------------------------------------------------------------
/// Elapsed time between two instants, convertible to various units.
///
/// All conversions are signed: an `end` before `start` yields negative
/// values throughout, and the calendar-exact variants are symmetric
/// (`age(a, b) == -age(b, a)`).
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use tempo_chrono::duration::Age;
///
/// let start = NaiveDate::from_ymd_opt(2020, 1, 1)
///     .unwrap()
///     .and_hms_opt(0, 0, 0)
///     .unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 1, 1)
///     .unwrap()
///     .and_hms_opt(0, 0, 0)
///     .unwrap();
///
/// let age = Age::new(start, end);
/// assert_eq!(age.years_calendar(), 4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age {
    start: DateTime,
    end: DateTime,
}

fn secs_between(a: DateTime, b: DateTime) -> f64 {
    let d = b - a;
    d.num_seconds() as f64 + f64::from(d.subsec_nanos()) * 1e-9
}

fn month_start(year: i32, month: u32) -> DateTime {
    Date::from_ymd_opt(year, month, 1)
        .expect("first day of a month must exist")
        .and_time(chrono::NaiveTime::MIN)
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

fn days_in_year(year: i32) -> f64 {
    (month_start(year + 1, 1) - month_start(year, 1)).num_days() as f64
}

//
// ctor
//
impl Age {
    #[inline]
    pub fn new(start: DateTime, end: DateTime) -> Self {
        Self { start, end }
    }

    /// Builds from heterogeneous inputs. An absent end means "now".
    pub fn from_timelike(
        start: impl Into<TimeLike>,
        end: Option<TimeLike>,
        formats: Option<&[&str]>,
    ) -> anyhow::Result<Self> {
        let (start, end) = time_pair(start.into(), end, formats)?;
        Ok(Self { start, end })
    }

    /// Returns a copy with either endpoint replaced. A `None` keeps the
    /// current value.
    pub fn with_times(
        &self,
        start: Option<TimeLike>,
        end: Option<TimeLike>,
        formats: Option<&[&str]>,
    ) -> anyhow::Result<Self> {
        let start = match start {
            Some(t) => t.to_datetime(formats).context("normalizing start time")?,
            None => self.start,
        };
        let end = match end {
            Some(t) => t.to_datetime(formats).context("normalizing end time")?,
            None => self.end,
        };
        Ok(Self { start, end })
    }
}

//
// getters
//
impl Age {
    #[inline]
    pub fn start(&self) -> DateTime {
        self.start
    }

    #[inline]
    pub fn end(&self) -> DateTime {
        self.end
    }
}

//
// conversions
//
impl Age {
    #[inline]
    pub fn secs(&self) -> f64 {
        secs_between(self.start, self.end)
    }

    #[inline]
    pub fn minutes(&self) -> f64 {
        self.secs() / SECONDS_PER_MINUTE
    }

    #[inline]
    pub fn hours(&self) -> f64 {
        self.secs() / SECONDS_PER_HOUR
    }

    #[inline]
    pub fn days(&self) -> f64 {
        self.secs() / SECONDS_PER_DAY
    }

    #[inline]
    pub fn weeks(&self) -> f64 {
        self.days() / DAYS_PER_WEEK
    }

    /// Age in mean months (30.44 days each).
    #[inline]
    pub fn months(&self) -> f64 {
        self.days() / DAYS_PER_MONTH
    }

    /// Age in mean years (365.25 days each).
    #[inline]
    pub fn years(&self) -> f64 {
        self.days() / DAYS_PER_YEAR
    }

    /// Age in calendar months, exact.
    ///
    /// Partial months at either endpoint contribute their elapsed share of
    /// that month's true second count; whole months in between count 1.0
    /// each.
    pub fn months_calendar(&self) -> f64 {
        let (start, end, scale) = if self.start <= self.end {
            (self.start, self.end, 1.0)
        } else {
            (self.end, self.start, -1.0)
        };
        if start == end {
            return 0.0;
        }
        let first_start = month_start(start.year(), start.month());
        let (ny, nm) = next_month(start.year(), start.month());
        let first_end = month_start(ny, nm);
        if (start.year(), start.month()) == (end.year(), end.month()) {
            return scale * secs_between(start, end) / secs_between(first_start, first_end);
        }

        let first = secs_between(start, first_end) / secs_between(first_start, first_end);
        let last_start = month_start(end.year(), end.month());
        let (ny, nm) = next_month(end.year(), end.month());
        let last_end = month_start(ny, nm);
        let last = secs_between(last_start, end) / secs_between(last_start, last_end);
        let full = i64::from(end.year()) * 12 + i64::from(end.month())
            - i64::from(start.year()) * 12
            - i64::from(start.month())
            - 1;
        scale * (first + full as f64 + last)
    }

    /// Age in calendar years, exact.
    ///
    /// Partial years at either endpoint contribute their elapsed share of
    /// that year's true day count (365 or 366).
    pub fn years_calendar(&self) -> f64 {
        let (start, end, scale) = if self.start <= self.end {
            (self.start, self.end, 1.0)
        } else {
            (self.end, self.start, -1.0)
        };
        if start.year() == end.year() {
            let frac = secs_between(start, end) / SECONDS_PER_DAY / days_in_year(start.year());
            return scale * frac;
        }

        let first = secs_between(start, month_start(start.year() + 1, 1)) / SECONDS_PER_DAY
            / days_in_year(start.year());
        let last = secs_between(month_start(end.year(), 1), end) / SECONDS_PER_DAY
            / days_in_year(end.year());
        let full = f64::from(end.year() - start.year() - 1);
        scale * (first + full + last)
    }
}

//
// formatting
//
impl Age {
    /// Renders the age in the largest unit that keeps the number readable.
    ///
    /// Unit cutoffs: 45 seconds, 45 minutes, 22 hours, 26 days, 11 mean
    /// months; anything longer is years. The month and year values are the
    /// calendar-exact conversions, so 14 days into a 28-day February reads
    /// as half a month. Two decimal places throughout.
    pub fn format(&self) -> String {
        let secs = self.secs();
        let magnitude = secs.abs();
        let (value, unit) = if magnitude < 45.0 {
            (secs, "seconds")
        } else if magnitude < 45.0 * SECONDS_PER_MINUTE {
            (self.minutes(), "minutes")
        } else if magnitude < 22.0 * SECONDS_PER_HOUR {
            (self.hours(), "hours")
        } else if magnitude < 26.0 * SECONDS_PER_DAY {
            (self.days(), "days")
        } else if magnitude < 11.0 * SECONDS_PER_MONTH {
            (self.months_calendar(), "months")
        } else {
            (self.years_calendar(), "years")
        };
        format!("{value:.2} {unit}")
    }

    /// Parses an age expression into seconds.
    ///
    /// A bare number is seconds; otherwise a number followed by a unit word
    /// (`"5m"`, `"2 h"`, `"1.5days"`, `"-1 week"`). Month and year use the
    /// mean lengths (30.44 and 365.25 days).
    pub fn parse_secs(input: &str) -> anyhow::Result<f64> {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern = PATTERN.get_or_init(|| {
            Regex::new(r"^(-?\d+(?:\.\d+)?)\s*([a-z]+)?$").expect("hard-coded regex must be valid")
        });

        let input = input.trim().to_lowercase();
        let Some(caps) = pattern.captures(&input) else {
            bail!("invalid age expression: {input}");
        };
        let value: f64 = caps[1].parse().expect("matched number must parse");
        let Some(unit) = caps.get(2) else {
            return Ok(value);
        };
        let multiplier = match unit.as_str() {
            "s" | "sec" | "second" | "seconds" => 1.0,
            "m" | "min" | "minute" | "minutes" => SECONDS_PER_MINUTE,
            "h" | "hr" | "hour" | "hours" => SECONDS_PER_HOUR,
            "d" | "day" | "days" => SECONDS_PER_DAY,
            "w" | "week" | "weeks" => SECONDS_PER_WEEK,
            "month" | "months" => SECONDS_PER_MONTH,
            "y" | "year" | "years" => SECONDS_PER_YEAR,
            other => bail!("unknown age unit: {other}"),
        };
        Ok(value * multiplier)
    }
}
