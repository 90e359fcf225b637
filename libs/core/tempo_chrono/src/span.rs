use crate::interval::UnitWindow;
use crate::timepoint::{time_pair, DateTime, TimeLike, Weekday};
use crate::unit::{Day, Hour, Minute, Month, Quarter, Second, Week, Year};

// -----------------------------------------------------------------------------
// CalSpan
// -----------------------------------------------------------------------------
/// Calendar view over a `(target, reference)` pair.
///
/// Fans out into the per-unit window engines and carries the common
/// membership shortcuts (`is_today`, `is_last_week`, ...), which are plain
/// aliases for offset `-1`/`0`/`1` windows on the matching unit.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use tempo_chrono::span::CalSpan;
///
/// let target = NaiveDate::from_ymd_opt(2024, 1, 1)
///     .unwrap()
///     .and_hms_opt(12, 0, 0)
///     .unwrap();
/// let reference = NaiveDate::from_ymd_opt(2024, 1, 2)
///     .unwrap()
///     .and_hms_opt(12, 0, 0)
///     .unwrap();
///
/// let span = CalSpan::new(target, reference);
/// assert!(span.is_yesterday());
/// assert!(span.is_this_week());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalSpan {
    target: DateTime,
    reference: DateTime,
}

//
// ctor
//
impl CalSpan {
    #[inline]
    pub fn new(target: DateTime, reference: DateTime) -> Self {
        Self { target, reference }
    }

    /// Builds from heterogeneous inputs. An absent reference means "now".
    ///
    /// `formats` overrides the default string parsing patterns.
    pub fn from_timelike(
        target: impl Into<TimeLike>,
        reference: Option<TimeLike>,
        formats: Option<&[&str]>,
    ) -> anyhow::Result<Self> {
        let (target, reference) = time_pair(target.into(), reference, formats)?;
        Ok(Self { target, reference })
    }
}

//
// getters
//
impl CalSpan {
    #[inline]
    pub fn target(&self) -> DateTime {
        self.target
    }

    #[inline]
    pub fn reference(&self) -> DateTime {
        self.reference
    }

    #[inline]
    pub fn second(&self) -> Second {
        Second::new(self.target, self.reference)
    }

    #[inline]
    pub fn minute(&self) -> Minute {
        Minute::new(self.target, self.reference)
    }

    #[inline]
    pub fn hour(&self) -> Hour {
        Hour::new(self.target, self.reference)
    }

    #[inline]
    pub fn day(&self) -> Day {
        Day::new(self.target, self.reference)
    }

    #[inline]
    pub fn week(&self) -> Week {
        Week::new(self.target, self.reference)
    }

    #[inline]
    pub fn week_starting(&self, week_start: Weekday) -> Week {
        Week::with_week_start(self.target, self.reference, week_start)
    }

    #[inline]
    pub fn month(&self) -> Month {
        Month::new(self.target, self.reference)
    }

    #[inline]
    pub fn quarter(&self) -> Quarter {
        Quarter::new(self.target, self.reference)
    }

    #[inline]
    pub fn year(&self) -> Year {
        Year::new(self.target, self.reference)
    }
}

//
// shortcuts
//
// single-unit windows at fixed offsets never construct an empty window, so
// the `within` result is unwrapped here once instead of at every call site
impl CalSpan {
    fn at_offset(&self, engine: &impl UnitWindow, offset: i64) -> bool {
        engine
            .within(offset, None)
            .expect("single-unit window must be valid")
    }

    #[inline]
    pub fn is_today(&self) -> bool {
        self.at_offset(&self.day(), 0)
    }

    #[inline]
    pub fn is_yesterday(&self) -> bool {
        self.at_offset(&self.day(), -1)
    }

    #[inline]
    pub fn is_tomorrow(&self) -> bool {
        self.at_offset(&self.day(), 1)
    }

    #[inline]
    pub fn is_last_week(&self) -> bool {
        self.at_offset(&self.week(), -1)
    }

    #[inline]
    pub fn is_this_week(&self) -> bool {
        self.at_offset(&self.week(), 0)
    }

    #[inline]
    pub fn is_next_week(&self) -> bool {
        self.at_offset(&self.week(), 1)
    }

    #[inline]
    pub fn is_last_month(&self) -> bool {
        self.at_offset(&self.month(), -1)
    }

    #[inline]
    pub fn is_this_month(&self) -> bool {
        self.at_offset(&self.month(), 0)
    }

    #[inline]
    pub fn is_next_month(&self) -> bool {
        self.at_offset(&self.month(), 1)
    }

    #[inline]
    pub fn is_last_quarter(&self) -> bool {
        self.at_offset(&self.quarter(), -1)
    }

    #[inline]
    pub fn is_this_quarter(&self) -> bool {
        self.at_offset(&self.quarter(), 0)
    }

    #[inline]
    pub fn is_next_quarter(&self) -> bool {
        self.at_offset(&self.quarter(), 1)
    }

    #[inline]
    pub fn is_last_year(&self) -> bool {
        self.at_offset(&self.year(), -1)
    }

    #[inline]
    pub fn is_this_year(&self) -> bool {
        self.at_offset(&self.year(), 0)
    }

    #[inline]
    pub fn is_next_year(&self) -> bool {
        self.at_offset(&self.year(), 1)
    }
}
