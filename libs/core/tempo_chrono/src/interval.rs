// -----------------------------------------------------------------------------
// in_half_open
// -----------------------------------------------------------------------------
/// Check that `value` lies in the half-open interval `[start, end)`.
///
/// Every boundary test in this workspace goes through this function.
/// The end bound is compared with `<`, never `<=`; funnelling all
/// membership checks through one place keeps that rule visible.
///
/// # Examples
/// ```
/// use tempo_chrono::interval::in_half_open;
///
/// assert!(in_half_open(0, 0, 2));
/// assert!(in_half_open(0, 1, 2));
/// assert!(!in_half_open(0, 2, 2));
/// ```
#[inline]
pub fn in_half_open<T: PartialOrd>(start: T, value: T, end: T) -> bool {
    start <= value && value < end
}

// -----------------------------------------------------------------------------
// WindowError
// -----------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq, Hash)]
pub enum WindowError {
    #[error("empty window: start={start} must be less than end={end}")]
    Empty { start: i64, end: i64 },
    #[error("window offset out of range: start={start}, end={end:?}")]
    Overflow { start: i64, end: Option<i64> },
}

// -----------------------------------------------------------------------------
// Inclusive
// -----------------------------------------------------------------------------
/// Boundary inclusivity for [`Window::between`].
///
/// A `between` request is converted to half-open form by shifting the
/// offsets before any comparison takes place:
///
/// | mode    | start shift | end shift |
/// |---------|-------------|-----------|
/// | both    | 0           | +1        |
/// | left    | 0           | 0         |
/// | right   | +1          | +1        |
/// | neither | +1          | 0         |
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Inclusive {
    Both,
    Left,
    Right,
    Neither,
}

impl Inclusive {
    #[inline]
    fn start_shift(&self) -> i64 {
        match self {
            Inclusive::Both | Inclusive::Left => 0,
            Inclusive::Right | Inclusive::Neither => 1,
        }
    }

    #[inline]
    fn end_shift(&self) -> i64 {
        match self {
            Inclusive::Both | Inclusive::Right => 1,
            Inclusive::Left | Inclusive::Neither => 0,
        }
    }
}

// -----------------------------------------------------------------------------
// Window
// -----------------------------------------------------------------------------
/// A normalized unit-offset window `[start, end)` relative to a reference.
///
/// Offsets are expressed in whole units of some calendar granularity
/// (minutes, days, fiscal quarters, ...); which granularity is decided by
/// the [`UnitWindow`] implementation the window is handed to.
///
/// Invariant: `start < end`. Empty or inverted requests are rejected at
/// construction with [`WindowError::Empty`], never silently reordered.
///
/// # Examples
/// ```
/// use tempo_chrono::interval::Window;
///
/// // absent end means a single-unit window
/// let w = Window::half_open(0, None).unwrap();
/// assert_eq!((w.start(), w.end()), (0, 1));
///
/// // inverted bounds are an error
/// assert!(Window::half_open(3, Some(3)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    start: i64,
    end: i64,
}

//
// ctors
//
impl Window {
    /// Normalize `(start, optional end)` to a half-open window.
    ///
    /// An absent `end` means the single-unit window `[start, start + 1)`.
    ///
    /// # Errors
    /// - [`WindowError::Empty`] when `start >= end` after normalization.
    /// - [`WindowError::Overflow`] when the implied end leaves `i64`.
    pub fn half_open(start: i64, end: Option<i64>) -> Result<Self, WindowError> {
        let end = match end {
            Some(end) => end,
            None => start
                .checked_add(1)
                .ok_or(WindowError::Overflow { start, end: None })?,
        };
        if start >= end {
            return Err(WindowError::Empty { start, end });
        }
        Ok(Self { start, end })
    }

    /// Inclusive-end sugar: `[start, end]` becomes `[start, end + 1)`.
    ///
    /// An absent `end` still means the single-unit window `[start, start + 1)`.
    pub fn thru(start: i64, end: Option<i64>) -> Result<Self, WindowError> {
        let shifted = end
            .unwrap_or(start)
            .checked_add(1)
            .ok_or(WindowError::Overflow { start, end })?;
        Self::half_open(start, Some(shifted))
    }

    /// Window with configurable boundary inclusivity.
    ///
    /// Offsets are shifted per the [`Inclusive`] table and the result is
    /// delegated to [`Window::half_open`]. With an absent `end` the
    /// single-unit window is kept but shifted by the mode's start shift,
    /// so `right`/`neither` move the implied unit forward by one.
    pub fn between(start: i64, end: Option<i64>, inclusive: Inclusive) -> Result<Self, WindowError> {
        let overflow = WindowError::Overflow { start, end };
        let start = start.checked_add(inclusive.start_shift()).ok_or(overflow)?;
        match end {
            None => Self::half_open(start, None),
            Some(end) => Self::half_open(
                start,
                Some(end.checked_add(inclusive.end_shift()).ok_or(overflow)?),
            ),
        }
    }
}

//
// methods
//
impl Window {
    #[inline]
    pub fn start(&self) -> i64 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> i64 {
        self.end
    }
}

// -----------------------------------------------------------------------------
// UnitWindow
// -----------------------------------------------------------------------------
/// Membership tests for unit-aligned windows around a reference instant.
///
/// Implementors provide [`UnitWindow::contains`] for an already normalized
/// window; offset normalization and the `thru`/`between` conveniences live
/// here once, shared by every unit.
pub trait UnitWindow {
    /// Test whether the target lies in the unit-aligned window.
    fn contains(&self, window: Window) -> bool;

    /// Half-open membership: `[start, end)`, absent `end` meaning
    /// the single-unit window `[start, start + 1)`.
    fn within(&self, start: i64, end: Option<i64>) -> Result<bool, WindowError> {
        Window::half_open(start, end).map(|w| self.contains(w))
    }

    /// Inclusive-end membership: `[start, end]`.
    fn thru(&self, start: i64, end: Option<i64>) -> Result<bool, WindowError> {
        Window::thru(start, end).map(|w| self.contains(w))
    }

    /// Membership with explicit boundary inclusivity.
    fn between(
        &self,
        start: i64,
        end: Option<i64>,
        inclusive: Inclusive,
    ) -> Result<bool, WindowError> {
        Window::between(start, end, inclusive).map(|w| self.contains(w))
    }
}
