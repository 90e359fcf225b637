mod timelike;
mod weekday;

pub use timelike::{time_pair, TimeLike, DATETIME_FORMATS};
pub use weekday::parse_weekday;

pub use chrono::Weekday;

/// Zone-naive calendar date.
pub type Date = chrono::NaiveDate;
/// Zone-naive point in time. Totally ordered, subtractable to a duration.
pub type DateTime = chrono::NaiveDateTime;
/// Zone-naive time of day.
pub type Time = chrono::NaiveTime;
