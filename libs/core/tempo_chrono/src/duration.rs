mod age;

pub use age::Age;

pub const SECONDS_PER_MINUTE: f64 = 60.0;
pub const SECONDS_PER_HOUR: f64 = 3_600.0;
pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const SECONDS_PER_WEEK: f64 = 604_800.0;
/// `30.44 * 86400`, the mean Gregorian month.
pub const SECONDS_PER_MONTH: f64 = 2_630_016.0;
/// `365.25 * 86400`, the mean Julian year.
pub const SECONDS_PER_YEAR: f64 = 31_557_600.0;

pub const DAYS_PER_WEEK: f64 = 7.0;
pub const DAYS_PER_MONTH: f64 = 30.44;
pub const DAYS_PER_YEAR: f64 = 365.25;
