mod day;
mod hour;
mod minute;
mod month;
mod quarter;
mod second;
mod week;
mod year;

pub use day::Day;
pub use hour::Hour;
pub use minute::Minute;
pub use month::Month;
pub use quarter::Quarter;
pub use second::Second;
pub use week::Week;
pub use year::Year;
