pub mod duration;
pub mod interval;
pub mod span;
pub mod timepoint;
pub mod unit;

pub mod ext {
    pub use chrono;
}
