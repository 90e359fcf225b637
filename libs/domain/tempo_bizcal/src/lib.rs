#[cfg(test)]
use rstest_reuse;

pub mod fiscal;
pub mod policy;
pub mod span;
pub mod stepper;
pub mod unit;

pub mod ext {
    pub use tempo_chrono;
}
