//! Regional parameter estimation: Aki b-value and bounded Omori fit.
//!
//! Both estimators fall back to configured values when the sample is too
//! small or the estimate is degenerate, and report which path was taken.

pub mod b_value;
pub mod omori_fit;

pub use b_value::{aki_b_value, BValueEstimate};
pub use omori_fit::{OmoriFit, OmoriFitter};

/// Whether an estimate came from the data or from the configured fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateSource {
    Estimated,
    Fallback,
}
