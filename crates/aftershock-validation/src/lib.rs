//! # aftershock-validation
//!
//! Back-tests a forecaster against a historical catalog: the largest events
//! are replayed as mainshocks, each is forecast for every configured window,
//! and the prediction is scored against what the catalog actually recorded.

pub mod harness;
pub mod regional_fit;

pub use harness::ValidationHarness;
pub use regional_fit::{RegionalEstimate, RegionalFitter};
