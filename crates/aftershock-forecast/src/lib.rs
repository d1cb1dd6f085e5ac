//! # aftershock-forecast
//!
//! Aftershock occurrence probabilities from three empirical laws:
//! modified Omori temporal decay, Gutenberg–Richter magnitude exceedance,
//! and magnitude-dependent productivity.
//!
//! ```text
//! λ = ∫ K / (c + t)^p dt  ×  10^(-b (M_thr - M0))
//! P = 1 - exp(-λ)
//! ```
//!
//! Parameter estimation (Aki b-value, bounded Omori fit) lives in
//! [`estimation`].

pub mod engine;
pub mod estimation;
pub mod filter;
pub mod gutenberg_richter;
pub mod omori;
pub mod productivity;

pub use engine::ProbabilityEngine;
pub use filter::{haversine_km, SpatialTemporalFilter};
pub use productivity::ProductivityScaler;
