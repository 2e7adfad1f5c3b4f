//! # Config Crate
//!
//! Centralized configuration constants for the procedural mesh builders.
//! All magic numbers and tunable parameters are defined here so the
//! builders, the voxel mesher and the hull generator agree on tolerances,
//! resolution limits and defaults.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{clamp_segments, EPSILON, MAX_SEGMENTS};
//!
//! // Use EPSILON for floating-point comparisons
//! let value: f64 = 0.00000000001; // 1e-11, smaller than EPSILON (1e-10)
//! assert!(value.abs() < EPSILON);
//!
//! // Resolution requests are clamped, never rejected
//! assert_eq!(clamp_segments(100_000), MAX_SEGMENTS);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Plain values and `const`-friendly helpers only
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

pub use constants::BuilderConfig;

#[cfg(test)]
mod tests;
