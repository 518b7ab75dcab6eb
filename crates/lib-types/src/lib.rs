//! # lib-types
//!
//! Core type definitions for the Askaryan radio-pulse kernel workspace.
//!
//! This crate provides foundational types used throughout the workspace:
//! - Physical units with compile-time safety
//! - The `Signal` container for uniformly-sampled time-domain signals
//! - The particle/interaction interface consumed from the Monte-Carlo layer
//! - The medium-model trait for the refractive index of the ice

pub mod units;
pub mod signal;
pub mod particle;
pub mod medium;

pub use units::*;
pub use signal::*;
pub use particle::*;
pub use medium::*;

/// Re-export num_complex for convenience
pub use num_complex::Complex64;
