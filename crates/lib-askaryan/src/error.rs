//! Error types for pulse construction.

use lib_dsp::DspError;
use thiserror::Error;

/// Errors that can occur while constructing an Askaryan pulse.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Viewing-angle magnitude exceeds pi.
    #[error("viewing angles greater than 180 degrees are not supported (got {0} rad)")]
    AngleOutOfRange(f64),

    /// The time grid is too short to define a sampled pulse.
    #[error("time grid needs at least {needed} samples, got {got}")]
    GridTooShort { needed: usize, got: usize },

    /// The time grid cannot host the kernel convolution window.
    #[error("time grid cannot host the kernel convolution window")]
    ConvolutionWindow,

    /// A DSP operation failed.
    #[error(transparent)]
    Dsp(#[from] DspError),
}

/// Result type for pulse construction.
pub type ModelResult<T> = Result<T, ModelError>;
