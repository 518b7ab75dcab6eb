//! # lib-dsp
//!
//! DSP engine for the Askaryan radio-pulse kernel.
//!
//! This crate provides the mathematical core for signal processing:
//!
//! - **FFT/IFFT**: Fast Fourier transforms and frequency axes
//! - **Convolution**: direct and FFT-based linear convolution
//! - **Signal spectra**: on-demand spectrum, frequency axis and
//!   frequency-response filtering of [`lib_types::Signal`]
//! - **Resampling**: band-limited resampling onto a new point count
//! - **Analytic signal**: quadrature transform and envelope

pub mod error;
pub mod fft;
pub mod convolution;
pub mod spectrum;
pub mod resample;
pub mod analytic;

pub use error::DspError;
pub use fft::FftEngine;
