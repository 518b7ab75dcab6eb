//! FFT/IFFT operations using rustfft.
//!
//! This module provides a high-level wrapper around rustfft with:
//! - Planner caching for repeated transforms
//! - Real-to-complex and complex-to-real transforms
//! - Standard-layout frequency axes (`fftfreq`, `rfftfreq`)
//!
//! Transform lengths are caller-chosen (the signal time grid dictates them)
//! and need not be powers of two; rustfft's mixed-radix algorithms handle
//! arbitrary sizes.

use crate::error::{DspError, DspResult};
use num_complex::Complex64;
use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// FFT engine with cached planners.
pub struct FftEngine {
    /// Complex FFT planner.
    complex_planner: FftPlanner<f64>,

    /// Real FFT planner.
    real_planner: RealFftPlanner<f64>,
}

impl FftEngine {
    /// Create a new FFT engine.
    pub fn new() -> Self {
        Self {
            complex_planner: FftPlanner::new(),
            real_planner: RealFftPlanner::new(),
        }
    }

    /// Perform forward FFT on complex data in-place.
    pub fn fft_inplace(&mut self, data: &mut [Complex64]) -> DspResult<()> {
        if data.is_empty() {
            return Err(DspError::InsufficientData { needed: 1, got: 0 });
        }

        let fft = self.complex_planner.plan_fft_forward(data.len());
        fft.process(data);
        Ok(())
    }

    /// Perform inverse FFT on complex data in-place.
    pub fn ifft_inplace(&mut self, data: &mut [Complex64]) -> DspResult<()> {
        let len = data.len();
        if len == 0 {
            return Err(DspError::InsufficientData { needed: 1, got: 0 });
        }

        let fft = self.complex_planner.plan_fft_inverse(len);
        fft.process(data);

        // Normalize
        let scale = 1.0 / len as f64;
        for x in data.iter_mut() {
            *x *= scale;
        }

        Ok(())
    }

    /// Perform forward FFT on complex data, returning a new buffer.
    pub fn fft(&mut self, data: &[Complex64]) -> DspResult<Vec<Complex64>> {
        let mut result = data.to_vec();
        self.fft_inplace(&mut result)?;
        Ok(result)
    }

    /// Perform inverse FFT on complex data, returning a new buffer.
    pub fn ifft(&mut self, data: &[Complex64]) -> DspResult<Vec<Complex64>> {
        let mut result = data.to_vec();
        self.ifft_inplace(&mut result)?;
        Ok(result)
    }

    /// Perform forward real-to-complex FFT.
    ///
    /// Input: N real samples
    /// Output: N/2 + 1 complex samples (Hermitian symmetry exploited)
    pub fn rfft(&mut self, data: &[f64]) -> DspResult<Vec<Complex64>> {
        if data.is_empty() {
            return Err(DspError::InsufficientData { needed: 1, got: 0 });
        }

        let r2c = self.real_planner.plan_fft_forward(data.len());
        let mut input = data.to_vec();
        let mut output = r2c.make_output_vec();

        r2c.process(&mut input, &mut output)
            .map_err(|e| DspError::NumericalInstability(e.to_string()))?;

        Ok(output)
    }

    /// Perform inverse complex-to-real FFT.
    ///
    /// Input: N/2 + 1 complex samples
    /// Output: N real samples
    ///
    /// The DC bin and (for even N) the Nyquist bin must be real for the
    /// output to exist; their imaginary parts are zeroed before the
    /// transform, matching the behavior of the usual numerical libraries.
    pub fn irfft(&mut self, data: &[Complex64], output_len: usize) -> DspResult<Vec<f64>> {
        if output_len < 2 {
            return Err(DspError::InsufficientData {
                needed: 2,
                got: output_len,
            });
        }

        let expected_input_len = output_len / 2 + 1;
        if data.len() != expected_input_len {
            return Err(DspError::LengthMismatch {
                expected: expected_input_len,
                actual: data.len(),
            });
        }

        let c2r = self.real_planner.plan_fft_inverse(output_len);
        let mut input = data.to_vec();
        input[0].im = 0.0;
        if output_len % 2 == 0 {
            let last = input.len() - 1;
            input[last].im = 0.0;
        }
        let mut output = c2r.make_output_vec();

        c2r.process(&mut input, &mut output)
            .map_err(|e| DspError::NumericalInstability(e.to_string()))?;

        // Normalize
        let scale = 1.0 / output_len as f64;
        for x in output.iter_mut() {
            *x *= scale;
        }

        Ok(output)
    }

    /// Get a cached forward FFT plan.
    pub fn get_fft_forward(&mut self, len: usize) -> Arc<dyn Fft<f64>> {
        self.complex_planner.plan_fft_forward(len)
    }

    /// Get a cached inverse FFT plan.
    pub fn get_fft_inverse(&mut self, len: usize) -> Arc<dyn Fft<f64>> {
        self.complex_planner.plan_fft_inverse(len)
    }
}

impl Default for FftEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// FFT sample frequencies for an n-point transform with sample spacing d.
///
/// Layout is `[0, 1, ..., (n-1)/2, -(n/2), ..., -1] / (n*d)`, matching the
/// full complex transform.
pub fn fftfreq(n: usize, d: f64) -> Vec<f64> {
    let mut freqs = vec![0.0; n];
    let scale = 1.0 / (n as f64 * d);
    let half = (n - 1) / 2;
    for (i, f) in freqs.iter_mut().enumerate().take(half + 1) {
        *f = i as f64 * scale;
    }
    for (i, f) in freqs.iter_mut().enumerate().skip(half + 1) {
        *f = -((n - i) as f64) * scale;
    }
    freqs
}

/// Non-negative FFT sample frequencies for an n-point real transform.
///
/// Layout is `[0, 1, ..., n/2] / (n*d)`.
pub fn rfftfreq(n: usize, d: f64) -> Vec<f64> {
    let scale = 1.0 / (n as f64 * d);
    (0..=n / 2).map(|i| i as f64 * scale).collect()
}
