//! Band-limited resampling.
//!
//! Resamples a signal onto `n` points spanning the same time range using the
//! Fourier method: transform, zero-pad or truncate the spectrum (splitting
//! or merging the Nyquist bin as required), inverse transform, rescale by
//! `n / len`. Both the time and value arrays of the signal are replaced.

use crate::error::{DspError, DspResult};
use crate::fft::FftEngine;
use lib_types::Signal;
use num_complex::Complex64;

/// Resample the signal into n points over the same time range.
pub fn resample(signal: &mut Signal, n: usize) -> DspResult<()> {
    let old_n = signal.len();
    if n == old_n {
        return Ok(());
    }
    if old_n < 2 || n < 2 {
        return Err(DspError::InsufficientData {
            needed: 2,
            got: old_n.min(n),
        });
    }

    let values = resample_values(&signal.values, n)?;

    let t0 = signal.times[0];
    let t1 = signal.times[old_n - 1];
    let times = (0..n)
        .map(|i| t0 + (t1 - t0) * i as f64 / (n - 1) as f64)
        .collect();

    signal.times = times;
    signal.values = values;
    Ok(())
}

/// Fourier-method resampling of a real sample array to length n.
pub fn resample_values(values: &[f64], n: usize) -> DspResult<Vec<f64>> {
    let old_n = values.len();
    if old_n == 0 {
        return Err(DspError::InsufficientData { needed: 1, got: 0 });
    }
    if n == old_n {
        return Ok(values.to_vec());
    }

    let mut engine = FftEngine::new();
    let data: Vec<Complex64> = values.iter().map(|&v| Complex64::new(v, 0.0)).collect();
    let x = engine.fft(&data)?;

    let mut y = vec![Complex64::new(0.0, 0.0); n];
    let keep = n.min(old_n);
    let nyq = keep / 2 + 1;

    // Positive frequencies (including the Nyquist bin if present)
    y[..nyq.min(n)].copy_from_slice(&x[..nyq.min(n)]);

    // Negative frequencies
    if keep > 2 {
        let tail = keep - nyq;
        for i in 0..tail {
            y[n - tail + i] = x[old_n - tail + i];
        }
    }

    // The shared Nyquist bin: merge when shrinking, split when growing
    if keep % 2 == 0 {
        let half = keep / 2;
        if n < old_n {
            y[half] += x[old_n - half];
        } else {
            y[half] *= 0.5;
            let split = y[half];
            y[n - half] = split;
        }
    }

    let y = engine.ifft(&y)?;
    let scale = n as f64 / old_n as f64;
    Ok(y.iter().map(|c| c.re * scale).collect())
}
