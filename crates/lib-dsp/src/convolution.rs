//! Linear convolution, direct and FFT-based.
//!
//! The convolution pulse engine convolves one bounded charge-profile /
//! kernel pair per call, so a single zero-padded FFT convolution is the
//! workhorse here; the direct form exists for validation and short inputs.

use crate::error::{DspError, DspResult};
use crate::fft::FftEngine;
use num_complex::Complex64;

/// Direct convolution (for comparison/validation).
///
/// This is O(n*m) and should only be used for short signals.
pub fn direct_convolve(signal: &[f64], kernel: &[f64]) -> Vec<f64> {
    if signal.is_empty() || kernel.is_empty() {
        return Vec::new();
    }
    let output_len = signal.len() + kernel.len() - 1;
    let mut output = vec![0.0; output_len];

    for (i, &s) in signal.iter().enumerate() {
        for (j, &k) in kernel.iter().enumerate() {
            output[i + j] += s * k;
        }
    }

    output
}

/// FFT-based full linear convolution.
///
/// Both inputs are zero-padded to a common power-of-two transform size;
/// output length is `signal.len() + kernel.len() - 1`.
pub fn fft_convolve(signal: &[f64], kernel: &[f64]) -> DspResult<Vec<f64>> {
    if signal.is_empty() || kernel.is_empty() {
        return Err(DspError::InsufficientData { needed: 1, got: 0 });
    }
    let output_len = signal.len() + kernel.len() - 1;
    let fft_size = output_len.next_power_of_two();

    let mut engine = FftEngine::new();

    // Zero-pad both signals
    let mut signal_fft: Vec<Complex64> = signal
        .iter()
        .map(|&v| Complex64::new(v, 0.0))
        .collect();
    signal_fft.resize(fft_size, Complex64::new(0.0, 0.0));

    let mut kernel_fft: Vec<Complex64> = kernel
        .iter()
        .map(|&v| Complex64::new(v, 0.0))
        .collect();
    kernel_fft.resize(fft_size, Complex64::new(0.0, 0.0));

    // Forward FFT
    engine.fft_inplace(&mut signal_fft)?;
    engine.fft_inplace(&mut kernel_fft)?;

    // Multiply
    for (s, k) in signal_fft.iter_mut().zip(kernel_fft.iter()) {
        *s = *s * *k;
    }

    // Inverse FFT
    engine.ifft_inplace(&mut signal_fft)?;

    // Extract real part and truncate to output length
    Ok(signal_fft[..output_len].iter().map(|c| c.re).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_convolve_impulse() {
        // Convolving with a delta function should return the input
        let signal = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let kernel = vec![1.0]; // Delta function

        let result = direct_convolve(&signal, &kernel);
        assert_eq!(result, signal);
    }

    #[test]
    fn test_direct_convolve_shift() {
        // Convolving with [0, 1] should shift by one sample
        let signal = vec![1.0, 2.0, 3.0, 4.0];
        let kernel = vec![0.0, 1.0];

        let result = direct_convolve(&signal, &kernel);
        assert_eq!(result, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_fft_convolve_matches_direct() {
        let signal: Vec<f64> = (0..200).map(|i| (i as f64 * 0.07).sin()).collect();
        let kernel: Vec<f64> = (0..37).map(|i| (-(i as f64) * 0.1).exp()).collect();

        let direct = direct_convolve(&signal, &kernel);
        let fft = fft_convolve(&signal, &kernel).unwrap();

        assert_eq!(direct.len(), fft.len());
        for (d, f) in direct.iter().zip(fft.iter()) {
            assert!((d - f).abs() < 1e-10);
        }
    }

    #[test]
    fn test_fft_convolve_empty_rejected() {
        assert!(fft_convolve(&[], &[1.0]).is_err());
        assert!(fft_convolve(&[1.0], &[]).is_err());
    }
}
