//! Analytic signal and envelope via the quadrature (Hilbert) transform.
//!
//! The analytic signal is built in the frequency domain: transform, zero the
//! negative-frequency half, double the positive half (keeping DC and the
//! Nyquist bin as they are), inverse transform. Its magnitude is the signal
//! envelope.

use crate::error::DspResult;
use crate::fft::FftEngine;
use lib_types::Signal;
use num_complex::Complex64;

/// Analytic signal of a real sample array.
pub fn analytic_signal(values: &[f64]) -> DspResult<Vec<Complex64>> {
    let n = values.len();
    let mut engine = FftEngine::new();
    let mut spectrum: Vec<Complex64> =
        values.iter().map(|&v| Complex64::new(v, 0.0)).collect();
    engine.fft_inplace(&mut spectrum)?;

    // Quadrature window: keep DC (and Nyquist for even n), double the
    // positive frequencies, zero the negative frequencies.
    let half = if n % 2 == 0 { n / 2 } else { (n + 1) / 2 };
    for bin in spectrum.iter_mut().take(half).skip(1) {
        *bin *= 2.0;
    }
    for bin in spectrum.iter_mut().skip(half + if n % 2 == 0 { 1 } else { 0 }) {
        *bin = Complex64::new(0.0, 0.0);
    }

    engine.ifft_inplace(&mut spectrum)?;
    Ok(spectrum)
}

/// Envelope of the signal: magnitude of its analytic signal.
pub fn envelope(signal: &Signal) -> DspResult<Vec<f64>> {
    let analytic = analytic_signal(&signal.values)?;
    Ok(analytic.iter().map(|c| c.norm()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_types::ValueKind;
    use std::f64::consts::PI;

    #[test]
    fn test_analytic_real_part_is_input() {
        let values: Vec<f64> = (0..128).map(|i| (i as f64 * 0.21).sin()).collect();
        let analytic = analytic_signal(&values).unwrap();
        for (a, v) in analytic.iter().zip(values.iter()) {
            assert!((a.re - v).abs() < 1e-10);
        }
    }

    #[test]
    fn test_envelope_of_tone_is_flat() {
        // A pure tone has a constant envelope equal to its amplitude.
        let n = 256;
        let times: Vec<f64> = (0..n).map(|i| i as f64 * 1e-9).collect();
        let s = Signal::from_fn(
            times,
            |t| 0.7 * (2.0 * PI * 62.5e6 * t).sin(),
            ValueKind::Voltage,
        );
        let env = envelope(&s).unwrap();
        // Edges suffer from the finite window; check the interior.
        for &e in &env[16..n - 16] {
            assert!((e - 0.7).abs() < 0.02, "envelope {} far from 0.7", e);
        }
    }

    #[test]
    fn test_envelope_tracks_modulation() {
        // Amplitude-modulated tone: envelope follows the modulation.
        let n = 512;
        let times: Vec<f64> = (0..n).map(|i| i as f64 * 1e-9).collect();
        let s = Signal::from_fn(
            times.clone(),
            |t| (1.0 + 0.5 * (2.0 * PI * 7.8125e6 * t).cos()) * (2.0 * PI * 125e6 * t).sin(),
            ValueKind::Voltage,
        );
        let env = envelope(&s).unwrap();
        for (i, &e) in env.iter().enumerate().skip(32).take(n - 64) {
            let expected = 1.0 + 0.5 * (2.0 * PI * 7.8125e6 * times[i]).cos();
            assert!((e - expected).abs() < 0.05, "index {}: {} vs {}", i, e, expected);
        }
    }
}
