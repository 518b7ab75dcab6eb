//! On-demand spectral views of a [`Signal`].
//!
//! The spectrum and frequency axis are recomputed at every call; nothing is
//! cached on the container. Filtering multiplies the spectrum by an
//! arbitrary complex frequency response and writes the real part of the
//! inverse transform back into the signal.

use crate::error::{DspError, DspResult};
use crate::fft::{fftfreq, FftEngine};
use lib_types::Signal;
use num_complex::Complex64;

/// Full complex FFT spectrum of the signal values.
pub fn spectrum(signal: &Signal) -> DspResult<Vec<Complex64>> {
    let mut engine = FftEngine::new();
    let data: Vec<Complex64> = signal
        .values
        .iter()
        .map(|&v| Complex64::new(v, 0.0))
        .collect();
    engine.fft(&data)
}

/// FFT frequency axis (Hz) matching [`spectrum`]'s bin layout.
pub fn frequencies(signal: &Signal) -> DspResult<Vec<f64>> {
    let dt = signal.dt().ok_or(DspError::InsufficientData {
        needed: 2,
        got: signal.len(),
    })?;
    Ok(fftfreq(signal.len(), dt.0))
}

/// Apply a complex frequency response to the signal in place.
///
/// The response is evaluated on the signal's frequency axis (positive and
/// negative bins), multiplied into the spectrum, and the real part of the
/// inverse transform replaces the values.
pub fn filter_frequencies<F>(signal: &mut Signal, freq_response: F) -> DspResult<()>
where
    F: Fn(f64) -> Complex64,
{
    let freqs = frequencies(signal)?;
    let mut filtered = spectrum(signal)?;

    for (bin, f) in filtered.iter_mut().zip(freqs.iter()) {
        *bin *= freq_response(*f);
    }

    let mut engine = FftEngine::new();
    engine.ifft_inplace(&mut filtered)?;
    for (v, c) in signal.values.iter_mut().zip(filtered.iter()) {
        *v = c.re;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_types::{Hertz, ValueKind};
    use std::f64::consts::PI;

    fn tone(n: usize, dt: f64, freq: Hertz) -> Signal {
        let times: Vec<f64> = (0..n).map(|i| i as f64 * dt).collect();
        Signal::from_fn(times, move |t| (freq.angular() * t).cos(), ValueKind::Voltage)
    }

    #[test]
    fn test_spectrum_peak_at_tone_frequency() {
        // 64 samples at 1 ns spacing; tone at bin 8 (125 MHz)
        let s = tone(64, 1e-9, Hertz::from_mhz(125.0));
        let spec = spectrum(&s).unwrap();
        let freqs = frequencies(&s).unwrap();

        let peak = (0..spec.len())
            .max_by(|&a, &b| spec[a].norm().partial_cmp(&spec[b].norm()).unwrap())
            .unwrap();
        assert!((freqs[peak].abs() - 125e6).abs() < 1e-3);
    }

    #[test]
    fn test_unity_response_is_identity() {
        let mut s = tone(64, 1e-9, Hertz::from_mhz(125.0));
        let original = s.values.clone();
        filter_frequencies(&mut s, |_| Complex64::new(1.0, 0.0)).unwrap();
        for (a, b) in s.values.iter().zip(original.iter()) {
            assert!((a - b).abs() < 1e-10);
        }
    }

    #[test]
    fn test_brick_wall_removes_tone() {
        // Two tones; low-pass below 200 MHz should keep only the lower one.
        let n = 128;
        let dt = 1e-9;
        let times: Vec<f64> = (0..n).map(|i| i as f64 * dt).collect();
        let mut s = Signal::from_fn(
            times.clone(),
            |t| (2.0 * PI * 125e6 * t).cos() + (2.0 * PI * 375e6 * t).cos(),
            ValueKind::Voltage,
        );
        filter_frequencies(&mut s, |f| {
            if f.abs() < 200e6 {
                Complex64::new(1.0, 0.0)
            } else {
                Complex64::new(0.0, 0.0)
            }
        })
        .unwrap();

        let expected = Signal::from_fn(times, |t| (2.0 * PI * 125e6 * t).cos(), ValueKind::Voltage);
        for (a, b) in s.values.iter().zip(expected.values.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_frequencies_need_two_samples() {
        let s = Signal::zeros(vec![0.0], ValueKind::Undefined);
        assert!(frequencies(&s).is_err());
    }
}
