//! Band-limited and white noise signals.
//!
//! Gaussian white noise and Rayleigh-model thermal noise for detector
//! studies. Thermal noise keeps its frequency comb, amplitudes and phases
//! after construction, so it can be re-evaluated on any time grid without
//! interpolation (function-signal semantics).

use lib_types::{Signal, ValueKind};
use rand::Rng;
use std::f64::consts::PI;

/// Boltzmann constant (J/K).
const K_B: f64 = 1.38e-23;

/// Gaussian white-noise voltage signal with standard deviation `sigma`.
pub fn gaussian_noise<R: Rng>(times: Vec<f64>, sigma: f64, rng: &mut R) -> Signal {
    let mut sampler = BoxMuller::default();
    let values = (0..times.len())
        .map(|_| sigma * sampler.next_standard(rng))
        .collect();
    Signal::new(times, values, ValueKind::Voltage)
}

/// Standard-normal sampler using the Box-Muller transform.
#[derive(Default)]
struct BoxMuller {
    cached: Option<f64>,
}

impl BoxMuller {
    fn next_standard<R: Rng>(&mut self, rng: &mut R) -> f64 {
        if let Some(z) = self.cached.take() {
            return z;
        }
        let u1: f64 = rng.gen_range(f64::MIN_POSITIVE..1.0);
        let u2: f64 = rng.gen::<f64>();
        let r = (-2.0 * u1.ln()).sqrt();
        let phi = 2.0 * PI * u2;
        self.cached = Some(r * phi.sin());
        r * phi.cos()
    }
}

/// How the thermal-noise RMS voltage is determined.
#[derive(Clone, Copy, Debug)]
pub enum NoiseAmplitude {
    /// Explicit RMS voltage (V).
    Rms(f64),
    /// Johnson-Nyquist noise of a resistance (ohm) at a temperature (K);
    /// RMS voltage is sqrt(4 kB T R bandwidth).
    Johnson { temperature: f64, resistance: f64 },
}

/// Thermal Rayleigh noise in a frequency band.
///
/// A comb of frequencies spanning `[f_min, f_max)` with random phases; the
/// number of lines defaults to the FFT-bin count of the construction window
/// (minimum 1). Evaluation at any time grid sums the cosines and normalizes
/// to the configured RMS voltage.
#[derive(Clone, Debug)]
pub struct ThermalNoise {
    /// Band edges (Hz).
    pub f_min: f64,
    pub f_max: f64,

    /// Frequency comb (Hz).
    pub freqs: Vec<f64>,

    /// Relative amplitude per frequency.
    pub amps: Vec<f64>,

    /// Phase per frequency (radians).
    pub phases: Vec<f64>,

    /// RMS voltage of the evaluated signal.
    pub rms: f64,
}

impl ThermalNoise {
    /// Thermal noise with flat in-band amplitude.
    pub fn new<R: Rng>(
        times: &[f64],
        f_band: (f64, f64),
        amplitude: NoiseAmplitude,
        rng: &mut R,
    ) -> Self {
        Self::with_spectrum(times, f_band, |_| 1.0, amplitude, rng)
    }

    /// Thermal noise with a caller-supplied amplitude-vs-frequency shape.
    pub fn with_spectrum<R: Rng, F: Fn(f64) -> f64>(
        times: &[f64],
        f_band: (f64, f64),
        f_amplitude: F,
        amplitude: NoiseAmplitude,
        rng: &mut R,
    ) -> Self {
        let (f_min, f_max) = f_band;

        // Number of lines from the FFT bin size of the window:
        //   duration = t_last - t_first, bin = 1/duration,
        //   n = bandwidth / bin
        let duration = match times.len() {
            0 => 0.0,
            n => times[n - 1] - times[0],
        };
        let n_freqs = (((f_max - f_min) * duration) as usize).max(1);

        let step = (f_max - f_min) / n_freqs as f64;
        let freqs: Vec<f64> = (0..n_freqs).map(|i| f_min + i as f64 * step).collect();
        let amps: Vec<f64> = freqs.iter().map(|&f| f_amplitude(f)).collect();
        let phases: Vec<f64> = (0..n_freqs).map(|_| rng.gen::<f64>() * 2.0 * PI).collect();

        let rms = match amplitude {
            NoiseAmplitude::Rms(v) => v,
            NoiseAmplitude::Johnson {
                temperature,
                resistance,
            } => (4.0 * K_B * temperature * resistance * (f_max - f_min)).sqrt(),
        };

        Self {
            f_min,
            f_max,
            freqs,
            amps,
            phases,
            rms,
        }
    }

    /// Evaluate the noise waveform on a time grid.
    pub fn signal(&self, times: Vec<f64>) -> Signal {
        let normalization = (2.0 / self.freqs.len() as f64).sqrt() * self.rms;
        let values: Vec<f64> = times
            .iter()
            .map(|&t| {
                let mut v = 0.0;
                for ((&f, &a), &phi) in
                    self.freqs.iter().zip(self.amps.iter()).zip(self.phases.iter())
                {
                    // Skip a zero-frequency line if the band starts at DC
                    if f == 0.0 {
                        continue;
                    }
                    v += a * (2.0 * PI * f * t + phi).cos();
                }
                v * normalization
            })
            .collect();
        Signal::new(times, values, ValueKind::Voltage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn grid(n: usize, t0: f64, t1: f64) -> Vec<f64> {
        (0..n)
            .map(|i| t0 + (t1 - t0) * i as f64 / (n - 1) as f64)
            .collect()
    }

    #[test]
    fn test_gaussian_noise_statistics() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let s = gaussian_noise(grid(20000, 0.0, 1.0), 2.0, &mut rng);

        let mean: f64 = s.values.iter().sum::<f64>() / s.len() as f64;
        let var: f64 =
            s.values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / s.len() as f64;
        assert_eq!(s.kind, ValueKind::Voltage);
        assert!(mean.abs() < 0.05, "mean {}", mean);
        assert!((var.sqrt() - 2.0).abs() < 0.05, "std {}", var.sqrt());
    }

    #[test]
    fn test_thermal_noise_rms() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let times = grid(4096, 0.0, 4e-6);
        let noise = ThermalNoise::new(
            &times,
            (200e6, 400e6),
            NoiseAmplitude::Rms(1.5),
            &mut rng,
        );
        let s = noise.signal(times);

        let rms =
            (s.values.iter().map(|v| v * v).sum::<f64>() / s.len() as f64).sqrt();
        assert!((rms - 1.5).abs() / 1.5 < 0.15, "rms {}", rms);
    }

    #[test]
    fn test_thermal_noise_band_limited() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let times = grid(2048, 0.0, 2e-6);
        let noise = ThermalNoise::new(
            &times,
            (100e6, 250e6),
            NoiseAmplitude::Rms(1.0),
            &mut rng,
        );
        let s = noise.signal(times.clone());

        let spec = lib_dsp::spectrum::spectrum(&s).unwrap();
        let freqs = lib_dsp::spectrum::frequencies(&s).unwrap();

        // Guard bands absorb the finite-window leakage of off-bin lines
        let in_band: f64 = spec
            .iter()
            .zip(freqs.iter())
            .filter(|(_, f)| f.abs() >= 90e6 && f.abs() <= 260e6)
            .map(|(c, _)| c.norm_sqr())
            .sum();
        let total: f64 = spec.iter().map(|c| c.norm_sqr()).sum();
        assert!(in_band / total > 0.97, "in-band fraction {}", in_band / total);
    }

    #[test]
    fn test_thermal_noise_reevaluation_is_consistent() {
        // Same comb evaluated on overlapping grids agrees where they overlap.
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let times = grid(1024, 0.0, 1e-6);
        let noise = ThermalNoise::new(
            &times,
            (100e6, 200e6),
            NoiseAmplitude::Rms(1.0),
            &mut rng,
        );

        let a = noise.signal(times.clone());
        let b = noise.signal(times[..512].to_vec());
        for (x, y) in b.values.iter().zip(a.values.iter()) {
            assert!((x - y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_johnson_rms() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let times = grid(64, 0.0, 1e-6);
        let noise = ThermalNoise::new(
            &times,
            (100e6, 300e6),
            NoiseAmplitude::Johnson {
                temperature: 300.0,
                resistance: 50.0,
            },
            &mut rng,
        );
        let expected = (4.0 * K_B * 300.0 * 50.0 * 200e6).sqrt();
        assert!((noise.rms - expected).abs() < 1e-12);
    }

    #[test]
    fn test_minimum_one_frequency_line() {
        // A window too short for even one FFT bin still gets one line.
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let times = grid(4, 0.0, 1e-9);
        let noise = ThermalNoise::new(
            &times,
            (100e6, 110e6),
            NoiseAmplitude::Rms(1.0),
            &mut rng,
        );
        assert_eq!(noise.freqs.len(), 1);
    }
}
