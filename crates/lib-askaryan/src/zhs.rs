//! Frequency-domain parametric Askaryan model, single combined shower.
//!
//! Synthesizes the field spectrum at the Cherenkov angle from a closed-form
//! fit, applies a Gaussian off-cone suppression whose width shrinks with
//! frequency, and inverse-transforms with a phase ramp for the pulse offset.
//! Cheaper than the convolution engine; used for quick scans.

use crate::error::ModelResult;
use crate::model::{folded_angle, grid_dt, AskaryanModel};
use lib_dsp::fft::{fftfreq, FftEngine};
use lib_types::{Complex64, Medium, Particle, ShowerEnergy, Signal, ValueKind};
use std::f64::consts::PI;

/// Reference frequency (Hz) of the parameterization.
const NU_0: f64 = 500e6;

/// Angular width (radians) of the off-cone Gaussian at the reference
/// frequency.
const CONE_WIDTH: f64 = 2.4 * PI / 180.0;

/// Parametric frequency-domain model for a single combined shower.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZhsModel;

impl AskaryanModel for ZhsModel {
    fn pulse(
        &self,
        times: &[f64],
        particle: &Particle,
        viewing_angle: f64,
        viewing_distance: f64,
        medium: &dyn Medium,
        t0: f64,
    ) -> ModelResult<Signal> {
        folded_angle(viewing_angle)?;

        // Combined shower energy from both interaction fractions
        let energy = ShowerEnergy::of(particle).total;
        if energy == 0.0 {
            return Ok(Signal::zeros(times.to_vec(), ValueKind::Field));
        }

        let dt = grid_dt(times)?;
        let n = medium.index(particle.vertex[2]);
        let theta_c = (1.0 / n).acos();

        let freqs = fftfreq(times.len(), dt);

        // Field per frequency at the Cherenkov angle, suppressed off-cone by
        // a Gaussian in (viewing_angle - theta_c) * (nu / nu_0); the pulse
        // offset becomes a phase ramp.
        let freq_vals: Vec<Complex64> = freqs
            .iter()
            .map(|&f| {
                let ratio = f.abs() / NU_0;
                // V/m/MHz at the cone, converted to V/m/Hz
                let mut e_omega =
                    1.1e-7 * energy / 1000.0 * ratio / (1.0 + 0.4 * ratio * ratio);
                e_omega /= viewing_distance;
                e_omega *= 1e-6;
                e_omega *=
                    (-0.5 * ((viewing_angle - theta_c) * ratio / CONE_WIDTH).powi(2)).exp();

                let phase = -2.0 * PI * f * (t0 - times[0]);
                Complex64::from_polar(e_omega, phase)
            })
            .collect();

        // Normalize the inverse transform by dt so the time-domain amplitude
        // stays the same for different sampling rates
        let mut engine = FftEngine::new();
        let trace = engine.ifft(&freq_vals)?;
        let values: Vec<f64> = trace.iter().map(|c| c.re / dt).collect();

        Ok(Signal::new(times.to_vec(), values, ValueKind::Field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use lib_types::{HomogeneousIce, Interaction};

    fn grid(n: usize, t0: f64, t1: f64) -> Vec<f64> {
        (0..n)
            .map(|i| t0 + (t1 - t0) * i as f64 / (n - 1) as f64)
            .collect()
    }

    fn close(a: f64, b: f64, rel: f64) -> bool {
        (a - b).abs() <= rel * b.abs().max(a.abs())
    }

    fn particle(energy: f64, em: f64, had: f64) -> Particle {
        Particle::new([0.0, 0.0, -1000.0], energy, Interaction::new(em, had))
    }

    #[test]
    fn test_reference_peak_off_cone() {
        // 1e6 GeV combined at theta_c + 2 deg, 1 km, 2048 points
        let times = grid(2048, -20e-9, 80e-9);
        let ice = HomogeneousIce::default();
        let theta = (1.0 / 1.78_f64).acos() + 2.0_f64.to_radians();
        let p = particle(1e6, 1.0, 0.0);

        let s = ZhsModel.pulse(&times, &p, theta, 1000.0, &ice, 0.0).unwrap();
        let peak = s.peak_index().unwrap();
        assert_eq!(peak, 409);
        assert!(close(s.values[peak], 8.979271e-5, 1e-6));
    }

    #[test]
    fn test_reference_peak_on_cone() {
        let times = grid(2048, -20e-9, 80e-9);
        let ice = HomogeneousIce::default();
        let theta = (1.0 / 1.78_f64).acos();
        let p = particle(1e6, 1.0, 0.0);

        let s = ZhsModel.pulse(&times, &p, theta, 1000.0, &ice, 0.0).unwrap();
        let peak = s.peak_index().unwrap();
        assert_eq!(peak, 409);
        assert!(close(s.values[peak], 6.066115e-4, 1e-6));
        // Peak sits near t = 0
        assert!(times[peak].abs() < 1e-9);
    }

    #[test]
    fn test_off_cone_suppressed() {
        let times = grid(2048, -20e-9, 80e-9);
        let ice = HomogeneousIce::default();
        let tc = (1.0 / 1.78_f64).acos();
        let p = particle(1e6, 1.0, 0.0);

        let on = ZhsModel.pulse(&times, &p, tc, 1000.0, &ice, 0.0).unwrap();
        let off = ZhsModel
            .pulse(&times, &p, tc + 5.0_f64.to_radians(), 1000.0, &ice, 0.0)
            .unwrap();
        assert!(off.max_abs() < on.max_abs());
    }

    #[test]
    fn test_zero_energy_zero_signal() {
        let times = grid(128, -20e-9, 80e-9);
        let ice = HomogeneousIce::default();
        let p = particle(1e8, 0.0, 0.0);
        let s = ZhsModel.pulse(&times, &p, 0.9, 1.0, &ice, 0.0).unwrap();
        assert_eq!(s.len(), 128);
        assert_eq!(s.kind, ValueKind::Field);
        assert!(s.values.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_inverse_distance_scaling() {
        let times = grid(512, -20e-9, 80e-9);
        let ice = HomogeneousIce::default();
        let tc = (1.0 / 1.78_f64).acos();
        let p = particle(1e6, 1.0, 0.0);

        let near = ZhsModel.pulse(&times, &p, tc, 1.0, &ice, 0.0).unwrap();
        let far = ZhsModel.pulse(&times, &p, tc, 100.0, &ice, 0.0).unwrap();
        assert!(close(near.max_abs() / far.max_abs(), 100.0, 1e-9));
    }

    #[test]
    fn test_t0_moves_peak() {
        let times = grid(1024, -20e-9, 80e-9);
        let ice = HomogeneousIce::default();
        let tc = (1.0 / 1.78_f64).acos();
        let p = particle(1e6, 1.0, 0.0);

        let base = ZhsModel.pulse(&times, &p, tc, 1.0, &ice, 0.0).unwrap();
        let late = ZhsModel.pulse(&times, &p, tc, 1.0, &ice, 30e-9).unwrap();
        let dt = base.dt().unwrap().0;
        let delta =
            (late.peak_index().unwrap() as f64 - base.peak_index().unwrap() as f64) * dt;
        assert!((delta - 30e-9).abs() < 2.0 * dt);
    }

    #[test]
    fn test_angle_out_of_range() {
        let times = grid(64, -5e-9, 15e-9);
        let ice = HomogeneousIce::default();
        let p = particle(1e6, 1.0, 0.0);
        assert!(matches!(
            ZhsModel.pulse(&times, &p, -3.8, 1.0, &ice, 0.0),
            Err(ModelError::AngleOutOfRange(_))
        ));
    }
}
