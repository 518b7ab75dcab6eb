//! Convolution pulse engine (the reference Askaryan model).
//!
//! The vector potential at viewing angle theta is
//!
//! ```text
//! A(theta, t) = convolution(Q(z*(1-n*cos(theta))/c),
//!                           RAC(z*(1-n*cos(theta))/c))
//!               * sin(theta) / sin(theta_c) / R / integral(Q(z))
//!               * c / (1 - n*cos(theta))
//! ```
//!
//! and the radiated field is its negative time derivative. Electromagnetic
//! and hadronic showers are evaluated independently with their own charge
//! profiles and summed.

use crate::error::{ModelError, ModelResult};
use crate::model::{folded_angle, grid_dt, AskaryanModel};
use crate::rac::rac;
use crate::shower::{em_profile, had_profile, max_length};
use crate::C_LIGHT;
use lib_dsp::convolution::fft_convolve;
use lib_types::{Medium, Particle, ShowerEnergy, Signal, ValueKind};

/// Half-width (s) of the kernel sampling window kept around t = 0.
const T_TOLERANCE: f64 = 10e-9;

/// Convolution-based Askaryan model: Greisen/Gaisser-Hillas shower profiles
/// convolved with the Cherenkov-angle kernel.
#[derive(Clone, Copy, Debug, Default)]
pub struct ArvzModel;

impl AskaryanModel for ArvzModel {
    fn pulse(
        &self,
        times: &[f64],
        particle: &Particle,
        viewing_angle: f64,
        viewing_distance: f64,
        medium: &dyn Medium,
        t0: f64,
    ) -> ModelResult<Signal> {
        let theta = folded_angle(viewing_angle)?;

        let energy = ShowerEnergy::of(particle);
        if energy.em == 0.0 && energy.had == 0.0 {
            return Ok(Signal::zeros(times.to_vec(), ValueKind::Field));
        }
        grid_dt(times)?;

        let n = medium.index(particle.vertex[2]);

        let em_vals = shower_field(
            times,
            energy.em,
            em_profile,
            theta,
            viewing_distance,
            n,
            t0,
        )?;
        let had_vals = shower_field(
            times,
            energy.had,
            had_profile,
            theta,
            viewing_distance,
            n,
            t0,
        )?;

        let values: Vec<f64> = em_vals
            .iter()
            .zip(had_vals.iter())
            .map(|(a, b)| a + b)
            .collect();

        // One sample shorter than the grid (first difference); the Signal
        // constructor zero-pads the tail back to full length.
        Ok(Signal::new(times.to_vec(), values, ValueKind::Field))
    }
}

/// Field values (V/m) radiated by one shower type; length `times.len() - 1`.
///
/// `profile` maps (depth m, energy GeV) to excess charge (C). Zero energy or
/// an everywhere-zero profile (sub-critical energy) yields an exactly-zero
/// contribution.
pub fn shower_field(
    times: &[f64],
    energy: f64,
    profile: fn(f64, f64) -> f64,
    theta: f64,
    viewing_distance: f64,
    n: f64,
    t0: f64,
) -> ModelResult<Vec<f64>> {
    let out_len = times.len() - 1;
    if energy == 0.0 {
        return Ok(vec![0.0; out_len]);
    }

    // Conversion factor from z to t for RAC
    let z_to_t = (1.0 - n * theta.cos()) / C_LIGHT;
    let dt = times[1] - times[0];
    let max_len = max_length(energy);
    let sin_theta_c = (1.0 - 1.0 / (n * n)).sqrt();

    // When the whole profile's time extent compresses below half a sample
    // (on or vanishingly close to the Cherenkov cone), the kernel acts as a
    // delta and the convolution reduces to A(t) = RAC(t - t0) * sin(theta) /
    // sin(theta_c). The general path would need an unbounded oversampling
    // divisor here.
    if 2.5 * max_len * z_to_t.abs() < 0.5 * dt {
        tracing::debug!(
            "shower time extent {:.3e} s below dt/2; using on-cone kernel limit",
            2.5 * max_len * z_to_t.abs()
        );
        let scale = theta.sin() / sin_theta_c;
        let a: Vec<f64> = times.iter().map(|&t| rac(t - t0, energy) * scale).collect();
        return Ok((0..out_len)
            .map(|i| -(a[i + 1] - a[i]) / dt / viewing_distance)
            .collect());
    }

    // Choose the divisor so the z-step stays at or below a tenth of the
    // shower-maximum depth (dz = dt / divider / z_to_t)
    let dt_divider = (10.0 * dt / max_len / z_to_t).abs() as usize + 1;
    let dz = dt / dt_divider as f64 / z_to_t;
    if dt_divider != 1 {
        tracing::debug!(
            "z-step of {:e} too large; dt_divider changed to {}",
            dt / z_to_t,
            dt_divider
        );
    }

    // Charge profile sampled up to 2.5 times the nominal shower maximum
    let n_q = (2.5 * max_len / dz).abs() as usize;
    let q: Vec<f64> = (0..n_q)
        .map(|i| profile(i as f64 * dz.abs(), energy))
        .collect();

    if q.iter().all(|&v| v == 0.0) && !q.is_empty() {
        return Ok(vec![0.0; out_len]);
    }

    // Kernel sample count chosen so the full convolution, rescaled by the
    // divider, matches the length of the time grid. The window must cover a
    // reasonable range around zero: points are added at the beginning/end
    // when it falls short and removed when it overshoots, with matching
    // zero-padding or trimming of the convolution below.
    let fine_dt = dz * z_to_t;
    let t_start = times[0] - t0;
    let total_fine = (times.len() * dt_divider) as i64;
    let n_extra_beginning = ((t_start + T_TOLERANCE) / fine_dt) as i64 + 1;
    let n_extra_end =
        ((T_TOLERANCE - t_start) / fine_dt) as i64 + 1 + n_q as i64 - total_fine;
    let n_rac = total_fine + 1 - n_q as i64 + n_extra_beginning + n_extra_end;
    if n_rac <= 0 {
        return Err(ModelError::ConvolutionWindow);
    }

    let t_rac0 = t_start - n_extra_beginning as f64 * fine_dt;
    let ra_c: Vec<f64> = (0..n_rac as usize)
        .map(|i| rac(t_rac0 + i as f64 * fine_dt, energy))
        .collect();

    if n_q * ra_c.len() > 1_000_000 {
        tracing::debug!("convolving {} Q points with {} RA_C points", n_q, ra_c.len());
    }
    let mut convolution = fft_convolve(&q, &ra_c)?;

    // Align the convolution with the time grid by undoing the extra kernel
    // points: pad with zeros where the window was extended past the data,
    // trim where it was truncated.
    if n_extra_beginning < 0 {
        let mut padded = vec![0.0; (-n_extra_beginning) as usize];
        padded.extend_from_slice(&convolution);
        convolution = padded;
    } else {
        let cut = (n_extra_beginning as usize).min(convolution.len());
        convolution.drain(..cut);
    }
    if n_extra_end <= 0 {
        convolution.extend(std::iter::repeat(0.0).take((-n_extra_end) as usize));
    } else {
        let keep = convolution.len().saturating_sub(n_extra_end as usize);
        convolution.truncate(keep);
    }
    if convolution.len() as i64 != total_fine {
        return Err(ModelError::ConvolutionWindow);
    }

    // Down-sample by the divider so the sample count matches the time grid
    let decimated: Vec<f64> = convolution
        .iter()
        .step_by(dt_divider)
        .copied()
        .collect();

    // Total excess longitudinal charge along the shower (signed dz)
    let lq_tot = trapezoid(&q, dz);

    // Scale to the true vector potential A. The divisions by z_to_t and
    // dt_divider correct the normalization empirically; they are not derived
    // like the other factors. A trailing * -dt is deliberately skipped here:
    // E = -dA/dt = diff(A) / -dt, so skipping both the multiply and the
    // later divide saves work, and the first difference below is already the
    // field.
    let a: Vec<f64> = decimated
        .iter()
        .map(|&c| {
            -c * theta.sin() / sin_theta_c / lq_tot / z_to_t / dt_divider as f64
        })
        .collect();

    Ok((0..a.len() - 1)
        .map(|i| (a[i + 1] - a[i]) / viewing_distance)
        .collect())
}

/// Trapezoidal integral over a uniform (signed) step.
fn trapezoid(values: &[f64], dx: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let sum: f64 = values.iter().sum();
    dx * (sum - 0.5 * (values[0] + values[values.len() - 1]))
}

/// Recover the vector potential (V*s) from a field signal.
///
/// Cumulative sum of the field values scaled by -dt; diagnostic companion to
/// the engine's internal vector potential.
pub fn vector_potential(signal: &Signal) -> Vec<f64> {
    let dt = match signal.dt() {
        Some(dt) => dt.0,
        None => return vec![0.0; signal.len()],
    };
    let mut out = Vec::with_capacity(signal.len());
    let mut acc = 0.0;
    for i in 0..signal.len() {
        out.push(-acc * dt);
        acc += signal.values[i];
    }
    out
}
