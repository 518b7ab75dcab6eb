//! The shared pulse-construction contract.

use crate::error::{ModelError, ModelResult};
use lib_types::{Medium, Particle, Signal};

/// A strategy for constructing the Askaryan electric-field pulse of a
/// neutrino-induced shower.
///
/// All implementations share one contract: given a time grid (s), the
/// particle responsible for the shower, the observation geometry and the
/// medium model, produce a [`Signal`] of electric-field samples (V/m)
/// tagged [`lib_types::ValueKind::Field`]. Amplitude scales as the inverse
/// of `viewing_distance`; `t0` is the time at which the shower occurs.
pub trait AskaryanModel {
    fn pulse(
        &self,
        times: &[f64],
        particle: &Particle,
        viewing_angle: f64,
        viewing_distance: f64,
        medium: &dyn Medium,
        t0: f64,
    ) -> ModelResult<Signal>;
}

/// Fold the viewing angle onto [0, pi], rejecting larger magnitudes.
pub(crate) fn folded_angle(viewing_angle: f64) -> ModelResult<f64> {
    let theta = viewing_angle.abs();
    if theta > std::f64::consts::PI {
        return Err(ModelError::AngleOutOfRange(viewing_angle));
    }
    Ok(theta)
}

/// Spacing of the time grid; at least two samples required.
pub(crate) fn grid_dt(times: &[f64]) -> ModelResult<f64> {
    if times.len() < 2 {
        return Err(ModelError::GridTooShort {
            needed: 2,
            got: times.len(),
        });
    }
    Ok(times[1] - times[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_folding() {
        assert!((folded_angle(-0.5).unwrap() - 0.5).abs() < 1e-12);
        assert!((folded_angle(3.0).unwrap() - 3.0).abs() < 1e-12);
        assert!(matches!(
            folded_angle(3.5),
            Err(ModelError::AngleOutOfRange(_))
        ));
        assert!(matches!(
            folded_angle(-4.0),
            Err(ModelError::AngleOutOfRange(_))
        ));
    }

    #[test]
    fn test_grid_dt() {
        assert!((grid_dt(&[0.0, 0.5, 1.0]).unwrap() - 0.5).abs() < 1e-12);
        assert!(matches!(
            grid_dt(&[0.0]),
            Err(ModelError::GridTooShort { .. })
        ));
    }
}
