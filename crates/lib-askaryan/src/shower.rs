//! Longitudinal shower charge profiles.
//!
//! Pure functions mapping depth along the shower axis (m) and shower energy
//! (GeV) to excess charge (C). Electromagnetic showers follow the Greisen
//! model, hadronic showers the Gaisser-Hillas model; the two parameter
//! families are not interchangeable. All profiles are zero for non-positive
//! depth and below a model-specific critical energy.

/// Elementary charge (C).
const ELECTRON_CHARGE: f64 = 1.602e-19;

/// Density of ice (g/cm^3).
const ICE_DENSITY: f64 = 0.92;

/// Critical energy (GeV) for electromagnetic shower formation in ice.
const EM_CRIT_ENERGY: f64 = 7.86e-2;

/// Electron radiation length (g/cm^2) in ice.
const EM_RAD_LENGTH: f64 = 36.08;

/// Critical energy (GeV) for hadronic shower formation in ice.
const HAD_CRIT_ENERGY: f64 = 17.006e-2;

/// Hadron radiation length (g/cm^2) in ice.
const HAD_RAD_LENGTH: f64 = 39.562;

/// Hadron interaction length (g/cm^2) in ice.
const HAD_INT_LENGTH: f64 = 113.03;

/// Scale factor S_0 for the hadronic particle count.
const HAD_SCALE_FACTOR: f64 = 0.11842;

/// Electromagnetic longitudinal charge profile (Greisen model).
///
/// Returns the excess charge (C) at distance `z` (m) along an EM shower of
/// the given energy (GeV). Zero for `z <= 0` or energy at or below the
/// critical energy.
pub fn em_profile(z: f64, energy: f64) -> f64 {
    if z <= 0.0 || energy <= EM_CRIT_ENERGY {
        return 0.0;
    }

    // Depth in g/cm^2: the density integrated along the shower path
    let x = 100.0 * z * ICE_DENSITY;
    let x_ratio = x / EM_RAD_LENGTH;
    let e_ratio = energy / EM_CRIT_ENERGY;

    // Shower age
    let s = 3.0 * x_ratio / (x_ratio + 2.0 * e_ratio.ln());

    // Number of particles
    let n = 0.31 * (x_ratio * (1.0 - 1.5 * s.ln())).exp() / e_ratio.ln().sqrt();

    n * ELECTRON_CHARGE
}

/// Hadronic longitudinal charge profile (Gaisser-Hillas model).
///
/// Returns the excess charge (C) at distance `z` (m) along a hadronic shower
/// of the given energy (GeV). Zero for `z <= 0` or energy at or below the
/// critical energy.
pub fn had_profile(z: f64, energy: f64) -> f64 {
    if z <= 0.0 || energy <= HAD_CRIT_ENERGY {
        return 0.0;
    }

    let x = 100.0 * z * ICE_DENSITY;
    let e_ratio = energy / HAD_CRIT_ENERGY;
    let x_max = HAD_RAD_LENGTH * e_ratio.ln();

    let n = HAD_SCALE_FACTOR * e_ratio * (x_max - HAD_INT_LENGTH) / x_max
        * (x / (x_max - HAD_INT_LENGTH)).powf(x_max / HAD_INT_LENGTH)
        * ((x_max - x) / HAD_INT_LENGTH - 1.0).exp();

    n * ELECTRON_CHARGE
}

/// Depth (m) of the shower maximum.
///
/// Sizes the sampling grids of the convolution engine; it is not part of the
/// field formula itself.
pub fn max_length(energy: f64) -> f64 {
    // Maximum depth in g/cm^2
    let x_max = EM_RAD_LENGTH * (energy / EM_CRIT_ENERGY).ln() / std::f64::consts::LN_2;

    0.01 * x_max / ICE_DENSITY
}
