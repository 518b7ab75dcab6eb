//! Cherenkov-angle pulse kernel.
//!
//! Closed-form parameterization of R x (vector potential) radiated by a unit
//! shower at the Cherenkov angle, as a function of time. One functional form
//! serves both electromagnetic and hadronic showers in the convolution
//! model.

/// R * A(theta_c) in V*s at time `t` (s) for a shower of `energy` (GeV).
///
/// Two branches, a decaying exponential plus a power law on each side of
/// t = 0, with different decay constants before and after the peak.
pub fn rac(t: f64, energy: f64) -> f64 {
    // Absolute value of time in nanoseconds
    let ta = t.abs() * 1e9;
    if t >= 0.0 {
        -4.5e-17 * energy * ((-ta / 0.057).exp() + (1.0 + 2.87 * ta).powi(-3))
    } else {
        -4.5e-17 * energy * ((-ta / 0.030).exp() + (1.0 + 3.05 * ta).powf(-3.5))
    }
}
