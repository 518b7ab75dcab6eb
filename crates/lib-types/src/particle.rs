//! Particle interface consumed from the Monte-Carlo layer.
//!
//! Event generation (vertex/direction/energy sampling, Earth-shadowing
//! weights) happens upstream; the pulse models only need the fields below.

use serde::{Deserialize, Serialize};

/// Shower fractions of a neutrino interaction.
///
/// Fractions are in [0, 1] and are not required to sum to 1 (missing energy
/// is physical for hadronic cascades).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Fraction of the particle energy in the electromagnetic shower.
    pub em_frac: f64,

    /// Fraction of the particle energy in the hadronic shower.
    pub had_frac: f64,
}

impl Interaction {
    pub fn new(em_frac: f64, had_frac: f64) -> Self {
        Self { em_frac, had_frac }
    }
}

/// A neutrino at its interaction point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Interaction vertex (m); z is negative underground.
    pub vertex: [f64; 3],

    /// Total energy (GeV).
    pub energy: f64,

    /// Shower fractions of the interaction.
    pub interaction: Interaction,
}

impl Particle {
    pub fn new(vertex: [f64; 3], energy: f64, interaction: Interaction) -> Self {
        Self {
            vertex,
            energy,
            interaction,
        }
    }
}

/// Shower energies derived once from a particle; never mutated afterward.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShowerEnergy {
    /// Electromagnetic shower energy (GeV).
    pub em: f64,

    /// Hadronic shower energy (GeV).
    pub had: f64,

    /// Combined shower energy (GeV).
    pub total: f64,
}

impl ShowerEnergy {
    /// Split a particle's energy by its interaction fractions.
    pub fn of(particle: &Particle) -> Self {
        let em = particle.energy * particle.interaction.em_frac;
        let had = particle.energy * particle.interaction.had_frac;
        Self {
            em,
            had,
            total: particle.energy
                * (particle.interaction.em_frac + particle.interaction.had_frac),
        }
    }
}
