//! Simulation configuration loading and validation.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level simulation configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Simulation name/description.
    pub name: String,

    /// Particle producing the showers.
    pub particle: ParticleConfig,

    /// Medium model.
    #[serde(default)]
    pub medium: MediumConfig,

    /// Time window of the generated signals.
    pub window: WindowConfig,

    /// Models to run for every scenario.
    #[serde(default = "default_models")]
    pub models: Vec<ModelChoice>,

    /// Observation scenarios.
    pub scenarios: Vec<ScenarioConfig>,
}

fn default_models() -> Vec<ModelChoice> {
    vec![ModelChoice::Arvz]
}

/// Particle parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParticleConfig {
    /// Total energy (GeV).
    pub energy_gev: f64,

    /// Electromagnetic shower fraction.
    pub em_frac: f64,

    /// Hadronic shower fraction.
    pub had_frac: f64,

    /// Interaction vertex (m); z negative underground.
    #[serde(default = "default_vertex")]
    pub vertex: [f64; 3],
}

fn default_vertex() -> [f64; 3] {
    [0.0, 0.0, -1000.0]
}

/// Medium parameters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MediumConfig {
    /// Refractive index of the (homogeneous) ice.
    pub index: f64,
}

impl Default for MediumConfig {
    fn default() -> Self {
        Self { index: 1.78 }
    }
}

/// Time-window parameters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window start (ns).
    pub t_min_ns: f64,

    /// Window end (ns).
    pub t_max_ns: f64,

    /// Number of samples.
    pub samples: usize,
}

impl WindowConfig {
    /// Uniform time grid (s) over the window.
    pub fn times(&self) -> Vec<f64> {
        let t0 = self.t_min_ns * 1e-9;
        let t1 = self.t_max_ns * 1e-9;
        let n = self.samples;
        (0..n)
            .map(|i| t0 + (t1 - t0) * i as f64 / (n - 1) as f64)
            .collect()
    }
}

/// One observation scenario.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Label used in output file names.
    pub label: String,

    /// Viewing angle, absolute (deg) or offset from the Cherenkov angle.
    #[serde(flatten)]
    pub angle: AngleSpec,

    /// Viewing distance (m).
    #[serde(default = "default_distance")]
    pub distance_m: f64,

    /// Pulse offset time (ns).
    #[serde(default)]
    pub t0_ns: f64,
}

fn default_distance() -> f64 {
    1.0
}

/// Viewing-angle specification.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleSpec {
    /// Absolute viewing angle (deg).
    AngleDeg(f64),
    /// Offset from the Cherenkov angle (deg).
    OffsetDeg(f64),
}

impl AngleSpec {
    /// Resolve to radians given the refractive index.
    pub fn radians(&self, n: f64) -> f64 {
        match *self {
            AngleSpec::AngleDeg(deg) => deg.to_radians(),
            AngleSpec::OffsetDeg(deg) => (1.0 / n).acos() + deg.to_radians(),
        }
    }
}

/// Signal-construction strategy selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModelChoice {
    /// Frequency-domain fit, single combined shower.
    Zhs,
    /// Frequency-domain fit, separate EM/hadronic terms with LPM widths.
    Avz,
    /// Convolution of shower profiles with the Cherenkov kernel (reference).
    Arvz,
}

impl ModelChoice {
    pub fn name(&self) -> &'static str {
        match self {
            ModelChoice::Zhs => "zhs",
            ModelChoice::Avz => "avz",
            ModelChoice::Arvz => "arvz",
        }
    }
}

/// Load a configuration from a TOML or JSON file (sniffed by extension).
pub fn load_config(path: &Path) -> Result<SimulationConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {:?}", path))?;

    let config: SimulationConfig = if path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
    {
        serde_json::from_str(&content)
            .with_context(|| format!("parsing JSON config {:?}", path))?
    } else {
        toml::from_str(&content)
            .with_context(|| format!("parsing TOML config {:?}", path))?
    };

    validate_config(&config)?;
    Ok(config)
}

/// Validate a configuration before running.
pub fn validate_config(config: &SimulationConfig) -> Result<()> {
    if config.window.samples < 2 {
        anyhow::bail!(
            "window.samples must be at least 2, got {}",
            config.window.samples
        );
    }
    if config.window.t_max_ns <= config.window.t_min_ns {
        anyhow::bail!(
            "window must have t_max_ns > t_min_ns (got {} and {})",
            config.window.t_max_ns,
            config.window.t_min_ns
        );
    }
    if config.particle.energy_gev < 0.0 {
        anyhow::bail!("particle energy must be non-negative");
    }
    for (label, frac) in [
        ("em_frac", config.particle.em_frac),
        ("had_frac", config.particle.had_frac),
    ] {
        if !(0.0..=1.0).contains(&frac) {
            anyhow::bail!("particle {} must be in [0, 1], got {}", label, frac);
        }
    }
    if config.medium.index <= 1.0 {
        anyhow::bail!(
            "medium index must be greater than 1, got {}",
            config.medium.index
        );
    }
    if config.scenarios.is_empty() {
        anyhow::bail!("at least one scenario is required");
    }
    for scenario in &config.scenarios {
        if scenario.distance_m <= 0.0 {
            anyhow::bail!(
                "scenario '{}' has non-positive distance {}",
                scenario.label,
                scenario.distance_m
            );
        }
    }
    if config.models.is_empty() {
        anyhow::bail!("at least one model is required");
    }
    Ok(())
}
