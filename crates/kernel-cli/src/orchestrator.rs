//! Simulation orchestration: build the event, run every scenario through
//! every selected model, collect results.

use crate::config::{ModelChoice, SimulationConfig};
use anyhow::{Context, Result};
use lib_askaryan::{ArvzModel, AskaryanModel, AvzModel, ZhsModel};
use lib_types::{HomogeneousIce, Interaction, Particle, Signal};
use rayon::prelude::*;

/// Orchestrates a configured simulation run.
pub struct Orchestrator {
    config: SimulationConfig,
}

impl Orchestrator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Run every (scenario, model) pair, in parallel.
    pub fn run(&self) -> Result<SimulationResults> {
        let particle = self.particle();
        let ice = HomogeneousIce::new(self.config.medium.index);
        let times = self.config.window.times();

        let jobs: Vec<(usize, ModelChoice)> = self
            .config
            .scenarios
            .iter()
            .enumerate()
            .flat_map(|(i, _)| self.config.models.iter().map(move |&m| (i, m)))
            .collect();

        tracing::info!(
            "running {} scenarios x {} models",
            self.config.scenarios.len(),
            self.config.models.len()
        );

        let mut pulses = jobs
            .par_iter()
            .map(|&(scenario_idx, model)| {
                let scenario = &self.config.scenarios[scenario_idx];
                let angle = scenario.angle.radians(self.config.medium.index);
                let signal = build_model(model)
                    .pulse(
                        &times,
                        &particle,
                        angle,
                        scenario.distance_m,
                        &ice,
                        scenario.t0_ns * 1e-9,
                    )
                    .with_context(|| {
                        format!(
                            "scenario '{}' with model {}",
                            scenario.label,
                            model.name()
                        )
                    })?;

                Ok(PulseResult {
                    scenario_idx,
                    label: scenario.label.clone(),
                    model,
                    peak: signal.max_abs(),
                    peak_time: signal
                        .peak_index()
                        .map(|i| signal.times[i])
                        .unwrap_or(0.0),
                    signal,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        pulses.sort_by_key(|p| (p.scenario_idx, p.model.name()));

        Ok(SimulationResults {
            name: self.config.name.clone(),
            pulses,
        })
    }

    fn particle(&self) -> Particle {
        Particle::new(
            self.config.particle.vertex,
            self.config.particle.energy_gev,
            Interaction::new(self.config.particle.em_frac, self.config.particle.had_frac),
        )
    }
}

/// Peak field amplitude versus viewing angle, in parallel.
pub fn scan_angles(
    model: ModelChoice,
    times: &[f64],
    particle: &Particle,
    angles: &[f64],
    distance: f64,
    index: f64,
) -> Result<Vec<AnglePoint>> {
    let ice = HomogeneousIce::new(index);
    angles
        .par_iter()
        .map(|&angle| {
            let signal = build_model(model)
                .pulse(times, particle, angle, distance, &ice, 0.0)
                .with_context(|| format!("angle {:.4} rad", angle))?;
            Ok(AnglePoint {
                angle,
                peak: signal.max_abs(),
            })
        })
        .collect()
}

/// Instantiate the selected construction strategy.
pub fn build_model(choice: ModelChoice) -> Box<dyn AskaryanModel + Send + Sync> {
    match choice {
        ModelChoice::Zhs => Box::new(ZhsModel),
        ModelChoice::Avz => Box::new(AvzModel),
        ModelChoice::Arvz => Box::new(ArvzModel),
    }
}

/// Results of a full simulation run.
#[derive(Debug)]
pub struct SimulationResults {
    /// Simulation name from the configuration.
    pub name: String,

    /// One pulse per (scenario, model) pair.
    pub pulses: Vec<PulseResult>,
}

/// One generated pulse with its summary numbers.
#[derive(Debug)]
pub struct PulseResult {
    pub scenario_idx: usize,
    pub label: String,
    pub model: ModelChoice,
    pub signal: Signal,
    pub peak: f64,
    pub peak_time: f64,
}

/// One point of an angle scan.
#[derive(Debug, Clone, Copy)]
pub struct AnglePoint {
    /// Viewing angle (rad).
    pub angle: f64,

    /// Peak field magnitude (V/m).
    pub peak: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        AngleSpec, MediumConfig, ParticleConfig, ScenarioConfig, WindowConfig,
    };

    fn config() -> SimulationConfig {
        SimulationConfig {
            name: "orchestrator-test".into(),
            particle: ParticleConfig {
                energy_gev: 1e12,
                em_frac: 1.0,
                had_frac: 0.0,
                vertex: [0.0, 0.0, -1000.0],
            },
            medium: MediumConfig::default(),
            window: WindowConfig {
                t_min_ns: -20.0,
                t_max_ns: 80.0,
                samples: 512,
            },
            models: vec![ModelChoice::Arvz, ModelChoice::Zhs],
            scenarios: vec![
                ScenarioConfig {
                    label: "on-cone".into(),
                    angle: AngleSpec::OffsetDeg(0.0),
                    distance_m: 1.0,
                    t0_ns: 0.0,
                },
                ScenarioConfig {
                    label: "off-cone".into(),
                    angle: AngleSpec::OffsetDeg(3.0),
                    distance_m: 1.0,
                    t0_ns: 0.0,
                },
            ],
        }
    }

    #[test]
    fn test_run_produces_all_pairs() {
        let results = Orchestrator::new(config()).run().unwrap();
        assert_eq!(results.pulses.len(), 4);
        for pulse in &results.pulses {
            assert_eq!(pulse.signal.len(), 512);
            assert!(pulse.peak.is_finite());
        }
    }

    #[test]
    fn test_off_cone_scenario_weaker() {
        let results = Orchestrator::new(config()).run().unwrap();
        let peak_of = |label: &str, model: ModelChoice| {
            results
                .pulses
                .iter()
                .find(|p| p.label == label && p.model == model)
                .unwrap()
                .peak
        };
        for model in [ModelChoice::Arvz, ModelChoice::Zhs] {
            assert!(peak_of("off-cone", model) < peak_of("on-cone", model));
        }
    }

    #[test]
    fn test_scan_angles_monotone_near_cone() {
        let times = config().window.times();
        let particle = Particle::new([0.0, 0.0, -1000.0], 1e12, Interaction::new(1.0, 0.0));
        let tc = (1.0 / 1.78_f64).acos();
        let angles: Vec<f64> = (0..5).map(|i| tc + (i as f64) * 0.02).collect();

        let points =
            scan_angles(ModelChoice::Zhs, &times, &particle, &angles, 1.0, 1.78).unwrap();
        assert_eq!(points.len(), 5);
        for pair in points.windows(2) {
            assert!(pair[1].peak <= pair[0].peak);
        }
    }
}
