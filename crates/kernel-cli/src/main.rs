//! Askaryan pulse kernel CLI: time-domain radio pulses from neutrino-induced
//! showers in ice.
//!
//! This is the main entry point for the pulse-generation tool.

mod config;
mod orchestrator;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::ModelChoice;
use lib_types::{Gev, HomogeneousIce, Interaction, Particle};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "askaryan-kernel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output format for summaries
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a single Askaryan pulse
    Pulse {
        /// Shower energy (GeV)
        #[arg(short, long)]
        energy: f64,

        /// Electromagnetic shower fraction
        #[arg(long, default_value = "1.0")]
        em_frac: f64,

        /// Hadronic shower fraction
        #[arg(long, default_value = "0.0")]
        had_frac: f64,

        /// Viewing-angle offset from the Cherenkov angle (deg)
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        offset_deg: f64,

        /// Viewing distance (m)
        #[arg(short, long, default_value = "1.0")]
        distance: f64,

        /// Refractive index of the ice
        #[arg(short = 'n', long, default_value = "1.78")]
        index: f64,

        /// Window start (ns)
        #[arg(long, default_value = "-20.0", allow_hyphen_values = true)]
        t_min_ns: f64,

        /// Window end (ns)
        #[arg(long, default_value = "80.0", allow_hyphen_values = true)]
        t_max_ns: f64,

        /// Number of samples
        #[arg(short, long, default_value = "2048")]
        samples: usize,

        /// Pulse offset time (ns)
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        t0_ns: f64,

        /// Construction strategy
        #[arg(short, long, default_value = "arvz")]
        model: ModelChoice,

        /// Include the signal envelope column
        #[arg(long)]
        envelope: bool,

        /// Output CSV path
        #[arg(short, long, default_value = "pulse.csv")]
        output: PathBuf,
    },

    /// Scan peak amplitude over viewing angles
    Scan {
        /// Shower energy (GeV)
        #[arg(short, long)]
        energy: f64,

        /// Electromagnetic shower fraction
        #[arg(long, default_value = "1.0")]
        em_frac: f64,

        /// Hadronic shower fraction
        #[arg(long, default_value = "0.0")]
        had_frac: f64,

        /// Scan start offset from the Cherenkov angle (deg)
        #[arg(long, default_value = "-10.0", allow_hyphen_values = true)]
        from_deg: f64,

        /// Scan end offset from the Cherenkov angle (deg)
        #[arg(long, default_value = "10.0", allow_hyphen_values = true)]
        to_deg: f64,

        /// Number of scan points
        #[arg(long, default_value = "81")]
        steps: usize,

        /// Viewing distance (m)
        #[arg(short, long, default_value = "1.0")]
        distance: f64,

        /// Refractive index of the ice
        #[arg(short = 'n', long, default_value = "1.78")]
        index: f64,

        /// Number of samples per pulse
        #[arg(short, long, default_value = "2048")]
        samples: usize,

        /// Construction strategy
        #[arg(short, long, default_value = "arvz")]
        model: ModelChoice,

        /// Output CSV path
        #[arg(short, long, default_value = "scan.csv")]
        output: PathBuf,
    },

    /// Run a config-file driven simulation
    Simulate {
        /// Path to the simulation configuration file (TOML or JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Output directory for results
        #[arg(short, long, default_value = "output")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Commands::Pulse {
            energy,
            em_frac,
            had_frac,
            offset_deg,
            distance,
            index,
            t_min_ns,
            t_max_ns,
            samples,
            t0_ns,
            model,
            envelope,
            output,
        } => run_pulse(
            energy, em_frac, had_frac, offset_deg, distance, index, t_min_ns, t_max_ns,
            samples, t0_ns, model, envelope, &output,
        ),
        Commands::Scan {
            energy,
            em_frac,
            had_frac,
            from_deg,
            to_deg,
            steps,
            distance,
            index,
            samples,
            model,
            output,
        } => run_scan(
            energy, em_frac, had_frac, from_deg, to_deg, steps, distance, index, samples,
            model, &output,
        ),
        Commands::Simulate { config, output } => run_simulation(&config, &output, cli.format),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_pulse(
    energy: f64,
    em_frac: f64,
    had_frac: f64,
    offset_deg: f64,
    distance: f64,
    index: f64,
    t_min_ns: f64,
    t_max_ns: f64,
    samples: usize,
    t0_ns: f64,
    model: ModelChoice,
    envelope: bool,
    output: &PathBuf,
) -> Result<()> {
    let window = config::WindowConfig {
        t_min_ns,
        t_max_ns,
        samples,
    };
    let times = window.times();
    let particle = Particle::new(
        [0.0, 0.0, -1000.0],
        energy,
        Interaction::new(em_frac, had_frac),
    );
    let ice = HomogeneousIce::new(index);
    let angle = (1.0 / index).acos() + offset_deg.to_radians();

    tracing::info!(
        "generating {} pulse at theta_c {:+.2} deg, {} m",
        model.name(),
        offset_deg,
        distance
    );

    let signal = orchestrator::build_model(model).pulse(
        &times,
        &particle,
        angle,
        distance,
        &ice,
        t0_ns * 1e-9,
    )?;

    output::write_waveform(&signal, output, envelope)?;

    let peak_index = signal.peak_index().unwrap_or(0);
    println!("Pulse generated:");
    println!("  Energy:    {:.4} TeV", Gev(energy).as_tev());
    println!("  Samples:   {}", signal.len());
    println!("  Peak:      {:.6e} V/m", signal.max_abs());
    println!("  Peak time: {:.3} ns", signal.times[peak_index] * 1e9);
    println!("  Written to {:?}", output);

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_scan(
    energy: f64,
    em_frac: f64,
    had_frac: f64,
    from_deg: f64,
    to_deg: f64,
    steps: usize,
    distance: f64,
    index: f64,
    samples: usize,
    model: ModelChoice,
    output: &PathBuf,
) -> Result<()> {
    if steps < 2 {
        anyhow::bail!("scan needs at least 2 steps, got {}", steps);
    }

    let window = config::WindowConfig {
        t_min_ns: -20.0,
        t_max_ns: 80.0,
        samples,
    };
    let times = window.times();
    let particle = Particle::new(
        [0.0, 0.0, -1000.0],
        energy,
        Interaction::new(em_frac, had_frac),
    );
    let theta_c = (1.0 / index).acos();
    let angles: Vec<f64> = (0..steps)
        .map(|i| {
            theta_c
                + (from_deg + (to_deg - from_deg) * i as f64 / (steps - 1) as f64)
                    .to_radians()
        })
        .collect();

    tracing::info!("scanning {} angles with model {}", steps, model.name());

    let points = orchestrator::scan_angles(model, &times, &particle, &angles, distance, index)?;
    output::write_scan(&points, output)?;

    println!("Scan complete:");
    println!("  Points:  {}", points.len());
    if let Some(max) = points
        .iter()
        .max_by(|a, b| a.peak.total_cmp(&b.peak))
    {
        println!(
            "  Maximum: {:.6e} V/m at {:.2} deg",
            max.peak,
            max.angle.to_degrees()
        );
    }
    println!("  Written to {:?}", output);

    Ok(())
}

fn run_simulation(config_path: &PathBuf, output_dir: &PathBuf, format: OutputFormat) -> Result<()> {
    tracing::info!("Loading configuration from {:?}", config_path);

    let config = config::load_config(config_path)?;
    let orchestrator = orchestrator::Orchestrator::new(config);

    tracing::info!("Starting simulation...");
    let results = orchestrator.run()?;

    // Create output directory
    std::fs::create_dir_all(output_dir)?;

    // Write results
    output::write_results(&results, output_dir, format)?;

    tracing::info!("Simulation complete. Results written to {:?}", output_dir);
    Ok(())
}
