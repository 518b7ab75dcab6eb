//! Result output formatting and writing.

use crate::orchestrator::{AnglePoint, SimulationResults};
use crate::OutputFormat;
use anyhow::Result;
use lib_types::Signal;
use std::io::Write;
use std::path::Path;

/// Write simulation results to the output directory.
///
/// Each (scenario, model) pulse gets its own waveform CSV; a summary file
/// collects the peak amplitudes in the selected format.
pub fn write_results(
    results: &SimulationResults,
    output_dir: &Path,
    format: OutputFormat,
) -> Result<()> {
    for pulse in &results.pulses {
        let file_name = format!("{}_{}.csv", pulse.label, pulse.model.name());
        let path = output_dir.join(file_name);
        write_waveform(&pulse.signal, &path, false)?;
        tracing::info!("Wrote waveform to {:?}", path);
    }

    let summary_path = output_dir.join(match format {
        OutputFormat::Text => "summary.txt",
        OutputFormat::Json => "summary.json",
        OutputFormat::Csv => "summary.csv",
    });
    let mut f = std::fs::File::create(&summary_path)?;

    match format {
        OutputFormat::Text => {
            writeln!(f, "Simulation: {}", results.name)?;
            writeln!(f, "=========================")?;
            for pulse in &results.pulses {
                writeln!(
                    f,
                    "{:<20} {:<5} peak {:.6e} V/m at {:.3} ns",
                    pulse.label,
                    pulse.model.name(),
                    pulse.peak,
                    pulse.peak_time * 1e9
                )?;
            }
        }
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = results
                .pulses
                .iter()
                .map(|p| {
                    serde_json::json!({
                        "scenario": p.label,
                        "model": p.model.name(),
                        "peak_v_per_m": p.peak,
                        "peak_time_ns": p.peak_time * 1e9,
                    })
                })
                .collect();
            let json = serde_json::json!({
                "simulation": results.name,
                "pulses": entries,
            });
            writeln!(f, "{}", serde_json::to_string_pretty(&json)?)?;
        }
        OutputFormat::Csv => {
            writeln!(f, "scenario,model,peak_v_per_m,peak_time_ns")?;
            for p in &results.pulses {
                writeln!(
                    f,
                    "{},{},{},{}",
                    p.label,
                    p.model.name(),
                    p.peak,
                    p.peak_time * 1e9
                )?;
            }
        }
    }

    tracing::info!("Wrote summary to {:?}", summary_path);
    Ok(())
}

/// Write one waveform as CSV, optionally with its envelope.
pub fn write_waveform(signal: &Signal, path: &Path, with_envelope: bool) -> Result<()> {
    let mut f = std::fs::File::create(path)?;

    if with_envelope {
        let env = lib_dsp::analytic::envelope(signal)?;
        writeln!(f, "time_ns,field_v_per_m,envelope_v_per_m")?;
        for ((t, v), e) in signal.times.iter().zip(signal.values.iter()).zip(env.iter()) {
            writeln!(f, "{},{},{}", t * 1e9, v, e)?;
        }
    } else {
        writeln!(f, "time_ns,field_v_per_m")?;
        for (t, v) in signal.times.iter().zip(signal.values.iter()) {
            writeln!(f, "{},{}", t * 1e9, v)?;
        }
    }

    Ok(())
}

/// Write an angle scan as CSV.
pub fn write_scan(points: &[AnglePoint], path: &Path) -> Result<()> {
    let mut f = std::fs::File::create(path)?;
    writeln!(f, "angle_deg,peak_v_per_m")?;
    for p in points {
        writeln!(f, "{},{}", p.angle.to_degrees(), p.peak)?;
    }
    Ok(())
}
