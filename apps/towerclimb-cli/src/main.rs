use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use towerclimb_common::Geometry;
use towerclimb_input::{Action, NudgeDirection};
use towerclimb_kernel::{DriverConfig, FrameDriver, PhaseMode};
use towerclimb_render::{RecordingBackend, ShaderSources};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "towerclimb-cli", about = "Headless towerclimb runner")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON driver configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Run the animation headless and print the per-tick trace
    Simulate {
        /// Number of ticks to run
        #[arg(short, long, default_value = "10")]
        ticks: u64,
        /// Advance the phase once per tick instead of twice
        #[arg(long)]
        single_phase: bool,
        /// Emit the trace as JSON
        #[arg(long)]
        json: bool,
    },
    /// Apply arrow-key nudges and show they leave the transform untouched
    Nudge {
        /// Number of left-arrow events
        #[arg(long, default_value = "0")]
        left: u32,
        /// Number of right-arrow events
        #[arg(long, default_value = "0")]
        right: u32,
        /// Ticks to run after nudging
        #[arg(short, long, default_value = "10")]
        ticks: u64,
    },
}

/// One line of the simulation trace.
#[derive(Debug, Serialize)]
struct TraceEntry {
    frame: usize,
    translation: [f32; 3],
    drawn: bool,
}

#[derive(Debug, Serialize)]
struct Trace {
    phase_mode: PhaseMode,
    ticks: u64,
    final_phase: f64,
    frames: Vec<TraceEntry>,
}

fn headless_shaders() -> ShaderSources {
    ShaderSources::new("headless vertex stage", "headless fragment stage")
}

fn headless_driver(config: &DriverConfig) -> anyhow::Result<FrameDriver<RecordingBackend>> {
    let geometry = Geometry::quad();
    if let Err(e) = geometry.validate() {
        tracing::warn!("geometry failed validation, drawing anyway: {e}");
    }
    let mut driver = FrameDriver::from_config(RecordingBackend::default(), geometry, config);
    driver.start(&headless_shaders())?;
    Ok(driver)
}

/// Run exactly `ticks` ticks through the driver's run loop.
fn run_ticks(driver: &mut FrameDriver<RecordingBackend>, ticks: u64) -> anyhow::Result<u64> {
    let token = driver.stop_token();
    let mut remaining = ticks;
    let ran = driver.run(|| {
        if remaining == 0 {
            token.cancel();
        } else {
            remaining -= 1;
        }
    })?;
    Ok(ran)
}

fn trace(driver: &FrameDriver<RecordingBackend>, phase_mode: PhaseMode, ticks: u64) -> Trace {
    let frames = driver
        .backend()
        .frames()
        .iter()
        .enumerate()
        .map(|(i, f)| TraceEntry {
            frame: i + 1,
            translation: f.transform.w_axis.truncate().to_array(),
            drawn: f.drawn,
        })
        .collect();
    Trace {
        phase_mode,
        ticks,
        final_phase: driver.animation().phase(),
        frames,
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => DriverConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => DriverConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("towerclimb-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", towerclimb_render::crate_info());
            println!(
                "animation: step={} scale={} mode={:?}",
                config.animation.phase_step,
                config.animation.offset_scale,
                config.animation.phase_mode
            );
        }
        Commands::Simulate {
            ticks,
            single_phase,
            json,
        } => {
            if single_phase {
                config.animation.phase_mode = PhaseMode::Single;
            }
            let mut driver = headless_driver(&config)?;
            let ran = run_ticks(&mut driver, ticks)?;
            let trace = trace(&driver, config.animation.phase_mode, ran);

            if json {
                println!("{}", serde_json::to_string_pretty(&trace)?);
            } else {
                print!("{}", driver.backend().describe());
                println!(
                    "Ran {} ticks, phase={:.4} ({:?})",
                    trace.ticks, trace.final_phase, trace.phase_mode
                );
            }
        }
        Commands::Nudge { left, right, ticks } => {
            let mut nudged = headless_driver(&config)?;
            let mut baseline = headless_driver(&config)?;

            for _ in 0..left {
                nudged.handle_action(Action::Nudge(NudgeDirection::Left));
            }
            for _ in 0..right {
                nudged.handle_action(Action::Nudge(NudgeDirection::Right));
            }
            run_ticks(&mut nudged, ticks)?;
            run_ticks(&mut baseline, ticks)?;

            let moved = nudged.renderable().translation();
            let unmoved = baseline.renderable().translation();
            println!("pos={:.1}", nudged.animation().pos());
            println!(
                "Transform {}",
                if moved == unmoved {
                    "unaffected by nudges"
                } else {
                    "DIVERGED"
                }
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_ticks_runs_exact_count() {
        let mut driver = headless_driver(&DriverConfig::default()).unwrap();
        assert_eq!(run_ticks(&mut driver, 7).unwrap(), 7);
        assert_eq!(driver.backend().frames().len(), 7);
    }

    #[test]
    fn trace_reports_every_frame() {
        let mut driver = headless_driver(&DriverConfig::default()).unwrap();
        run_ticks(&mut driver, 3).unwrap();
        let t = trace(&driver, PhaseMode::Literal, 3);
        assert_eq!(t.frames.len(), 3);
        assert_eq!(t.frames[2].frame, 3);
        assert!(t.frames.iter().all(|f| f.drawn));
        assert!((t.final_phase - 0.06).abs() < 1e-12);

        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("\"phase_mode\":\"literal\""));
    }

    #[test]
    fn cli_parses_simulate() {
        let cli = Cli::parse_from(["towerclimb-cli", "simulate", "--ticks", "3", "--json"]);
        match cli.command {
            Commands::Simulate { ticks, json, .. } => {
                assert_eq!(ticks, 3);
                assert!(json);
            }
            _ => panic!("expected simulate"),
        }
    }
}
