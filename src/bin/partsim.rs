//! Command-line launcher: `partsim <file> [--json] [--realtime]`.
//!
//! Files ending in `.json` are read as serialized [`SimConfig`]s, anything else in the
//! whitespace text format. The final report is printed to stdout.

use clap::Parser;
use partsim::core::{Particle, StepObserver};
use partsim::{io, Result, SimConfig, Simulation};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

/// Sleeps for the simulated time between events, one millisecond per time unit.
struct PacedObserver;

impl StepObserver for PacedObserver {
    fn on_event(&mut self, time: f64, delta: f64, particles: &[Particle]) {
        log::trace!("t={time}: {} particles", particles.len());
        if delta > 0.0 {
            thread::sleep(Duration::from_secs_f64(delta / 1000.0));
        }
    }
}

/// Event-driven elastic collision simulator.
#[derive(Parser, Debug)]
#[command(name = "partsim", version, about)]
struct Args {
    /// Scenario file: `.json` for a serialized config, anything else in the text format.
    path: PathBuf,

    /// Print the final report as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Pace the run in wall-clock time, one millisecond per simulated time unit.
    #[arg(long)]
    realtime: bool,
}

fn load(path: &Path) -> Result<SimConfig> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        io::load_json_config(path)
    } else {
        io::load_config(path)
    }
}

fn run(args: &Args) -> Result<()> {
    let config = load(&args.path)?;
    log::info!(
        "loaded {} particles from {} (width {}, duration {})",
        config.particles.len(),
        args.path.display(),
        config.width,
        config.duration
    );
    let mut sim = Simulation::new(config)?;
    let report = if args.realtime {
        sim.run(&mut PacedObserver)?
    } else {
        sim.run_to_end()?
    };
    log::info!(
        "{} collisions applied, {} stale events discarded",
        report.stats.processed,
        report.stats.stale
    );
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{report}");
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("simulation failed: {e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
