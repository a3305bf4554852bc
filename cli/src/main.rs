//! Genesis Simulator Driver
//!
//! Runs the Darwinian and endogenous-alignment scenarios side by side and
//! writes one CSV history per mode.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin genesis-sim -- --config genesis.json --out-dir ./out
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use genesis_simulator_core_rs::integral::{integrate, sample_journal, IntegralParams};
use genesis_simulator_core_rs::{run_comparison, History, SimulationConfig};

/// Darwinian vs endogenous-alignment population comparison
#[derive(Parser, Debug)]
#[command(name = "genesis-sim")]
#[command(about = "Compare Darwinian and endogenous-alignment replicator-mutator dynamics")]
struct Args {
    /// JSON config overlaid on the reference parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory receiving the CSV histories
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Override the number of steps
    #[arg(short, long)]
    steps: Option<usize>,

    /// Also log the integral of the sample journal
    #[arg(long)]
    journal: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(false).init();
}

fn load_config(args: &Args) -> Result<SimulationConfig, String> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading config from: {}", path.display());
            SimulationConfig::from_json_file(path).map_err(|e| e.to_string())?
        }
        None => SimulationConfig::default(),
    };
    if let Some(steps) = args.steps {
        config.steps = steps;
    }
    Ok(config)
}

fn write_history(history: &History, dir: &Path) -> Result<PathBuf, String> {
    let path = dir.join(format!("genesis_history_{}.csv", history.mode().as_str()));

    let file =
        File::create(&path).map_err(|e| format!("cannot create {}: {}", path.display(), e))?;
    history
        .write_csv(BufWriter::new(file))
        .map_err(|e| format!("cannot write {}: {}", path.display(), e))?;
    Ok(path)
}

fn log_journal() {
    match integrate(&sample_journal(), &IntegralParams::default()) {
        Ok(points) => {
            for point in &points {
                info!(
                    date = %point.date,
                    daily = point.daily,
                    total = point.total,
                    criticality = point.criticality,
                    critical = point.is_critical,
                    "journal"
                );
            }
        }
        Err(e) => error!("Journal integral failed: {}", e),
    }
}

fn main() {
    init_logging();

    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = std::fs::create_dir_all(&args.out_dir) {
        error!("Cannot create {}: {}", args.out_dir.display(), e);
        process::exit(1);
    }

    info!(
        "Starting comparison: species={}, steps={}, dt={}",
        config.num_species(),
        config.steps,
        config.dt
    );

    let comparison = match run_comparison(&config) {
        Ok(c) => c,
        Err(e) => {
            error!("Run failed: {}", e);
            process::exit(1);
        }
    };

    for history in [&comparison.endogenous, &comparison.darwinian] {
        match write_history(history, &args.out_dir) {
            Ok(path) => info!("Saved {} history to: {}", history.mode(), path.display()),
            Err(e) => {
                error!("{}", e);
                process::exit(1);
            }
        }
    }

    if let Some(summary) = comparison.summary() {
        info!(
            steps = summary.steps,
            transitions = summary.endogenous_transitions,
            "Endogenous: mean R {:.3}, mean B {:.3}, mean criticality {:.3}",
            summary.endogenous_final_alignment,
            summary.endogenous_final_bandwidth,
            summary.endogenous_final_criticality
        );
        info!(
            "Darwinian:  mean R {:.3}, mean B {:.3}, mean criticality {:.3}",
            summary.darwinian_final_alignment,
            summary.darwinian_final_bandwidth,
            summary.darwinian_final_criticality
        );
    }

    if args.journal {
        log_journal();
    }
}
