//! Sweep CLI
//!
//! Runs a Latin-hypercube parameter sweep over the foraging model and
//! writes one CSV row per run.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use waggle_core::config::SimConfig;
use waggle_sweep::{execute, plan_sweep, write_csv, ParamBounds, SweepSummary};

/// Command line arguments for a parameter sweep
#[derive(Parser, Debug)]
#[command(name = "waggle-sweep")]
#[command(about = "Latin-hypercube parameter sweep over the foraging model")]
struct Args {
    /// Number of Latin hypercube sample points
    #[arg(long, default_value_t = 200)]
    samples: usize,

    /// Replicate runs per sample point
    #[arg(long, default_value_t = 15)]
    reps: usize,

    /// Master seed pinning both sampling and per-run seeds
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output CSV path
    #[arg(long, default_value = "sweep_results.csv")]
    out: PathBuf,

    /// Base configuration TOML (defaults to the built-in base)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Worker thread count (defaults to all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Small smoke sweep: caps samples and reps
    #[arg(long)]
    diagnostic: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = Args::parse();
    if args.diagnostic {
        args.samples = args.samples.min(5);
        args.reps = args.reps.min(2);
        tracing::info!("diagnostic mode: {} samples x {} reps", args.samples, args.reps);
    }

    let base = match &args.config {
        Some(path) => match SimConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("configuration error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => SimConfig::default(),
    };

    if let Some(threads) = args.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            eprintln!("could not configure worker pool: {e}");
            return ExitCode::FAILURE;
        }
    }

    let bounds = ParamBounds::default();
    let tasks = plan_sweep(args.samples, args.reps, &bounds, args.seed);
    tracing::info!(
        samples = args.samples,
        reps = args.reps,
        runs = tasks.len(),
        "starting sweep"
    );

    let records = match execute(&tasks, &base) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("sweep failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = write_csv(&args.out, &records) {
        eprintln!("could not write {}: {e}", args.out.display());
        return ExitCode::FAILURE;
    }

    println!("{}", SweepSummary::from_records(&records));
    println!("Saved {} rows to {}", records.len(), args.out.display());
    ExitCode::SUCCESS
}
