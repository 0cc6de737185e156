//! Single-Run CLI
//!
//! Runs one foraging simulation from a TOML config (or the built-in
//! defaults) and prints the outcome record.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use waggle_core::config::{ConfigError, SimConfig, DEFAULT_CONFIG_PATH};
use waggle_core::runner;

/// Command line arguments for a single simulation run
#[derive(Parser, Debug)]
#[command(name = "waggle")]
#[command(about = "Bee colony foraging simulation")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed override for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Step cap override (0 disables the cap)
    #[arg(long)]
    max_steps: Option<u32>,

    /// Print the outcome record as JSON instead of a human summary
    #[arg(long)]
    json: bool,
}

fn load_config(args: &Args) -> Result<SimConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => SimConfig::from_file(path)?,
        None if std::path::Path::new(DEFAULT_CONFIG_PATH).exists() => {
            SimConfig::from_file(DEFAULT_CONFIG_PATH)?
        }
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(cap) = args.max_steps {
        config.max_steps = (cap > 0).then_some(cap);
    }
    Ok(config)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let record = match runner::run(&config) {
        Ok(record) => record,
        Err(e) => {
            eprintln!("run failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&record) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("could not serialize record: {e}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    println!("Bee foraging run");
    println!("================");
    if let Some(seed) = config.seed {
        println!("Seed: {seed}");
    }
    println!("Bees: {} ({} scouts)", config.num_bees, config.num_scouts());
    println!(
        "Nectar: {} patches, {} units total",
        config.nectar_count, record.total_nectar_collected
    );
    match record.time_to_first_nectar {
        Some(t) => println!("First source advertised after {t} steps"),
        None => println!("No source was ever advertised"),
    }
    match record.time_to_depletion {
        Some(t) => println!("All nectar depleted after {t} steps"),
        None => println!(
            "Step cap reached before depletion ({} steps)",
            config.max_steps.unwrap_or(0)
        ),
    }
    ExitCode::SUCCESS
}
