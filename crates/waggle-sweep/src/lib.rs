//! Parameter Sweep Harness
//!
//! Explores colony-level outcomes across the behavioural parameter
//! space: Latin hypercube samples, several replicate runs per sample,
//! executed in parallel. Runs are independent, so the only shared
//! state is the immutable plan; per-run seeds are derived up front
//! from the sweep seed, which makes the whole sweep reproducible
//! regardless of scheduling.

pub mod lhs;
pub mod record;
pub mod summary;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use waggle_core::config::{ConfigError, SimConfig};
use waggle_core::runner;

pub use lhs::{latin_hypercube, ParamBounds, ParamSample};
pub use record::{write_csv, SweepRecord, CSV_HEADER};
pub use summary::{StatBlock, SweepSummary};

/// One scheduled run: a sample point, a replicate index, and the seed
/// the run will use.
#[derive(Debug, Clone, Copy)]
pub struct SweepTask {
    pub sample_id: usize,
    pub rep: usize,
    pub seed: u64,
    pub params: ParamSample,
}

/// Builds the full task list for a sweep. Sampling and seed
/// derivation both come from one master RNG, so a sweep seed pins
/// every run.
pub fn plan_sweep(
    n_samples: usize,
    n_reps: usize,
    bounds: &ParamBounds,
    sweep_seed: u64,
) -> Vec<SweepTask> {
    let mut master = SmallRng::seed_from_u64(sweep_seed);
    let samples = latin_hypercube(n_samples, bounds, &mut master);

    let mut tasks = Vec::with_capacity(n_samples * n_reps);
    for (sample_id, params) in samples.into_iter().enumerate() {
        for rep in 0..n_reps {
            tasks.push(SweepTask {
                sample_id,
                rep,
                seed: master.gen(),
                params,
            });
        }
    }
    tasks
}

/// Runs every task in parallel and returns the records sorted by
/// (sample, replicate), independent of scheduling order.
pub fn execute(tasks: &[SweepTask], base: &SimConfig) -> Result<Vec<SweepRecord>, ConfigError> {
    let mut records: Vec<SweepRecord> = tasks
        .par_iter()
        .map(|task| {
            let mut config = base.clone();
            task.params.apply(&mut config);
            config.seed = Some(task.seed);
            let run = runner::run(&config)?;
            Ok(SweepRecord::new(
                task.sample_id,
                task.rep,
                task.seed,
                task.params,
                run,
            ))
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;
    records.sort_by_key(|r| (r.sample_id, r.rep));
    Ok(records)
}
