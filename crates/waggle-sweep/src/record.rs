//! Sweep Records
//!
//! One flat row per completed run, and CSV persistence for the whole
//! sweep table. Columns are fixed; optional outcomes serialize as
//! empty cells.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use waggle_core::runner::RunRecord;

use crate::lhs::ParamSample;

/// CSV column order, matching [`SweepRecord::csv_row`].
pub const CSV_HEADER: &str = "sample_id,rep,seed,idle_prob,follow_prob,perc_scouts,kappa_0,alpha,beta,w_dir,time_to_depletion,time_to_first_nectar,total_nectar_collected,success";

/// Outcome of one run within a sweep, tagged with its sample point.
#[derive(Debug, Clone, Serialize)]
pub struct SweepRecord {
    pub sample_id: usize,
    pub rep: usize,
    pub seed: u64,
    #[serde(flatten)]
    pub params: ParamSample,
    pub time_to_depletion: Option<u32>,
    pub time_to_first_nectar: Option<u32>,
    pub total_nectar_collected: u32,
    pub success: bool,
}

impl SweepRecord {
    pub fn new(sample_id: usize, rep: usize, seed: u64, params: ParamSample, run: RunRecord) -> Self {
        Self {
            sample_id,
            rep,
            seed,
            params,
            time_to_depletion: run.time_to_depletion,
            time_to_first_nectar: run.time_to_first_nectar,
            total_nectar_collected: run.total_nectar_collected,
            success: run.success,
        }
    }

    /// Renders the record as one CSV row in [`CSV_HEADER`] order.
    pub fn csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            self.sample_id,
            self.rep,
            self.seed,
            self.params.idle_prob,
            self.params.follow_prob,
            self.params.perc_scouts,
            self.params.kappa_0,
            self.params.alpha,
            self.params.beta,
            self.params.w_dir,
            optional_cell(self.time_to_depletion),
            optional_cell(self.time_to_first_nectar),
            self.total_nectar_collected,
            self.success,
        )
    }
}

fn optional_cell(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Writes the whole sweep table as CSV.
pub fn write_csv(path: impl AsRef<Path>, records: &[SweepRecord]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "{CSV_HEADER}")?;
    for record in records {
        writeln!(file, "{}", record.csv_row())?;
    }
    Ok(())
}
