//! Sweep Summary
//!
//! Aggregate statistics over a finished sweep, printed after the CSV
//! is written.

use std::fmt;

use serde::Serialize;

use crate::record::SweepRecord;

/// Describe-style statistics for one outcome column.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatBlock {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl StatBlock {
    fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let variance = values
            .iter()
            .map(|v| (v - mean) * (v - mean))
            .sum::<f64>()
            / count as f64;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            count,
            mean,
            std: variance.sqrt(),
            min,
            max,
        }
    }
}

impl fmt::Display for StatBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={} mean={:.1} std={:.1} min={:.0} max={:.0}",
            self.count, self.mean, self.std, self.min, self.max
        )
    }
}

/// Colony-level outcomes aggregated over every run of a sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SweepSummary {
    pub runs: usize,
    pub successes: usize,
    pub success_rate: f64,
    /// Over successful runs only.
    pub time_to_depletion: StatBlock,
    /// Over runs where any source was advertised.
    pub time_to_first_nectar: StatBlock,
}

impl SweepSummary {
    pub fn from_records(records: &[SweepRecord]) -> Self {
        let runs = records.len();
        let successes = records.iter().filter(|r| r.success).count();
        let depletion: Vec<f64> = records
            .iter()
            .filter_map(|r| r.time_to_depletion)
            .map(f64::from)
            .collect();
        let first: Vec<f64> = records
            .iter()
            .filter_map(|r| r.time_to_first_nectar)
            .map(f64::from)
            .collect();
        Self {
            runs,
            successes,
            success_rate: if runs == 0 {
                0.0
            } else {
                successes as f64 / runs as f64
            },
            time_to_depletion: StatBlock::from_values(&depletion),
            time_to_first_nectar: StatBlock::from_values(&first),
        }
    }
}

impl fmt::Display for SweepSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} runs, {} successful ({:.1}%)",
            self.runs,
            self.successes,
            self.success_rate * 100.0
        )?;
        writeln!(f, "time to depletion:     {}", self.time_to_depletion)?;
        write!(f, "time to first nectar:  {}", self.time_to_first_nectar)
    }
}
