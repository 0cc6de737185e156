//! Latin Hypercube Sampling
//!
//! Space-filling samples over the seven swept behavioural parameters:
//! one stratum per sample per dimension, with independent
//! per-dimension shuffles so strata are paired randomly.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use waggle_core::config::SimConfig;

/// Inclusive sampling bounds for each swept parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamBounds {
    pub idle_prob: (f64, f64),
    pub follow_prob: (f64, f64),
    pub perc_scouts: (f64, f64),
    pub kappa_0: (f64, f64),
    pub alpha: (f64, f64),
    pub beta: (f64, f64),
    pub w_dir: (f64, f64),
}

impl Default for ParamBounds {
    fn default() -> Self {
        Self {
            idle_prob: (0.0, 0.5),
            follow_prob: (0.4, 0.99),
            perc_scouts: (0.05, 0.95),
            kappa_0: (0.1, 5.0),
            alpha: (0.1, 50.0),
            beta: (0.5, 10.0),
            w_dir: (0.1, 0.9),
        }
    }
}

impl ParamBounds {
    fn as_array(&self) -> [(f64, f64); 7] {
        [
            self.idle_prob,
            self.follow_prob,
            self.perc_scouts,
            self.kappa_0,
            self.alpha,
            self.beta,
            self.w_dir,
        ]
    }
}

/// One sampled behavioural parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParamSample {
    pub idle_prob: f64,
    pub follow_prob: f64,
    pub perc_scouts: f64,
    pub kappa_0: f64,
    pub alpha: f64,
    pub beta: f64,
    pub w_dir: f64,
}

impl ParamSample {
    /// Overlays the sampled parameters onto a base configuration.
    pub fn apply(&self, config: &mut SimConfig) {
        config.idle_prob = self.idle_prob;
        config.follow_prob = self.follow_prob;
        config.perc_scouts = self.perc_scouts;
        config.kappa_0 = self.kappa_0;
        config.alpha = self.alpha;
        config.beta = self.beta;
        config.w_dir = self.w_dir;
    }
}

/// Draws `n` Latin hypercube samples within `bounds`.
pub fn latin_hypercube<R: Rng + ?Sized>(
    n: usize,
    bounds: &ParamBounds,
    rng: &mut R,
) -> Vec<ParamSample> {
    let dims = bounds.as_array();
    // Per dimension: one uniform draw inside each of n strata, then a
    // shuffle to decouple the dimensions from each other.
    let mut columns: Vec<Vec<f64>> = Vec::with_capacity(dims.len());
    for &(lo, hi) in &dims {
        let mut column: Vec<f64> = (0..n)
            .map(|stratum| {
                let unit = (stratum as f64 + rng.gen::<f64>()) / n as f64;
                lo + unit * (hi - lo)
            })
            .collect();
        column.shuffle(rng);
        columns.push(column);
    }

    (0..n)
        .map(|i| ParamSample {
            idle_prob: columns[0][i],
            follow_prob: columns[1][i],
            perc_scouts: columns[2][i],
            kappa_0: columns[3][i],
            alpha: columns[4][i],
            beta: columns[5][i],
            w_dir: columns[6][i],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_samples_stay_within_bounds() {
        let bounds = ParamBounds::default();
        let mut rng = SmallRng::seed_from_u64(1);
        for sample in latin_hypercube(40, &bounds, &mut rng) {
            assert!((0.0..=0.5).contains(&sample.idle_prob));
            assert!((0.4..=0.99).contains(&sample.follow_prob));
            assert!((0.05..=0.95).contains(&sample.perc_scouts));
            assert!((0.1..=5.0).contains(&sample.kappa_0));
            assert!((0.1..=50.0).contains(&sample.alpha));
            assert!((0.5..=10.0).contains(&sample.beta));
            assert!((0.1..=0.9).contains(&sample.w_dir));
        }
    }

    #[test]
    fn test_one_sample_per_stratum() {
        let bounds = ParamBounds::default();
        let n = 10;
        let mut rng = SmallRng::seed_from_u64(2);
        let samples = latin_hypercube(n, &bounds, &mut rng);

        // Project onto one dimension and check each stratum is hit once.
        let (lo, hi) = bounds.w_dir;
        let mut hits = vec![0usize; n];
        for sample in &samples {
            let unit = (sample.w_dir - lo) / (hi - lo);
            let stratum = ((unit * n as f64) as usize).min(n - 1);
            hits[stratum] += 1;
        }
        assert!(hits.iter().all(|&h| h == 1), "stratum hit counts: {hits:?}");
    }

    #[test]
    fn test_sampling_is_deterministic_for_a_seed() {
        let bounds = ParamBounds::default();
        let mut rng1 = SmallRng::seed_from_u64(3);
        let mut rng2 = SmallRng::seed_from_u64(3);
        assert_eq!(
            latin_hypercube(8, &bounds, &mut rng1),
            latin_hypercube(8, &bounds, &mut rng2)
        );
    }

    #[test]
    fn test_apply_overlays_only_swept_params() {
        let sample = ParamSample {
            idle_prob: 0.2,
            follow_prob: 0.5,
            perc_scouts: 0.3,
            kappa_0: 1.0,
            alpha: 2.0,
            beta: 3.0,
            w_dir: 0.4,
        };
        let mut config = SimConfig::default();
        let num_bees = config.num_bees;
        sample.apply(&mut config);
        assert_eq!(config.idle_prob, 0.2);
        assert_eq!(config.beta, 3.0);
        // Non-swept parameters are untouched.
        assert_eq!(config.num_bees, num_bees);
        assert!(config.validate().is_ok());
    }
}
