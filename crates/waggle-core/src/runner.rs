//! Run Driver
//!
//! Drives one simulation to completion and packages the colony-level
//! outcome record consumed by downstream aggregation.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::config::{ConfigError, SimConfig};
use crate::environment::Environment;

/// Colony-level outcome of one run.
///
/// `success` is false and `time_to_depletion` is absent exactly when
/// the step cap preempted depletion. `total_nectar_collected` is the
/// sum of strengths at setup, fixed regardless of the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunRecord {
    pub time_to_depletion: Option<u32>,
    pub time_to_first_nectar: Option<u32>,
    pub total_nectar_collected: u32,
    pub success: bool,
}

/// Runs one simulation from a config: builds the seeded RNG and the
/// environment, ticks until depletion or the optional step cap, and
/// returns the outcome record.
pub fn run(config: &SimConfig) -> Result<RunRecord, ConfigError> {
    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let mut env = Environment::new(config, &mut rng)?;

    let total_nectar = env.total_nectar();
    let mut tick: u32 = 0;
    let mut first_nectar: Option<u32> = None;

    while !env.is_depleted() {
        env.step(&mut rng);
        tick += 1;
        if first_nectar.is_none() && !env.dances().is_empty() {
            first_nectar = Some(tick);
        }
        if let Some(cap) = config.max_steps {
            if tick >= cap {
                break;
            }
        }
    }

    let success = env.is_depleted();
    let record = RunRecord {
        time_to_depletion: success.then_some(tick),
        time_to_first_nectar: first_nectar,
        total_nectar_collected: total_nectar,
        success,
    };
    tracing::info!(
        success = record.success,
        ticks = tick,
        first_nectar = ?record.time_to_first_nectar,
        "run finished"
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_nectar_succeeds_immediately() {
        let config = SimConfig {
            nectar_count: 0,
            seed: Some(1),
            ..SimConfig::default()
        };
        let record = run(&config).unwrap();
        assert!(record.success);
        assert_eq!(record.time_to_depletion, Some(0));
        assert_eq!(record.time_to_first_nectar, None);
        assert_eq!(record.total_nectar_collected, 0);
    }

    #[test]
    fn test_total_collected_is_fixed_at_setup() {
        let config = SimConfig {
            nectar_count: 6,
            max_nectar_strength: 3,
            max_steps: Some(5),
            seed: Some(2),
            ..SimConfig::default()
        };
        let record = run(&config).unwrap();
        // 5 steps cannot deplete anything, but the total stands.
        assert_eq!(record.total_nectar_collected, 18);
        assert!(!record.success);
        assert_eq!(record.time_to_depletion, None);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SimConfig {
            beta: -1.0,
            ..SimConfig::default()
        };
        assert!(run(&config).is_err());
    }

    #[test]
    fn test_record_serializes_with_nulls() {
        let record = RunRecord {
            time_to_depletion: None,
            time_to_first_nectar: Some(12),
            total_nectar_collected: 50,
            success: false,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"time_to_depletion\":null"));
        assert!(json.contains("\"time_to_first_nectar\":12"));
    }
}
