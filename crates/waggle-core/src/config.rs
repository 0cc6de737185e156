//! Configuration System
//!
//! All simulation parameters for a single run, loadable from TOML so
//! runs can be tuned without recompiling. Construction of an
//! environment validates the config up front; a run never starts from
//! a partially valid parameter set.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default config file path looked up by the binaries.
pub const DEFAULT_CONFIG_PATH: &str = "waggle.toml";

/// Where the hive is placed at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HivePlacement {
    /// Midpoint of the domain.
    #[default]
    Center,
    /// Uniformly random point in the domain.
    Random,
}

/// How initial nectar strengths are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthMode {
    /// Every patch starts at `max_nectar_strength`.
    #[default]
    Fixed,
    /// Uniform random integer in `[1, max_nectar_strength]`.
    UniformRandom,
}

/// Complete parameter set for one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Domain extent along x.
    pub width: f64,
    /// Domain extent along y.
    pub length: f64,
    /// Radius around the hive position that counts as "at the hive".
    pub hive_radius: f64,
    /// Hive placement mode.
    pub hive_placement: HivePlacement,
    /// Number of nectar patches scattered at setup.
    pub nectar_count: u32,
    /// Maximum (or fixed) initial patch strength.
    pub max_nectar_strength: u32,
    /// Initial strength assignment mode.
    pub strength_mode: StrengthMode,
    /// Probability that an idle scout stays home for a tick.
    pub idle_prob: f64,
    /// Probability that an idle bee adopts a dance when the board is non-empty.
    pub follow_prob: f64,
    /// Fraction of the roster created as scouts (truncated to a headcount).
    pub perc_scouts: f64,
    /// Roster size.
    pub num_bees: u32,
    /// Sensing radius for nectar, hive proximity, and boundary margin.
    pub sense_range: f64,
    /// Step length per tick.
    pub dt: f64,
    /// Baseline turning concentration.
    pub kappa_0: f64,
    /// Concentration gain near the hive.
    pub alpha: f64,
    /// Decay length of the concentration gain with hive distance.
    pub beta: f64,
    /// Weight of directional persistence against boundary repulsion.
    pub w_dir: f64,
    /// Hard step ceiling; `None` runs until depletion.
    pub max_steps: Option<u32>,
    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 10.0,
            length: 10.0,
            hive_radius: 0.2,
            hive_placement: HivePlacement::Center,
            nectar_count: 10,
            max_nectar_strength: 5,
            strength_mode: StrengthMode::Fixed,
            idle_prob: 0.1,
            follow_prob: 0.8,
            perc_scouts: 0.5,
            num_bees: 20,
            sense_range: 0.5,
            dt: 0.2,
            kappa_0: 10.0,
            alpha: 10.0,
            beta: 20.0,
            w_dir: 0.5,
            max_steps: Some(20_000),
            seed: None,
        }
    }
}

impl SimConfig {
    /// Loads a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parses a configuration from a TOML string. Missing keys fall
    /// back to defaults; unknown hive placement or strength mode
    /// values are parse errors.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every numeric constraint. Called before any environment
    /// is built; a failing config produces no partial state.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("width", self.width),
            ("length", self.length),
            ("hive_radius", self.hive_radius),
            ("sense_range", self.sense_range),
            ("dt", self.dt),
            ("beta", self.beta),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        for (name, value) in [
            ("idle_prob", self.idle_prob),
            ("follow_prob", self.follow_prob),
            ("perc_scouts", self.perc_scouts),
            ("w_dir", self.w_dir),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfUnitRange { name, value });
            }
        }
        if !self.kappa_0.is_finite() || self.kappa_0 < 0.0 {
            return Err(ConfigError::NonPositive {
                name: "kappa_0",
                value: self.kappa_0,
            });
        }
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(ConfigError::NonPositive {
                name: "alpha",
                value: self.alpha,
            });
        }
        if self.max_nectar_strength == 0 {
            return Err(ConfigError::ZeroStrength);
        }
        Ok(())
    }

    /// Scout headcount: `num_bees * perc_scouts`, truncated.
    pub fn num_scouts(&self) -> u32 {
        (self.num_bees as f64 * self.perc_scouts) as u32
    }
}

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: f64 },

    #[error("{name} must lie in [0, 1] (got {value})")]
    OutOfUnitRange { name: &'static str, value: f64 },

    #[error("max_nectar_strength must be at least 1")]
    ZeroStrength,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.num_bees, 20);
        assert_eq!(config.max_steps, Some(20_000));
        assert_eq!(config.hive_placement, HivePlacement::Center);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = SimConfig::from_str(
            r#"
            width = 4.0
            length = 4.0
            num_bees = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.width, 4.0);
        assert_eq!(config.num_bees, 3);
        // Untouched keys keep their defaults.
        assert_eq!(config.sense_range, 0.5);
        assert_eq!(config.strength_mode, StrengthMode::Fixed);
    }

    #[test]
    fn test_placement_and_mode_wire_forms() {
        let config = SimConfig::from_str(
            r#"
            hive_placement = "random"
            strength_mode = "uniform_random"
            "#,
        )
        .unwrap();
        assert_eq!(config.hive_placement, HivePlacement::Random);
        assert_eq!(config.strength_mode, StrengthMode::UniformRandom);
    }

    #[test]
    fn test_unknown_hive_placement_is_a_parse_error() {
        let err = SimConfig::from_str(r#"hive_placement = "corner""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_non_positive_beta_rejected() {
        let mut config = SimConfig::default();
        config.beta = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { name: "beta", .. })
        ));
    }

    #[test]
    fn test_non_positive_dt_rejected() {
        let mut config = SimConfig::default();
        config.dt = -0.1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { name: "dt", .. })
        ));
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        let mut config = SimConfig::default();
        config.follow_prob = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfUnitRange { name: "follow_prob", .. })
        ));
    }

    #[test]
    fn test_zero_max_strength_rejected() {
        let mut config = SimConfig::default();
        config.max_nectar_strength = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroStrength)));
    }

    #[test]
    fn test_scout_headcount_truncates() {
        let mut config = SimConfig::default();
        config.num_bees = 10;
        config.perc_scouts = 0.55;
        assert_eq!(config.num_scouts(), 5);
        config.perc_scouts = 1.0;
        assert_eq!(config.num_scouts(), 10);
        config.perc_scouts = 0.0;
        assert_eq!(config.num_scouts(), 0);
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = SimConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed = SimConfig::from_str(&text).unwrap();
        assert_eq!(parsed.width, config.width);
        assert_eq!(parsed.max_steps, config.max_steps);
        assert_eq!(parsed.hive_placement, config.hive_placement);
    }
}
