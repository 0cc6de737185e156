//! Bee Colony Foraging Simulation
//!
//! A turn-based model of collective foraging: bees search a bounded
//! 2-D domain for nectar patches, deplete them, and recruit nest-mates
//! through waggle-dance advertisements on a shared dance board. Runs
//! are deterministic for a fixed seed and configuration.

pub mod bee;
pub mod config;
pub mod dance;
pub mod environment;
pub mod geom;
pub mod nectar;
pub mod rng;
pub mod runner;

pub use bee::{Bee, BeeState, Role};
pub use config::{ConfigError, HivePlacement, SimConfig, StrengthMode};
pub use dance::{DanceBoard, DanceEntry};
pub use environment::{Environment, Field, Hive};
pub use geom::Vec2;
pub use nectar::{NectarPatch, PatchId};
pub use runner::{run, RunRecord};
