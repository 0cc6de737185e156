//! Environment
//!
//! The shared world: a bounded rectangular domain holding the hive,
//! the nectar patches, the dance board, and the bee roster. The
//! roster is ticked in a fixed order once per step, so a dance
//! registered mid-pass is visible to every bee ticked later in the
//! same pass — that ordering dependency is part of the model, and it
//! is what makes runs reproducible from a seed.

use rand::Rng;

use crate::bee::{Bee, BeeParams, Role};
use crate::config::{HivePlacement, SimConfig, StrengthMode};
use crate::dance::{DanceBoard, DanceEntry};
use crate::geom::Vec2;
use crate::nectar::{NectarPatch, PatchId};

/// The hive: a fixed disc the bees launch from and return to.
#[derive(Debug, Clone, Copy)]
pub struct Hive {
    pub position: Vec2,
    pub radius: f64,
}

/// Everything a bee perceives and mutates: domain, hive, nectar,
/// dance board, and the colony-wide behavioural probabilities.
///
/// Held separately from the roster so one bee can borrow the field
/// mutably while the others wait their turn in the pass.
#[derive(Debug, Clone)]
pub struct Field {
    /// Domain extent along x.
    pub width: f64,
    /// Domain extent along y.
    pub length: f64,
    pub hive: Hive,
    pub idle_prob: f64,
    pub follow_prob: f64,
    pub dances: DanceBoard,
    nectar: Vec<NectarPatch>,
    next_patch_id: u32,
}

impl Field {
    /// Builds the field from a validated config: scatters the nectar,
    /// then places the hive.
    pub fn new<R: Rng + ?Sized>(config: &SimConfig, rng: &mut R) -> Self {
        let mut field = Self {
            width: config.width,
            length: config.length,
            hive: Hive {
                position: Vec2::ZERO,
                radius: config.hive_radius,
            },
            idle_prob: config.idle_prob,
            follow_prob: config.follow_prob,
            dances: DanceBoard::new(),
            nectar: Vec::new(),
            next_patch_id: 0,
        };
        field.place_nectar(config, rng);
        field.hive.position = field.place_hive(config.hive_placement, rng);
        field
    }

    /// Scatters `nectar_count` patches uniformly over the domain.
    fn place_nectar<R: Rng + ?Sized>(&mut self, config: &SimConfig, rng: &mut R) {
        for _ in 0..config.nectar_count {
            let position = Vec2::new(
                rng.gen::<f64>() * self.width,
                rng.gen::<f64>() * self.length,
            );
            let strength = match config.strength_mode {
                StrengthMode::Fixed => config.max_nectar_strength,
                StrengthMode::UniformRandom => rng.gen_range(1..=config.max_nectar_strength),
            };
            self.add_patch(position, strength);
        }
    }

    fn place_hive<R: Rng + ?Sized>(&self, placement: HivePlacement, rng: &mut R) -> Vec2 {
        match placement {
            HivePlacement::Center => Vec2::new(self.width / 2.0, self.length / 2.0),
            HivePlacement::Random => Vec2::new(
                rng.gen::<f64>() * self.width,
                rng.gen::<f64>() * self.length,
            ),
        }
    }

    /// Inserts a patch at a known position and returns its handle.
    /// Setup uses this for random scatter; harnesses use it to stage
    /// known layouts.
    pub fn add_patch(&mut self, position: Vec2, strength: u32) -> PatchId {
        let id = PatchId(self.next_patch_id);
        self.next_patch_id += 1;
        self.nectar
            .push(NectarPatch::new(id, position.clamp_to(self.extent()), strength));
        id
    }

    /// Registers an advertisement unless an equal one (within
    /// tolerance) is already on the board.
    pub fn add_dance(&mut self, direction: Vec2, distance: f64, strength: u32) -> bool {
        self.dances.add(DanceEntry {
            direction,
            distance,
            strength,
        })
    }

    pub fn nectar(&self) -> &[NectarPatch] {
        &self.nectar
    }

    pub fn patch(&self, id: PatchId) -> Option<&NectarPatch> {
        self.nectar.iter().find(|p| p.id == id)
    }

    pub fn patch_mut(&mut self, id: PatchId) -> Option<&mut NectarPatch> {
        self.nectar.iter_mut().find(|p| p.id == id)
    }

    /// Drops every depleted patch. Runs once at the end of each pass;
    /// within a pass a drained patch stays visible (at strength 0)
    /// exactly as the roster left it.
    pub fn prune_depleted(&mut self) {
        self.nectar.retain(|p| !p.is_depleted());
    }

    /// Sum of the remaining strengths.
    pub fn total_nectar(&self) -> u32 {
        self.nectar.iter().map(|p| p.strength).sum()
    }

    pub fn is_depleted(&self) -> bool {
        self.nectar.is_empty()
    }

    pub fn distance_to_hive(&self, position: Vec2) -> f64 {
        position.distance_to(self.hive.position)
    }

    /// Upper-right corner of the domain.
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width, self.length)
    }
}

/// The field plus the bee roster: one complete simulation world.
#[derive(Debug, Clone)]
pub struct Environment {
    field: Field,
    bees: Vec<Bee>,
}

impl Environment {
    /// Builds a world from a config, failing fast on an invalid one.
    /// The first `num_scouts()` roster slots are scouts, the rest
    /// recruits; every bee starts at the hive.
    pub fn new<R: Rng + ?Sized>(
        config: &SimConfig,
        rng: &mut R,
    ) -> Result<Self, crate::config::ConfigError> {
        config.validate()?;
        let field = Field::new(config, rng);
        let params = BeeParams {
            sense_range: config.sense_range,
            dt: config.dt,
            kappa_0: config.kappa_0,
            alpha: config.alpha,
            beta: config.beta,
            w_dir: config.w_dir,
        };
        let num_scouts = config.num_scouts();
        let bees = (0..config.num_bees)
            .map(|i| {
                let role = if i < num_scouts {
                    Role::Scout
                } else {
                    Role::Recruit
                };
                Bee::new(role, field.hive.position, params)
            })
            .collect();
        Ok(Self { field, bees })
    }

    /// Advances the world one tick: every bee in roster order, then
    /// the depletion prune.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for bee in &mut self.bees {
            bee.update(&mut self.field, rng);
        }
        self.field.prune_depleted();
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn bees(&self) -> &[Bee] {
        &self.bees
    }

    pub fn dances(&self) -> &DanceBoard {
        &self.field.dances
    }

    pub fn is_depleted(&self) -> bool {
        self.field.is_depleted()
    }

    pub fn total_nectar(&self) -> u32 {
        self.field.total_nectar()
    }

    /// Stages a patch at a known position (see [`Field::add_patch`]).
    pub fn add_patch(&mut self, position: Vec2, strength: u32) -> PatchId {
        self.field.add_patch(position, strength)
    }
}
