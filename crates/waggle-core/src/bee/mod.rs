//! Bee State Machine
//!
//! The per-agent behavioural core: a six-state machine driven once per
//! tick against the shared field. Bees sense nectar, deplete it,
//! advertise finds on the dance board, and recruit each other by
//! following advertisements. All randomness comes from the explicit
//! RNG handle threaded through `update`.

mod movement;

use rand::Rng;
use serde::Serialize;

use crate::dance::DanceEntry;
use crate::environment::Field;
use crate::geom::Vec2;
use crate::nectar::PatchId;

/// Behavioural role, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Explores independently rather than following recruitment signals.
    Scout,
    /// Biased toward following existing advertisements over free search.
    Recruit,
}

/// The closed set of behavioural states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BeeState {
    Home,
    Searching,
    Following,
    Found,
    Returning,
    Dancing,
}

/// A navigation target: either an adopted dance or the bee's own
/// pending advertisement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub direction: Vec2,
    pub distance: f64,
    pub strength: u32,
}

impl From<DanceEntry> for Target {
    fn from(entry: DanceEntry) -> Self {
        Self {
            direction: entry.direction,
            distance: entry.distance,
            strength: entry.strength,
        }
    }
}

/// Per-bee movement and sensing parameters, shared by the whole roster.
#[derive(Debug, Clone, Copy)]
pub struct BeeParams {
    pub sense_range: f64,
    pub dt: f64,
    pub kappa_0: f64,
    pub alpha: f64,
    pub beta: f64,
    pub w_dir: f64,
}

/// One foraging agent.
#[derive(Debug, Clone)]
pub struct Bee {
    role: Role,
    state: BeeState,
    position: Vec2,
    params: BeeParams,
    /// Sensed but not yet advertised patches.
    known: Vec<PatchId>,
    /// Patches sensed on the most recent sensing pass.
    found: Vec<PatchId>,
    target: Option<Target>,
    dance_counter: u32,
    /// Visited positions; feeds the persistence direction and is
    /// cleared whenever the bee snaps back to the hive.
    path: Vec<Vec2>,
}

impl Bee {
    /// Creates a bee at the hive, idle, with its lifetime role.
    pub fn new(role: Role, hive_position: Vec2, params: BeeParams) -> Self {
        Self {
            role,
            state: BeeState::Home,
            position: hive_position,
            params,
            known: Vec::new(),
            found: Vec::new(),
            target: None,
            dance_counter: 0,
            path: vec![hive_position],
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn state(&self) -> BeeState {
        self.state
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    fn is_scout(&self) -> bool {
        self.role == Role::Scout
    }

    /// Advances the bee one tick against the shared field.
    pub fn update<R: Rng + ?Sized>(&mut self, field: &mut Field, rng: &mut R) {
        match self.state {
            BeeState::Home => self.tick_home(field, rng),
            BeeState::Searching => self.tick_searching(field, rng),
            BeeState::Following => self.tick_following(field, rng),
            BeeState::Found => self.tick_found(field, rng),
            BeeState::Returning => self.tick_returning(field),
            BeeState::Dancing => self.tick_dancing(field),
        }
    }

    /// Linear scan over the active patches. Every patch in range that
    /// is not yet remembered joins both the memory set and this tick's
    /// find set. Deliberately O(active patches) per call.
    fn sense_nectar(&mut self, field: &Field) {
        self.found.clear();
        for patch in field.nectar() {
            if patch.position.distance_to(self.position) <= self.params.sense_range
                && !self.known.contains(&patch.id)
            {
                self.known.push(patch.id);
                self.found.push(patch.id);
            }
        }
    }

    /// Idle at the hive: advertise a remembered find, or head out.
    fn tick_home<R: Rng + ?Sized>(&mut self, field: &mut Field, rng: &mut R) {
        if !self.known.is_empty() {
            self.try_advertise(field, rng);
            return;
        }
        if self.is_scout() && rng.gen::<f64>() > field.idle_prob {
            self.state = BeeState::Searching;
            self.target = None;
            return;
        }
        if !field.dances.is_empty() && rng.gen::<f64>() < field.follow_prob {
            self.state = BeeState::Following;
            self.target = field.dances.pick_random(rng).map(Target::from);
        }
        // Otherwise: stay idle this tick.
    }

    /// Picks one remembered patch at random and registers a dance for
    /// it unless a matching advertisement is already on the board. The
    /// memory set is cleared either way; a suppressed duplicate is not
    /// retried.
    fn try_advertise<R: Rng + ?Sized>(&mut self, field: &mut Field, rng: &mut R) {
        let index = rng.gen_range(0..self.known.len());
        let id = self.known[index];
        self.known.clear();

        // The patch may have been drained and pruned since it was
        // sensed; a stale memory is simply dropped.
        let Some(patch) = field.patch(id) else {
            return;
        };
        let vector = patch.position - self.position;
        let Some(direction) = vector.normalized() else {
            return;
        };
        let distance = vector.norm();
        if field.dances.contains_matching(direction, distance) {
            return;
        }

        let strength = patch.strength;
        field.add_dance(direction, distance, strength);
        self.target = Some(Target {
            direction,
            distance,
            strength,
        });
        self.state = BeeState::Dancing;
        self.dance_counter = 1;
        tracing::debug!(distance, strength, "registered dance");
    }

    /// Free search: sense, fall back onto the board when passing the
    /// hive, otherwise take a correlated-random-walk step.
    fn tick_searching<R: Rng + ?Sized>(&mut self, field: &mut Field, rng: &mut R) {
        self.sense_nectar(field);
        if !self.found.is_empty() {
            self.state = BeeState::Found;
            return;
        }
        let near_hive = field.distance_to_hive(self.position) <= field.hive.radius;
        // Passing the hive, a searcher may be recruited; the same
        // follow probability gates this as the idle case, so zero
        // follow probability fully disables recruitment.
        if near_hive && !field.dances.is_empty() && rng.gen::<f64>() < field.follow_prob {
            self.state = BeeState::Following;
            self.target = field.dances.pick_random(rng).map(Target::from);
        } else {
            self.step_search(field, rng);
        }
    }

    /// Following an advertisement: fly straight along the advertised
    /// direction until the source is sensed or the advertised distance
    /// is exhausted.
    fn tick_following<R: Rng + ?Sized>(&mut self, field: &mut Field, rng: &mut R) {
        if let Some(target) = self.target {
            self.sense_nectar(field);
            if !self.found.is_empty() {
                self.state = BeeState::Found;
                self.target = None;
                return;
            }
            // Sense range overlaps the tail of the advertised vector;
            // past that the target led nowhere.
            if field.distance_to_hive(self.position) >= target.distance - self.params.sense_range {
                self.state = if self.is_scout() {
                    BeeState::Searching
                } else {
                    BeeState::Returning
                };
                self.target = None;
            } else {
                self.step_follow(field);
            }
            return;
        }

        if let Some(entry) = field.dances.pick_random(rng) {
            self.target = Some(Target::from(entry));
            self.sense_nectar(field);
            if !self.found.is_empty() {
                self.state = BeeState::Found;
                self.target = None;
            } else {
                self.step_follow(field);
            }
        } else {
            self.state = BeeState::Searching;
            self.target = None;
        }
    }

    /// At a source: take one unit of nectar, then head home (or snap
    /// home if already inside the hive radius). Position is otherwise
    /// unchanged this tick.
    fn tick_found<R: Rng + ?Sized>(&mut self, field: &mut Field, rng: &mut R) {
        if let Some(id) = self.choose_find(field, rng) {
            if let Some(patch) = field.patch_mut(id) {
                patch.deplete();
            }
        }
        if field.distance_to_hive(self.position) <= field.hive.radius {
            self.arrive_home(field.hive.position);
        } else {
            self.state = BeeState::Returning;
        }
    }

    /// Prefers the found patch lying along the current target
    /// direction; otherwise picks uniformly among this tick's finds.
    fn choose_find<R: Rng + ?Sized>(&self, field: &Field, rng: &mut R) -> Option<PatchId> {
        let live: Vec<PatchId> = self
            .found
            .iter()
            .copied()
            .filter(|id| field.patch(*id).is_some())
            .collect();
        if live.is_empty() {
            return None;
        }
        if let Some(target) = self.target {
            for &id in &live {
                let Some(patch) = field.patch(id) else {
                    continue;
                };
                if let Some(direction) = (patch.position - self.position).normalized() {
                    if (direction - target.direction).norm() <= crate::dance::MATCH_EPS {
                        return Some(id);
                    }
                }
            }
        }
        Some(live[rng.gen_range(0..live.len())])
    }

    /// Straight-line flight back to the hive.
    fn tick_returning(&mut self, field: &Field) {
        let to_hive = field.hive.position - self.position;
        let distance = to_hive.norm();
        if distance <= field.hive.radius {
            self.arrive_home(field.hive.position);
            return;
        }
        let direction = to_hive * (1.0 / distance);
        self.position = (self.position + direction * self.params.dt).clamp_to(field.extent());
        self.path.push(self.position);
    }

    /// Advertise for as long as the source strength warrants, then
    /// withdraw the entry and go idle. The signal wanes on its own
    /// schedule, independent of whether the source is still active.
    fn tick_dancing(&mut self, field: &mut Field) {
        let Some(target) = self.target else {
            panic!("dancing without an advertisement target: state machine violation");
        };
        if self.dance_counter > target.strength {
            field.dances.remove_matching(target.direction, target.distance);
            self.state = BeeState::Home;
            self.dance_counter = 0;
        } else {
            self.dance_counter += 1;
        }
    }

    fn arrive_home(&mut self, hive_position: Vec2) {
        self.state = BeeState::Home;
        self.position = hive_position;
        self.path.clear();
    }
}
