//! Movement Model
//!
//! Two movement modes. Search mode is a persistence-biased correlated
//! random walk: the preferred heading blends the bee's recent flight
//! direction with repulsion from nearby domain edges, and the actual
//! heading is drawn from a von Mises distribution whose concentration
//! rises near the hive. Follow mode flies straight along the adopted
//! advertisement with no stochastic turning.

use rand::Rng;

use crate::environment::Field;
use crate::geom::Vec2;
use crate::rng::{sample_von_mises, uniform_angle};

use super::Bee;

impl Bee {
    /// One correlated-random-walk step.
    pub(super) fn step_search<R: Rng + ?Sized>(&mut self, field: &Field, rng: &mut R) {
        let persistence = self.persistence_direction(field);
        let repulsion = self.boundary_repulsion(field);

        let combined = persistence * self.params.w_dir + repulsion * (1.0 - self.params.w_dir);
        let preferred = match combined.normalized() {
            Some(direction) => direction.angle(),
            None => uniform_angle(rng),
        };

        // Turning is tighter close to the hive and looser far away.
        let hive_distance = field.distance_to_hive(self.position);
        let kappa = self.params.kappa_0 + self.params.alpha * (-hive_distance / self.params.beta).exp();

        let heading = sample_von_mises(rng, preferred, kappa);
        self.displace(Vec2::from_angle(heading) * self.params.dt, field);
    }

    /// One straight step along the current target's direction.
    ///
    /// Calling this without a target is a state-machine defect, not a
    /// runtime condition, and fails loudly.
    pub(super) fn step_follow(&mut self, field: &Field) {
        let Some(target) = self.target else {
            panic!("move without search mode or target: state machine violation");
        };
        self.displace(target.direction * self.params.dt, field);
    }

    /// Direction of the last flight segment, or away from the hive
    /// when the path history is too short to tell. Zero when neither
    /// gives a direction.
    fn persistence_direction(&self, field: &Field) -> Vec2 {
        let vector = if self.path.len() >= 2 {
            let previous = self.path[self.path.len() - 2];
            self.position - previous
        } else {
            self.position - field.hive.position
        };
        vector.normalized().unwrap_or(Vec2::ZERO)
    }

    /// Inward unit vector when the bee is within `sense_range` of any
    /// domain edge, zero otherwise.
    fn boundary_repulsion(&self, field: &Field) -> Vec2 {
        let margin = self.params.sense_range;
        let mut repulsion = Vec2::ZERO;
        if self.position.x < margin {
            repulsion.x += 1.0;
        } else if self.position.x > field.width - margin {
            repulsion.x -= 1.0;
        }
        if self.position.y < margin {
            repulsion.y += 1.0;
        } else if self.position.y > field.length - margin {
            repulsion.y -= 1.0;
        }
        repulsion.normalized().unwrap_or(Vec2::ZERO)
    }

    /// Applies a displacement, clamps to the domain, and records the
    /// new position in the path history.
    fn displace(&mut self, delta: Vec2, field: &Field) {
        self.position = (self.position + delta).clamp_to(field.extent());
        self.path.push(self.position);
    }
}
