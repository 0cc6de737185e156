//! Nectar Patches
//!
//! Passive nectar sources scattered over the domain. Patches are owned
//! by the field; bees remember them through stable ids rather than
//! references, so depleting and pruning a patch never invalidates
//! another bee's memory.

use serde::Serialize;

use crate::geom::Vec2;

/// Stable handle for a nectar patch, unique within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PatchId(pub u32);

/// A nectar source with a position and remaining strength.
#[derive(Debug, Clone, Serialize)]
pub struct NectarPatch {
    pub id: PatchId,
    pub position: Vec2,
    /// Remaining units; monotonically non-increasing, pruned at 0.
    pub strength: u32,
}

impl NectarPatch {
    pub fn new(id: PatchId, position: Vec2, strength: u32) -> Self {
        Self { id, position, strength }
    }

    /// Takes one unit of nectar, saturating at zero. Two bees draining
    /// the same patch in one roster pass must not push it negative.
    pub fn deplete(&mut self) {
        self.strength = self.strength.saturating_sub(1);
    }

    pub fn is_depleted(&self) -> bool {
        self.strength == 0
    }
}
