//! Dance Board
//!
//! The recruitment registry: active waggle-dance advertisements
//! readable by every bee. Insertion is the single deduplication gate;
//! withdrawal is deferred (retain-based) so no pass ever mutates the
//! board while iterating it.

use rand::Rng;
use serde::Serialize;

use crate::geom::Vec2;

/// Absolute tolerance for matching two advertisements on
/// (direction, distance).
pub const MATCH_EPS: f64 = 1e-6;

/// One waggle-dance advertisement: where the source lies relative to
/// the hive and how strong it was when advertised.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DanceEntry {
    /// Unit vector from the hive toward the source.
    pub direction: Vec2,
    /// Distance from the hive to the source.
    pub distance: f64,
    /// Source strength at advertisement time; also bounds the dance duration.
    pub strength: u32,
}

impl DanceEntry {
    /// Whether this entry advertises the same (direction, distance)
    /// within tolerance.
    pub fn matches(&self, direction: Vec2, distance: f64) -> bool {
        (self.direction - direction).norm() <= MATCH_EPS
            && (self.distance - distance).abs() <= MATCH_EPS
    }
}

/// The set of currently active advertisements.
#[derive(Debug, Clone, Default)]
pub struct DanceBoard {
    entries: Vec<DanceEntry>,
}

impl DanceBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[DanceEntry] {
        &self.entries
    }

    /// Whether any entry matches (direction, distance) within tolerance.
    pub fn contains_matching(&self, direction: Vec2, distance: f64) -> bool {
        self.entries.iter().any(|e| e.matches(direction, distance))
    }

    /// Inserts an advertisement unless a matching one is already on
    /// the board. Returns whether the entry was added. This is the
    /// only place duplicates are suppressed.
    pub fn add(&mut self, entry: DanceEntry) -> bool {
        if self.contains_matching(entry.direction, entry.distance) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Withdraws every entry matching (direction, distance). The
    /// insertion gate keeps matches unique, so this removes at most
    /// one entry in practice.
    pub fn remove_matching(&mut self, direction: Vec2, distance: f64) {
        self.entries.retain(|e| !e.matches(direction, distance));
    }

    /// Picks a uniformly random advertisement, if any.
    pub fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<DanceEntry> {
        if self.entries.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.entries.len());
        Some(self.entries[index])
    }
}
