//! Disappearance log used for exact rollback.
//!
//! Every entity that leaves a cell (a unit moving away, anything destroyed by
//! fire) is appended here together with the turn it disappeared on. Entries
//! are grouped by turn: `turn_starts[k]` is the index of the first entry
//! written during the `k`-th applied turn, so rolling back a turn is a
//! truncation at a known boundary.

use crate::field::{Coord, Entity};

/// A single disappearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Disappearance {
    /// Where the entity was.
    pub coord: Coord,
    /// What disappeared.
    pub entity: Entity,
    /// The turn on which it disappeared.
    pub turn: u32,
}

/// Append-only log grouped by turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisappearanceLog {
    /// All entries in the order they were written.
    entries: Vec<Disappearance>,
    /// Start index of each applied turn's entries.
    turn_starts: Vec<usize>,
}

impl DisappearanceLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the group for a newly applied turn.
    pub fn begin_turn(&mut self) {
        self.turn_starts.push(self.entries.len());
    }

    /// Record a disappearance in the currently open turn.
    pub fn record(&mut self, entry: Disappearance) {
        self.entries.push(entry);
    }

    /// Remove the most recent turn's entries and return them newest first.
    ///
    /// Returns an empty list if no turn was ever opened.
    pub fn pop_turn(&mut self) -> Vec<Disappearance> {
        let Some(start) = self.turn_starts.pop() else {
            return Vec::new();
        };
        let mut popped = self.entries.split_off(start);
        popped.reverse();
        popped
    }

    /// Entries recorded during the most recent turn, oldest first.
    #[must_use]
    pub fn last_turn(&self) -> &[Disappearance] {
        match self.turn_starts.last() {
            Some(&start) => &self.entries[start..],
            None => &[],
        }
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[Disappearance] {
        &self.entries
    }

    /// Number of turns with an open group.
    #[must_use]
    pub fn turns(&self) -> usize {
        self.turn_starts.len()
    }
}
