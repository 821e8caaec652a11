//! Per-cell danger scores from projected lines of fire.

use crate::field::{Board, Coord, Direction, CELL_COUNT};

/// Score added along each line of fire from a predicted enemy cell.
pub const ENEMY_THREAT_WEIGHT: u8 = 1;

/// Score added along each line of fire from one of our own units.
pub const OWN_THREAT_WEIGHT: u8 = 2;

/// Scores treated as unsafe to step into.
///
/// 1 is enemy fire alone, 3 is enemy fire overlapping one own line. Other
/// totals, including overlapping own lines, count as safe.
pub const UNSAFE_SCORES: [u8; 2] = [1, 3];

/// Accumulated threat per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreatMap {
    /// Row-major scores.
    scores: [u8; CELL_COUNT],
}

impl Default for ThreatMap {
    fn default() -> Self {
        Self {
            scores: [0; CELL_COUNT],
        }
    }
}

impl ThreatMap {
    /// Project enemy fire from `enemies` and own fire from `own`.
    #[must_use]
    pub fn build(
        board: &Board,
        enemies: impl IntoIterator<Item = Coord>,
        own: impl IntoIterator<Item = Coord>,
    ) -> Self {
        let mut map = Self::default();
        for source in enemies {
            map.project(board, source, ENEMY_THREAT_WEIGHT);
        }
        for source in own {
            map.project(board, source, OWN_THREAT_WEIGHT);
        }
        map
    }

    /// Add `weight` along all four lines leaving `source`.
    ///
    /// A line stops before steel, or on the first occupied cell after scoring it.
    fn project(&mut self, board: &Board, source: Coord, weight: u8) {
        for dir in Direction::ALL {
            let mut cursor = source;
            while let Some(next) = cursor.step(dir) {
                let items = board.get(next);
                if items.has_steel() {
                    break;
                }
                let score = &mut self.scores[next.index()];
                *score = score.saturating_add(weight);
                if !items.is_vacant() {
                    break;
                }
                cursor = next;
            }
        }
    }

    /// Accumulated score of a cell; off-board cells score 0.
    #[must_use]
    #[inline]
    pub fn score(&self, coord: Coord) -> u8 {
        if coord.in_bounds() {
            self.scores[coord.index()]
        } else {
            0
        }
    }

    /// Whether stepping into `coord` is considered safe.
    #[must_use]
    pub fn is_safe(&self, coord: Coord) -> bool {
        !UNSAFE_SCORES.contains(&self.score(coord))
    }
}
