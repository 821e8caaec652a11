//! All-pairs movement cost over the board.
//!
//! Entering a cell costs 1 turn, or 2 if it holds brick (one shot to clear,
//! one move to enter). Steel cannot be entered. Costs are relaxed with
//! Floyd-Warshall over all 81 cells, so the work per turn is fixed.

use crate::field::{Board, Coord, Direction, CELL_COUNT};

/// Cost assigned to pairs with no path. Twice this still fits in `u16`.
const UNREACHABLE: u16 = 0x3f3f;

/// Turns to enter a brick cell.
pub const BRICK_COST: u16 = 2;

/// Turns to enter any other enterable cell.
pub const OPEN_COST: u16 = 1;

/// Minimum turns between every ordered pair of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceOracle {
    /// Row-major `from * CELL_COUNT + to`.
    table: Vec<u16>,
}

impl DistanceOracle {
    /// Compute the full table for `board`.
    #[must_use]
    pub fn build(board: &Board) -> Self {
        let mut table = vec![UNREACHABLE; CELL_COUNT * CELL_COUNT];

        for from in Coord::all() {
            let row = from.index() * CELL_COUNT;
            table[row + from.index()] = 0;
            for dir in Direction::ALL {
                let Some(to) = from.step(dir) else {
                    continue;
                };
                let items = board.get(to);
                if items.has_steel() {
                    continue;
                }
                table[row + to.index()] = if items.has_brick() {
                    BRICK_COST
                } else {
                    OPEN_COST
                };
            }
        }

        for k in 0..CELL_COUNT {
            for i in 0..CELL_COUNT {
                let via = table[i * CELL_COUNT + k];
                if via >= UNREACHABLE {
                    continue;
                }
                for j in 0..CELL_COUNT {
                    let candidate = via + table[k * CELL_COUNT + j];
                    let slot = &mut table[i * CELL_COUNT + j];
                    if candidate < *slot {
                        *slot = candidate;
                    }
                }
            }
        }

        Self { table }
    }

    /// Cost from `from` to `to`, or `None` if `to` cannot be reached.
    ///
    /// Off-board coordinates are never reachable.
    #[must_use]
    #[inline]
    pub fn distance(&self, from: Coord, to: Coord) -> Option<u16> {
        if !from.in_bounds() || !to.in_bounds() {
            return None;
        }
        let cost = self.table[from.index() * CELL_COUNT + to.index()];
        (cost < UNREACHABLE).then_some(cost)
    }

    /// Whether stepping through `via` keeps `from` on a cheapest route to `to`.
    ///
    /// False whenever `to` is unreachable from `from`.
    #[must_use]
    pub fn on_shortest_path(&self, from: Coord, via: Coord, to: Coord) -> bool {
        let (Some(total), Some(first), Some(rest)) = (
            self.distance(from, to),
            self.distance(from, via),
            self.distance(via, to),
        ) else {
            return false;
        };
        first + rest == total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::CellItems;

    #[test]
    fn test_open_board_is_manhattan() {
        let oracle = DistanceOracle::build(&Board::empty());
        let a = Coord::new(1, 2);
        let b = Coord::new(7, 6);
        assert_eq!(oracle.distance(a, b), Some(10));
        assert_eq!(oracle.distance(b, a), Some(10));
        assert_eq!(oracle.distance(a, a), Some(0));
    }

    #[test]
    fn test_steel_is_unreachable() {
        let mut board = Board::empty();
        board.set(Coord::new(4, 4), CellItems::STEEL);
        let oracle = DistanceOracle::build(&board);
        assert_eq!(oracle.distance(Coord::new(4, 3), Coord::new(4, 4)), None);
        // Detour around the steel.
        assert_eq!(oracle.distance(Coord::new(4, 3), Coord::new(4, 5)), Some(4));
    }

    #[test]
    fn test_brick_costs_one_extra_turn() {
        let mut board = Board::empty();
        // A corridor along row 0 blocked by steel below, with one brick in it.
        for x in 0..9 {
            board.set(Coord::new(x, 1), CellItems::STEEL);
        }
        board.set(Coord::new(3, 0), CellItems::BRICK);
        let oracle = DistanceOracle::build(&board);
        assert_eq!(oracle.distance(Coord::new(0, 0), Coord::new(6, 0)), Some(7));
    }

    #[test]
    fn test_on_shortest_path() {
        let oracle = DistanceOracle::build(&Board::empty());
        let from = Coord::new(0, 0);
        let to = Coord::new(2, 2);
        assert!(oracle.on_shortest_path(from, Coord::new(1, 0), to));
        assert!(oracle.on_shortest_path(from, Coord::new(0, 1), to));
        assert!(!oracle.on_shortest_path(Coord::new(1, 1), Coord::new(0, 1), to));
    }

    #[test]
    fn test_off_board_is_unreachable() {
        let oracle = DistanceOracle::build(&Board::empty());
        // (9, 0) would alias (0, 1) in a raw row-major lookup.
        assert_eq!(oracle.distance(Coord::new(0, 0), Coord::new(9, 0)), None);
        assert_eq!(oracle.distance(Coord::new(9, 9), Coord::new(0, 0)), None);
        assert!(!oracle.on_shortest_path(Coord::new(0, 0), Coord::new(9, 0), Coord::new(0, 1)));
    }
}
