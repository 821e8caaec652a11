//! Choice of the approach cell for a base assault.

use crate::decision::DistanceOracle;
use crate::field::{Board, Coord, Side, BASE_X, FIELD_WIDTH};

/// Extra cost per brick between a column and the base column on the base row.
pub const BRICK_LANE_PENALTY: u32 = 2;

/// Pick the cell on the opposing base row that a unit of `side` at `from`
/// should head for.
///
/// Each column scores its travel cost plus a penalty for every brick that
/// would have to be shot away to open a lane to the base along that row. The
/// lowest score wins and ties keep the leftmost column. Returns `None` when
/// no cell of the row is reachable.
#[must_use]
pub fn select_target(oracle: &DistanceOracle, board: &Board, from: Coord, side: Side) -> Option<Coord> {
    let row = side.opponent().base().y;
    let mut best: Option<(u32, Coord)> = None;

    for x in 0..FIELD_WIDTH {
        let cell = Coord::new(x, row);
        let Some(travel) = oracle.distance(from, cell) else {
            continue;
        };
        let lane = board.bricks_between_on_row(row, x, BASE_X);
        let cost = u32::from(travel) + BRICK_LANE_PENALTY * lane;
        if best.is_none_or(|(best_cost, _)| cost < best_cost) {
            best = Some((cost, cell));
        }
    }

    best.map(|(_, cell)| cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::CellItems;

    #[test]
    fn test_straight_down_on_open_board() {
        let board = Board::empty();
        let oracle = DistanceOracle::build(&board);
        let target = select_target(&oracle, &board, Coord::new(3, 0), Side::Blue);
        assert_eq!(target, Some(Coord::new(3, 8)));
    }

    #[test]
    fn test_red_heads_for_top_row() {
        let board = Board::empty();
        let oracle = DistanceOracle::build(&board);
        let target = select_target(&oracle, &board, Coord::new(6, 8), Side::Red);
        assert_eq!(target, Some(Coord::new(6, 0)));
    }

    #[test]
    fn test_bricks_in_lane_push_target_away() {
        let mut board = Board::empty();
        board.set(Coord::new(2, 8), CellItems::BRICK);
        board.set(Coord::new(3, 8), CellItems::BRICK);
        let oracle = DistanceOracle::build(&board);
        // Column 2 costs 9 to reach plus 2 for the brick at column 3; column 3
        // costs 10 with an open lane.
        let target = select_target(&oracle, &board, Coord::new(2, 0), Side::Blue);
        assert_eq!(target, Some(Coord::new(3, 8)));
    }

    #[test]
    fn test_ties_keep_leftmost_column() {
        let mut board = Board::empty();
        for y in 5..9 {
            board.set(Coord::new(4, y), CellItems::STEEL);
        }
        let oracle = DistanceOracle::build(&board);
        let target = select_target(&oracle, &board, Coord::new(4, 4), Side::Blue);
        assert_eq!(target, Some(Coord::new(3, 8)));
    }

    #[test]
    fn test_unreachable_row() {
        let mut board = Board::empty();
        for x in 0..FIELD_WIDTH {
            board.set(Coord::new(x, 5), CellItems::STEEL);
        }
        let oracle = DistanceOracle::build(&board);
        assert_eq!(select_target(&oracle, &board, Coord::new(0, 0), Side::Blue), None);
    }
}
