//! Guess where an enemy unit will be after this turn.

use tracing::debug;

use crate::decision::{select_target, DistanceOracle};
use crate::field::{Action, Coord, Direction, FieldState, UnitKey};

/// Predict the next cell of `unit`, or `None` if it is dead.
///
/// A unit that moved last turn is assumed to keep going the same way. When
/// that cell is not free (or the unit did not move), the unit is assumed to
/// head for its own assault target: the first open neighbour in scan order
/// that lies on a cheapest route there. With no such neighbour it is
/// predicted to stay put.
#[must_use]
pub fn predict_position(state: &FieldState, oracle: &DistanceOracle, unit: UnitKey) -> Option<Coord> {
    let position = state.position(unit)?;
    let board = state.board();

    let extrapolated = match state.previous_action(unit) {
        Action::Move(dir) => position.step(dir),
        _ => Some(position),
    };
    if let Some(next) = extrapolated.filter(|&cell| board.is_vacant(cell)) {
        debug!(%unit, %next, "predicted by extrapolation");
        return Some(next);
    }

    let Some(goal) = select_target(oracle, board, position, unit.side) else {
        return Some(position);
    };

    let next = Direction::ALL
        .into_iter()
        .filter_map(|dir| position.step(dir))
        .find(|&cell| {
            let items = board.get(cell);
            !items.has_steel() && !items.has_brick() && oracle.on_shortest_path(position, cell, goal)
        })
        .unwrap_or(position);

    debug!(%unit, %goal, %next, "predicted by goal");
    Some(next)
}
