//! Fire-phase resolution.
//!
//! Every firing unit traces a ray from its post-move cell until the ray
//! leaves the board or reaches an occupied cell. Everything on that cell is
//! marked for destruction, unless the two units involved are each alone on
//! their cells and fired straight at each other, in which case both shots
//! cancel.

use std::collections::BTreeSet;

use tracing::trace;

use crate::field::{Action, Board, CellItems, Coord, Direction, Entity, JointAction, UnitKey};

/// An entity marked for destruction by this turn's fire.
///
/// Ordering is by coordinate, then entity tag, which is the order in which
/// marks are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hit {
    /// Cell that was hit.
    pub coord: Coord,
    /// Entity on that cell.
    pub entity: Entity,
}

/// Where a single ray ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RayEnd {
    /// The ray left the board without touching anything.
    Escaped,
    /// The ray reached an occupied cell.
    Blocked(Coord),
}

/// Trace a ray from `from` (exclusive) along `dir`.
#[must_use]
pub fn trace_ray(board: &Board, from: Coord, dir: Direction) -> RayEnd {
    let mut cursor = from;
    while let Some(next) = cursor.step(dir) {
        if !board.get(next).is_vacant() {
            return RayEnd::Blocked(next);
        }
        cursor = next;
    }
    RayEnd::Escaped
}

/// Check the opposite-fire rule for a shot from `shooter` landing on `target`.
///
/// Both cells must hold exactly one unit and nothing else, and the unit on the
/// target cell must have fired in exactly the opposite direction this turn.
#[must_use]
fn shots_cancel(
    board: &Board,
    shooter: Coord,
    target: Coord,
    shot: Action,
    joint: &JointAction,
) -> bool {
    if board.get(shooter).has_stacked_units() {
        return false;
    }
    let hit_items = board.get(target);
    let mut units = hit_items.units();
    let (Some(victim), None) = (units.next(), units.next()) else {
        return false;
    };
    if hit_items != CellItems::unit(victim) {
        return false;
    }
    shot.fires_against(joint.get(victim))
}

/// Resolve every shot of the turn against the post-move board.
///
/// `shooters` lists each live unit whose action is a fire, with its current
/// cell. The returned set is deduplicated, so a cell reached by several rays
/// is only destroyed once.
#[must_use]
pub fn resolve_fire(
    board: &Board,
    shooters: &[(UnitKey, Coord, Direction)],
    joint: &JointAction,
) -> BTreeSet<Hit> {
    let mut hits = BTreeSet::new();

    for &(unit, from, dir) in shooters {
        let RayEnd::Blocked(target) = trace_ray(board, from, dir) else {
            trace!(%unit, ?dir, "shot left the board");
            continue;
        };

        if shots_cancel(board, from, target, joint.get(unit), joint) {
            trace!(%unit, %target, "opposite fire cancelled");
            continue;
        }

        for entity in board.get(target).entities() {
            hits.insert(Hit {
                coord: target,
                entity,
            });
        }
    }

    hits
}
