//! Board model and rules engine.
//!
//! Implements the fixed rule set of the 9x9 two-side tank battle:
//! - Cells holding overlapping entities (terrain, bases, stacked units)
//! - Validation of per-unit actions
//! - Simultaneous move and fire resolution
//! - Exact rollback through a per-turn disappearance log
//! - Win, loss and draw evaluation

mod action;
mod board;
mod fire;
mod invariants;
mod log;
mod state;
mod unit;

pub use action::{Action, JointAction};
pub use board::{
    Board, CellItems, Coord, Direction, Entity, BRICK_MASK_COUNT, CELL_COUNT, FIELD_HEIGHT,
    FIELD_WIDTH,
};
pub use fire::{resolve_fire, trace_ray, Hit, RayEnd};
pub use invariants::{assert_invariants, check_invariants, InvariantViolation};
pub use log::{Disappearance, DisappearanceLog};
pub use state::{FieldState, Outcome, MAX_TURN};
pub use unit::{Side, Unit, UnitKey, BASE_X, SIDE_COUNT, UNITS_PER_SIDE};
