//! Consistency checks between the board and the unit/base bookkeeping.
//!
//! These must hold after every successful apply and every revert. A
//! violation always means an engine bug, never a rules outcome.

use std::fmt;

use crate::field::{CellItems, FieldState, Side, UnitKey};

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all field invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &FieldState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut push = |message: String| violations.push(InvariantViolation { message });

    for unit in UnitKey::all() {
        let flag = CellItems::unit(unit);
        let cells: Vec<_> = state
            .board()
            .iter()
            .filter(|(_, items)| items.contains(flag))
            .map(|(coord, _)| coord)
            .collect();

        match (state.position(unit), cells.as_slice()) {
            (None, []) => {}
            (Some(pos), [cell]) if *cell == pos => {}
            (position, cells) => push(format!(
                "{unit} recorded at {position:?} but found on {cells:?}"
            )),
        }
    }

    for side in Side::ALL {
        let on_board = state.board().get(side.base()).has_base();
        if on_board != state.base_alive(side) {
            push(format!(
                "{side} base alive flag is {} but board says {on_board}",
                state.base_alive(side)
            ));
        }
    }

    for (coord, items) in state.board().iter() {
        if items.has_base() && Side::owning_base_at(coord).is_none() {
            push(format!("base flag at {coord} which is not a base cell"));
        }
        if items.has_brick() && items.has_steel() {
            push(format!("brick and steel share {coord}"));
        }
        if items.has_terrain() && items.unit_count() > 0 {
            push(format!("unit standing on terrain at {coord}"));
        }
        if items.has_terrain() && items.has_base() {
            push(format!("terrain over a base at {coord}"));
        }
    }

    let applied = state.turn().saturating_sub(1) as usize;
    if state.history().len() != applied + 1 {
        push(format!(
            "history holds {} entries at turn {}",
            state.history().len(),
            state.turn()
        ));
    }
    if state.log().turns() > applied {
        push(format!(
            "log has {} turn groups at turn {}",
            state.log().turns(),
            state.turn()
        ));
    }

    violations
}

/// Assert all field invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &FieldState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Field invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &FieldState) {}
