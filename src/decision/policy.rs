//! Per-unit action choice.

use tracing::debug;

use crate::decision::{select_target, DecisionContext};
use crate::field::{Action, Direction, FieldState, UnitKey, BASE_X};

/// Minimum threat score on a predicted enemy cell before we shoot at it.
pub const ATTACK_SCORE: u8 = 2;

/// Choose the action for one controlled unit.
///
/// In order: shoot a predicted enemy that our own fire already covers and
/// that shares a row or column with us; shoot along the base row once at the
/// assault target; step onto a safe open cell on a cheapest route to the
/// target; shoot a safe brick on such a route; stay.
#[must_use]
pub fn choose_action(ctx: &DecisionContext, state: &FieldState, unit: UnitKey) -> Action {
    let Some(position) = state.position(unit) else {
        return Action::Stay;
    };
    let board = state.board();

    if state.can_fire(unit) {
        for &enemy in ctx.predictions().iter().flatten() {
            if ctx.threat().score(enemy) < ATTACK_SCORE {
                continue;
            }
            if let Some(dir) = position.direction_to(enemy) {
                debug!(%unit, %enemy, ?dir, "attacking predicted enemy");
                return Action::Fire(dir);
            }
        }
    }

    let Some(goal) = select_target(ctx.oracle(), board, position, unit.side) else {
        debug!(%unit, "no reachable target");
        return Action::Stay;
    };

    if position == goal {
        let dir = if position.x < BASE_X {
            Direction::Right
        } else {
            Direction::Left
        };
        return fire_or_stay(state, unit, dir);
    }

    for dir in Direction::ALL {
        let Some(cell) = position.step(dir) else {
            continue;
        };
        let items = board.get(cell);
        if items.has_steel() || items.has_brick() || !ctx.threat().is_safe(cell) {
            continue;
        }
        let action = Action::Move(dir);
        if ctx.oracle().on_shortest_path(position, cell, goal) && state.is_valid_action(unit, action) {
            debug!(%unit, %goal, ?dir, "moving toward target");
            return action;
        }
    }

    for dir in Direction::ALL {
        let Some(cell) = position.step(dir) else {
            continue;
        };
        let items = board.get(cell);
        if !items.has_brick() || !ctx.threat().is_safe(cell) {
            continue;
        }
        if ctx.oracle().on_shortest_path(position, cell, goal) {
            debug!(%unit, %goal, ?dir, "clearing brick");
            return fire_or_stay(state, unit, dir);
        }
    }

    Action::Stay
}

fn fire_or_stay(state: &FieldState, unit: UnitKey, dir: Direction) -> Action {
    let fire = Action::Fire(dir);
    if state.is_valid_action(unit, fire) {
        fire
    } else {
        Action::Stay
    }
}
