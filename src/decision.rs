//! Decision engine for the controlled side.
//!
//! Every turn the whole pipeline is rebuilt from the current [`FieldState`]:
//! distances first, then enemy predictions, then the threat map, and finally
//! one action per controlled unit.

mod distance;
mod policy;
mod predictor;
mod target;
mod threat;

use tracing::debug;

pub use distance::{DistanceOracle, BRICK_COST, OPEN_COST};
pub use policy::{choose_action, ATTACK_SCORE};
pub use predictor::predict_position;
pub use target::{select_target, BRICK_LANE_PENALTY};
pub use threat::{ThreatMap, ENEMY_THREAT_WEIGHT, OWN_THREAT_WEIGHT, UNSAFE_SCORES};

use crate::field::{Action, Coord, FieldState, Side, UnitKey};

/// Scratch data for one decision cycle.
///
/// Built once per turn and dropped afterwards; nothing here outlives the turn.
#[derive(Debug, Clone)]
pub struct DecisionContext {
    side: Side,
    oracle: DistanceOracle,
    predictions: [Option<Coord>; 2],
    threat: ThreatMap,
}

impl DecisionContext {
    /// Run every per-turn precomputation for `side`.
    #[must_use]
    pub fn build(state: &FieldState, side: Side) -> Self {
        let oracle = DistanceOracle::build(state.board());
        let predictions =
            UnitKey::of_side(side.opponent()).map(|enemy| predict_position(state, &oracle, enemy));
        let own = UnitKey::of_side(side).into_iter().filter_map(|unit| state.position(unit));
        let threat = ThreatMap::build(state.board(), predictions.iter().flatten().copied(), own);

        Self {
            side,
            oracle,
            predictions,
            threat,
        }
    }

    /// Side being controlled.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Distance table for this turn.
    #[must_use]
    pub const fn oracle(&self) -> &DistanceOracle {
        &self.oracle
    }

    /// Predicted next cell of each enemy unit, `None` for dead ones.
    #[must_use]
    pub const fn predictions(&self) -> &[Option<Coord>; 2] {
        &self.predictions
    }

    /// Threat map for this turn.
    #[must_use]
    pub const fn threat(&self) -> &ThreatMap {
        &self.threat
    }

    /// One action per controlled unit, ordered by unit id.
    #[must_use]
    pub fn decide(&self, state: &FieldState) -> [Action; 2] {
        let actions = UnitKey::of_side(self.side).map(|unit| choose_action(self, state, unit));
        debug!(side = %self.side, turn = state.turn(), ?actions, "decided");
        actions
    }
}

/// Build a fresh context and decide for `side`.
#[must_use]
pub fn decide(state: &FieldState, side: Side) -> [Action; 2] {
    DecisionContext::build(state, side).decide(state)
}
