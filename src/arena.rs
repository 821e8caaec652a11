//! Local self-play.
//!
//! Runs complete games between two controllers on seeded, symmetric brick
//! layouts:
//! - Deterministic layout generation from a seed
//! - The decision engine and a random baseline as controllers
//! - Invariant checking after every applied turn
//! - Parallel batches with rayon

mod mapgen;

pub use mapgen::{generate_layout, Rng};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::decision::decide;
use crate::error::ArenaError;
use crate::field::{check_invariants, Action, FieldState, JointAction, Outcome, Side, UnitKey};
use crate::replay::Recording;

/// Tries per unit before the random controller gives up and stays.
const RANDOM_ATTEMPTS: u32 = 64;

/// Anything that picks a side's actions from the shared field state.
pub trait Controller {
    /// Actions for `side`'s two units this turn.
    fn choose(&mut self, state: &FieldState, side: Side) -> [Action; 2];
}

/// The decision engine, with invalid picks replaced by `Stay`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyController;

impl Controller for PolicyController {
    fn choose(&mut self, state: &FieldState, side: Side) -> [Action; 2] {
        let mut actions = decide(state, side);
        for (unit, action) in UnitKey::of_side(side).into_iter().zip(actions.iter_mut()) {
            if !state.is_valid_action(unit, *action) {
                *action = Action::Stay;
            }
        }
        actions
    }
}

/// Uniformly random valid actions.
#[derive(Debug, Clone, Copy)]
pub struct RandomController {
    rng: Rng,
}

impl RandomController {
    /// Create a controller with its own seeded generator.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { rng: Rng::new(seed) }
    }
}

impl Controller for RandomController {
    #[allow(clippy::cast_possible_truncation)]
    fn choose(&mut self, state: &FieldState, side: Side) -> [Action; 2] {
        UnitKey::of_side(side).map(|unit| {
            if !state.unit(unit).alive() {
                return Action::Stay;
            }
            for _ in 0..RANDOM_ATTEMPTS {
                let pick = self.rng.next_u32(Action::CHOICES.len() as u32) as usize;
                let action = Action::CHOICES[pick];
                if state.is_valid_action(unit, action) {
                    return action;
                }
            }
            Action::Stay
        })
    }
}

/// Which controller plays a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllerKind {
    /// [`PolicyController`].
    Policy,
    /// [`RandomController`].
    Random,
}

impl std::fmt::Display for ControllerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControllerKind::Policy => write!(f, "policy"),
            ControllerKind::Random => write!(f, "random"),
        }
    }
}

impl ControllerKind {
    /// Instantiate the controller; `seed` only matters for random play.
    #[must_use]
    pub fn build(self, seed: u64) -> Box<dyn Controller + Send> {
        match self {
            ControllerKind::Policy => Box::new(PolicyController),
            ControllerKind::Random => Box::new(RandomController::new(seed)),
        }
    }
}

/// Settings shared by every game of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Chance in percent that a free cell starts as brick.
    pub brick_density: u8,
    /// Check field invariants after every turn.
    pub check_invariants: bool,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            brick_density: 30,
            check_invariants: cfg!(debug_assertions),
        }
    }
}

/// Final result of a game.
#[derive(Debug, Clone)]
pub struct GameResult {
    /// The seed used for this game.
    pub seed: u64,
    /// How the game ended.
    pub outcome: Outcome,
    /// Number of turns applied.
    pub turns_played: u32,
    /// Everything needed to replay the game.
    pub recording: Recording,
}

/// Play one game between two controller kinds.
///
/// The red controller's seed is derived from `seed` so that two random
/// controllers do not mirror each other.
///
/// # Errors
///
/// See [`run_game_with`].
pub fn run_game(
    seed: u64,
    contenders: [ControllerKind; 2],
    config: &ArenaConfig,
) -> Result<GameResult, ArenaError> {
    let mut blue = contenders[0].build(seed);
    let mut red = contenders[1].build(seed.rotate_left(32) ^ 0x9e37_79b9_7f4a_7c15);
    run_game_with(seed, [blue.as_mut(), red.as_mut()], config)
}

/// Play one game to completion with the given controllers (blue, red).
///
/// # Errors
///
/// Returns [`ArenaError::Rejected`] if a controller's joint action is
/// rejected, or [`ArenaError::Invariant`] if invariant checking is enabled and
/// fails.
pub fn run_game_with(
    seed: u64,
    controllers: [&mut (dyn Controller + Send); 2],
    config: &ArenaConfig,
) -> Result<GameResult, ArenaError> {
    let bricks = generate_layout(seed, config.brick_density);
    let mut state = FieldState::new(bricks);
    let mut recording = Recording::new(seed, bricks);
    let [blue, red] = controllers;

    while !state.outcome().is_finished() {
        let joint = JointAction::new(blue.choose(&state, Side::Blue), red.choose(&state, Side::Red));
        let turn = state.turn();
        state
            .apply(&joint)
            .map_err(|source| ArenaError::Rejected { turn, source })?;
        trace!(turn, ?joint, "applied");
        recording.turns.push(joint);

        if config.check_invariants {
            let violations = check_invariants(&state);
            if !violations.is_empty() {
                let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
                return Err(ArenaError::Invariant {
                    turn,
                    message: messages.join("; "),
                });
            }
        }
    }

    let outcome = state.outcome();
    debug!(seed, ?outcome, turns = recording.turns.len(), "game finished");
    Ok(GameResult {
        seed,
        outcome,
        turns_played: state.turn() - 1,
        recording,
    })
}

/// Aggregated results of many games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    /// Games that ran to completion.
    pub games_played: u64,
    /// Wins per side (blue, red).
    pub wins: [u64; 2],
    /// Drawn games.
    pub draws: u64,
    /// Games aborted by an error.
    pub errors: u64,
    /// Sum of turns over completed games.
    pub total_turns: u64,
}

impl BatchStats {
    /// Fold one result in.
    pub fn add_result(&mut self, result: &GameResult) {
        self.games_played += 1;
        self.total_turns += u64::from(result.turns_played);
        match result.outcome {
            Outcome::Win(side) => self.wins[side.index()] += 1,
            Outcome::Draw | Outcome::NotFinished => self.draws += 1,
        }
    }

    /// Merge another partial aggregate into this one.
    pub fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.wins[0] += other.wins[0];
        self.wins[1] += other.wins[1];
        self.draws += other.draws;
        self.errors += other.errors;
        self.total_turns += other.total_turns;
    }

    /// Mean game length, or 0 with no completed games.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_turns(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.total_turns as f64 / self.games_played as f64
        }
    }
}

/// Play `games` games in parallel with seeds `base_seed..base_seed + games`.
///
/// Each thread accumulates its own stats, merged at the end.
#[must_use]
pub fn run_batch(
    base_seed: u64,
    games: u64,
    contenders: [ControllerKind; 2],
    config: &ArenaConfig,
) -> BatchStats {
    (0..games)
        .into_par_iter()
        .fold(BatchStats::default, |mut local, i| {
            match run_game(base_seed.wrapping_add(i), contenders, config) {
                Ok(result) => local.add_result(&result),
                Err(err) => {
                    debug!(game = i, %err, "game aborted");
                    local.errors += 1;
                }
            }
            local
        })
        .reduce(BatchStats::default, |mut a, b| {
            a.merge(&b);
            a
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_controller_only_valid_actions() {
        let state = FieldState::new(generate_layout(11, 60));
        let mut controller = RandomController::new(4);
        for _ in 0..50 {
            for side in Side::ALL {
                let actions = controller.choose(&state, side);
                for (unit, action) in UnitKey::of_side(side).into_iter().zip(actions) {
                    assert!(state.is_valid_action(unit, action));
                }
            }
        }
    }

    #[test]
    fn test_game_finishes_and_records_every_turn() {
        let config = ArenaConfig {
            check_invariants: true,
            ..ArenaConfig::default()
        };
        let result = run_game(21, [ControllerKind::Policy, ControllerKind::Random], &config).unwrap();
        assert!(result.outcome.is_finished());
        assert_eq!(result.recording.turns.len() as u32, result.turns_played);
        assert!(result.turns_played <= crate::field::MAX_TURN);
    }

    #[test]
    fn test_same_seed_same_game() {
        let config = ArenaConfig::default();
        let contenders = [ControllerKind::Random, ControllerKind::Random];
        let a = run_game(8, contenders, &config).unwrap();
        let b = run_game(8, contenders, &config).unwrap();
        assert_eq!(a.outcome, b.outcome);
        assert_eq!(a.recording, b.recording);
    }

    #[test]
    fn test_batch_counts_every_game() {
        let stats = run_batch(100, 6, [ControllerKind::Policy, ControllerKind::Policy], &ArenaConfig::default());
        assert_eq!(stats.games_played + stats.errors, 6);
        assert_eq!(stats.wins[0] + stats.wins[1] + stats.draws, stats.games_played);
    }

    #[test]
    fn test_stats_merge() {
        let mut a = BatchStats {
            games_played: 2,
            wins: [1, 0],
            draws: 1,
            errors: 0,
            total_turns: 30,
        };
        let b = BatchStats {
            games_played: 1,
            wins: [0, 1],
            draws: 0,
            errors: 1,
            total_turns: 12,
        };
        a.merge(&b);
        assert_eq!(a.games_played, 3);
        assert_eq!(a.wins, [1, 1]);
        assert_eq!(a.errors, 1);
        assert!((a.average_turns() - 14.0).abs() < f64::EPSILON);
    }
}
