//! Property-based tests for the field engine.
//!
//! These tests drive random games through apply and revert and check that the
//! engine is deterministic, exactly reversible and consistent.
//! Run with: cargo test --release prop_field

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use tankwar::arena::generate_layout;
use tankwar::field::{check_invariants, Action, FieldState, JointAction, UnitKey};

/// Turn one random pick per unit into a joint action that the state accepts.
fn legal_joint(state: &FieldState, picks: [u8; 4]) -> JointAction {
    let mut joint = JointAction::STAY;
    for (unit, pick) in UnitKey::all().into_iter().zip(picks) {
        let action = Action::CHOICES[usize::from(pick) % Action::CHOICES.len()];
        if state.is_valid_action(unit, action) {
            joint.set(unit, action);
        }
    }
    joint
}

/// Play until the picks run out or the game ends; returns what was applied.
fn play(state: &mut FieldState, picks: &[[u8; 4]]) -> Vec<JointAction> {
    let mut applied = Vec::new();
    for &turn_picks in picks {
        if state.outcome().is_finished() {
            break;
        }
        let joint = legal_joint(state, turn_picks);
        state.apply(&joint).unwrap();
        applied.push(joint);
    }
    applied
}

fn layout() -> impl Strategy<Value = [u32; 3]> {
    (any::<u64>(), 0u8..=70).prop_map(|(seed, density)| generate_layout(seed, density))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Replaying the same joint actions from the same layout gives the same state.
    #[test]
    fn prop_replay_is_deterministic(
        bricks in layout(),
        picks in prop::collection::vec(any::<[u8; 4]>(), 0..60)
    ) {
        let mut first = FieldState::new(bricks);
        let applied = play(&mut first, &picks);

        let mut second = FieldState::new(bricks);
        for joint in &applied {
            second.apply(joint).unwrap();
        }

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.history().len(), applied.len() + 1);
    }

    /// Apply followed by revert restores the exact prior state at every turn.
    #[test]
    fn prop_apply_then_revert_is_identity(
        bricks in layout(),
        picks in prop::collection::vec(any::<[u8; 4]>(), 1..60)
    ) {
        let mut state = FieldState::new(bricks);
        for &turn_picks in &picks {
            if state.outcome().is_finished() {
                break;
            }
            let before = state.clone();
            let joint = legal_joint(&state, turn_picks);
            state.apply(&joint).unwrap();
            prop_assert!(check_invariants(&state).is_empty());

            state.revert().unwrap();
            prop_assert_eq!(&state, &before);

            state.apply(&joint).unwrap();
        }
    }

    /// Reverting a whole game walks back to the initial position.
    #[test]
    fn prop_full_rewind(
        bricks in layout(),
        picks in prop::collection::vec(any::<[u8; 4]>(), 0..80)
    ) {
        let initial = FieldState::new(bricks);
        let mut state = initial.clone();
        let applied = play(&mut state, &picks);

        for _ in 0..applied.len() {
            state.revert().unwrap();
            prop_assert!(check_invariants(&state).is_empty());
        }
        prop_assert_eq!(&state, &initial);
        prop_assert!(state.revert().is_err());
    }

    /// A unit that fired last turn may not fire this turn, whatever the board.
    #[test]
    fn prop_no_consecutive_fire(
        bricks in layout(),
        picks in prop::collection::vec(any::<[u8; 4]>(), 1..60)
    ) {
        let mut state = FieldState::new(bricks);
        play(&mut state, &picks);

        for unit in UnitKey::all() {
            if state.previous_action(unit).is_fire() {
                for action in Action::CHOICES.into_iter().filter(|action| action.is_fire()) {
                    prop_assert!(!state.is_valid_action(unit, action));
                }
            }
        }
    }

    /// Validity answers never change without a state change, and a joint
    /// action is accepted exactly when each live unit's action is.
    #[test]
    fn prop_validity_is_pure(
        bricks in layout(),
        picks in prop::collection::vec(any::<[u8; 4]>(), 0..40),
        probe in any::<[u8; 4]>()
    ) {
        let mut state = FieldState::new(bricks);
        play(&mut state, &picks);
        let snapshot = state.clone();

        let mut joint = JointAction::STAY;
        for (unit, pick) in UnitKey::all().into_iter().zip(probe) {
            joint.set(unit, Action::CHOICES[usize::from(pick) % Action::CHOICES.len()]);
        }

        let per_unit: Vec<bool> = UnitKey::all()
            .into_iter()
            .map(|unit| state.is_valid_action(unit, joint.get(unit)))
            .collect();
        for _ in 0..3 {
            for (unit, &expected) in UnitKey::all().into_iter().zip(&per_unit) {
                prop_assert_eq!(state.is_valid_action(unit, joint.get(unit)), expected);
            }
        }

        let all_live_valid = UnitKey::all()
            .into_iter()
            .zip(&per_unit)
            .all(|(unit, &valid)| valid || !state.unit(unit).alive());
        prop_assert_eq!(state.validate(&joint).is_ok(), all_live_valid);
        prop_assert_eq!(&state, &snapshot);
    }

    /// A rejected joint action leaves the state untouched.
    #[test]
    fn prop_rejected_apply_is_noop(
        bricks in layout(),
        picks in prop::collection::vec(any::<[u8; 4]>(), 0..40),
        victim in 0usize..4
    ) {
        let mut state = FieldState::new(bricks);
        play(&mut state, &picks);
        let unit = UnitKey::all()[victim];
        prop_assume!(state.unit(unit).alive());

        let before = state.clone();
        let mut joint = JointAction::STAY;
        joint.set(unit, Action::Invalid);
        prop_assert!(state.apply(&joint).is_err());
        prop_assert_eq!(&state, &before);
    }
}
