#![no_main]

//! Apply/revert fuzzer.
//!
//! Plays arbitrary joint actions, valid or not, on an arbitrary brick layout:
//! 1. Rejected joint actions must leave the state untouched
//! 2. Accepted ones must keep the field invariants
//! 3. Reverting right away must restore the previous state exactly
//! 4. Rewinding every turn must return to the initial position

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tankwar::field::{check_invariants, Action, FieldState, JointAction, UnitKey};

/// Structured input for one fuzzed game.
#[derive(Arbitrary, Debug)]
struct GameInput {
    /// Raw brick masks; out-of-range bits are ignored by the layout decoder.
    bricks: [u32; 3],
    /// Judge action codes per turn, one per unit.
    turns: Vec<[i8; 4]>,
}

fn joint_from_codes(codes: [i8; 4]) -> JointAction {
    let mut joint = JointAction::STAY;
    for (unit, code) in UnitKey::all().into_iter().zip(codes) {
        joint.set(unit, Action::from_code(code.rem_euclid(10) - 2).unwrap_or(Action::Invalid));
    }
    joint
}

fn assert_consistent(state: &FieldState) {
    let violations = check_invariants(state);
    assert!(violations.is_empty(), "invariants violated: {violations:?}");
}

fuzz_target!(|input: GameInput| {
    let initial = FieldState::new(input.bricks);
    assert_consistent(&initial);

    let mut state = initial.clone();
    let mut applied = 0usize;

    for codes in input.turns.into_iter().take(200) {
        let joint = joint_from_codes(codes);
        let before = state.clone();

        if state.apply(&joint).is_err() {
            assert_eq!(state, before, "rejected apply changed the state");
            continue;
        }
        assert_consistent(&state);

        state.revert().expect("revert after apply");
        assert_eq!(state, before, "revert did not restore the state");

        state.apply(&joint).expect("re-apply after revert");
        applied += 1;
    }

    for _ in 0..applied {
        state.revert().expect("rewind");
    }
    assert_eq!(state, initial, "rewind did not reach the start");
});
