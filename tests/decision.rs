//! Integration tests for the decision engine.
//!
//! Run with: cargo test decision

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use tankwar::arena::generate_layout;
use tankwar::decision::{select_target, DecisionContext, DistanceOracle};
use tankwar::field::{Action, Board, CellItems, Coord, FieldState, JointAction, Side, UnitKey};
use tankwar::decide;

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

fn manhattan(a: Coord, b: Coord) -> u16 {
    u16::from(a.x.abs_diff(b.x)) + u16::from(a.y.abs_diff(b.y))
}

#[test]
fn test_open_board_distance_is_manhattan() {
    let oracle = DistanceOracle::build(&Board::empty());
    for from in Coord::all() {
        for to in Coord::all() {
            assert_eq!(oracle.distance(from, to), Some(manhattan(from, to)), "{from} -> {to}");
        }
    }
}

#[test]
fn test_single_brick_on_route_costs_one_more() {
    // Steel at (1, 0) and (1, 2) leaves (1, 1) as the only way right.
    let mut board = Board::empty();
    for y in 0..9 {
        if y != 1 {
            board.set(Coord::new(1, y), CellItems::STEEL);
        }
    }
    let open = DistanceOracle::build(&board);
    board.set(Coord::new(1, 1), CellItems::BRICK);
    let bricked = DistanceOracle::build(&board);

    let from = Coord::new(0, 1);
    let to = Coord::new(2, 1);
    assert_eq!(open.distance(from, to), Some(2));
    assert_eq!(bricked.distance(from, to), Some(3));
    assert_eq!(
        bricked.distance(Coord::new(0, 8), Coord::new(8, 8)),
        open.distance(Coord::new(0, 8), Coord::new(8, 8)).map(|d| d + 1)
    );
}

#[test]
fn test_steel_walls_cut_the_board() {
    let mut board = Board::empty();
    for x in 0..9 {
        board.set(Coord::new(x, 4), CellItems::STEEL);
    }
    let oracle = DistanceOracle::build(&board);
    assert_eq!(oracle.distance(Coord::new(0, 0), Coord::new(0, 8)), None);
    assert!(!oracle.on_shortest_path(Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 8)));
    assert_eq!(oracle.distance(Coord::new(0, 0), Coord::new(8, 3)), Some(11));
}

/// Only the two bases, blue 0 at (0, 3) and red 0 in its start corner.
fn open_scenario() -> FieldState {
    let mut board = Board::empty();
    for side in Side::ALL {
        board.set(side.base(), CellItems::BASE);
    }
    board.set(Coord::new(0, 3), CellItems::BLUE0);
    board.set(Coord::new(8, 8), CellItems::RED0);
    FieldState::from_board(board)
}

#[test]
fn test_open_scenario_moves_without_firing() {
    let state = open_scenario();
    let oracle = DistanceOracle::build(state.board());

    let target = select_target(&oracle, state.board(), Coord::new(0, 3), Side::Blue).unwrap();
    assert_eq!(target.y, 8);
    assert_eq!(state.board().bricks_between_on_row(8, target.x, 4), 0);
    assert_eq!(oracle.distance(Coord::new(0, 3), target), Some(5));

    let actions = decide(&state, Side::Blue);
    assert!(matches!(actions[0], Action::Move(_)), "{}", actions[0]);
    assert_eq!(actions[1], Action::Stay);
}

#[test]
fn test_context_reuses_one_oracle() {
    let state = open_scenario();
    let ctx = DecisionContext::build(&state, Side::Blue);

    assert_eq!(ctx.side(), Side::Blue);
    assert_eq!(ctx.oracle(), &DistanceOracle::build(state.board()));
    assert!(ctx.predictions()[0].is_some());
    assert_eq!(ctx.predictions()[1], None);
    assert_eq!(ctx.decide(&state), decide(&state, Side::Blue));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The policy never answers with the invalid sentinel, and whatever it
    /// picks for a live unit is accepted by the field engine, also mid-game
    /// after shots, stacking and cleared bricks.
    #[test]
    fn prop_decisions_are_playable(
        seed in any::<u64>(),
        density in 0u8..=60,
        picks in prop::collection::vec(any::<[u8; 4]>(), 0..60)
    ) {
        let mut state = FieldState::new(generate_layout(seed, density));
        for &turn_picks in &picks {
            if state.outcome().is_finished() {
                break;
            }
            for side in Side::ALL {
                let actions = decide(&state, side);
                for (unit, action) in UnitKey::of_side(side).into_iter().zip(actions) {
                    prop_assert_ne!(action, Action::Invalid);
                    prop_assert!(
                        state.is_valid_action(unit, action),
                        "turn {}: {} chose {}", state.turn(), unit, action
                    );
                }
            }
            let joint = legal_joint(&state, turn_picks);
            state.apply(&joint).unwrap();
        }
    }

    /// Without bricks every enterable cell costs the same, so routes between
    /// two enterable cells cost the same both ways.
    #[test]
    fn prop_brick_free_distances_are_symmetric(a in 0usize..81, b in 0usize..81) {
        let state = FieldState::new([0; 3]);
        let board = state.board();
        let oracle = DistanceOracle::build(board);
        let (a, b) = (Coord::from_index(a), Coord::from_index(b));
        prop_assume!(!board.get(a).has_steel() && !board.get(b).has_steel());
        prop_assert_eq!(oracle.distance(a, b), oracle.distance(b, a));
    }
}
