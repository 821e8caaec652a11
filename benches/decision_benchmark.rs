//! Benchmarks for the per-turn decision cycle and full local games.
//!
//! The distance table rebuild dominates a decision, so it is measured alone
//! as well as inside `decide`.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use tankwar::arena::{generate_layout, run_game, ArenaConfig, ControllerKind};
use tankwar::decision::DistanceOracle;
use tankwar::field::{FieldState, JointAction};
use tankwar::{decide, Side};

fn bench_distance_oracle(c: &mut Criterion) {
    let state = FieldState::new(generate_layout(42, 35));

    c.bench_function("distance_oracle_build", |b| {
        b.iter(|| black_box(DistanceOracle::build(black_box(state.board()))));
    });
}

fn bench_decide(c: &mut Criterion) {
    let state = FieldState::new(generate_layout(42, 35));

    c.bench_function("decide_one_side", |b| {
        b.iter(|| black_box(decide(black_box(&state), black_box(Side::Blue))));
    });
}

fn bench_apply_revert(c: &mut Criterion) {
    let mut state = FieldState::new(generate_layout(7, 35));
    let joint = JointAction::new(decide(&state, Side::Blue), decide(&state, Side::Red));

    c.bench_function("apply_revert", |b| {
        b.iter(|| {
            let _ = black_box(state.apply(black_box(&joint)));
            let _ = black_box(state.revert());
        });
    });
}

fn bench_policy_game(c: &mut Criterion) {
    let config = ArenaConfig {
        check_invariants: false,
        ..ArenaConfig::default()
    };
    let contenders = [ControllerKind::Policy, ControllerKind::Policy];

    c.bench_function("policy_vs_policy_game", |b| {
        b.iter(|| {
            let result = run_game(black_box(42), black_box(contenders), black_box(&config));
            black_box(result)
        });
    });
}

criterion_group!(benches, bench_distance_oracle, bench_decide, bench_apply_revert, bench_policy_game);
criterion_main!(benches);
