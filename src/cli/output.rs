//! Output formatting utilities for CLI.

use serde::Serialize;
use std::fmt::Write;
use tankwar::arena::{BatchStats, ControllerKind, GameResult};
use tankwar::{Outcome, Side};

/// JSON-serializable game result.
#[derive(Debug, Serialize)]
pub(super) struct JsonGameResult {
    /// Random seed used.
    seed: u64,
    /// Winning side (null if draw).
    winner: Option<Side>,
    /// Total turns played.
    turns_played: u32,
    /// Controller per side (blue, red).
    controllers: [ControllerKind; 2],
}

impl JsonGameResult {
    /// Create from a GameResult.
    pub(super) fn from_game_result(result: &GameResult, controllers: [ControllerKind; 2]) -> Self {
        Self {
            seed: result.seed,
            winner: winner(result.outcome),
            turns_played: result.turns_played,
            controllers,
        }
    }
}

fn winner(outcome: Outcome) -> Option<Side> {
    match outcome {
        Outcome::Win(side) => Some(side),
        Outcome::Draw | Outcome::NotFinished => None,
    }
}

/// Format a game result as human-readable text.
pub(super) fn format_game_text(result: &GameResult, controllers: [ControllerKind; 2]) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Game Result (seed: {})", result.seed);
    let _ = writeln!(output, "  blue: {}", controllers[0]);
    let _ = writeln!(output, "  red:  {}", controllers[1]);
    match winner(result.outcome) {
        Some(side) => {
            let _ = writeln!(output, "  Winner: {side} ({})", controllers[side.index()]);
        }
        None => output.push_str("  Winner: Draw\n"),
    }
    let _ = writeln!(output, "  Turns: {}", result.turns_played);

    output
}

/// Win rate of a side (0.0-1.0).
#[allow(clippy::cast_precision_loss)]
fn win_rate(stats: &BatchStats, side: Side) -> f64 {
    if stats.games_played == 0 {
        return 0.0;
    }
    stats.wins[side.index()] as f64 / stats.games_played as f64
}

/// JSON-serializable arena result.
#[derive(Debug, Serialize)]
pub(super) struct JsonArenaResult {
    /// Total games played.
    games_played: u64,
    /// Per-side statistics.
    sides: Vec<JsonArenaSide>,
    /// Number of draws.
    draws: u64,
    /// Games aborted by an error.
    errors: u64,
    /// Average game length in turns.
    avg_turns: f64,
}

/// JSON-serializable per-side arena stats.
#[derive(Debug, Serialize)]
pub(super) struct JsonArenaSide {
    /// Side played.
    side: Side,
    /// Controller name.
    controller: ControllerKind,
    /// Number of wins.
    wins: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
}

impl JsonArenaResult {
    /// Create from stats and controllers.
    pub(super) fn from_stats(stats: &BatchStats, controllers: [ControllerKind; 2]) -> Self {
        let sides = Side::ALL
            .iter()
            .map(|&side| JsonArenaSide {
                side,
                controller: controllers[side.index()],
                wins: stats.wins[side.index()],
                win_rate: win_rate(stats, side),
            })
            .collect();

        Self {
            games_played: stats.games_played,
            sides,
            draws: stats.draws,
            errors: stats.errors,
            avg_turns: stats.average_turns(),
        }
    }
}

/// Format arena stats as human-readable text.
#[allow(clippy::cast_precision_loss)]
pub(super) fn format_arena_text(stats: &BatchStats, controllers: [ControllerKind; 2]) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Arena Results ({} games)", stats.games_played);
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for side in Side::ALL {
        let _ = writeln!(
            output,
            "  {side} ({}): {:.1}% ({} wins)",
            controllers[side.index()],
            win_rate(stats, side) * 100.0,
            stats.wins[side.index()]
        );
    }
    let draw_rate = if stats.games_played == 0 {
        0.0
    } else {
        stats.draws as f64 / stats.games_played as f64 * 100.0
    };
    let _ = writeln!(output, "  Draws: {} ({draw_rate:.1}%)", stats.draws);
    if stats.errors > 0 {
        let _ = writeln!(output, "  Aborted: {}", stats.errors);
    }

    let _ = writeln!(output, "\nAverage Game Length: {:.1} turns", stats.average_turns());

    output
}

/// Format arena stats as CSV.
pub(super) fn format_arena_csv(stats: &BatchStats, controllers: [ControllerKind; 2]) -> String {
    let mut output = String::new();

    // Header
    output.push_str("side,controller,wins,win_rate,draws,avg_turns\n");

    for side in Side::ALL {
        let _ = writeln!(
            output,
            "{side},{},{},{:.4},{},{:.2}",
            controllers[side.index()],
            stats.wins[side.index()],
            win_rate(stats, side),
            stats.draws,
            stats.average_turns()
        );
    }

    output
}
