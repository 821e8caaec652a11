//! Error types for the field engine and everything built on it.

use thiserror::Error;

use crate::field::{Action, UnitKey};

/// Recoverable failures of the field state engine.
///
/// State is left untouched whenever one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    /// A live unit was given an action that the rules reject.
    #[error("{action} is not valid for {unit}")]
    InvalidAction {
        /// The offending unit.
        unit: UnitKey,
        /// The rejected action.
        action: Action,
    },

    /// Revert was requested with no applied turn to undo.
    #[error("cannot revert past the first turn")]
    AtFirstTurn,
}

/// Failures at the judge boundary. All of these are fatal for the bot.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Reading or writing failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A turn arrived before the field layout.
    #[error("no setup request before the first turn")]
    MissingSetup,

    /// A second field layout arrived.
    #[error("setup request received after the game started")]
    DuplicateSetup,

    /// Nothing to respond to.
    #[error("input ended before any request")]
    NoRequest,

    /// A turn from the recorded history does not apply.
    #[error("history rejected at turn {turn}: {source}")]
    Rejected {
        /// Turn on which the history failed.
        turn: u32,
        /// Why the engine rejected it.
        source: FieldError,
    },
}

/// Failures while running local self-play games.
#[derive(Debug, Error)]
pub enum ArenaError {
    /// A controller produced a joint action the engine rejected.
    #[error("turn {turn} rejected: {source}")]
    Rejected {
        /// Turn on which the step failed.
        turn: u32,
        /// Why the engine rejected it.
        source: FieldError,
    },

    /// The board drifted out of sync with units, bases or terrain.
    #[error("invariant violated after turn {turn}: {message}")]
    Invariant {
        /// Turn after which the check failed.
        turn: u32,
        /// Joined violation messages.
        message: String,
    },
}

/// Failures while loading or stepping through a recording.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Reading or writing failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A recorded turn no longer applies to the reconstructed state.
    #[error("recording rejected at turn {turn}: {source}")]
    Rejected {
        /// Turn on which the recording failed.
        turn: u32,
        /// Why the engine rejected it.
        source: FieldError,
    },

    /// Stepping back from the initial position.
    #[error("already at the start of the recording")]
    AtStart,

    /// Stepping forward past the last recorded turn.
    #[error("no more recorded turns")]
    AtEnd,

    /// A jump outside the recording.
    #[error("turn {requested} out of bounds (recording has {available})")]
    TurnOutOfBounds {
        /// Requested number of applied turns.
        requested: usize,
        /// Turns in the recording.
        available: usize,
    },
}
