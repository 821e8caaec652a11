//! CLI command implementations for Tankwar.

pub(crate) mod arena;
pub(crate) mod bot;
pub(crate) mod replay;
pub(crate) mod run;

mod output;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;
use tankwar::arena::ControllerKind;

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `arena` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ArenaFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// Who plays a side in local games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Contender {
    /// The decision engine.
    Policy,
    /// Uniformly random valid actions.
    Random,
}

impl From<Contender> for ControllerKind {
    fn from(contender: Contender) -> Self {
        match contender {
            Contender::Policy => ControllerKind::Policy,
            Contender::Random => ControllerKind::Random,
        }
    }
}

/// Seed from the clock when none was given.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn seed_or_random(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    })
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}

impl From<tankwar::ProtocolError> for CliError {
    fn from(e: tankwar::ProtocolError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<tankwar::ArenaError> for CliError {
    fn from(e: tankwar::ArenaError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<tankwar::ReplayError> for CliError {
    fn from(e: tankwar::ReplayError) -> Self {
        Self::new(e.to_string())
    }
}
