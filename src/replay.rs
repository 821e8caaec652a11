//! Game recordings and replay.
//!
//! The field engine is fully deterministic, so a recording needs only:
//! - `bricks: [u32; 3]` - The initial brick masks
//! - `turns: Vec<JointAction>` - Every joint action, in order
//!
//! # Time Travel
//!
//! - **Forward**: Apply the next recorded joint action
//! - **Backward**: Revert through the disappearance log
//! - **Jump to turn N**: Step either way until N turns are applied

mod render;

pub use render::render_ascii;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ReplayError;
use crate::field::{FieldState, JointAction, BRICK_MASK_COUNT};

/// Everything needed to replay a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    /// Seed the layout came from (informational).
    pub seed: u64,
    /// Initial brick masks.
    pub bricks: [u32; BRICK_MASK_COUNT],
    /// `turns[i]` was applied on turn `i + 1`.
    pub turns: Vec<JointAction>,
}

impl Recording {
    /// An empty recording for a layout.
    #[must_use]
    pub const fn new(seed: u64, bricks: [u32; BRICK_MASK_COUNT]) -> Self {
        Self {
            seed,
            bricks,
            turns: Vec::new(),
        }
    }

    /// Save as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ReplayError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Load from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Replay engine - steps through a recording with apply and revert.
#[derive(Debug, Clone)]
pub struct ReplayEngine {
    /// The recording being replayed.
    recording: Recording,
    /// Current field state.
    state: FieldState,
}

impl ReplayEngine {
    /// Start at the initial position.
    #[must_use]
    pub fn new(recording: Recording) -> Self {
        let state = FieldState::new(recording.bricks);
        Self { recording, state }
    }

    /// Start after `applied` turns.
    ///
    /// # Errors
    ///
    /// Returns an error if `applied` exceeds the recording or a turn is
    /// rejected.
    pub fn new_at_turn(recording: Recording, applied: usize) -> Result<Self, ReplayError> {
        let mut engine = Self::new(recording);
        engine.goto_turn(applied)?;
        Ok(engine)
    }

    /// Get the recording.
    #[must_use]
    pub const fn recording(&self) -> &Recording {
        &self.recording
    }

    /// Get current field state.
    #[must_use]
    pub const fn state(&self) -> &FieldState {
        &self.state
    }

    /// Number of recorded turns applied so far.
    #[must_use]
    pub fn applied(&self) -> usize {
        self.state.history().len() - 1
    }

    /// Whether every recorded turn has been applied.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.applied() >= self.recording.turns.len()
    }

    /// Apply the next recorded turn.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::AtEnd`] past the last turn, or
    /// [`ReplayError::Rejected`] if the turn does not apply.
    pub fn step_forward(&mut self) -> Result<(), ReplayError> {
        let Some(joint) = self.recording.turns.get(self.applied()) else {
            return Err(ReplayError::AtEnd);
        };
        let turn = self.state.turn();
        self.state
            .apply(joint)
            .map_err(|source| ReplayError::Rejected { turn, source })
    }

    /// Revert the last applied turn.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::AtStart`] at the initial position.
    pub fn step_backward(&mut self) -> Result<(), ReplayError> {
        self.state.revert().map_err(|_| ReplayError::AtStart)
    }

    /// Move to the position after `applied` turns.
    ///
    /// # Errors
    ///
    /// Returns an error if `applied` exceeds the recording or a turn is
    /// rejected.
    pub fn goto_turn(&mut self, applied: usize) -> Result<(), ReplayError> {
        if applied > self.recording.turns.len() {
            return Err(ReplayError::TurnOutOfBounds {
                requested: applied,
                available: self.recording.turns.len(),
            });
        }
        while self.applied() > applied {
            self.step_backward()?;
        }
        while self.applied() < applied {
            self.step_forward()?;
        }
        Ok(())
    }

    /// Render current state to ASCII for terminal viewing.
    #[must_use]
    pub fn render_ascii(&self) -> String {
        render_ascii(&self.state)
    }
}
