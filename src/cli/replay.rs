//! Replay command implementation.

use super::CliError;
use std::path::PathBuf;
use tankwar::replay::{Recording, ReplayEngine};

/// Execute the replay command.
///
/// With `turn` the field after that many turns is printed; otherwise every
/// position from the start to the end of the recording.
///
/// # Errors
///
/// Returns an error if the recording cannot be loaded or replayed.
pub(crate) fn execute(recording_path: PathBuf, turn: Option<usize>) -> Result<(), CliError> {
    let recording = Recording::load(&recording_path).map_err(|e| {
        CliError::new(format!("Failed to load recording {}: {e}", recording_path.display()))
    })?;

    if let Some(target_turn) = turn {
        let engine = ReplayEngine::new_at_turn(recording, target_turn)?;
        print!("{}", engine.render_ascii());
        return Ok(());
    }

    let mut engine = ReplayEngine::new(recording);
    println!("Seed: {}", engine.recording().seed);
    loop {
        println!();
        print!("{}", engine.render_ascii());
        if engine.at_end() {
            break;
        }
        engine.step_forward()?;
    }

    Ok(())
}
