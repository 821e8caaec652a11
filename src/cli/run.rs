//! Run command implementation.

use super::output::{format_game_text, JsonGameResult};
use super::{seed_or_random, CliError, Contender, OutputFormat};
use std::path::PathBuf;
use tankwar::arena::{run_game, ArenaConfig, ControllerKind};
use tankwar::replay::ReplayEngine;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the game aborts or the recording cannot be saved.
pub(crate) fn execute(
    seed: Option<u64>,
    contenders: [Contender; 2],
    density: u8,
    format: OutputFormat,
    save: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let seed = seed_or_random(seed);
    let config = ArenaConfig {
        brick_density: density,
        ..ArenaConfig::default()
    };
    let kinds: [ControllerKind; 2] = contenders.map(Into::into);
    let result = run_game(seed, kinds, &config)?;

    if let Some(path) = save {
        result.recording.save(&path).map_err(|e| {
            CliError::new(format!("Failed to save recording {}: {e}", path.display()))
        })?;
    }

    match format {
        OutputFormat::Text => {
            if !quiet {
                let applied = result.recording.turns.len();
                let engine = ReplayEngine::new_at_turn(result.recording.clone(), applied)?;
                print!("{}", engine.render_ascii());
                println!();
            }
            print!("{}", format_game_text(&result, kinds));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonGameResult::from_game_result(&result, kinds))?;
            println!("{json}");
        }
    }

    Ok(())
}
