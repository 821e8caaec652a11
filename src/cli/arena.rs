//! Arena command implementation.

use super::output::{format_arena_csv, format_arena_text, JsonArenaResult};
use super::{seed_or_random, ArenaFormat, CliError, Contender};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;
use tankwar::arena::{run_batch, ArenaConfig, BatchStats, ControllerKind};

/// Games per parallel batch between progress updates.
const CHUNK_GAMES: u64 = 256;

/// Execute the arena command.
///
/// # Errors
///
/// Returns an error if output cannot be produced.
pub(crate) fn execute(
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    contenders: [Contender; 2],
    density: u8,
    format: ArenaFormat,
    progress: bool,
) -> Result<(), CliError> {
    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed_or_random(seed);
    let kinds: [ControllerKind; 2] = contenders.map(Into::into);
    let config = ArenaConfig {
        brick_density: density,
        ..ArenaConfig::default()
    };

    let pb = if progress {
        let pb = ProgressBar::new(games);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Each chunk runs as one rayon fold/reduce; chunks merge in seed order.
    let mut stats = BatchStats::default();
    let mut done = 0;
    while done < games {
        let chunk = CHUNK_GAMES.min(games - done);
        let partial = run_batch(base_seed.wrapping_add(done), chunk, kinds, &config);
        stats.merge(&partial);
        done += chunk;
        if let Some(pb) = &pb {
            pb.set_position(done);
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();

    #[allow(clippy::cast_precision_loss)]
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        games as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        ArenaFormat::Text => {
            println!();
            print!("{}", format_arena_text(&stats, kinds));
            println!();
            println!("Seeds: {base_seed}..{}", base_seed.wrapping_add(games));
            println!("Duration: {:.2}s ({games_per_sec:.0} games/sec)", duration.as_secs_f64());
        }
        ArenaFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonArenaResult::from_stats(&stats, kinds))?;
            println!("{json}");
        }
        ArenaFormat::Csv => {
            print!("{}", format_arena_csv(&stats, kinds));
        }
    }

    Ok(())
}
