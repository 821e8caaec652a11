//! Tankwar CLI - play on the judge, run local games and view replays.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Tankwar - a deterministic 9x9 tank battle engine and bot
#[derive(Parser, Debug)]
#[command(name = "tankwar")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log decision reasoning to stderr (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Act as a bot: read judge requests on stdin, answer on stdout
    Bot {
        /// Answer one request and exit instead of keeping the process alive
        #[arg(long)]
        single_shot: bool,
    },

    /// Run a single local game
    Run {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Controller for the blue side
        #[arg(long, default_value = "policy")]
        blue: cli::Contender,

        /// Controller for the red side
        #[arg(long, default_value = "random")]
        red: cli::Contender,

        /// Brick density in percent (default: 30)
        #[arg(short, long, default_value = "30", value_parser = clap::value_parser!(u8).range(0..=100))]
        density: u8,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Save recording to file
        #[arg(long)]
        save: Option<std::path::PathBuf>,

        /// Only print the result, not the final field
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run many local games in parallel and aggregate statistics
    Arena {
        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Controller for the blue side
        #[arg(long, default_value = "policy")]
        blue: cli::Contender,

        /// Controller for the red side
        #[arg(long, default_value = "random")]
        red: cli::Contender,

        /// Brick density in percent (default: 30)
        #[arg(short, long, default_value = "30", value_parser = clap::value_parser!(u8).range(0..=100))]
        density: u8,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::ArenaFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Replay a recorded game
    Replay {
        /// Recording file (JSON)
        #[arg(required = true)]
        recording: std::path::PathBuf,

        /// Show the field after this many turns (default: every turn)
        #[arg(short, long)]
        turn: Option<usize>,
    },
}

/// Send logs to stderr; stdout belongs to the judge.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let result = match args.command {
        Commands::Bot { single_shot } => cli::bot::execute(!single_shot),

        Commands::Run {
            seed,
            blue,
            red,
            density,
            format,
            save,
            quiet,
        } => cli::run::execute(seed, [blue, red], density, format, save, quiet),

        Commands::Arena {
            games,
            seed,
            threads,
            blue,
            red,
            density,
            format,
            progress,
        } => cli::arena::execute(games, seed, threads, [blue, red], density, format, progress),

        Commands::Replay { recording, turn } => cli::replay::execute(recording, turn),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
