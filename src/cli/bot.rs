//! Bot command implementation.

use super::CliError;
use std::io;
use tankwar::Agent;
use tracing::info;

/// Serve the judge on stdin/stdout until input ends.
///
/// # Errors
///
/// Returns an error on malformed input, a rejected turn, or I/O failure.
pub(crate) fn execute(keep_running: bool) -> Result<(), CliError> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    let mut agent = Agent::new();
    let answered = agent.serve(stdin.lock(), stdout.lock(), keep_running)?;
    info!(answered, "judge closed input");
    Ok(())
}
