//! Shared helpers for command handlers.

use pulsewatch_core::{QuerySnapshot, QueryState, Subscription};

use crate::error::CliError;

/// Wait for a subscription's first resolution and surface failures.
///
/// A snapshot that settled in `Error` without any cached data becomes a
/// `CliError`; stale-but-present data is returned alongside a warning so
/// one flaky poll doesn't blank the output.
pub async fn settle(sub: &mut Subscription) -> Result<QuerySnapshot, CliError> {
    let snap = sub.settled().await;
    if snap.state == QueryState::Error {
        let message = snap
            .error
            .as_ref()
            .map_or_else(|| "unknown query failure".into(), ToString::to_string);
        if snap.data.is_none() {
            return Err(CliError::Query { message });
        }
        eprintln!("warning: showing stale data ({message})");
    }
    Ok(snap)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}
