//! Command dispatch: bridges CLI args -> core view models -> output formatting.

pub mod config_cmd;
pub mod manual;
pub mod monitoring;
pub mod posts;
pub mod reports;
pub mod stats;
pub mod util;

use pulsewatch_core::Session;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a command to the appropriate handler.
pub async fn dispatch(cmd: Command, session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Posts(args) => posts::handle(session, args, global).await,
        Command::Stats => stats::handle(session, global).await,
        Command::Monitoring(args) => monitoring::handle(session, args, global).await,
        Command::Manual(args) => manual::handle(session, args, global).await,
        Command::Config(args) => config_cmd::handle(session, args, global).await,
        Command::Reports(args) => reports::handle(session, args, global).await,
    }
}
