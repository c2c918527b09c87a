use crate::cli::{
    actions::Action,
    commands::{self, logging},
    dispatch, telemetry,
};
use anyhow::Result;

/// Parses the command line, sets up logging and hands back the action to run.
///
/// # Errors
///
/// Returns an error if logging cannot be initialized or the subcommand is incomplete
pub fn start() -> Result<Action> {
    let matches = commands::new().get_matches();

    telemetry::init(logging::level(&matches))?;

    dispatch::handler(&matches)
}
