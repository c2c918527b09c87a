//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action that drives one of the flows.

use crate::cli::{
    actions::{Action, login, reset_password},
    commands,
    globals::GlobalArgs,
};
use anyhow::{Context, Result, anyhow};
use secrecy::SecretString;

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if the subcommand or one of its required arguments is missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some((commands::login::NAME, sub)) => {
            let email = sub
                .get_one::<String>("email")
                .cloned()
                .context("missing required argument: --email")?;
            let password = sub
                .get_one::<String>("password")
                .cloned()
                .context("missing required argument: --password")?;

            Ok(Action::Login(login::Args {
                globals: GlobalArgs::from_matches(sub),
                email,
                password: SecretString::from(password),
                auto_login: sub.get_flag("auto-login"),
            }))
        }
        Some((commands::reset::NAME, sub)) => {
            let password = sub.get_one::<String>("password").cloned().unwrap_or_default();
            let confirm_password = sub
                .get_one::<String>("confirm-password")
                .cloned()
                .unwrap_or_default();

            Ok(Action::ResetPassword(reset_password::Args {
                password: SecretString::from(password),
                confirm_password: SecretString::from(confirm_password),
                show_password: sub.get_flag("show-password"),
                show_confirm_password: sub.get_flag("show-confirm-password"),
            }))
        }
        Some((name, _)) => Err(anyhow!("unknown command: {name}")),
        None => Err(anyhow!("missing command, try --help")),
    }
}
