use clap::{Arg, ArgAction, Command};

pub const NAME: &str = "reset-password";

#[must_use]
pub fn command() -> Command {
    Command::new(NAME)
        .about("Choose a new password")
        .arg(
            Arg::new("password")
                .long("password")
                .help("New password")
                .env("KONGTOUR_NEW_PASSWORD")
                .hide_env_values(true)
                .default_value(""),
        )
        .arg(
            Arg::new("confirm-password")
                .long("confirm-password")
                .help("New password, again")
                .env("KONGTOUR_CONFIRM_PASSWORD")
                .hide_env_values(true)
                .default_value(""),
        )
        .arg(
            Arg::new("show-password")
                .long("show-password")
                .help("Print the new password in plain text")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("show-confirm-password")
                .long("show-confirm-password")
                .help("Print the confirmation in plain text")
                .action(ArgAction::SetTrue),
        )
}
