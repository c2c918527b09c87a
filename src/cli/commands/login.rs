use clap::{Arg, ArgAction, Command};

pub const NAME: &str = "login";

#[must_use]
pub fn command() -> Command {
    Command::new(NAME)
        .about("Sign in with email and password")
        .arg(
            Arg::new("email")
                .short('e')
                .long("email")
                .help("Account email")
                .env("KONGTOUR_EMAIL")
                .required(true),
        )
        .arg(
            Arg::new("password")
                .short('p')
                .long("password")
                .help("Account password")
                .env("KONGTOUR_PASSWORD")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new("auto-login")
                .long("auto-login")
                .help("Keep the refresh token in the cookie jar for seven days")
                .env("KONGTOUR_AUTO_LOGIN")
                .action(ArgAction::SetTrue),
        )
}
