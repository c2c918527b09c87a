pub mod logging;
pub mod login;
pub mod reset;

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("kongtour")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .help("Base URL of the authentication API")
                .env("KONGTOUR_API_URL")
                .global(true),
        )
        .arg(
            Arg::new("login-path")
                .long("login-path")
                .help("Path of the login endpoint, relative to --api-url")
                .env("KONGTOUR_LOGIN_PATH")
                .global(true),
        )
        .arg(
            Arg::new("timeout-ms")
                .long("timeout-ms")
                .help("Request timeout in milliseconds")
                .env("KONGTOUR_TIMEOUT_MS")
                .global(true)
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("cookie-jar")
                .long("cookie-jar")
                .help("File where the refresh token is kept when --auto-login is set")
                .env("KONGTOUR_COOKIE_JAR")
                .global(true),
        )
        .subcommand(login::command())
        .subcommand(reset::command());

    logging::with_args(command)
}
