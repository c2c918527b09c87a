//! `-v` and `KONGTOUR_LOG_LEVEL`. Every `-v` raises the level one step above the
//! errors-only default; the env var takes a level name or a step number.

use clap::{Arg, ArgAction, ArgMatches, Command, builder::ValueParser};
use tracing::Level;

pub const ARG_VERBOSITY: &str = "verbosity";
pub const LOG_LEVEL_ENV: &str = "KONGTOUR_LOG_LEVEL";

/// Level names by step. Step 0 keeps the subscriber default.
const LEVELS: [(&str, Level); 5] = [
    ("error", Level::ERROR),
    ("warn", Level::WARN),
    ("info", Level::INFO),
    ("debug", Level::DEBUG),
    ("trace", Level::TRACE),
];

fn parse_step(value: &str) -> Result<u8, String> {
    let value = value.trim();
    let step = match value.parse::<usize>() {
        Ok(step) => step,
        Err(_) => LEVELS
            .iter()
            .position(|(name, _)| name.eq_ignore_ascii_case(value))
            .ok_or_else(|| {
                format!("unknown log level `{value}`, expected error, warn, info, debug or trace")
            })?,
    };

    if step < LEVELS.len() {
        u8::try_from(step).map_err(|err| err.to_string())
    } else {
        Err(format!("log level must be below {}", LEVELS.len()))
    }
}

/// Tracing level for a step count; counts past the table stay at TRACE.
#[must_use]
pub fn level_for(step: u8) -> Option<Level> {
    if step == 0 {
        return None;
    }
    Some(
        LEVELS
            .get(usize::from(step))
            .map_or(Level::TRACE, |(_, level)| *level),
    )
}

#[must_use]
pub fn level(matches: &ArgMatches) -> Option<Level> {
    level_for(matches.get_one::<u8>(ARG_VERBOSITY).copied().unwrap_or(0))
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Log more: -v warn, -vv info, -vvv debug, -vvvv trace (default: errors only)")
            .env(LOG_LEVEL_ENV)
            .global(true)
            .action(ArgAction::Count)
            .value_parser(ValueParser::from(parse_step)),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_step_accepts_names_and_numbers() {
        assert_eq!(parse_step("0"), Ok(0));
        assert_eq!(parse_step("4"), Ok(4));
        assert_eq!(parse_step("WARN"), Ok(1));
        assert_eq!(parse_step(" debug "), Ok(3));
        assert!(parse_step("5").is_err());
        assert!(parse_step("loud").is_err());
    }

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0), None);
        assert_eq!(level_for(1), Some(Level::WARN));
        assert_eq!(level_for(2), Some(Level::INFO));
        assert_eq!(level_for(3), Some(Level::DEBUG));
        assert_eq!(level_for(4), Some(Level::TRACE));
        assert_eq!(level_for(9), Some(Level::TRACE));
    }

    #[test]
    fn test_repeated_flag_raises_level() {
        temp_env::with_var(LOG_LEVEL_ENV, None::<&str>, || {
            let matches = crate::cli::commands::new().get_matches_from(vec![
                "kongtour",
                "-vv",
                "reset-password",
            ]);
            assert_eq!(level(&matches), Some(Level::INFO));

            let quiet =
                crate::cli::commands::new().get_matches_from(vec!["kongtour", "reset-password"]);
            assert_eq!(level(&quiet), None);
        });
    }
}
