use crate::config::{AppConfig, RuntimeConfig};
use std::path::PathBuf;

/// Options shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub config: AppConfig,
    pub cookie_jar: Option<PathBuf>,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            cookie_jar: None,
        }
    }

    /// Reads the global flags (also visible from subcommand matches).
    #[must_use]
    pub fn from_matches(matches: &clap::ArgMatches) -> Self {
        let runtime = RuntimeConfig::from_raw(
            matches.get_one::<String>("api-url").map(String::as_str),
            matches.get_one::<String>("login-path").map(String::as_str),
            matches.get_one::<u64>("timeout-ms").copied(),
        );

        let cookie_jar = matches
            .get_one::<String>("cookie-jar")
            .map(|path| path.trim())
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Self {
            config: AppConfig::with_overrides(runtime),
            cookie_jar,
        }
    }
}
