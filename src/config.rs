//! Build-time configuration for the authentication API with runtime overrides.
//! Defaults come from `option_env!` so packaged builds can bake in an endpoint;
//! the CLI then applies whatever the user passed on the command line or through
//! the environment. Configuration values are public; do not store secrets here.

/// Default API base URL when nothing was configured at build time.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
/// Default path of the login endpoint, relative to the API base URL.
pub const DEFAULT_LOGIN_PATH: &str = "/auth/login";
/// Default request timeout (milliseconds) applied by the HTTP client.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Client configuration derived from build-time environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub login_path: String,
    pub request_timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl AppConfig {
    /// Loads config from build-time environment variables.
    #[must_use]
    pub fn load() -> Self {
        let api_base_url = option_env!("KONGTOUR_API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL);
        let login_path = option_env!("KONGTOUR_LOGIN_PATH").unwrap_or(DEFAULT_LOGIN_PATH);

        Self {
            api_base_url: api_base_url.to_string(),
            login_path: login_path.to_string(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Loads the build-time config and applies the provided overrides on top.
    #[must_use]
    pub fn with_overrides(runtime: RuntimeConfig) -> Self {
        let mut config = Self::load();
        apply_runtime_overrides(&mut config, runtime);
        config
    }
}

/// Values supplied at runtime (CLI flags or environment).
#[derive(Clone, Debug, Default)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    pub login_path: Option<String>,
    pub request_timeout_ms: Option<u64>,
}

impl RuntimeConfig {
    /// Builds overrides from raw strings, dropping blank values.
    #[must_use]
    pub fn from_raw(
        api_base_url: Option<&str>,
        login_path: Option<&str>,
        request_timeout_ms: Option<u64>,
    ) -> Self {
        Self {
            api_base_url: api_base_url.and_then(normalize_runtime_value),
            login_path: login_path.and_then(normalize_runtime_value),
            request_timeout_ms: request_timeout_ms.filter(|ms| *ms > 0),
        }
    }
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.login_path {
        config.login_path = value;
    }
    if let Some(value) = runtime.request_timeout_ms {
        config.request_timeout_ms = value;
    }
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
