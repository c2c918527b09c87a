use std::fmt;

/// Errors raised by the HTTP client, configuration and cookie storage.
///
/// Flows never surface these to the user directly; they collapse them into
/// fixed messages and log the detail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppError {
    Config(String),
    Network(String),
    Timeout(String),
    Http { status: u16, message: String },
    Parse(String),
    Serialization(String),
    Storage(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(message) => write!(formatter, "Config error: {message}"),
            AppError::Network(message) => write!(formatter, "Network error: {message}"),
            AppError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            AppError::Http { status, message } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            AppError::Parse(message) => write!(formatter, "Response error: {message}"),
            AppError::Serialization(message) => {
                write!(formatter, "Request error: {message}")
            }
            AppError::Storage(message) => write!(formatter, "Storage error: {message}"),
        }
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn http_error_includes_status() {
        let err = AppError::Http {
            status: 401,
            message: "bad credentials".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed (401): bad credentials");
    }

    #[test]
    fn storage_error_display() {
        let err = AppError::Storage("disk full".to_string());
        assert_eq!(err.to_string(), "Storage error: disk full");
    }
}
