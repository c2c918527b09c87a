//! Request and response types for the login endpoint. These payloads carry
//! passwords and tokens, so they must never be logged.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Email and password as typed into the login form.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: SecretString) -> Self {
        Self {
            email: email.into(),
            password,
        }
    }

    /// Borrowed wire form of the credentials, built right before sending.
    pub(crate) fn to_request(&self) -> LoginRequest<'_> {
        LoginRequest {
            email: &self.email,
            password: self.password.expose_secret(),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// Tokens returned by a successful login.
#[derive(Clone, Debug)]
pub struct TokenPair {
    pub access_token: SecretString,
    pub refresh_token: SecretString,
}

impl From<LoginResponse> for TokenPair {
    fn from(response: LoginResponse) -> Self {
        Self {
            access_token: SecretString::from(response.access_token),
            refresh_token: SecretString::from(response.refresh_token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_serialization() {
        let credentials = Credentials::new(
            "traveler@kongtour.dev",
            SecretString::from("Abcdef1!".to_string()),
        );
        let json = serde_json::to_value(credentials.to_request()).expect("Failed to serialize");
        assert_eq!(json["email"], "traveler@kongtour.dev");
        assert_eq!(json["password"], "Abcdef1!");
    }

    #[test]
    fn test_login_response_uses_camel_case() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"accessToken":"access","refreshToken":"refresh"}"#)
                .expect("Failed to deserialize");
        let tokens = TokenPair::from(response);
        assert_eq!(tokens.access_token.expose_secret(), "access");
        assert_eq!(tokens.refresh_token.expose_secret(), "refresh");
    }

    #[test]
    fn test_login_response_rejects_missing_refresh_token() {
        let response = serde_json::from_str::<LoginResponse>(r#"{"accessToken":"access"}"#);
        assert!(response.is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let credentials = Credentials::new(
            "traveler@kongtour.dev",
            SecretString::from("Abcdef1!".to_string()),
        );
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("traveler@kongtour.dev"));
        assert!(!rendered.contains("Abcdef1!"));
    }
}
