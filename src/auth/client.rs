//! HTTP client for the authentication API with a consistent timeout and error
//! mapping. Every request gets a fresh `X-Request-Id`, and once a session is
//! installed in the shared [`SessionHandle`] every request also carries the
//! bearer header. The client never logs request bodies or tokens.

use crate::{
    APP_USER_AGENT,
    auth::{
        session::SessionHandle,
        types::{Credentials, LoginResponse, TokenPair},
    },
    config::AppConfig,
    errors::AppError,
};
use reqwest::{Client, Method, RequestBuilder, Response, header::AUTHORIZATION};
use serde::{Serialize, de::DeserializeOwned};
use std::{future::Future, time::Duration};
use tracing::{debug, instrument};
use ulid::Ulid;
use url::Url;

/// Maximum number of error body characters kept in an `AppError`.
const MAX_ERROR_CHARS: usize = 200;
const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Remote authentication endpoint.
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for a token pair.
    ///
    /// Rejects on transport failure, non-2xx status or an undecodable body.
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<TokenPair, AppError>> + Send;
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    config: AppConfig,
    http: Client,
    session: SessionHandle,
}

impl ApiClient {
    /// Builds a client that reads the bearer token from `session`.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the base URL is not an http(s) URL or the
    /// underlying HTTP client cannot be built.
    pub fn new(config: AppConfig, session: SessionHandle) -> Result<Self, AppError> {
        let base = Url::parse(config.api_base_url.trim()).map_err(|err| {
            AppError::Config(format!(
                "Invalid API base URL {}: {err}",
                config.api_base_url
            ))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "Unsupported API URL scheme: {}",
                base.scheme()
            )));
        }

        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            config,
            http,
            session,
        })
    }

    #[must_use]
    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Fetches JSON, attaching the session header when present.
    ///
    /// # Errors
    /// Returns an `AppError` for transport failures, non-2xx responses or bad JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self
            .request(Method::GET, path)
            .send()
            .await
            .map_err(map_request_error)?;

        handle_json_response(response).await
    }

    /// Posts JSON and parses a JSON response.
    ///
    /// # Errors
    /// Returns an `AppError` for transport failures, non-2xx responses or bad JSON.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self
            .request(Method::POST, path)
            .json(body)
            .send()
            .await
            .map_err(map_request_error)?;

        handle_json_response(response).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = build_url_with_base(&self.config.api_base_url, path);
        let request_id = Ulid::new().to_string();
        debug!("{method} {url} request_id={request_id}");

        let mut builder = self
            .http
            .request(method, url)
            .header(REQUEST_ID_HEADER, request_id);

        if let Some(value) = self.session.authorization_header() {
            builder = builder.header(AUTHORIZATION, value);
        }

        builder
    }
}

impl AuthApi for ApiClient {
    #[instrument(skip(self, credentials))]
    async fn login(&self, credentials: &Credentials) -> Result<TokenPair, AppError> {
        let response: LoginResponse = self
            .post_json(&self.config.login_path, &credentials.to_request())
            .await?;

        Ok(TokenPair::from(response))
    }
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps transport errors into `AppError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Http {
            status: status.as_u16(),
            message: sanitize_body(&body),
        })
    }
}

/// Trims and truncates error bodies before they reach an error message.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
