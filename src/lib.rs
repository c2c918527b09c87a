//! # Kong tour (login and password reset client)
//!
//! `kongtour` holds the client-side core behind the login and password reset
//! screens: input validation, the credential submission flow against the remote
//! authentication API, and the local password reset gate.
//!
//! ## Login
//!
//! 1. **Submit:** The flow POSTs `{"email", "password"}` to the configured login path.
//! 2. **Session:** The returned `accessToken` is installed into the shared
//!    [`auth::SessionHandle`]; every request built by [`auth::ApiClient`]
//!    afterwards carries `Authorization: Bearer <accessToken>`.
//! 3. **Auto login:** When the user opted in, the `refreshToken` is written to the
//!    cookie store (`path=/`, `max-age=604800`).
//! 4. **Navigate:** The flow moves to the home route.
//!
//! Any failure collapses into a single user-facing message; the underlying error
//! is logged.
//!
//! ## Password reset
//!
//! The reset flow checks presence, equality and format locally and only then
//! confirms the change and moves to the login route. No network call is made.
//!
//! Rendering is left to the caller. The bundled `kongtour` binary is a terminal
//! front-end over the same flows.

pub mod auth;
pub mod cli;
pub mod config;
pub mod errors;

pub use errors::AppError;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
