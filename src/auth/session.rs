//! In-memory session shared between the login flow and the HTTP client. The
//! flow installs a session once per successful login; the client reads it when
//! building requests and attaches the bearer header. The access token stays
//! wrapped in `SecretString` and is only exposed while formatting the header.

use secrecy::{ExposeSecret, SecretString};
use std::sync::{Arc, PoisonError, RwLock};

/// Access token obtained by a successful login.
#[derive(Clone, Debug)]
pub struct Session {
    access_token: SecretString,
}

impl Session {
    #[must_use]
    pub fn new(access_token: SecretString) -> Self {
        Self { access_token }
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.access_token.expose_secret())
    }
}

/// Cloneable handle to the current session, injected into the client.
#[derive(Clone, Debug, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current session.
    pub fn install(&self, session: Session) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(session);
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// `Bearer <token>` when a session is installed.
    #[must_use]
    pub fn authorization_header(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(Session::authorization_header)
    }
}
