//! Recording collaborators shared by the flow tests.

use crate::{
    auth::{
        client::AuthApi,
        routes::{Navigator, Notifier, Route},
        types::{Credentials, TokenPair},
    },
    errors::AppError,
};
use secrecy::{ExposeSecret, SecretString};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use tokio::sync::Notify;

#[derive(Default)]
pub(crate) struct RecordingNavigator {
    pub routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    pub messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

pub(crate) fn token_pair(access: &str, refresh: &str) -> TokenPair {
    TokenPair {
        access_token: SecretString::from(access.to_string()),
        refresh_token: SecretString::from(refresh.to_string()),
    }
}

/// Canned `AuthApi`; optionally parks every call until `gate` is notified.
pub(crate) struct FakeAuthApi {
    result: Result<TokenPair, AppError>,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
    last_email: Mutex<Option<String>>,
    last_password: Mutex<Option<String>>,
}

impl FakeAuthApi {
    pub fn new(result: Result<TokenPair, AppError>) -> Self {
        Self {
            result,
            gate: None,
            calls: AtomicUsize::new(0),
            last_email: Mutex::new(None),
            last_password: Mutex::new(None),
        }
    }

    pub fn gated(result: Result<TokenPair, AppError>, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(result)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_email(&self) -> Option<String> {
        self.last_email.lock().unwrap().clone()
    }

    pub fn last_password(&self) -> Option<String> {
        self.last_password.lock().unwrap().clone()
    }
}

impl AuthApi for FakeAuthApi {
    async fn login(&self, credentials: &Credentials) -> Result<TokenPair, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_email.lock().unwrap() = Some(credentials.email.clone());
        *self.last_password.lock().unwrap() =
            Some(credentials.password.expose_secret().to_string());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        self.result.clone()
    }
}
