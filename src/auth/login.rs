//! Credential submission flow behind the login screen.
//!
//! The flow owns the form fields (email, password, auto login) and a single
//! `submit` operation. A successful login installs the access token into the
//! shared [`SessionHandle`], optionally persists the refresh token as a cookie
//! and moves to the home route. Any failure shows one fixed message; the real
//! error only goes to the log.
//!
//! Submissions are single-flight: while one call is pending, further calls
//! return [`LoginOutcome::AlreadyPending`] without touching the network.

use crate::auth::{
    client::AuthApi,
    cookies::{Cookie, CookieStore, unix_now},
    routes::{Navigator, Notifier, Route},
    session::{Session, SessionHandle},
    types::{Credentials, TokenPair},
};
use secrecy::SecretString;
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicBool, Ordering},
};
use tracing::{debug, error, info};

/// Shown for every failed login, whatever the cause.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please check your email or password.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Idle,
    Pending,
    Settled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    LoggedIn,
    Failed,
    AlreadyPending,
}

struct LoginForm {
    email: String,
    password: SecretString,
    auto_login: bool,
    state: SubmitState,
}

pub struct LoginFlow<A> {
    api: A,
    session: SessionHandle,
    cookies: Arc<dyn CookieStore>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    form: Mutex<LoginForm>,
    in_flight: AtomicBool,
}

impl<A: AuthApi> LoginFlow<A> {
    #[must_use]
    pub fn new(
        api: A,
        session: SessionHandle,
        cookies: Arc<dyn CookieStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            session,
            cookies,
            navigator,
            notifier,
            form: Mutex::new(LoginForm {
                email: String::new(),
                password: SecretString::default(),
                auto_login: false,
                state: SubmitState::Idle,
            }),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn set_email(&self, email: impl Into<String>) {
        self.form().email = email.into();
    }

    pub fn set_password(&self, password: SecretString) {
        self.form().password = password;
    }

    pub fn set_auto_login(&self, auto_login: bool) {
        self.form().auto_login = auto_login;
    }

    #[must_use]
    pub fn auto_login(&self) -> bool {
        self.form().auto_login
    }

    #[must_use]
    pub fn state(&self) -> SubmitState {
        self.form().state
    }

    /// The submit trigger is disabled while a call is in flight.
    #[must_use]
    pub fn is_submit_disabled(&self) -> bool {
        self.state() == SubmitState::Pending
    }

    /// Sends the current credentials to the authentication endpoint.
    ///
    /// Empty fields are sent as-is; the endpoint decides.
    pub async fn submit(&self) -> LoginOutcome {
        let Some(guard) = InFlightGuard::acquire(&self.in_flight, &self.form) else {
            debug!("login already in flight, ignoring submit");
            return LoginOutcome::AlreadyPending;
        };

        let (credentials, auto_login) = {
            let form = self.form();
            (
                Credentials::new(form.email.clone(), form.password.clone()),
                form.auto_login,
            )
        };

        let result = self.api.login(&credentials).await;
        drop(guard);

        match result {
            Ok(tokens) => {
                self.complete_login(tokens, auto_login);
                LoginOutcome::LoggedIn
            }
            Err(err) => {
                error!("Error logging in: {err}");
                self.notifier.notify(LOGIN_FAILED_MESSAGE);
                LoginOutcome::Failed
            }
        }
    }

    fn complete_login(&self, tokens: TokenPair, auto_login: bool) {
        self.session.install(Session::new(tokens.access_token));

        if auto_login {
            let cookie = Cookie::refresh_token(&tokens.refresh_token, unix_now());
            if let Err(err) = self.cookies.set(cookie) {
                // still logged in for this run, but auto login was asked for
                error!("Failed to persist refresh token: {err}");
            }
        }

        info!("login succeeded, auto_login={auto_login}");
        self.navigator.navigate(Route::Home);
    }

    fn form(&self) -> MutexGuard<'_, LoginForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds the single-flight slot; releasing it (also on drop of a cancelled
/// submit) marks the flow as settled.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
    form: &'a Mutex<LoginForm>,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool, form: &'a Mutex<LoginForm>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        form.lock().unwrap_or_else(PoisonError::into_inner).state = SubmitState::Pending;
        Some(Self { flag, form })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.form.lock().unwrap_or_else(PoisonError::into_inner).state = SubmitState::Settled;
        self.flag.store(false, Ordering::Release);
    }
}
