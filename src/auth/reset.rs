//! Password reset flow: two password fields, their visibility toggles, one
//! error string and a `finish` operation that gates on presence, equality and
//! format. The change is confirmed locally; nothing is sent to the server.

use crate::auth::{
    routes::{Navigator, Notifier, Route},
    validation::is_valid_password,
};
use secrecy::{ExposeSecret, SecretString};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

pub const BOTH_FIELDS_REQUIRED_MESSAGE: &str = "Please fill out both password fields.";
pub const INVALID_PASSWORD_MESSAGE: &str = "Invalid value entered, please check the password.";
pub const PASSWORDS_DO_NOT_MATCH_MESSAGE: &str = "Passwords do not match";
pub const PASSWORD_CHANGED_MESSAGE: &str = "Your password has been changed.";

/// How a password field is rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputType {
    #[default]
    Password,
    Text,
}

impl InputType {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            InputType::Password => InputType::Text,
            InputType::Text => InputType::Password,
        }
    }

    #[must_use]
    pub const fn is_obscured(self) -> bool {
        matches!(self, InputType::Password)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            InputType::Password => "password",
            InputType::Text => "text",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetOutcome {
    Completed,
    Rejected,
}

#[derive(Default)]
struct ResetForm {
    password: SecretString,
    confirm_password: SecretString,
    password_input: InputType,
    confirm_input: InputType,
    error: Option<String>,
}

pub struct ResetPasswordFlow {
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    form: Mutex<ResetForm>,
}

impl ResetPasswordFlow {
    #[must_use]
    pub fn new(navigator: Arc<dyn Navigator>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            navigator,
            notifier,
            form: Mutex::new(ResetForm::default()),
        }
    }

    pub fn set_password(&self, password: SecretString) {
        self.form().password = password;
    }

    pub fn set_confirm_password(&self, confirm_password: SecretString) {
        self.form().confirm_password = confirm_password;
    }

    /// Flips the first field between obscured and plain text.
    pub fn toggle_password_visibility(&self) -> InputType {
        let mut form = self.form();
        form.password_input = form.password_input.toggled();
        form.password_input
    }

    /// Flips the confirmation field between obscured and plain text.
    pub fn toggle_confirm_visibility(&self) -> InputType {
        let mut form = self.form();
        form.confirm_input = form.confirm_input.toggled();
        form.confirm_input
    }

    #[must_use]
    pub fn password_input_type(&self) -> InputType {
        self.form().password_input
    }

    #[must_use]
    pub fn confirm_input_type(&self) -> InputType {
        self.form().confirm_input
    }

    /// Error string from the last `finish` attempt.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.form().error.clone()
    }

    /// Live mismatch indicator, independent of `finish`.
    #[must_use]
    pub fn shows_mismatch(&self) -> bool {
        let form = self.form();
        let confirm = form.confirm_password.expose_secret();
        !confirm.is_empty() && confirm != form.password.expose_secret()
    }

    /// Runs the presence and consistency gates, then confirms the change.
    pub fn finish(&self) -> ResetOutcome {
        {
            let mut form = self.form();
            let password = form.password.expose_secret();
            let confirm = form.confirm_password.expose_secret();

            let rejection = if password.is_empty() || confirm.is_empty() {
                Some(BOTH_FIELDS_REQUIRED_MESSAGE)
            } else if password != confirm || !is_valid_password(password) {
                Some(INVALID_PASSWORD_MESSAGE)
            } else {
                None
            };

            form.error = rejection.map(str::to_string);
            if form.error.is_some() {
                return ResetOutcome::Rejected;
            }
        }

        info!("password reset confirmed");
        self.notifier.notify(PASSWORD_CHANGED_MESSAGE);
        self.navigator.navigate(Route::Login);
        ResetOutcome::Completed
    }

    fn form(&self) -> MutexGuard<'_, ResetForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
