//! Auth feature module covering input validation, the credential submission
//! flow and the password reset flow. It keeps authentication logic out of the
//! presentation layer, which only feeds field values in and reacts to the
//! collaborators (`Navigator`, `Notifier`) the flows call back into. This module
//! touches security boundaries and must avoid logging secrets or token material.

pub mod client;
pub mod cookies;
pub mod login;
pub mod reset;
pub mod routes;
pub mod session;
#[cfg(test)]
pub(crate) mod testing;
pub mod types;
pub mod validation;

pub use client::{ApiClient, AuthApi};
pub use cookies::{Cookie, CookieStore, FileCookieStore, MemoryCookieStore};
pub use login::{LoginFlow, LoginOutcome, SubmitState};
pub use reset::{InputType, ResetOutcome, ResetPasswordFlow};
pub use routes::{Navigator, Notifier, Route};
pub use session::{Session, SessionHandle};
pub use types::{Credentials, TokenPair};
