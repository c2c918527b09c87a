//! Navigation targets and the presentation-side callbacks the flows use.
//! The router and the alert surface belong to the front-end; flows only see
//! these traits.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    SignUp,
    FindPassword,
}

impl Route {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::SignUp => "/sign-up",
            Route::FindPassword => "/find-password",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Router owned by the presentation layer.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Blocking notice surface (an alert box in a browser).
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}
