//! Terminal stand-ins for the router and the alert box.

use crate::auth::{Navigator, Notifier, Route};
use std::sync::{Mutex, PoisonError};
use tracing::info;

/// Prints route changes and remembers the last one.
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    current: Mutex<Option<Route>>,
}

impl TerminalNavigator {
    #[must_use]
    pub fn current(&self) -> Option<Route> {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        info!("navigate to {route}");
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(route);
        println!("-> {route}");
    }
}

#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str) {
        println!("{message}");
    }
}
