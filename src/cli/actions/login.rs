use crate::{
    auth::{
        ApiClient, CookieStore, FileCookieStore, LoginFlow, LoginOutcome, MemoryCookieStore,
        Route, SessionHandle, validation::is_valid_email,
    },
    cli::{
        actions::terminal::{TerminalNavigator, TerminalNotifier},
        globals::GlobalArgs,
    },
};
use anyhow::{Result, bail};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub email: String,
    pub password: SecretString,
    pub auto_login: bool,
}

/// Picks the cookie jar: the file when one is configured, memory otherwise.
fn cookie_store(globals: &GlobalArgs, auto_login: bool) -> Arc<dyn CookieStore> {
    match &globals.cookie_jar {
        Some(path) => {
            debug!("using cookie jar {}", path.display());
            Arc::new(FileCookieStore::new(path))
        }
        None => {
            if auto_login {
                warn!("no cookie jar configured, the refresh token will not outlive this run");
            }
            Arc::new(MemoryCookieStore::new())
        }
    }
}

/// Execute the login action.
/// # Errors
/// Returns an error if the HTTP client cannot be built or the login fails.
pub async fn execute(args: Args) -> Result<()> {
    if !is_valid_email(&args.email) {
        warn!("email does not look like an address, sending it anyway");
    }

    let session = SessionHandle::new();
    let client = ApiClient::new(args.globals.config.clone(), session.clone())?;
    let navigator = Arc::new(TerminalNavigator::default());

    let flow = LoginFlow::new(
        client,
        session,
        cookie_store(&args.globals, args.auto_login),
        navigator.clone(),
        Arc::new(TerminalNotifier),
    );
    flow.set_email(args.email);
    flow.set_password(args.password);
    flow.set_auto_login(args.auto_login);

    match flow.submit().await {
        LoginOutcome::LoggedIn => {
            debug!("landed on {:?}", navigator.current());
            Ok(())
        }
        LoginOutcome::Failed => {
            println!("Forgot password? {}", Route::FindPassword);
            println!("New here? Sign up at {}", Route::SignUp);
            bail!("login failed")
        }
        // one submit per run; kept so a shared flow still reports something sane
        LoginOutcome::AlreadyPending => bail!("a login is already in progress"),
    }
}
