//! Cookie-like storage for the refresh token written on auto login.
//!
//! Browsers keep this in `document.cookie`; the terminal front-end keeps it in a
//! JSON file (`FileCookieStore`) so it survives between runs. Expired cookies are
//! never handed out. Cookie values are tokens and must never be logged.

use crate::errors::AppError;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    ffi::OsString,
    fmt, fs,
    io::Write,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
    time::{SystemTime, UNIX_EPOCH},
};
use tracing::{debug, error};
use ulid::Ulid;

/// Cookie name for the persisted refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";
/// Path attribute applied to every cookie written by the login flow.
pub const COOKIE_PATH: &str = "/";
/// Seven days, in seconds.
pub const REFRESH_TOKEN_MAX_AGE: u64 = 604_800;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub max_age: u64,
    /// Unix seconds at which the cookie was written.
    pub issued_at: u64,
}

impl Cookie {
    /// Refresh token cookie scoped to `/` with a seven day lifetime.
    #[must_use]
    pub fn refresh_token(token: &SecretString, issued_at: u64) -> Self {
        Self {
            name: REFRESH_TOKEN_COOKIE.to_string(),
            value: token.expose_secret().to_string(),
            path: COOKIE_PATH.to_string(),
            max_age: REFRESH_TOKEN_MAX_AGE,
            issued_at,
        }
    }

    #[must_use]
    pub fn expires_at(&self) -> u64 {
        self.issued_at.saturating_add(self.max_age)
    }

    #[must_use]
    pub fn is_expired_at(&self, now: u64) -> bool {
        now >= self.expires_at()
    }

    /// `document.cookie` form: `name=value; path=/; max-age=604800`.
    #[must_use]
    pub fn header_value(&self) -> String {
        format!(
            "{}={}; path={}; max-age={}",
            self.name, self.value, self.path, self.max_age
        )
    }
}

impl fmt::Debug for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cookie")
            .field("name", &self.name)
            .field("value", &"***")
            .field("path", &self.path)
            .field("max_age", &self.max_age)
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

/// Current time in unix seconds.
#[must_use]
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}

pub trait CookieStore: Send + Sync {
    /// Stores the cookie, replacing any cookie with the same name.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the backing store cannot be written.
    fn set(&self, cookie: Cookie) -> Result<(), AppError>;

    /// Returns the cookie if present and not expired.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the backing store cannot be read.
    fn get(&self, name: &str) -> Result<Option<Cookie>, AppError>;
}

/// Process-local cookie jar.
#[derive(Debug, Default)]
pub struct MemoryCookieStore {
    cookies: Mutex<BTreeMap<String, Cookie>>,
}

impl MemoryCookieStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cookies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CookieStore for MemoryCookieStore {
    fn set(&self, cookie: Cookie) -> Result<(), AppError> {
        self.cookies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(cookie.name.clone(), cookie);
        Ok(())
    }

    fn get(&self, name: &str) -> Result<Option<Cookie>, AppError> {
        let now = unix_now();
        Ok(self
            .cookies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .filter(|cookie| !cookie.is_expired_at(now))
            .cloned())
    }
}

/// Cookie jar persisted as JSON on disk. Expired entries are pruned on write.
#[derive(Debug)]
pub struct FileCookieStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileCookieStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, Cookie>, AppError> {
        match self.read_raw()? {
            Some(raw) => self.decode(&raw),
            None => Ok(BTreeMap::new()),
        }
    }

    fn read_raw(&self) -> Result<Option<String>, AppError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(None),
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(AppError::Storage(format!(
                "Failed to read cookie jar {}: {err}",
                self.path.display()
            ))),
        }
    }

    fn decode(&self, raw: &str) -> Result<BTreeMap<String, Cookie>, AppError> {
        serde_json::from_str(raw).map_err(|err| {
            AppError::Storage(format!(
                "Failed to decode cookie jar {}: {err}",
                self.path.display()
            ))
        })
    }

    fn write_all(&self, mut cookies: BTreeMap<String, Cookie>) -> Result<(), AppError> {
        let now = unix_now();
        cookies.retain(|_, cookie| !cookie.is_expired_at(now));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| {
                AppError::Storage(format!("Failed to create {}: {err}", parent.display()))
            })?;
        }

        let payload = serde_json::to_string_pretty(&cookies)
            .map_err(|err| AppError::Storage(format!("Failed to encode cookie jar: {err}")))?;

        // write next to the jar and rename, so a crash never leaves it half written
        let tmp = self.tmp_path();
        let written = write_owner_only(&tmp, payload.as_bytes()).and_then(|()| {
            fs::rename(&tmp, &self.path)
        });
        if let Err(err) = written {
            let _ = fs::remove_file(&tmp);
            return Err(AppError::Storage(format!(
                "Failed to write cookie jar {}: {err}",
                self.path.display()
            )));
        }

        debug!("cookie jar written: {} entries", cookies.len());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("cookies"));
        name.push(format!(".{}.tmp", Ulid::new()));
        self.path.with_file_name(name)
    }
}

impl CookieStore for FileCookieStore {
    /// A jar that no longer decodes is replaced, otherwise the refresh token
    /// could never be stored again.
    fn set(&self, cookie: Cookie) -> Result<(), AppError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut cookies = match self.read_raw()? {
            Some(raw) => self.decode(&raw).unwrap_or_else(|err| {
                error!("{err}, starting a new cookie jar");
                BTreeMap::new()
            }),
            None => BTreeMap::new(),
        };
        cookies.insert(cookie.name.clone(), cookie);
        self.write_all(cookies)
    }

    fn get(&self, name: &str) -> Result<Option<Cookie>, AppError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let now = unix_now();
        Ok(self
            .read_all()?
            .remove(name)
            .filter(|cookie| !cookie.is_expired_at(now)))
    }
}

// The jar holds refresh tokens; the file is owner-only before any byte lands.
#[cfg(unix)]
fn write_owner_only(path: &Path, payload: &[u8]) -> std::io::Result<()> {
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(payload)?;
    file.sync_all()
}

#[cfg(not(unix))]
fn write_owner_only(path: &Path, payload: &[u8]) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;
    file.write_all(payload)?;
    file.sync_all()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ulid::Ulid;

    fn temp_jar() -> PathBuf {
        std::env::temp_dir()
            .join(format!("kongtour-cookies-{}", Ulid::new()))
            .join("jar.json")
    }

    #[test]
    fn test_refresh_token_cookie_attributes() {
        let token = SecretString::from("refresh-1".to_string());
        let cookie = Cookie::refresh_token(&token, 1_000);

        assert_eq!(cookie.name, "refreshToken");
        assert_eq!(cookie.path, "/");
        assert_eq!(cookie.max_age, 604_800);
        assert_eq!(cookie.expires_at(), 605_800);
        assert_eq!(
            cookie.header_value(),
            "refreshToken=refresh-1; path=/; max-age=604800"
        );
    }

    #[test]
    fn test_expiry_boundary() {
        let token = SecretString::from("refresh-1".to_string());
        let cookie = Cookie::refresh_token(&token, 1_000);
        assert!(!cookie.is_expired_at(605_799));
        assert!(cookie.is_expired_at(605_800));
    }

    #[test]
    fn test_debug_redacts_value() {
        let token = SecretString::from("refresh-secret".to_string());
        let cookie = Cookie::refresh_token(&token, 0);
        assert!(!format!("{cookie:?}").contains("refresh-secret"));
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryCookieStore::new();
        let token = SecretString::from("refresh-1".to_string());
        store
            .set(Cookie::refresh_token(&token, unix_now()))
            .unwrap();

        let cookie = store.get(REFRESH_TOKEN_COOKIE).unwrap().unwrap();
        assert_eq!(cookie.value, "refresh-1");
        assert_eq!(store.len(), 1);

        let rotated = SecretString::from("refresh-2".to_string());
        store
            .set(Cookie::refresh_token(&rotated, unix_now()))
            .unwrap();
        let cookie = store.get(REFRESH_TOKEN_COOKIE).unwrap().unwrap();
        assert_eq!(cookie.value, "refresh-2");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_memory_store_hides_expired() {
        let store = MemoryCookieStore::new();
        let token = SecretString::from("stale".to_string());
        store.set(Cookie::refresh_token(&token, 0)).unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.get(REFRESH_TOKEN_COOKIE).unwrap().is_none());
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let path = temp_jar();
        let token = SecretString::from("refresh-file".to_string());

        FileCookieStore::new(&path)
            .set(Cookie::refresh_token(&token, unix_now()))
            .unwrap();

        let reopened = FileCookieStore::new(&path);
        let cookie = reopened.get(REFRESH_TOKEN_COOKIE).unwrap().unwrap();
        assert_eq!(cookie.value, "refresh-file");
        assert_eq!(cookie.max_age, REFRESH_TOKEN_MAX_AGE);

        // only the jar is left behind, no temp files
        let entries = fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let store = FileCookieStore::new(temp_jar());
        assert!(store.get(REFRESH_TOKEN_COOKIE).unwrap().is_none());
    }

    #[test]
    fn test_file_store_rejects_garbage() {
        let path = temp_jar();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        let result = FileCookieStore::new(&path).get(REFRESH_TOKEN_COOKIE);
        assert!(matches!(result, Err(AppError::Storage(_))));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_replaces_truncated_jar_on_set() {
        let path = temp_jar();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{\"refreshToken\": {\"name\": \"refr").unwrap();

        let store = FileCookieStore::new(&path);
        let token = SecretString::from("refresh-new".to_string());
        store
            .set(Cookie::refresh_token(&token, unix_now()))
            .unwrap();

        let cookie = store.get(REFRESH_TOKEN_COOKIE).unwrap().unwrap();
        assert_eq!(cookie.value, "refresh-new");

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_jar_file_is_created_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let path = temp_jar();
        fs::create_dir_all(path.parent().unwrap()).unwrap();

        // mode is checked right after creation, with no chmod in between
        write_owner_only(&path, b"{}").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_tightens_existing_jar() {
        use std::os::unix::fs::PermissionsExt;

        let path = temp_jar();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let token = SecretString::from("refresh-perm".to_string());
        FileCookieStore::new(&path)
            .set(Cookie::refresh_token(&token, unix_now()))
            .unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let path = temp_jar();
        let token = SecretString::from("refresh-perm".to_string());
        FileCookieStore::new(&path)
            .set(Cookie::refresh_token(&token, unix_now()))
            .unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
