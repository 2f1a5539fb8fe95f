//! Persisted session: one opaque bearer token plus a cached user profile.
//!
//! This is the only state the console keeps across runs. The two values
//! live under fixed keys in a single JSON map on disk and are always
//! cleared together on logout. A token being present makes the session
//! count as authenticated for routing purposes — whether the server
//! still accepts it is only discovered on the first protected call.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::errors::ApiError;
use crate::models::user::AuthUser;

pub const TOKEN_KEY: &str = "tucan_manager_token";
pub const USER_KEY: &str = "tucan_manager_user";

pub struct SessionStore {
    path: PathBuf,
    data: Mutex<BTreeMap<String, String>>,
}

impl SessionStore {
    /// Open the store at `path`, loading any previously persisted session.
    /// A missing file is an empty session, not an error. A corrupt file is
    /// discarded with a warning — the user simply has to log in again.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref().to_path_buf();
        let data = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "discarding corrupt session file");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(ApiError::Session(e)),
        };
        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    pub fn token(&self) -> Option<String> {
        self.data.lock().ok()?.get(TOKEN_KEY).cloned()
    }

    pub fn set_token(&self, token: &str) -> Result<(), ApiError> {
        let mut data = self.lock()?;
        data.insert(TOKEN_KEY.to_string(), token.to_string());
        self.persist(&data)?;
        Ok(())
    }

    /// The cached profile, if one is stored and still parses.
    pub fn user(&self) -> Option<AuthUser> {
        let raw = self.data.lock().ok()?.get(USER_KEY).cloned()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "cached user profile no longer parses");
                None
            }
        }
    }

    pub fn set_user(&self, user: &AuthUser) -> Result<(), ApiError> {
        let raw = serde_json::to_string(user)?;
        let mut data = self.lock()?;
        data.insert(USER_KEY.to_string(), raw);
        self.persist(&data)?;
        Ok(())
    }

    /// Remove both entries and persist. Never fails: logout must always
    /// succeed, so I/O problems are logged and swallowed.
    pub fn clear(&self) {
        let Ok(mut data) = self.data.lock() else {
            return;
        };
        data.remove(TOKEN_KEY);
        data.remove(USER_KEY);
        if let Err(e) = self.persist(&data) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to persist cleared session");
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, ApiError> {
        self.data
            .lock()
            .map_err(|_| ApiError::Session(io::Error::other("session store lock poisoned")))
    }

    fn persist(&self, data: &BTreeMap<String, String>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(data).map_err(io::Error::other)?;
        std::fs::write(&self.path, raw)
    }
}

// ── Tests ──────────────────────────────────────────────────────
