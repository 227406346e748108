//! Session token storage.
//!
//! The client persists exactly one piece of state: the access token from the
//! last successful login, stored under the well-known key `access_token`.
//! Login writes it; everything issuing authenticated requests reads it. No
//! refresh or expiry handling.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use thiserror::Error;

/// Well-known storage key for the access token.
///
/// Doubles as the file name used by [`FileTokenStore`].
pub const TOKEN_KEY: &str = "access_token";

/// An authenticated session: one opaque bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    /// Wrap a bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    /// The raw bearer token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Errors from token storage.
#[derive(Error, Debug)]
pub enum TokenStoreError {
    /// Underlying filesystem failure
    #[error("token storage: {0}")]
    Io(#[from] io::Error),
}

/// Persistence seam for the access token.
pub trait TokenStore: Send + Sync {
    /// Load the stored session, if any.
    fn load(&self) -> Result<Option<Session>, TokenStoreError>;

    /// Persist the session, replacing any previous one.
    fn save(&self, session: &Session) -> Result<(), TokenStoreError>;

    /// Remove the stored session.
    fn clear(&self) -> Result<(), TokenStoreError>;
}

/// Token store backed by a file in a state directory.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store the token under `state_dir/access_token`.
    pub fn new(state_dir: impl AsRef<Path>) -> Self {
        Self { path: state_dir.as_ref().join(TOKEN_KEY) }
    }

    /// Path of the token file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<Session>, TokenStoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                if token.is_empty() { Ok(None) } else { Ok(Some(Session::new(token))) }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, session: &Session) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, session.token())?;
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory token store for tests and demo runs.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<Session>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<Session>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<Session>, TokenStoreError> {
        Ok(self.slot().clone())
    }

    fn save(&self, session: &Session) -> Result<(), TokenStoreError> {
        *self.slot() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        *self.slot() = None;
        Ok(())
    }
}
