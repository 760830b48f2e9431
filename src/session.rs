//! Persisted session state.
//!
//! The session is an explicit context object held by the client, not ambient
//! global state: [`SessionStore::set`] and [`SessionStore::clear`] are its
//! only mutators. The token and the cached user identity live in one record
//! so "cleared together" holds structurally.
//!
//! Two backends: an on-disk JSON file under the platform config directory
//! (`carddesk/session.json`, mode 0600 on Unix) shared between tools, and an
//! in-memory cell for tests and short-lived embeddings. A corrupt or
//! unreadable session file reads as "no session"; a half-written file must
//! not brick the client.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// A stored session: the bearer token plus the opaque cached user identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token for the CardDesk API.
    pub token: String,
    /// Whatever identity value the application chooses to cache alongside
    /// the token; erased together with it, always.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<serde_json::Value>,
}

impl Session {
    /// A session holding just a token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user: None,
        }
    }

    /// Attach a cached user identity.
    #[must_use]
    pub fn with_user(mut self, user: serde_json::Value) -> Self {
        self.user = Some(user);
        self
    }
}

/// Where session records live.
#[derive(Debug)]
enum StoreInner {
    Memory(RwLock<Option<Session>>),
    File(PathBuf),
}

/// The session context object read before every outgoing request.
///
/// Cheap to clone; clones share the same backing state, so the store handed
/// to [`ApiClient::new`](crate::ApiClient::new) can also be kept by the
/// application for [`set`](Self::set) after login and
/// [`clear`](Self::clear) on logout.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

impl SessionStore {
    /// A store backed by process memory only. Nothing survives the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(StoreInner::Memory(RwLock::new(None))),
        }
    }

    /// A store backed by a JSON file at the given path.
    #[must_use]
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(StoreInner::File(path.into())),
        }
    }

    /// A store at the fixed per-user location, `carddesk/session.json`
    /// under the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when no config directory can be determined.
    pub fn on_disk() -> Result<Self> {
        Self::default_path()
            .map(Self::at_path)
            .ok_or_else(|| Error::Config("could not determine a config directory".into()))
    }

    /// The fixed on-disk location, if a config directory exists.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("carddesk/session.json"))
    }

    /// The current session, if one is stored and readable.
    #[must_use]
    pub fn get(&self) -> Option<Session> {
        match &*self.inner {
            StoreInner::Memory(cell) => cell
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
            StoreInner::File(path) => {
                let raw = std::fs::read_to_string(path).ok()?;
                match serde_json::from_str(&raw) {
                    Ok(session) => Some(session),
                    Err(err) => {
                        debug!(path = %path.display(), error = %err, "unreadable session file, treating as no session");
                        None
                    }
                }
            }
        }
    }

    /// The current token, if one is stored.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.get().map(|session| session.token)
    }

    /// Store a session, replacing any previous one. The file backend
    /// creates parent directories and sets mode 0600 on Unix.
    ///
    /// # Errors
    ///
    /// File backend only: serialization or filesystem failures.
    pub fn set(&self, session: Session) -> Result<()> {
        match &*self.inner {
            StoreInner::Memory(cell) => {
                *cell.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
                Ok(())
            }
            StoreInner::File(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                let raw = serde_json::to_string_pretty(&session)?;
                std::fs::write(path, raw)?;
                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
                }
                Ok(())
            }
        }
    }

    /// Erase the stored session, token and cached identity together.
    /// Clearing an already-empty store is a no-op, so concurrent callers
    /// may race here freely.
    ///
    /// # Errors
    ///
    /// File backend only: filesystem failures other than "already gone".
    pub fn clear(&self) -> Result<()> {
        match &*self.inner {
            StoreInner::Memory(cell) => {
                *cell.write().unwrap_or_else(PoisonError::into_inner) = None;
                Ok(())
            }
            StoreInner::File(path) => match std::fs::remove_file(path) {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(err) => Err(err.into()),
            },
        }
    }
}
