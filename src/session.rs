// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Session Storage
//!
//! The session is an opaque user blob kept in client-local key/value storage
//! under [`USER_KEY`], next to a [`LOGGED_IN_KEY`] flag. The client enforces no
//! expiry; the session ends when storage is cleared or overwritten.
//!
//! [`SessionAccessor::current_user`] is the precondition of every vault
//! operation. When it fails it has already told the user and scheduled the
//! redirect to login, so callers only propagate the error and stop.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use crate::config::SESSION_REDIRECT_DELAY;
use crate::error::{ClientError, ClientResult};
use crate::models::User;
use crate::ui::{Notice, Page, Ui};

/// Storage key of the serialized user.
pub const USER_KEY: &str = "trustbox_user";

/// Storage key of the logged-in flag.
pub const LOGGED_IN_KEY: &str = "trustbox_logged_in";

/// String key/value storage with local-storage semantics.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> ClientResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;
    fn remove(&self, key: &str) -> ClientResult<()>;
}

/// Process-local storage, lost on exit.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> ClientResult<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| ClientError::Storage("session store lock poisoned".to_string()))
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

/// Storage persisted as a flat JSON object in a single file.
///
/// A missing file reads as empty storage. Every write rewrites the file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> ClientResult<BTreeMap<String, String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(storage_error(&self.path, e)),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| storage_error(&self.path, e))
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> ClientResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| storage_error(parent, e))?;
        }
        let json = serde_json::to_string_pretty(entries).map_err(|e| storage_error(&self.path, e))?;
        fs::write(&self.path, json).map_err(|e| storage_error(&self.path, e))
    }
}

fn storage_error(path: &Path, e: impl std::fmt::Display) -> ClientError {
    ClientError::Storage(format!("{}: {e}", path.display()))
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

/// Reads, writes and validates the persisted user session.
#[derive(Clone)]
pub struct SessionAccessor {
    store: Arc<dyn SessionStore>,
    ui: Arc<dyn Ui>,
}

impl SessionAccessor {
    pub fn new(store: Arc<dyn SessionStore>, ui: Arc<dyn Ui>) -> Self {
        Self { store, ui }
    }

    /// The logged-in user.
    ///
    /// Fails with [`ClientError::NoSession`] when nothing is stored and
    /// [`ClientError::InvalidSession`] when the blob is unreadable. Either way
    /// the user is notified and sent to login after
    /// [`SESSION_REDIRECT_DELAY`].
    pub fn current_user(&self) -> ClientResult<User> {
        let raw = match self.store.get(USER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                return Err(self.reject(
                    ClientError::NoSession,
                    "You are not logged in. Redirecting to login...",
                ))
            }
            Err(e) => {
                warn!(error = %e, "session storage unreadable");
                return Err(self.reject(
                    ClientError::InvalidSession(e.to_string()),
                    "Invalid session. Please log in again.",
                ));
            }
        };

        serde_json::from_str::<User>(&raw).map_err(|e| {
            warn!(error = %e, "stored user is not a valid session");
            self.reject(
                ClientError::InvalidSession(e.to_string()),
                "Invalid session. Please log in again.",
            )
        })
    }

    /// Store the user returned by login and raise the logged-in flag.
    pub fn persist(&self, user: &User) -> ClientResult<()> {
        let raw = serde_json::to_string(user)
            .map_err(|e| ClientError::Storage(format!("cannot serialize user: {e}")))?;
        self.store.set(USER_KEY, &raw)?;
        self.store.set(LOGGED_IN_KEY, "true")?;
        info!(user_id = %user.user_id, "session stored");
        Ok(())
    }

    /// Forget the stored session.
    pub fn clear(&self) -> ClientResult<()> {
        self.store.remove(USER_KEY)?;
        self.store.remove(LOGGED_IN_KEY)?;
        info!("session cleared");
        Ok(())
    }

    /// Whether the logged-in flag is set. Informational only; access is
    /// decided by [`current_user`](Self::current_user).
    pub fn is_flagged_logged_in(&self) -> bool {
        matches!(self.store.get(LOGGED_IN_KEY), Ok(Some(flag)) if flag == "true")
    }

    fn reject(&self, error: ClientError, message: &str) -> ClientError {
        self.ui.notify(Notice::error(message));
        self.ui.redirect(Page::Login, SESSION_REDIRECT_DELAY);
        error
    }
}
