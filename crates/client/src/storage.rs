//! Local JSON store.
//!
//! The anonymous fallback for cart, order, and session state: one JSON file
//! per key under a data directory. This is an implementation detail of the
//! fallback path, not a stable format.
//!
//! Read failures degrade to "empty": a missing file or unparseable content
//! yields `None` with a warning, matching how the storefront treats corrupt
//! persisted state everywhere else.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Well-known store keys.
pub mod keys {
    /// The current cart lines.
    pub const CART: &str = "cart";
    /// Anonymous order history.
    pub const ORDERS: &str = "orders";
    /// Session token.
    pub const TOKEN: &str = "token";
    /// Stored user profile.
    pub const USER: &str = "user";
}

/// Errors from writing to the local store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// Value could not be encoded as JSON.
    #[error("storage encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Key-value JSON store backed by a directory of files.
///
/// Cheaply cloneable; all clones share the same directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: Arc<PathBuf>,
}

impl LocalStore {
    /// Open (creating if necessary) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = dir.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root: Arc::new(root),
        })
    }

    /// Read and decode the value stored under `key`.
    ///
    /// Returns `None` when the key is absent or the stored content cannot be
    /// parsed; parse failures are logged and treated as empty state.
    #[must_use]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path_for(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read local store entry");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "corrupt local store entry, treating as empty");
                None
            }
        }
    }

    /// Encode and persist `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if encoding or the filesystem write fails.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let encoded = serde_json::to_vec(value)?;
        fs::write(self.path_for(key), encoded)?;
        Ok(())
    }

    /// Remove the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` on filesystem failure other than the key
    /// being absent.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether a value exists under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}
