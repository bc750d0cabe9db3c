//! Key-value persistence boundary.
//!
//! DESIGN
//! ======
//! The store is an injectable capability: a synchronous `get`/`set` over
//! string keys and JSON text values. The mirror is the only caller; a
//! production build could swap in a real embedded or remote store without
//! touching the service modules.
//!
//! ERROR HANDLING
//! ==============
//! Reads recover locally: a missing or corrupt value is absence, logged at
//! `warn` and never surfaced. Writes return their result to the caller; the
//! mirror logs the failure and propagates it so appends stay retryable.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

/// Environment variable overriding the file store's data directory.
pub const DATA_DIR_ENV: &str = "SKETCHBOARD_DATA_DIR";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("no platform data directory available")]
    NoDataDir,
}

impl crate::error::ErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "E_STORAGE_IO",
            Self::Serialize(_) => "E_SERIALIZE",
            Self::NoDataDir => "E_NO_DATA_DIR",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

/// Synchronous key-value storage over serialized text values.
pub trait KeyValueStore {
    /// Fetch the raw serialized value for `key`, or `None` if absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Durably write the raw serialized value for `key`.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails; the caller decides
    /// whether to retry.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

// =============================================================================
// TYPED HELPERS
// =============================================================================

/// Read a collection from `key`, treating a missing or corrupt value as
/// absent. No schema versioning: callers must tolerate `None` on first run.
pub fn read_collection<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<Vec<T>> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(items) => Some(items),
        Err(e) => {
            warn!(key, error = %e, "corrupt stored value; treating as absent");
            None
        }
    }
}

/// Serialize a collection to JSON text and write it under `key`.
///
/// # Errors
///
/// Returns a storage error if serialization or the write fails.
pub fn write_collection<T: Serialize>(
    store: &mut dyn KeyValueStore,
    key: &str,
    items: &[T],
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(items)?;
    store.set(key, &raw)
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// Volatile store backed by a `HashMap`. Nothing survives the process;
/// useful for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// Durable store: one `<key>.json` text file per key under a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (or create) the default application store.
    ///
    /// The directory is taken from [`DATA_DIR_ENV`] when set, otherwise the
    /// platform-appropriate data directory:
    /// - Linux:   `~/.local/share/sketchboard/`
    /// - macOS:   `~/Library/Application Support/dev.sketchboard.sketchboard/`
    /// - Windows: `{FOLDERID_RoamingAppData}\sketchboard\sketchboard\data\`
    ///
    /// # Errors
    ///
    /// Returns `NoDataDir` if no platform directory can be resolved, or an
    /// io error if the directory cannot be created.
    pub fn new() -> Result<Self, StoreError> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            return Self::open_at(Path::new(&dir));
        }
        let project_dirs = directories::ProjectDirs::from("dev", "sketchboard", "sketchboard")
            .ok_or(StoreError::NoDataDir)?;
        Self::open_at(project_dirs.data_dir())
    }

    /// Open (or create) a store rooted at an explicit directory.
    ///
    /// This is useful for tests and for embedding the store inside custom
    /// directory layouts.
    ///
    /// # Errors
    ///
    /// Returns an io error if the directory cannot be created.
    pub fn open_at(dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(dir)?;
        info!(dir = %dir.display(), "opened file store");
        Ok(Self { dir: dir.to_path_buf() })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}
