//! Durable client storage
//!
//! Key/value persistence for client-local state (the cart snapshot). The
//! cart engine treats writes as best-effort: failures are logged by the
//! caller and never block the in-memory mutation.

use shared::{AppError, AppResult};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Key/value storage collaborator
pub trait ClientStorage: Send + Sync {
    /// Read the stored value for `key`, if any
    fn read(&self, key: &str) -> Option<String>;
    /// Store `value` under `key`
    fn write(&self, key: &str, value: &str) -> AppResult<()>;
}

/// In-memory storage, for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClientStorage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        match self.entries.lock() {
            Ok(entries) => entries.get(key).cloned(),
            Err(_) => None,
        }
    }

    fn write(&self, key: &str, value: &str) -> AppResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AppError::storage("storage mutex poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed storage: one JSON file per key under a directory
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // keys are dotted identifiers; keep the file name filesystem-safe
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl ClientStorage for FileStorage {
    fn read(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %path.display(), "storage read failed: {}", e);
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) -> AppResult<()> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| AppError::storage(format!("create storage dir: {e}")))?;
        std::fs::write(self.path_for(key), value)
            .map_err(|e| AppError::storage(format!("write {key}: {e}")))
    }
}
