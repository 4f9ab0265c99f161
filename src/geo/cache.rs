//! Flat key/value cache for collaborator results.
//!
//! Geocoding and matrix construction memoize their results here. The GA
//! never touches a cache.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Failure to persist a cache entry.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// An idempotent key/value store.
///
/// `get` never fails: a missing or unreadable entry is a miss.
pub trait Cache: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;

    fn set(&self, key: &str, value: &Value) -> Result<(), CacheError>;
}

/// Process-local cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |e| e.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), CacheError> {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.clone());
        }
        Ok(())
    }
}

/// Directory of `<key>.json` files.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Opens (and creates if needed) a cache directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, CacheError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Cache for FileCache {
    fn get(&self, key: &str) -> Option<Value> {
        let text = fs::read_to_string(self.path_for(key)).ok()?;
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(key, error = %e, "ignoring corrupt cache entry");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), CacheError> {
        let text = serde_json::to_string_pretty(value)?;
        fs::write(self.path_for(key), text)?;
        Ok(())
    }
}
