//! File-backed storage provider
//!
//! Keeps the whole store in memory and rewrites a JSON document on every
//! mutation. Writes go to a sibling temp file first and are renamed into
//! place, so a crash never leaves a half-written store behind.
//!
//! ## Example
//!
//! ```no_run
//! use taxpay_domain::ports::StorageProvider;
//! use taxpay_providers::storage::FileStorageProvider;
//!
//! let storage = FileStorageProvider::open("/var/lib/taxpay/storage.json").unwrap();
//! storage.set("reservation", "stay-42").unwrap();
//! ```

use crate::constants::STORAGE_TEMP_SUFFIX;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use taxpay_domain::error::{Error, Result};
use taxpay_domain::ports::StorageProvider;
use tracing::debug;

/// Storage provider persisted to a JSON file
#[derive(Debug)]
pub struct FileStorageProvider {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStorageProvider {
    /// Open the store at `path`, loading existing contents
    ///
    /// A missing file is an empty store; the parent directory is created.
    /// An unreadable or corrupt file is an error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::Io {
                message: format!("Failed to create storage directory {}", parent.display()),
                source: Some(Box::new(e)),
            })?;
        }

        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| Error::Io {
                message: format!("Failed to read storage file {}", path.display()),
                source: Some(Box::new(e)),
            })?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| {
                    Error::storage(format!("Corrupt storage file {}: {e}", path.display()))
                })?
            }
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), entries = entries.len(), "Opened file storage");

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file each write is staged in before the rename
    ///
    /// The suffix is appended to the full file name, so it never collides
    /// with the store itself whatever its extension.
    pub fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(STORAGE_TEMP_SUFFIX);
        self.path.with_file_name(name)
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .read()
            .map_err(|_| Error::storage("storage lock poisoned"))
    }

    /// Apply a mutation and persist the result
    ///
    /// The in-memory map is only updated once the file write succeeded.
    fn mutate<T>(&self, f: impl FnOnce(&mut BTreeMap<String, String>) -> T) -> Result<T> {
        let mut guard = self
            .entries
            .write()
            .map_err(|_| Error::storage("storage lock poisoned"))?;
        let mut next = guard.clone();
        let out = f(&mut next);
        self.persist(&next)?;
        *guard = next;
        Ok(out)
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.temp_path();
        std::fs::write(&tmp, json).map_err(|e| Error::Io {
            message: format!("Failed to write storage file {}", tmp.display()),
            source: Some(Box::new(e)),
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|e| Error::Io {
            message: format!("Failed to replace storage file {}", self.path.display()),
            source: Some(Box::new(e)),
        })
    }
}

impl StorageProvider for FileStorageProvider {
    fn get(&self, key: &str) -> Option<String> {
        self.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.mutate(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<bool> {
        self.mutate(|entries| entries.remove(key).is_some())
    }

    fn clear(&self) -> Result<()> {
        self.mutate(BTreeMap::clear)
    }

    fn keys(&self) -> Vec<String> {
        self.read()
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn provider_name(&self) -> &str {
        "file"
    }
}
