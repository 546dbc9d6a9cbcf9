//! Settings store abstraction and implementations
//!
//! Everything the engine persists (album registry, material settings,
//! container-name overrides, capture counters) goes through the
//! [`SettingsStore`] trait: a small typed key/value surface with string,
//! integer and string-set slots under a single namespace.
//!
//! Two implementations are provided:
//!
//! - [`MemoryStore`] - plain in-memory maps, used in tests and as the
//!   backing data of the file store
//! - [`FileStore`] - JSON file persistence with a dirty flag and
//!   save-on-drop, so short CLI invocations cannot lose state

pub mod keys;

use crate::core::error::{PhotoDocError, Result};
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Typed key/value store for persisted application settings.
///
/// Mirrors the slot types the engine actually needs; keys are built
/// exclusively by the [`keys`] module so that scoped entries never collide.
pub trait SettingsStore {
    /// Get a string value, or `None` if the key is absent
    fn get_string(&self, key: &str) -> Option<String>;

    /// Set a string value
    fn put_string(&mut self, key: &str, value: &str);

    /// Get an integer value, falling back to `default` if absent
    fn get_int(&self, key: &str, default: u32) -> u32;

    /// Set an integer value
    fn put_int(&mut self, key: &str, value: u32);

    /// Get a string set, or `None` if the key is absent
    fn get_string_set(&self, key: &str) -> Option<BTreeSet<String>>;

    /// Set a string set
    fn put_string_set(&mut self, key: &str, value: &BTreeSet<String>);

    /// Remove a key from every slot type
    fn remove(&mut self, key: &str);
}

/// Raw store contents, shared between the memory and file implementations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreData {
    /// String slots
    #[serde(default)]
    pub strings: HashMap<String, String>,

    /// Integer slots
    #[serde(default)]
    pub ints: HashMap<String, u32>,

    /// String-set slots
    #[serde(default)]
    pub sets: HashMap<String, BTreeSet<String>>,
}

impl StoreData {
    fn get_string(&self, key: &str) -> Option<String> {
        self.strings.get(key).cloned()
    }

    fn get_int(&self, key: &str, default: u32) -> u32 {
        self.ints.get(key).copied().unwrap_or(default)
    }

    fn get_string_set(&self, key: &str) -> Option<BTreeSet<String>> {
        self.sets.get(key).cloned()
    }

    fn remove(&mut self, key: &str) {
        self.strings.remove(key);
        self.ints.remove(key);
        self.sets.remove(key);
    }
}

/// In-memory settings store
///
/// The default store for unit tests; all data is lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: StoreData,
}

impl MemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get_string(&self, key: &str) -> Option<String> {
        self.data.get_string(key)
    }

    fn put_string(&mut self, key: &str, value: &str) {
        self.data.strings.insert(key.to_string(), value.to_string());
    }

    fn get_int(&self, key: &str, default: u32) -> u32 {
        self.data.get_int(key, default)
    }

    fn put_int(&mut self, key: &str, value: u32) {
        self.data.ints.insert(key.to_string(), value);
    }

    fn get_string_set(&self, key: &str) -> Option<BTreeSet<String>> {
        self.data.get_string_set(key)
    }

    fn put_string_set(&mut self, key: &str, value: &BTreeSet<String>) {
        self.data.sets.insert(key.to_string(), value.clone());
    }

    fn remove(&mut self, key: &str) {
        self.data.remove(key);
    }
}

/// JSON-file-backed settings store
///
/// State lives in a single JSON document. Writes only flip a dirty flag;
/// the file is rewritten on [`FileStore::save`] and as a fallback on drop.
pub struct FileStore {
    /// Path to the state file
    path: PathBuf,

    /// Current store contents
    data: StoreData,

    /// Whether the contents have been modified since the last save
    dirty: bool,
}

impl FileStore {
    /// Open the store at `path`, loading existing state if present.
    ///
    /// A missing file yields an empty store. A corrupted file is an error;
    /// the caller decides whether to start over.
    pub fn open(path: &Path) -> Result<Self> {
        let data = if path.exists() {
            let file = File::open(path).map_err(|e| {
                PhotoDocError::IoError(format!("Failed to open state file: {}", e))
            })?;
            let reader = BufReader::new(file);
            let data: StoreData = serde_json::from_reader(reader).map_err(|e| {
                PhotoDocError::IoError(format!("Failed to parse state file: {}", e))
            })?;
            debug!(
                "Loaded state file {} ({} strings, {} ints, {} sets)",
                path.display(),
                data.strings.len(),
                data.ints.len(),
                data.sets.len()
            );
            data
        } else {
            debug!("No state file at {}, starting empty", path.display());
            StoreData::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            data,
            dirty: false,
        })
    }

    /// Save the store contents to disk if modified
    pub fn save(&mut self) -> Result<()> {
        if !self.dirty {
            trace!("State not modified, skipping save");
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    PhotoDocError::IoError(format!("Failed to create state directory: {}", e))
                })?;
            }
        }

        let file = File::create(&self.path).map_err(|e| {
            PhotoDocError::IoError(format!("Failed to create state file: {}", e))
        })?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.data).map_err(|e| {
            PhotoDocError::IoError(format!("Failed to write state file: {}", e))
        })?;

        debug!("Saved state to {}", self.path.display());
        self.dirty = false;

        Ok(())
    }

    /// Path of the backing state file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileStore {
    fn get_string(&self, key: &str) -> Option<String> {
        self.data.get_string(key)
    }

    fn put_string(&mut self, key: &str, value: &str) {
        self.data.strings.insert(key.to_string(), value.to_string());
        self.dirty = true;
    }

    fn get_int(&self, key: &str, default: u32) -> u32 {
        self.data.get_int(key, default)
    }

    fn put_int(&mut self, key: &str, value: u32) {
        self.data.ints.insert(key.to_string(), value);
        self.dirty = true;
    }

    fn get_string_set(&self, key: &str) -> Option<BTreeSet<String>> {
        self.data.get_string_set(key)
    }

    fn put_string_set(&mut self, key: &str, value: &BTreeSet<String>) {
        self.data.sets.insert(key.to_string(), value.clone());
        self.dirty = true;
    }

    fn remove(&mut self, key: &str) {
        self.data.remove(key);
        self.dirty = true;
    }
}

impl Drop for FileStore {
    fn drop(&mut self) {
        if self.dirty {
            if let Err(e) = self.save() {
                warn!("Failed to save state on drop: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        store.put_string("a", "hello");
        store.put_int("b", 7);
        store.put_string_set("c", &set(&["x", "y"]));

        assert_eq!(store.get_string("a").as_deref(), Some("hello"));
        assert_eq!(store.get_int("b", 0), 7);
        assert_eq!(store.get_string_set("c"), Some(set(&["x", "y"])));
    }

    #[test]
    fn test_memory_store_defaults_and_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_string("missing"), None);
        assert_eq!(store.get_int("missing", 42), 42);
        assert_eq!(store.get_string_set("missing"), None);

        store.put_string("k", "v");
        store.put_int("k", 1);
        store.remove("k");
        assert_eq!(store.get_string("k"), None);
        assert_eq!(store.get_int("k", 0), 0);
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".state.json");

        {
            let mut store = FileStore::open(&path).unwrap();
            store.put_string("album", "Shipment A");
            store.put_int("count", 12);
            store.put_string_set("albums", &set(&["Shipment A"]));
            store.save().unwrap();
        }

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get_string("album").as_deref(), Some("Shipment A"));
        assert_eq!(store.get_int("count", 0), 12);
        assert_eq!(store.get_string_set("albums"), Some(set(&["Shipment A"])));
    }

    #[test]
    fn test_file_store_saves_on_drop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".state.json");

        {
            let mut store = FileStore::open(&path).unwrap();
            store.put_int("n", 3);
            // No explicit save; Drop must flush
        }

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get_int("n", 0), 3);
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(&dir.path().join("absent.json")).unwrap();
        assert_eq!(store.get_string("anything"), None);
    }

    #[test]
    fn test_file_store_corrupted_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".state.json");
        fs::write(&path, b"{ not json }").unwrap();
        assert!(FileStore::open(&path).is_err());
    }
}
