//! Store backends

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures while making stored values durable
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode store: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Integer key-value store with explicit durability
pub trait ScoreStore {
    /// Read `key`, returning `default` when absent
    fn get_int(&self, key: &str, default: u32) -> u32;

    /// Stage a value; not durable until [`ScoreStore::flush`] succeeds
    fn set_int(&mut self, key: &str, value: u32);

    /// Make every staged value durable
    fn flush(&mut self) -> Result<(), StoreError>;
}

/// In-memory store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, u32>,
    flushes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful flushes so far
    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

impl ScoreStore for MemoryStore {
    fn get_int(&self, key: &str, default: u32) -> u32 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn set_int(&mut self, key: &str, value: u32) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        self.flushes += 1;
        Ok(())
    }
}

/// JSON file backed store
///
/// Values live in memory and are written out on `flush` by writing a sibling
/// temp file, syncing it, then renaming it over the save file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, u32>,
    /// Set when the save file existed but could not be read; blocks writes
    read_error: Option<io::ErrorKind>,
}

impl FileStore {
    /// Open the store at `path`; a missing or corrupt file starts empty.
    ///
    /// Any other read failure also starts empty but leaves the store read-only,
    /// so `flush` fails instead of replacing data it never saw.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut read_error = None;
        let values = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(values) => {
                    log::info!("Loaded save data from {}", path.display());
                    values
                }
                Err(e) => {
                    log::warn!("Corrupt save data in {} ({e}), starting fresh", path.display());
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No save data at {}, starting fresh", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                log::warn!(
                    "Cannot read save data at {} ({e}); scores will not be saved",
                    path.display()
                );
                read_error = Some(e.kind());
                BTreeMap::new()
            }
        };
        Self {
            path,
            values,
            read_error,
        }
    }

    /// False when the existing save file could not be read at open
    pub fn is_writable(&self) -> bool {
        self.read_error.is_none()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ScoreStore for FileStore {
    fn get_int(&self, key: &str, default: u32) -> u32 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn set_int(&mut self, key: &str, value: u32) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        if let Some(kind) = self.read_error {
            return Err(self.io_error(io::Error::new(
                kind,
                "save file was unreadable at open; refusing to overwrite it",
            )));
        }
        let json = serde_json::to_string_pretty(&self.values)?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }

        let tmp = self.path.with_extension("tmp");
        let mut file = fs::File::create(&tmp).map_err(|e| self.io_error(e))?;
        file.write_all(json.as_bytes()).map_err(|e| self.io_error(e))?;
        file.sync_all().map_err(|e| self.io_error(e))?;
        drop(file);
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        log::debug!("Save data flushed to {}", self.path.display());
        Ok(())
    }
}

/// String item backend such as browser LocalStorage
pub trait ItemStorage {
    fn get_item(&self, key: &str) -> Option<String>;

    /// Write `value`; `Err` carries the backend's reason for refusing it
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), String>;

    fn is_available(&self) -> bool;
}

/// Store over an [`ItemStorage`] backend (writes are immediate)
///
/// A rejected write cannot fail `set_int`, so the first one is remembered and
/// reported by the next `flush`.
#[derive(Debug)]
pub struct ItemStore<S> {
    storage: S,
    prefix: String,
    rejected: Option<String>,
}

impl<S: ItemStorage> ItemStore<S> {
    pub fn with_storage(storage: S, prefix: impl Into<String>) -> Self {
        Self {
            storage,
            prefix: prefix.into(),
            rejected: None,
        }
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

impl<S: ItemStorage> ScoreStore for ItemStore<S> {
    fn get_int(&self, key: &str, default: u32) -> u32 {
        self.storage
            .get_item(&self.full_key(key))
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn set_int(&mut self, key: &str, value: u32) {
        let full_key = self.full_key(key);
        if let Err(reason) = self.storage.set_item(&full_key, &value.to_string()) {
            log::warn!("Storage rejected write of {key}: {reason}");
            if self.rejected.is_none() {
                self.rejected = Some(format!("write of {key} rejected: {reason}"));
            }
        }
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        if let Some(rejected) = self.rejected.take() {
            return Err(StoreError::Unavailable(rejected));
        }
        if !self.storage.is_available() {
            return Err(StoreError::Unavailable("storage backend missing".to_string()));
        }
        Ok(())
    }
}

/// Browser `window.localStorage`
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct BrowserStorage;

#[cfg(target_arch = "wasm32")]
impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ItemStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), String> {
        let storage = Self::storage().ok_or_else(|| "LocalStorage unavailable".to_string())?;
        storage
            .set_item(key, value)
            .map_err(|e| format!("{e:?}"))
    }

    fn is_available(&self) -> bool {
        Self::storage().is_some()
    }
}

/// Browser LocalStorage store
#[cfg(target_arch = "wasm32")]
pub type LocalStorageStore = ItemStore<BrowserStorage>;

#[cfg(target_arch = "wasm32")]
impl ItemStore<BrowserStorage> {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::with_storage(BrowserStorage, prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("crayonfish-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_memory_store_defaults_and_flush_count() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_int("LastScore", 0), 0);
        assert_eq!(store.get_int("LastScore", 7), 7);
        store.set_int("LastScore", 42);
        assert_eq!(store.get_int("LastScore", 0), 42);
        store.flush().unwrap();
        assert_eq!(store.flush_count(), 1);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let path = temp_path("reopen");
        let _ = fs::remove_file(&path);

        let mut store = FileStore::open(&path);
        store.set_int("HighScore0", 1234);
        store.flush().unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get_int("HighScore0", 0), 1234);
        assert!(!path.with_extension("tmp").exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_unflushed_values_are_not_written() {
        let path = temp_path("unflushed");
        let _ = fs::remove_file(&path);

        let mut store = FileStore::open(&path);
        store.set_int("LastScore", 99);
        drop(store);

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get_int("LastScore", 0), 0);
    }

    #[test]
    fn test_file_store_corrupt_file_starts_empty() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.get_int("HighScore0", 0), 0);
        assert!(store.is_writable());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_unreadable_path_refuses_flush() {
        // A directory in place of the save file: exists, but cannot be read
        let path = temp_path("unreadable");
        let _ = fs::remove_file(&path);
        fs::create_dir_all(&path).unwrap();

        let mut store = FileStore::open(&path);
        assert!(!store.is_writable());
        assert_eq!(store.get_int("HighScore0", 0), 0);

        store.set_int("HighScore0", 500);
        assert!(matches!(store.flush(), Err(StoreError::Io { .. })));
        assert!(path.is_dir());
        assert!(!path.with_extension("tmp").exists());

        let _ = fs::remove_dir(&path);
    }

    #[test]
    fn test_file_store_missing_file_is_writable() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);

        let store = FileStore::open(&path);
        assert!(store.is_writable());
    }

    /// Map-backed item storage that refuses keys listed in `full`
    #[derive(Default)]
    struct StubStorage {
        items: BTreeMap<String, String>,
        full: Vec<String>,
    }

    impl ItemStorage for StubStorage {
        fn get_item(&self, key: &str) -> Option<String> {
            self.items.get(key).cloned()
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<(), String> {
            if self.full.iter().any(|k| k == key) {
                return Err("QuotaExceededError".to_string());
            }
            self.items.insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_item_store_prefixes_keys() {
        let mut store = ItemStore::with_storage(StubStorage::default(), "crayonfish.");
        store.set_int("LastScore", 77);
        store.flush().unwrap();

        assert_eq!(store.get_int("LastScore", 0), 77);
        assert_eq!(store.storage.items.get("crayonfish.LastScore").map(String::as_str), Some("77"));
    }

    #[test]
    fn test_item_store_rejected_write_fails_next_flush() {
        let storage = StubStorage {
            full: vec!["cf.HighScore1".to_string()],
            ..Default::default()
        };
        let mut store = ItemStore::with_storage(storage, "cf.");

        store.set_int("HighScore0", 300);
        store.set_int("HighScore1", 200);
        store.set_int("LastScore", 200);

        match store.flush() {
            Err(StoreError::Unavailable(msg)) => assert!(msg.contains("HighScore1"), "{msg}"),
            other => panic!("expected a rejected write, got {other:?}"),
        }
        assert_eq!(store.get_int("HighScore0", 0), 300);
        assert_eq!(store.get_int("HighScore1", 0), 0);

        // Reported once, then cleared
        assert!(store.flush().is_ok());
    }
}
