//! # Local Storage
//!
//! A string key/value store with the same contract as browser local storage:
//! each `set_item` replaces the whole value for its key, and reads see either
//! the previous value or the new one, never a mix.
//!
//! [`FileStorage`] keeps one `<key>.json` file per key inside a data directory
//! and writes through a temp file in the same directory followed by a rename.
//! [`MemoryStorage`] keeps everything in process.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use eyre::{Result, WrapErr, eyre};
use mockall::automock;
use tempfile::NamedTempFile;
use tracing::debug;

#[automock]
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&self, key: &str) -> Result<()>;
}

/// File-per-key storage rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open storage at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .wrap_err_with(|| format!("Failed to create data directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(eyre!("Invalid storage key: {:?}", key));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).wrap_err_with(|| format!("Failed to read {}", path.display())),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;

        let mut file = NamedTempFile::new_in(&self.dir)
            .wrap_err("Failed to create temporary file")?;
        file.write_all(value.as_bytes())
            .wrap_err("Failed to write temporary file")?;
        file.as_file()
            .sync_all()
            .wrap_err("Failed to flush temporary file")?;
        file.persist(&path)
            .map_err(|e| e.error)
            .wrap_err_with(|| format!("Failed to replace {}", path.display()))?;

        debug!(key, bytes = value.len(), "stored item");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).wrap_err_with(|| format!("Failed to remove {}", path.display())),
        }
    }
}

/// In-process storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, as if a previous session had written it.
    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.items
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        self
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self
            .items
            .read()
            .map_err(|_| eyre!("Memory storage lock poisoned"))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|_| eyre!("Memory storage lock poisoned"))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|_| eyre!("Memory storage lock poisoned"))?;
        items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();

        assert!(storage.get_item("../escape").is_err());
        assert!(storage.set_item("a/b", "[]").is_err());
        assert!(storage.get_item("").is_err());
    }

    #[test]
    fn test_seed_lands_in_poisoned_storage() {
        let storage = MemoryStorage::new();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = storage.items.write().unwrap();
            panic!("writer died holding the lock");
        }));
        assert!(storage.get_item("bookings").is_err());

        let storage = storage.with_item("bookings", "[]");

        let items = storage.items.into_inner().unwrap_or_else(PoisonError::into_inner);
        assert_eq!(items.get("bookings").map(String::as_str), Some("[]"));
    }
}
