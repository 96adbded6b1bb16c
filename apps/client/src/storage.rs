//! Local key-value storage. Every screen talks to the others only through here.
//!
//! Values are JSON strings; `load`/`save` do the (de)serialisation. Writes are
//! last-write-wins with no versioning.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const USER_KEY: &str = "user";
pub const INTERVIEW_CONFIG_KEY: &str = "interviewConfig";
pub const LAST_INTERVIEW_KEY: &str = "lastInterview";
pub const RESUME_DATA_KEY: &str = "resumeData";
pub const AUTH_TOKEN_KEY: &str = "authToken";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage lock poisoned")]
    Poisoned,
}

pub trait LocalStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// Reads and decodes `key`. Missing and undecodable values both come back as `None`;
/// callers treat either as "absent" and redirect.
pub fn load<T: DeserializeOwned>(storage: &dyn LocalStorage, key: &str) -> Option<T> {
    let raw = storage.get_item(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring unreadable '{key}' in storage: {e}");
            None
        }
    }
}

pub fn save<T: Serialize>(
    storage: &dyn LocalStorage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    storage.set_item(key, &raw)
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .lock()
            .map_err(|_| StorageError::Poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items
            .lock()
            .map_err(|_| StorageError::Poisoned)?
            .remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.items.lock().map_err(|_| StorageError::Poisoned)?.clear();
        Ok(())
    }
}

/// Storage persisted as one JSON object file. The whole file is rewritten on
/// every write; a missing file is an empty store.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let items = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!("Opened storage at {} ({} keys)", path.display(), items.len());
        Ok(Self {
            path,
            items: Mutex::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn update(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        f(&mut items);
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&*items)?)?;
        Ok(())
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.update(|items| {
            items.remove(key);
        })
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.update(BTreeMap::clear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn test_memory_storage_roundtrip_and_remove() {
        let storage = MemoryStorage::new();
        let sample = Sample {
            name: "x".into(),
            count: 2,
        };
        save(&storage, "k", &sample).unwrap();
        assert_eq!(load::<Sample>(&storage, "k"), Some(sample));

        storage.remove_item("k").unwrap();
        assert_eq!(load::<Sample>(&storage, "k"), None);
    }

    #[test]
    fn test_unreadable_value_loads_as_none() {
        let storage = MemoryStorage::new();
        storage.set_item("k", "{not json").unwrap();
        assert_eq!(load::<Sample>(&storage, "k"), None);
    }

    #[test]
    fn test_file_storage_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("nested/store.json")).unwrap();
        assert_eq!(storage.get_item(USER_KEY), None);
    }

    #[test]
    fn test_file_storage_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".prep/local-storage.json");

        {
            let storage = FileStorage::open(&path).unwrap();
            storage.set_item(USER_KEY, r#"{"name":"Ada"}"#).unwrap();
            storage.set_item(AUTH_TOKEN_KEY, "\"t\"").unwrap();
            storage.remove_item(AUTH_TOKEN_KEY).unwrap();
        }

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(
            reopened.get_item(USER_KEY).as_deref(),
            Some(r#"{"name":"Ada"}"#)
        );
        assert_eq!(reopened.get_item(AUTH_TOKEN_KEY), None);

        reopened.clear().unwrap();
        assert_eq!(FileStorage::open(&path).unwrap().get_item(USER_KEY), None);
    }
}
