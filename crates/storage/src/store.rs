use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use serde::{Serialize, de::DeserializeOwned};
use strum::AsRefStr;

use fitlog_domain as domain;

/// String values stored under string keys.
///
/// The typed accessors (de)serialize values as JSON.
pub trait KeyValueStore: Send + Sync + 'static {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, StoreError> {
        let value = self
            .get_raw(key)?
            .ok_or_else(|| StoreError::KeyNotFound(key.to_string()))?;
        Ok(serde_json::from_str(&value)?)
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        self.set_raw(key, &serde_json::to_string(value)?)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("key not found: {0}")]
    KeyNotFound(String),
    #[error("invalid key: {0:?}")]
    InvalidKey(String),
    #[error("store lock poisoned")]
    Poisoned,
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<StoreError> for domain::StorageError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Io(err) => domain::StorageError::Unavailable(err.to_string()),
            StoreError::Poisoned => {
                domain::StorageError::Unavailable("store lock poisoned".to_string())
            }
            err => domain::StorageError::Other(Box::new(err)),
        }
    }
}

/// Keys of the persisted data.
#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    #[strum(serialize = "fitnessTrackerData")]
    Settings,
    #[strum(serialize = "weightEntries")]
    WeightEntries,
    #[strum(serialize = "workouts")]
    Workouts,
    #[strum(serialize = "meals")]
    Meals,
    #[strum(serialize = "log")]
    Log,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// Store keeping each key in a file `<key>.json` inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open the store in `dir`, creating the directory if it does not exist.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty()
            || key.starts_with('.')
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
        {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path(key)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path(key)?) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
