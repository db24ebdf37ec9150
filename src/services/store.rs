//! Persistence boundary for dashboard state.
//!
//! Each collection is one JSON document under a fixed key. Stores know nothing
//! about the shape of what they hold; typing happens in the workspace.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Portfolio,
    Watchlist,
    PriceAlerts,
    AppSettings,
}

impl StoreKey {
    pub const ALL: [StoreKey; 4] = [
        StoreKey::Portfolio,
        StoreKey::Watchlist,
        StoreKey::PriceAlerts,
        StoreKey::AppSettings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Portfolio => "portfolio",
            StoreKey::Watchlist => "watchlist",
            StoreKey::PriceAlerts => "priceAlerts",
            StoreKey::AppSettings => "appSettings",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage io error for {key}: {source}")]
    Io {
        key: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("stored {key} is not valid json: {source}")]
    Corrupt {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode {key}: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage lock poisoned")]
    Poisoned,
}

pub trait StateStore: Send + Sync {
    fn load(&self, key: StoreKey) -> Result<Option<Value>, StoreError>;

    fn save(&self, key: StoreKey, value: &Value) -> Result<(), StoreError>;

    fn remove(&self, key: StoreKey) -> Result<(), StoreError>;
}

// ---------------- JSON files ----------------

/// One `<key>.json` file per collection inside `dir`.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io { key: "data dir", source })?;
        Ok(Self { dir })
    }

    fn path(&self, key: StoreKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }
}

impl StateStore for JsonFileStore {
    fn load(&self, key: StoreKey) -> Result<Option<Value>, StoreError> {
        let raw = match fs::read_to_string(self.path(key)) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { key: key.as_str(), source }),
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Corrupt { key: key.as_str(), source })
    }

    fn save(&self, key: StoreKey, value: &Value) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io { key: key.as_str(), source };

        let body = serde_json::to_vec_pretty(value)
            .map_err(|source| StoreError::Encode { key: key.as_str(), source })?;

        // write-then-rename so readers never see a half-written document
        let tmp = self.dir.join(format!(".{}.json.tmp", key.as_str()));
        let mut f = fs::File::create(&tmp).map_err(io_err)?;
        f.write_all(&body).map_err(io_err)?;
        f.sync_all().map_err(io_err)?;
        fs::rename(&tmp, self.path(key)).map_err(io_err)?;

        tracing::debug!(key = key.as_str(), bytes = body.len(), "saved");
        Ok(())
    }

    fn remove(&self, key: StoreKey) -> Result<(), StoreError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { key: key.as_str(), source }),
        }
    }
}

// ---------------- Memory ----------------

#[derive(Default)]
pub struct MemoryStore {
    docs: Mutex<HashMap<StoreKey, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: StoreKey) -> Result<Option<Value>, StoreError> {
        let docs = self.docs.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(docs.get(&key).cloned())
    }

    fn save(&self, key: StoreKey, value: &Value) -> Result<(), StoreError> {
        let mut docs = self.docs.lock().map_err(|_| StoreError::Poisoned)?;
        docs.insert(key, value.clone());
        Ok(())
    }

    fn remove(&self, key: StoreKey) -> Result<(), StoreError> {
        let mut docs = self.docs.lock().map_err(|_| StoreError::Poisoned)?;
        docs.remove(&key);
        Ok(())
    }
}
