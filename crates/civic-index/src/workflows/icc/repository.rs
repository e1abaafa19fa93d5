use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::Deserialize;
use tracing::{debug, info};

use super::topics::{TopicEntry, TopicKey, TopicSnapshot};

/// Storage abstraction for the collaborative topic bank.
pub trait TopicStore: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<TopicSnapshot>, StoreError>;
    fn save(&self, snapshot: &TopicSnapshot) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("topic store I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("topic store at {path} is not a valid topic mapping: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("topic store unavailable: {0}")]
    Unavailable(String),
}

/// On-disk value for one key: the current object form or the older bare activity list.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredTopic {
    Entry(TopicEntry),
    Activities(Vec<String>),
}

impl From<StoredTopic> for TopicEntry {
    fn from(stored: StoredTopic) -> Self {
        match stored {
            StoredTopic::Entry(entry) => {
                TopicEntry::new(entry.keywords.iter(), entry.activities.iter())
            }
            StoredTopic::Activities(activities) => {
                TopicEntry::new(std::iter::empty::<&str>(), activities.iter())
            }
        }
    }
}

/// Single JSON object mapping topic → `{ "keywords": [...], "atividades": [...] }`.
#[derive(Debug, Clone)]
pub struct JsonFileTopicStore {
    path: PathBuf,
}

impl JsonFileTopicStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl TopicStore for JsonFileTopicStore {
    fn load(&self) -> Result<Option<TopicSnapshot>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "topic store not found; starting from seed");
                return Ok(None);
            }
            Err(err) => return Err(self.io_error(err)),
        };

        let stored: BTreeMap<String, StoredTopic> =
            serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        let mut snapshot = TopicSnapshot::new();
        for (topic, value) in stored {
            let entry = TopicEntry::from(value);
            // Keys that normalize to the same topic are merged.
            let slot = snapshot.entry(TopicKey::new(&topic)).or_default();
            slot.add_keywords(&entry.keywords);
            slot.add_activities(&entry.activities);
        }

        debug!(path = %self.path.display(), topics = snapshot.len(), "topic store loaded");
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &TopicSnapshot) -> Result<(), StoreError> {
        let payload =
            serde_json::to_string_pretty(snapshot).map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }

        let temp = self.temp_path();
        fs::write(&temp, payload).map_err(|err| self.io_error(err))?;
        fs::rename(&temp, &self.path).map_err(|err| self.io_error(err))?;

        info!(path = %self.path.display(), topics = snapshot.len(), "topic store saved");
        Ok(())
    }
}

/// Process-local store for tests and offline commands.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTopicStore {
    snapshot: Arc<Mutex<Option<TopicSnapshot>>>,
}

impl InMemoryTopicStore {
    pub fn with_snapshot(snapshot: TopicSnapshot) -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(Some(snapshot))),
        }
    }

    /// Last saved snapshot, if any.
    pub fn saved(&self) -> Option<TopicSnapshot> {
        self.snapshot.lock().ok().and_then(|guard| guard.clone())
    }
}

impl TopicStore for InMemoryTopicStore {
    fn load(&self) -> Result<Option<TopicSnapshot>, StoreError> {
        let guard = self
            .snapshot
            .lock()
            .map_err(|_| StoreError::Unavailable("in-memory store mutex poisoned".into()))?;
        Ok(guard.clone())
    }

    fn save(&self, snapshot: &TopicSnapshot) -> Result<(), StoreError> {
        let mut guard = self
            .snapshot
            .lock()
            .map_err(|_| StoreError::Unavailable("in-memory store mutex poisoned".into()))?;
        *guard = Some(snapshot.clone());
        Ok(())
    }
}
