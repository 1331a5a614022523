//! Durable storage for the task and folder collections.
//!
//! Each collection is one JSON array stored under its own key (`tasks`,
//! `folders`). Loading never fails: a missing record yields the default
//! collection, and a record that cannot be read is replaced by the default
//! with a warning. Records that fail to decode individually are skipped.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{TaskpadError, TaskpadResult};
use crate::folder::Folder;
use crate::task::Task;

pub const TASKS_KEY: &str = "tasks";
pub const FOLDERS_KEY: &str = "folders";

/// Persistence backend for the repository.
pub trait Store {
    /// Raw JSON stored under `key`, or `None` if nothing was ever written.
    fn read(&self, key: &str) -> TaskpadResult<Option<String>>;

    fn write(&self, key: &str, content: &str) -> TaskpadResult<()>;

    fn load_tasks(&self) -> Vec<Task> {
        load_collection(self, TASKS_KEY).unwrap_or_default()
    }

    fn load_folders(&self) -> Vec<Folder> {
        load_collection(self, FOLDERS_KEY).unwrap_or_else(Folder::defaults)
    }

    fn save_tasks(&self, tasks: &[Task]) -> TaskpadResult<()> {
        save_collection(self, TASKS_KEY, tasks)
    }

    fn save_folders(&self, folders: &[Folder]) -> TaskpadResult<()> {
        save_collection(self, FOLDERS_KEY, folders)
    }
}

/// `None` when the record is absent or unreadable as a JSON array.
fn load_collection<S, T>(store: &S, key: &str) -> Option<Vec<T>>
where
    S: Store + ?Sized,
    T: DeserializeOwned,
{
    let raw = match store.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "could not read stored collection, using defaults");
            return None;
        }
    };
    decode_records(key, &raw)
}

fn save_collection<S, T>(store: &S, key: &str, items: &[T]) -> TaskpadResult<()>
where
    S: Store + ?Sized,
    T: Serialize,
{
    let content = serde_json::to_string_pretty(items)
        .map_err(|e| TaskpadError::Serialization(e.to_string()))?;
    store.write(key, &content)
}

fn decode_records<T: DeserializeOwned>(key: &str, raw: &str) -> Option<Vec<T>> {
    let values: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(values) => values,
        Err(e) => {
            tracing::warn!(key, error = %e, "stored collection is malformed, using defaults");
            return None;
        }
    };

    let records = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(key, index, error = %e, "skipping malformed record");
                None
            }
        })
        .collect();

    Some(records)
}

/// Stores each collection as `<key>.json` inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Store for FileStore {
    fn read(&self, key: &str) -> TaskpadResult<Option<String>> {
        let path = self.path(key);

        if !path.exists() {
            return Ok(None);
        }

        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn write(&self, key: &str, content: &str) -> TaskpadResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.path(key);
        let temp = self.dir.join(format!("{key}.json.tmp"));

        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }
}

/// In-process store, for tests and embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw record, as if written by an earlier session.
    pub fn with_record(self, key: &str, content: &str) -> Self {
        self.records
            .borrow_mut()
            .insert(key.to_string(), content.to_string());
        self
    }
}

impl Store for MemoryStore {
    fn read(&self, key: &str) -> TaskpadResult<Option<String>> {
        Ok(self.records.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, content: &str) -> TaskpadResult<()> {
        self.records
            .borrow_mut()
            .insert(key.to_string(), content.to_string());
        Ok(())
    }
}
