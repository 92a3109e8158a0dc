//! Store handle and partitions.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;

/// Directory, relative to the workspace, holding the database files.
pub const STORE_DIR: &str = "_pixano_db";

/// Partitions opened with the store. Nothing else is addressable.
pub const PARTITIONS: &[&str] = &[
    "datasets", "specs", "tasks", "jobs", "results", "labels", "users",
];

/// Store could not be opened. Always fatal at startup.
#[derive(Debug, Error)]
pub enum StoreInitError {
    /// sled refused the directory (permissions, lock held, corruption).
    #[error("failed to open store at {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: sled::Error,
    },

    /// A partition could not be created or loaded.
    #[error("failed to open partition {name}: {source}")]
    Partition {
        name: &'static str,
        #[source]
        source: sled::Error,
    },

    /// The blocking open task panicked or was cancelled.
    #[error("store open task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Read/write failure on an open store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Sled(#[from] sled::Error),

    #[error("stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Handle to the opened store.
///
/// Cheap to clone; every clone refers to the same database and the same
/// partition set, fixed when the store was opened.
#[derive(Clone)]
pub struct Store {
    db: sled::Db,
    root: PathBuf,
    partitions: Arc<BTreeMap<&'static str, Partition>>,
}

impl Store {
    /// Open (or create) the store under `workspace`. Blocks on disk I/O.
    pub fn open_blocking(workspace: &Path) -> Result<Self, StoreInitError> {
        let root = workspace.join(STORE_DIR);
        let db = sled::open(&root).map_err(|source| StoreInitError::Open {
            path: root.clone(),
            source,
        })?;

        let mut partitions = BTreeMap::new();
        for &name in PARTITIONS {
            let tree = db
                .open_tree(name)
                .map_err(|source| StoreInitError::Partition { name, source })?;
            partitions.insert(name, Partition { tree });
        }

        tracing::debug!(
            path = %root.display(),
            partitions = partitions.len(),
            recovered = db.was_recovered(),
            "Store opened"
        );

        Ok(Self {
            db,
            root,
            partitions: Arc::new(partitions),
        })
    }

    /// Directory holding the database files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Look up a partition by name.
    pub fn partition(&self, name: &str) -> Option<&Partition> {
        self.partitions.get(name)
    }

    pub fn partition_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.partitions.keys().copied()
    }

    /// Flush dirty pages to disk.
    pub async fn flush(&self) -> Result<(), StoreError> {
        let db = self.db.clone();
        let flushed = tokio::task::spawn_blocking(move || db.flush()).await??;
        tracing::debug!(bytes = flushed, "Store flushed");
        Ok(())
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("root", &self.root)
            .field("partitions", &self.partitions.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// One named key space holding JSON documents.
#[derive(Clone)]
pub struct Partition {
    tree: sled::Tree,
}

impl Partition {
    pub fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        match self.tree.get(key.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Insert or replace. Returns true when a previous value existed.
    pub fn put(&self, key: &str, value: &Value) -> Result<bool, StoreError> {
        let bytes = serde_json::to_vec(value)?;
        Ok(self.tree.insert(key.as_bytes(), bytes)?.is_some())
    }

    /// Returns true when something was removed.
    pub fn remove(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.tree.remove(key.as_bytes())?.is_some())
    }

    /// All entries, keyed by their (lossily decoded) key.
    pub fn entries(&self) -> Result<Map<String, Value>, StoreError> {
        let mut out = Map::new();
        for item in self.tree.iter() {
            let (key, bytes) = item?;
            let key = String::from_utf8_lossy(&key).into_owned();
            out.insert(key, serde_json::from_slice(&bytes)?);
        }
        Ok(out)
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_open_creates_partitions() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open_blocking(dir.path()).unwrap();

        assert_eq!(store.root(), dir.path().join(STORE_DIR));
        assert!(store.root().is_dir());
        assert_eq!(store.partition_names().count(), PARTITIONS.len());
        assert!(store.partition("tasks").is_some());
        assert!(store.partition("nope").is_none());
    }

    #[test]
    fn test_partition_crud() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open_blocking(dir.path()).unwrap();
        let labels = store.partition("labels").unwrap();

        assert!(labels.is_empty());
        assert!(!labels.put("a", &json!({"x": 1})).unwrap());
        assert!(labels.put("a", &json!({"x": 2})).unwrap());
        assert_eq!(labels.get("a").unwrap(), Some(json!({"x": 2})));
        assert_eq!(labels.len(), 1);

        let all = labels.entries().unwrap();
        assert_eq!(all.get("a"), Some(&json!({"x": 2})));

        assert!(labels.remove("a").unwrap());
        assert!(!labels.remove("a").unwrap());
        assert_eq!(labels.get("a").unwrap(), None);
    }

    #[test]
    fn test_partitions_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open_blocking(dir.path()).unwrap();

        store.partition("tasks").unwrap().put("k", &json!(1)).unwrap();
        assert_eq!(store.partition("jobs").unwrap().get("k").unwrap(), None);
    }

    #[test]
    fn test_open_fails_when_workspace_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, b"not a directory").unwrap();

        let err = Store::open_blocking(&file).unwrap_err();
        assert!(matches!(err, StoreInitError::Open { .. }));
    }
}
