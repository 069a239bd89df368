//! Keyed record backends.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use super::StoreError;

/// A flat key → string record store.
pub trait RecordStorage: Send + Sync {
    /// Read a record. `Ok(None)` when it has never been written.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace a record with new contents.
    fn write(&self, key: &str, contents: &str) -> Result<(), StoreError>;
}

/// Stores each record as `{key}.json` in a directory.
#[derive(Clone, Debug)]
pub struct FileRecordStorage {
    root: PathBuf,
}

impl FileRecordStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl RecordStorage for FileRecordStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.record_path(key);
        if !path.exists() {
            return Ok(None);
        }
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| StoreError::IoError(format!("{}: {}", path.display(), e)))
    }

    fn write(&self, key: &str, contents: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.root)
            .map_err(|e| StoreError::IoError(format!("{}: {}", self.root.display(), e)))?;

        let path = self.record_path(key);
        // Write to a temp file first, then rename for atomicity
        let tmp_path = self.root.join(format!("{}.json.tmp", key));

        if let Err(e) = std::fs::write(&tmp_path, contents) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(StoreError::IoError(format!("{}: {}", tmp_path.display(), e)));
        }

        std::fs::rename(&tmp_path, &path).map_err(|e| {
            StoreError::IoError(format!(
                "rename {} -> {}: {}",
                tmp_path.display(),
                path.display(),
                e
            ))
        })
    }
}

/// Records held in memory, for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct InMemoryRecordStorage {
    records: RwLock<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl InMemoryRecordStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-loaded records.
    pub fn with_records<K, V>(records: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            records: RwLock::new(
                records
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make every following write fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Raw contents of a record, bypassing any store.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.records
            .read()
            .ok()
            .and_then(|records| records.get(key).cloned())
    }
}

impl RecordStorage for InMemoryRecordStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::IoError("record lock poisoned".to_string()))?;
        Ok(records.get(key).cloned())
    }

    fn write(&self, key: &str, contents: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::IoError(format!("write to '{}' refused", key)));
        }
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::IoError("record lock poisoned".to_string()))?;
        records.insert(key.to_string(), contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileRecordStorage::new(dir.path().join("records"));

        assert!(storage.read("customForms").unwrap().is_none());

        storage.write("customForms", "[]").unwrap();
        assert_eq!(storage.read("customForms").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("records/customForms.json").exists());
        assert!(!dir.path().join("records/customForms.json.tmp").exists());

        storage.write("customForms", "[1]").unwrap();
        assert_eq!(storage.read("customForms").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_in_memory_failing_writes() {
        let storage = InMemoryRecordStorage::with_records([("k", "old")]);
        storage.set_fail_writes(true);
        assert!(storage.write("k", "new").is_err());
        assert_eq!(storage.raw("k").as_deref(), Some("old"));

        storage.set_fail_writes(false);
        storage.write("k", "new").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("new"));
    }
}
