//! A vector mirrored to one storage record.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{RecordStorage, StoreError};

pub(crate) struct PersistentCollection<T> {
    key: &'static str,
    backend: Arc<dyn RecordStorage>,
    items: Vec<T>,
    initialized: bool,
    dirty: bool,
}

impl<T> PersistentCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create an empty, uninitialized collection (does not read the backend).
    pub(crate) fn new(key: &'static str, backend: Arc<dyn RecordStorage>) -> Self {
        Self {
            key,
            backend,
            items: Vec::new(),
            initialized: false,
            dirty: false,
        }
    }

    /// Read the record and mark the collection initialized.
    ///
    /// An unreadable or corrupt record is logged and treated as empty.
    /// Loading twice is a no-op.
    pub(crate) fn load(&mut self) -> usize {
        if self.initialized {
            log::debug!("[{}] already loaded, keeping in-memory state", self.key);
            return self.items.len();
        }

        self.items = match self.read_record() {
            Ok(items) => {
                log::debug!("[{}] loaded {} record(s)", self.key, items.len());
                items
            }
            Err(e) => {
                log::warn!("[{}] load failed, starting empty: {}", self.key, e);
                Vec::new()
            }
        };
        self.initialized = true;
        self.items.len()
    }

    fn read_record(&self) -> Result<Vec<T>, StoreError> {
        match self.backend.read(self.key)? {
            None => Ok(Vec::new()),
            Some(contents) => serde_json::from_str(&contents)
                .map_err(|e| StoreError::DeserializationError(e.to_string())),
        }
    }

    pub(crate) fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn items(&self) -> &[T] {
        &self.items
    }

    /// Apply a change to the in-memory items, then rewrite the record.
    ///
    /// Fails only when the collection has not been loaded yet. A failed
    /// write is logged and leaves the collection dirty.
    pub(crate) fn mutate<R>(&mut self, change: impl FnOnce(&mut Vec<T>) -> R) -> Result<R, StoreError> {
        if !self.initialized {
            return Err(StoreError::NotInitialized(self.key.to_string()));
        }
        let result = change(&mut self.items);
        self.dirty = true;
        self.flush();
        Ok(result)
    }

    /// Rewrite the whole record if there are unsaved changes.
    ///
    /// Returns whether the durable copy is now up to date.
    pub(crate) fn flush(&mut self) -> bool {
        if !self.dirty {
            return true;
        }
        if !self.initialized {
            log::warn!("[{}] flush skipped: collection not loaded", self.key);
            return false;
        }

        let result = serde_json::to_string(&self.items)
            .map_err(|e| StoreError::SerializationError(e.to_string()))
            .and_then(|json| self.backend.write(self.key, &json));

        match result {
            Ok(()) => {
                self.dirty = false;
                true
            }
            Err(e) => {
                // dirty remains true so next flush retries
                log::error!("[{}] persist failed: {}", self.key, e);
                false
            }
        }
    }
}
