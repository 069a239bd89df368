//! Persistent collection of form schemas.

use std::sync::Arc;

use uuid::Uuid;

use crate::model::FormSchema;

use super::collection::PersistentCollection;
use super::{RecordStorage, StoreError, SCHEMAS_KEY};

pub struct SchemaStore {
    schemas: PersistentCollection<FormSchema>,
}

impl SchemaStore {
    /// Create a store with an empty cache (does not load from the backend).
    pub fn new(backend: Arc<dyn RecordStorage>) -> Self {
        Self {
            schemas: PersistentCollection::new(SCHEMAS_KEY, backend),
        }
    }

    /// Create a store and load it.
    pub fn open(backend: Arc<dyn RecordStorage>) -> Self {
        let mut store = Self::new(backend);
        store.load();
        store
    }

    /// Load schemas from the backend. Returns how many were loaded.
    pub fn load(&mut self) -> usize {
        self.schemas.load()
    }

    pub fn is_initialized(&self) -> bool {
        self.schemas.is_initialized()
    }

    /// Whether the last write failed and has not been retried successfully.
    pub fn is_dirty(&self) -> bool {
        self.schemas.is_dirty()
    }

    /// Retry writing unsaved changes.
    pub fn flush(&mut self) -> bool {
        self.schemas.flush()
    }

    /// All schemas, in creation order.
    pub fn list(&self) -> &[FormSchema] {
        self.schemas.items()
    }

    pub fn get(&self, id: &Uuid) -> Option<&FormSchema> {
        self.list().iter().find(|s| s.id == *id)
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.get(id).is_some()
    }

    /// Append a schema.
    pub fn create(&mut self, schema: FormSchema) -> Result<Uuid, StoreError> {
        let id = schema.id;
        self.schemas.mutate(|schemas| schemas.push(schema))?;
        Ok(id)
    }

    /// Replace the schema stored under `id`. Absent ids are left alone.
    ///
    /// Returns whether a schema was replaced.
    pub fn update(&mut self, id: &Uuid, schema: FormSchema) -> Result<bool, StoreError> {
        self.schemas.mutate(|schemas| {
            match schemas.iter_mut().find(|s| s.id == *id) {
                Some(slot) => {
                    *slot = schema;
                    true
                }
                None => false,
            }
        })
    }

    /// Remove the schema stored under `id`. Returns whether one was removed.
    pub fn remove(&mut self, id: &Uuid) -> Result<bool, StoreError> {
        self.schemas.mutate(|schemas| {
            let before = schemas.len();
            schemas.retain(|s| s.id != *id);
            schemas.len() != before
        })
    }
}
