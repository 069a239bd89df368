//! The form service: both stores behind the operations the shell uses.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::FormcraftConfig;
use crate::model::{FormData, FormSchema, Submission};
use crate::render::SubmissionSink;
use crate::storage::{
    FileRecordStorage, InMemoryRecordStorage, RecordStorage, SchemaStore, StoreError,
    SubmissionStore,
};

pub struct FormService {
    schemas: SchemaStore,
    submissions: SubmissionStore,
}

impl FormService {
    /// Open both stores on `backend`, loading them before anything can be written.
    pub fn open(backend: Arc<dyn RecordStorage>) -> Self {
        Self {
            schemas: SchemaStore::open(backend.clone()),
            submissions: SubmissionStore::open(backend),
        }
    }

    /// Open a file-backed service in the configured data directory.
    pub fn from_config(config: &FormcraftConfig) -> Self {
        log::debug!("opening form records in {}", config.data_dir.display());
        Self::open(Arc::new(FileRecordStorage::new(&config.data_dir)))
    }

    /// A service whose records live only in memory.
    pub fn in_memory() -> Self {
        Self::open(Arc::new(InMemoryRecordStorage::new()))
    }

    pub fn schemas(&self) -> &SchemaStore {
        &self.schemas
    }

    pub fn submissions(&self) -> &SubmissionStore {
        &self.submissions
    }

    pub fn list_schemas(&self) -> &[FormSchema] {
        self.schemas.list()
    }

    pub fn get_schema(&self, id: &Uuid) -> Option<&FormSchema> {
        self.schemas.get(id)
    }

    /// Insert a schema, or replace the stored schema with the same id.
    pub fn save_schema(&mut self, schema: FormSchema) -> Result<Uuid, StoreError> {
        let id = schema.id;
        if self.schemas.contains(&id) {
            self.schemas.update(&id, schema)?;
            Ok(id)
        } else {
            self.schemas.create(schema)
        }
    }

    /// Append a schema as new.
    pub fn create_schema(&mut self, schema: FormSchema) -> Result<Uuid, StoreError> {
        self.schemas.create(schema)
    }

    /// Replace the stored schema under `id`; no-op when absent.
    pub fn update_schema(&mut self, id: &Uuid, schema: FormSchema) -> Result<bool, StoreError> {
        self.schemas.update(id, schema)
    }

    /// Delete a schema and every submission recorded against it.
    ///
    /// Deleting an unknown id changes nothing. Returns the number of
    /// submissions removed.
    pub fn delete_schema(&mut self, id: &Uuid) -> Result<usize, StoreError> {
        let removed = self.schemas.remove(id)?;
        let orphans = self.submissions.remove_by_form_id(id)?;
        if removed || orphans > 0 {
            log::info!("deleted form {} and {} submission(s)", id, orphans);
        }
        Ok(orphans)
    }

    /// Submissions for one form, or all of them.
    pub fn list_submissions(&self, form_id: Option<&Uuid>) -> Vec<&Submission> {
        match form_id {
            Some(id) => self.submissions.list_for_form(id),
            None => self.submissions.list().iter().collect(),
        }
    }

    /// Record a completed answer-set against `form_id`.
    pub fn record_submission(&mut self, form_id: Uuid, data: FormData) -> Result<Submission, StoreError> {
        let submission = Submission::new(form_id, data);
        self.submissions.append(submission.clone())?;
        log::debug!("recorded submission {} for form {}", submission.id, form_id);
        Ok(submission)
    }

    /// Whether either store holds changes that failed to persist.
    pub fn has_unsaved_changes(&self) -> bool {
        self.schemas.is_dirty() || self.submissions.is_dirty()
    }

    /// Retry any failed writes. Returns whether both records are current.
    pub fn flush(&mut self) -> bool {
        let schemas = self.schemas.flush();
        let submissions = self.submissions.flush();
        schemas && submissions
    }
}

impl SubmissionSink for FormService {
    fn submit(&mut self, form_id: Uuid, data: FormData) -> Result<Submission, StoreError> {
        self.record_submission(form_id, data)
    }
}
