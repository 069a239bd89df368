//! Persistent collection of submissions.

use std::sync::Arc;

use uuid::Uuid;

use crate::model::Submission;

use super::collection::PersistentCollection;
use super::{RecordStorage, StoreError, SUBMISSIONS_KEY};

pub struct SubmissionStore {
    submissions: PersistentCollection<Submission>,
}

impl SubmissionStore {
    /// Create a store with an empty cache (does not load from the backend).
    pub fn new(backend: Arc<dyn RecordStorage>) -> Self {
        Self {
            submissions: PersistentCollection::new(SUBMISSIONS_KEY, backend),
        }
    }

    pub fn open(backend: Arc<dyn RecordStorage>) -> Self {
        let mut store = Self::new(backend);
        store.load();
        store
    }

    pub fn load(&mut self) -> usize {
        self.submissions.load()
    }

    pub fn is_initialized(&self) -> bool {
        self.submissions.is_initialized()
    }

    pub fn is_dirty(&self) -> bool {
        self.submissions.is_dirty()
    }

    pub fn flush(&mut self) -> bool {
        self.submissions.flush()
    }

    /// All submissions, oldest first.
    pub fn list(&self) -> &[Submission] {
        self.submissions.items()
    }

    pub fn list_for_form(&self, form_id: &Uuid) -> Vec<&Submission> {
        self.list().iter().filter(|s| s.form_id == *form_id).collect()
    }

    pub fn count_for_form(&self, form_id: &Uuid) -> usize {
        self.list().iter().filter(|s| s.form_id == *form_id).count()
    }

    pub fn append(&mut self, submission: Submission) -> Result<(), StoreError> {
        self.submissions.mutate(|submissions| submissions.push(submission))
    }

    /// Drop every submission recorded against `form_id`. Returns how many were dropped.
    pub fn remove_by_form_id(&mut self, form_id: &Uuid) -> Result<usize, StoreError> {
        self.submissions.mutate(|submissions| {
            let before = submissions.len();
            submissions.retain(|s| s.form_id != *form_id);
            before - submissions.len()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldValue, FormData};
    use crate::storage::{FileRecordStorage, InMemoryRecordStorage};

    fn answers(text: &str) -> FormData {
        let mut data = FormData::new();
        data.insert("q1".into(), FieldValue::from(text));
        data
    }

    #[test]
    fn test_append_persists() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(FileRecordStorage::new(dir.path()));
        let form_id = Uuid::new_v4();

        let submission = Submission::new(form_id, answers("hello"));
        {
            let mut store = SubmissionStore::open(backend.clone());
            store.append(submission.clone()).unwrap();
        }

        let store = SubmissionStore::open(backend);
        assert_eq!(store.list(), &[submission]);
    }

    #[test]
    fn test_remove_by_form_id() {
        let mut store = SubmissionStore::open(Arc::new(InMemoryRecordStorage::new()));
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        store.append(Submission::new(a, answers("1"))).unwrap();
        store.append(Submission::new(b, answers("2"))).unwrap();
        store.append(Submission::new(a, answers("3"))).unwrap();

        assert_eq!(store.remove_by_form_id(&a).unwrap(), 2);
        assert_eq!(store.remove_by_form_id(&a).unwrap(), 0);
        assert_eq!(store.list().len(), 1);
        assert_eq!(store.list_for_form(&b).len(), 1);
        assert_eq!(store.count_for_form(&a), 0);
    }

    #[test]
    fn test_corrupt_record_degrades_to_empty() {
        let backend = Arc::new(InMemoryRecordStorage::with_records([(SUBMISSIONS_KEY, "nope")]));
        let mut store = SubmissionStore::open(backend.clone());
        assert!(store.list().is_empty());

        store.append(Submission::new(Uuid::new_v4(), answers("x"))).unwrap();
        let stored: Vec<Submission> =
            serde_json::from_str(&backend.raw(SUBMISSIONS_KEY).unwrap()).unwrap();
        assert_eq!(stored.len(), 1);
    }
}
