//! Durable storage for schemas and submissions
//!
//! Each store owns one in-memory collection mirrored to a single record in a
//! [`RecordStorage`] backend. Every mutation rewrites the whole record. A store
//! refuses mutations until it has finished its initial load, so an empty
//! collection can never overwrite a record that was not read yet.

mod backend;
mod collection;
pub mod schema_store;
pub mod submission_store;

pub use backend::{FileRecordStorage, InMemoryRecordStorage, RecordStorage};
pub use schema_store::SchemaStore;
pub use submission_store::SubmissionStore;

use thiserror::Error;

/// Record holding the JSON array of form schemas.
pub const SCHEMAS_KEY: &str = "customForms";

/// Record holding the JSON array of submissions.
pub const SUBMISSIONS_KEY: &str = "formSubmissions";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Store not initialized: {0}")]
    NotInitialized(String),
}
