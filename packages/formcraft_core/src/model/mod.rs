//! Form data model: fields, schemas and submissions.

pub mod field;
pub mod schema;
pub mod submission;

pub use field::{split_list, FieldDefinition, FieldKind, FieldType, UnknownFieldType};
pub use schema::{FormSchema, DEFAULT_FORM_NAME};
pub use submission::{FieldValue, FileHandle, FormData, Submission};
