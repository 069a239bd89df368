// Formcraft - schema-driven forms with local persistence

pub mod builder;
pub mod config;
pub mod model;
pub mod remote;
pub mod render;
pub mod service;
pub mod storage;
pub mod validation;

pub use builder::{BuilderController, BuilderError, BuilderState, FieldDraft};
pub use config::FormcraftConfig;
pub use model::{
    FieldDefinition, FieldKind, FieldType, FieldValue, FileHandle, FormData, FormSchema, Submission,
};
pub use render::{
    BulkPreview, RenderError, SinglePageFill, StepOutcome, StepWizard, SubmissionSink,
};
pub use service::FormService;
pub use storage::{FileRecordStorage, InMemoryRecordStorage, RecordStorage, StoreError};
pub use validation::{FieldError, FieldErrorKind, FormInput, RawValue, SchemaValidator};
