//! Render strategies
//!
//! Three ways to present a schema: a read-only bulk preview, a single-page
//! fill and a step-by-step wizard. The two fill modes run the validation
//! engine and hand completed answers to a [`SubmissionSink`].

mod fill;
mod output;
mod preview;
mod widget;
mod wizard;

pub use fill::SinglePageFill;
pub use output::{format_output_value, SubmissionView};
pub use preview::{BulkPreview, PreviewRow, RowStatus};
pub use widget::{FieldWidget, Widget};
pub use wizard::{Progress, StepOutcome, StepWizard};

use thiserror::Error;
use uuid::Uuid;

use crate::model::{FormData, Submission};
use crate::storage::StoreError;
use crate::validation::{FieldError, ValidationReport};

/// Receives completed answer-sets.
pub trait SubmissionSink {
    fn submit(&mut self, form_id: Uuid, data: FormData) -> Result<Submission, StoreError>;
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Validation failed: {0}")]
    Validation(ValidationReport),

    #[error("Invalid answer: {0}")]
    InvalidField(FieldError),

    #[error("Form has no fields")]
    EmptySchema,

    #[error("Form was already submitted")]
    AlreadySubmitted,

    #[error(transparent)]
    Store(#[from] StoreError),
}
