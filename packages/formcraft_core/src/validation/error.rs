use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// A required field had no value.
    Required,
    /// The raw input could not be read as the field's type.
    TypeCoercion,
}

/// A validation failure attached to one field.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn required(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: FieldErrorKind::Required,
            message: "This field is required".to_string(),
        }
    }

    pub fn type_coercion(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: FieldErrorKind::TypeCoercion,
            message: message.into(),
        }
    }
}
