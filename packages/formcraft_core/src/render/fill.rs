//! Single-page fill: every field editable at once, one submit.

use crate::model::{FormSchema, Submission};
use crate::validation::{FieldError, FormInput, RawValue, SchemaValidator, ValidationReport};

use super::widget::FieldWidget;
use super::{RenderError, SubmissionSink};

pub struct SinglePageFill {
    schema: FormSchema,
    validator: SchemaValidator,
    input: FormInput,
    report: Option<ValidationReport>,
}

impl SinglePageFill {
    pub fn new(schema: FormSchema) -> Self {
        let validator = SchemaValidator::for_schema(&schema);
        Self {
            schema,
            validator,
            input: FormInput::new(),
            report: None,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn widgets(&self) -> Vec<FieldWidget<'_>> {
        self.schema.items.iter().map(FieldWidget::new).collect()
    }

    /// Set the raw input of a field by name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<RawValue>) {
        self.input.set(name, value);
    }

    pub fn clear(&mut self, name: &str) {
        self.input.clear(name);
    }

    pub fn input(&self) -> &FormInput {
        &self.input
    }

    /// Outcome of the last submit attempt, if any.
    pub fn last_report(&self) -> Option<&ValidationReport> {
        self.report.as_ref()
    }

    /// Error shown next to a field after the last submit attempt.
    pub fn error_for(&self, name: &str) -> Option<&FieldError> {
        self.report.as_ref().and_then(|r| r.error_for(name))
    }

    /// Validate without submitting.
    pub fn validate(&self) -> ValidationReport {
        self.validator.validate(&self.input)
    }

    /// Validate every field; on success hand the answers to `sink`.
    pub fn submit(&mut self, sink: &mut dyn SubmissionSink) -> Result<Submission, RenderError> {
        let report = self.validate();
        self.report = Some(report.clone());
        let data = report.into_data().map_err(RenderError::Validation)?;
        Ok(sink.submit(self.schema.id, data)?)
    }
}
