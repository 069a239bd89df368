//! Step-by-step wizard: one field per step.
//!
//! `next` validates only the current field, stores the answer and advances;
//! on the last step it submits instead. `previous` steps back without
//! validating and without forgetting answers.

use std::fmt;

use crate::model::{FieldDefinition, FieldValue, FormData, FormSchema, Submission};
use crate::validation::{FormInput, RawValue, SchemaValidator};

use super::widget::FieldWidget;
use super::{RenderError, SubmissionSink};

/// Where the wizard ended up after `next`.
#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome {
    /// Moved on to this step index.
    Advanced(usize),
    Submitted(Submission),
}

/// "Question {current} of {total}", 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Question {} of {}", self.current, self.total)
    }
}

pub struct StepWizard {
    schema: FormSchema,
    index: usize,
    answers: FormData,
    submitted: bool,
}

impl StepWizard {
    /// A schema without fields has no steps and cannot be filled this way.
    pub fn new(schema: FormSchema) -> Result<Self, RenderError> {
        if schema.is_empty() {
            return Err(RenderError::EmptySchema);
        }
        Ok(Self {
            schema,
            index: 0,
            answers: FormData::new(),
            submitted: false,
        })
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn step_count(&self) -> usize {
        self.schema.len()
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.schema.len()
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn progress(&self) -> Progress {
        Progress {
            current: self.index + 1,
            total: self.schema.len(),
        }
    }

    pub fn current_field(&self) -> &FieldDefinition {
        &self.schema.items[self.index]
    }

    pub fn current_widget(&self) -> FieldWidget<'_> {
        FieldWidget::new(self.current_field())
    }

    /// The answer already recorded for the current step, used to pre-fill it.
    pub fn current_answer(&self) -> Option<&FieldValue> {
        self.answers.get(&self.current_field().name)
    }

    /// Answers collected so far, keyed by field name.
    pub fn answers(&self) -> &FormData {
        &self.answers
    }

    /// Validate the current field's input and move forward, or submit on the last step.
    ///
    /// A failure leaves the step and the answers untouched.
    pub fn next(
        &mut self,
        raw: impl Into<RawValue>,
        sink: &mut dyn SubmissionSink,
    ) -> Result<StepOutcome, RenderError> {
        if self.submitted {
            return Err(RenderError::AlreadySubmitted);
        }

        let field = self.current_field();
        let mut input = FormInput::new();
        input.set(field.name.clone(), raw);

        let report = SchemaValidator::for_single_field(field).validate(&input);
        if let Some(error) = report.errors().next() {
            return Err(RenderError::InvalidField(error.clone()));
        }
        let answer = report.into_data().map_err(RenderError::Validation)?;

        if self.is_last() {
            let mut data = self.answers.clone();
            data.extend(answer);
            let submission = sink.submit(self.schema.id, data.clone())?;
            self.answers = data;
            self.submitted = true;
            return Ok(StepOutcome::Submitted(submission));
        }

        self.answers.extend(answer);
        self.index += 1;
        Ok(StepOutcome::Advanced(self.index))
    }

    /// Step back one field. No-op on the first step.
    pub fn previous(&mut self) -> usize {
        if !self.submitted && self.index > 0 {
            self.index -= 1;
        }
        self.index
    }
}
