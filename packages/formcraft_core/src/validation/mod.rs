//! Validation engine
//!
//! Each field definition is compiled into a rule closure: a base rule chosen
//! by the field's kind, wrapped by the required/optional policy. Schema-wide
//! validators fold the per-field rules and check every field, collecting all
//! failures so they can be shown together.

mod error;
mod input;

pub use error::{FieldError, FieldErrorKind};
pub use input::{FormInput, RawValue};

use std::fmt;

use crate::model::{FieldDefinition, FieldKind, FieldValue, FormData, FormSchema};

type Rule = Box<dyn Fn(&str, &RawValue) -> Result<FieldValue, FieldError> + Send + Sync>;

fn base_rule(kind: &FieldKind) -> Rule {
    match kind {
        // Select answers are not checked against the option list.
        FieldKind::Text { .. } | FieldKind::Select { .. } => {
            Box::new(|name: &str, raw: &RawValue| match raw {
                RawValue::Text(s) => Ok(FieldValue::Text(s.clone())),
                RawValue::Empty => Ok(FieldValue::Text(String::new())),
                RawValue::File(_) => Err(FieldError::type_coercion(name, "Expected text")),
            })
        }
        FieldKind::Number { .. } => Box::new(|name: &str, raw: &RawValue| match raw {
            RawValue::Text(s) => coerce_number(s)
                .map(FieldValue::Number)
                .ok_or_else(|| FieldError::type_coercion(name, "Expected a number")),
            RawValue::Empty | RawValue::File(_) => {
                Err(FieldError::type_coercion(name, "Expected a number"))
            }
        }),
        FieldKind::File { .. } => Box::new(|name: &str, raw: &RawValue| match raw {
            RawValue::File(file) => Ok(FieldValue::File(file.clone())),
            RawValue::Empty => Ok(FieldValue::Null),
            RawValue::Text(_) => Err(FieldError::type_coercion(name, "Expected a file")),
        }),
    }
}

fn require(rule: Rule) -> Rule {
    Box::new(move |name: &str, raw: &RawValue| {
        if raw.is_empty() {
            return Err(FieldError::required(name));
        }
        rule(name, raw)
    })
}

fn optional(rule: Rule) -> Rule {
    Box::new(move |name: &str, raw: &RawValue| {
        if raw.is_empty() {
            return Ok(FieldValue::Null);
        }
        rule(name, raw)
    })
}

/// Parse a decimal number, ignoring surrounding whitespace.
pub fn coerce_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Compiled validator for a single field.
pub struct FieldValidator {
    name: String,
    rule: Rule,
}

impl FieldValidator {
    pub fn for_field(field: &FieldDefinition) -> Self {
        let base = base_rule(&field.kind);
        let rule = if field.required {
            require(base)
        } else {
            optional(base)
        };
        Self {
            name: field.name.clone(),
            rule,
        }
    }

    /// The field name this validator reads from the input.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn validate(&self, raw: &RawValue) -> Result<FieldValue, FieldError> {
        (self.rule)(&self.name, raw)
    }
}

impl fmt::Debug for FieldValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldValidator").field("name", &self.name).finish()
    }
}

/// Validator over a set of fields, in schema order.
#[derive(Debug)]
pub struct SchemaValidator {
    fields: Vec<FieldValidator>,
}

impl SchemaValidator {
    /// Validator over every field of the schema.
    pub fn for_schema(schema: &FormSchema) -> Self {
        Self {
            fields: schema.items.iter().map(FieldValidator::for_field).collect(),
        }
    }

    /// Validator scoped to exactly one field.
    pub fn for_single_field(field: &FieldDefinition) -> Self {
        Self {
            fields: vec![FieldValidator::for_field(field)],
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Check every field. Never stops at the first failure.
    pub fn validate(&self, input: &FormInput) -> ValidationReport {
        let outcomes = self
            .fields
            .iter()
            .map(|validator| FieldOutcome {
                name: validator.name().to_string(),
                result: validator.validate(input.get(validator.name())),
            })
            .collect();
        ValidationReport { outcomes }
    }
}

/// Result of validating one field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldOutcome {
    pub name: String,
    pub result: Result<FieldValue, FieldError>,
}

impl FieldOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-field results of a schema-wide validation.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationReport {
    outcomes: Vec<FieldOutcome>,
}

impl ValidationReport {
    pub fn outcomes(&self) -> &[FieldOutcome] {
        &self.outcomes
    }

    pub fn is_valid(&self) -> bool {
        self.outcomes.iter().all(FieldOutcome::is_ok)
    }

    pub fn errors(&self) -> impl Iterator<Item = &FieldError> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().err())
    }

    pub fn error_for(&self, name: &str) -> Option<&FieldError> {
        self.outcomes
            .iter()
            .filter(|o| o.name == name)
            .find_map(|o| o.result.as_ref().err())
    }

    /// Collect the validated answers, or hand the report back if anything failed.
    ///
    /// Fields sharing a name collapse into one key; the later field wins.
    pub fn into_data(self) -> Result<FormData, ValidationReport> {
        if !self.is_valid() {
            return Err(self);
        }
        let mut data = FormData::new();
        for outcome in self.outcomes {
            if let Ok(value) = outcome.result {
                data.insert(outcome.name, value);
            }
        }
        Ok(data)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors().map(|e| e.to_string()).collect();
        if messages.is_empty() {
            write!(f, "all {} field(s) valid", self.outcomes.len())
        } else {
            write!(f, "{} field(s) invalid: {}", messages.len(), messages.join("; "))
        }
    }
}

impl std::error::Error for ValidationReport {}
