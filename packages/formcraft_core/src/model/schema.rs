//! Form schemas: a named, ordered list of fields.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::field::FieldDefinition;

/// Name given to every fresh draft.
pub const DEFAULT_FORM_NAME: &str = "New Form";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FormSchema {
    pub id: Uuid,
    pub name: String,
    /// Presentation order.
    #[serde(default)]
    pub items: Vec<FieldDefinition>,
}

impl FormSchema {
    /// A fresh, empty schema named "New Form".
    pub fn new() -> Self {
        Self::named(DEFAULT_FORM_NAME)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            items: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.items.push(field);
        self
    }

    pub fn field(&self, id: &Uuid) -> Option<&FieldDefinition> {
        self.items.iter().find(|f| f.id == *id)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldDefinition> {
        self.items.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Field names that occur more than once, in first-collision order.
    ///
    /// Answers are keyed by name, so a later duplicate overwrites an
    /// earlier one in a submission.
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for field in &self.items {
            if !seen.insert(field.name.as_str()) && !duplicates.contains(&field.name) {
                duplicates.push(field.name.clone());
            }
        }
        duplicates
    }
}

impl Default for FormSchema {
    fn default() -> Self {
        Self::new()
    }
}
