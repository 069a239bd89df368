//! Raw field authoring input.

use serde::{Deserialize, Serialize};

use crate::model::{split_list, FieldDefinition, FieldKind, FieldType};
use crate::validation::coerce_number;

use super::BuilderError;

/// The field authoring form as typed by the user: every attribute as text.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldDraft {
    pub kind: String,
    pub label: String,
    pub name: String,
    pub required: bool,
    pub description: String,
    pub placeholder: String,
    /// Comma-separated.
    pub options: String,
    pub min: String,
    pub max: String,
    /// Comma-separated extensions.
    pub accepted_file_types: String,
}

impl Default for FieldDraft {
    fn default() -> Self {
        Self {
            kind: FieldType::Text.as_str().to_string(),
            label: String::new(),
            name: String::new(),
            required: false,
            description: String::new(),
            placeholder: String::new(),
            options: String::new(),
            min: String::new(),
            max: String::new(),
            accepted_file_types: String::new(),
        }
    }
}

impl FieldDraft {
    pub fn new(kind: FieldType, label: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.as_str().to_string(),
            label: label.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Validate the draft and build a field with a fresh id.
    ///
    /// Only the attributes of the selected kind are carried over.
    pub fn build(&self) -> Result<FieldDefinition, BuilderError> {
        let field_type: FieldType = self
            .kind
            .parse()
            .map_err(|_| BuilderError::UnknownFieldKind(self.kind.clone()))?;

        if self.label.trim().is_empty() {
            return Err(BuilderError::MissingLabel);
        }
        let name = self.name.trim();
        if name.is_empty() {
            return Err(BuilderError::MissingName);
        }

        let kind = match field_type {
            FieldType::Text => FieldKind::Text {
                placeholder: non_empty(&self.placeholder),
            },
            FieldType::Select => FieldKind::Select {
                options: split_list(&self.options),
            },
            FieldType::Number => FieldKind::Number {
                min: parse_bound("min", &self.min)?,
                max: parse_bound("max", &self.max)?,
            },
            FieldType::File => FieldKind::File {
                accepted_file_types: split_list(&self.accepted_file_types),
            },
        };

        let mut field = FieldDefinition::new(self.label.clone(), name, kind);
        field.required = self.required;
        field.description = non_empty(&self.description);
        Ok(field)
    }
}

fn non_empty(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

fn parse_bound(bound: &'static str, raw: &str) -> Result<Option<f64>, BuilderError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    coerce_number(raw)
        .map(Some)
        .ok_or_else(|| BuilderError::InvalidBound {
            bound,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_options_are_split_and_trimmed() {
        let draft = FieldDraft {
            options: " small, medium ,large".into(),
            placeholder: "ignored".into(),
            ..FieldDraft::new(FieldType::Select, "Size", "size")
        };
        let field = draft.build().unwrap();
        assert_eq!(
            field.kind,
            FieldKind::Select {
                options: vec!["small".into(), "medium".into(), "large".into()]
            }
        );
    }

    #[test]
    fn test_file_types_are_split() {
        let draft = FieldDraft {
            accepted_file_types: ".pdf, .docx".into(),
            ..FieldDraft::new(FieldType::File, "CV", "cv")
        };
        assert_eq!(
            draft.build().unwrap().kind,
            FieldKind::File {
                accepted_file_types: vec![".pdf".into(), ".docx".into()]
            }
        );
    }

    #[test]
    fn test_number_bounds() {
        let draft = FieldDraft {
            min: "0".into(),
            max: "".into(),
            ..FieldDraft::new(FieldType::Number, "Age", "age")
        };
        assert_eq!(
            draft.build().unwrap().kind,
            FieldKind::Number {
                min: Some(0.0),
                max: None
            }
        );

        let bad = FieldDraft {
            max: "lots".into(),
            ..FieldDraft::new(FieldType::Number, "Age", "age")
        };
        assert!(matches!(
            bad.build(),
            Err(BuilderError::InvalidBound { bound: "max", .. })
        ));
    }

    #[test]
    fn test_label_and_name_are_required() {
        assert!(matches!(
            FieldDraft::new(FieldType::Text, " ", "q").build(),
            Err(BuilderError::MissingLabel)
        ));
        assert!(matches!(
            FieldDraft::new(FieldType::Text, "Q", "").build(),
            Err(BuilderError::MissingName)
        ));
    }

    #[test]
    fn test_unknown_kind() {
        let draft = FieldDraft {
            kind: "date".into(),
            ..FieldDraft::new(FieldType::Text, "When", "when")
        };
        assert!(matches!(draft.build(), Err(BuilderError::UnknownFieldKind(k)) if k == "date"));
    }

    #[test]
    fn test_draft_from_json_uses_defaults() {
        let draft: FieldDraft =
            serde_json::from_str(r#"{"label":"Email","name":"email","required":true}"#).unwrap();
        let field = draft.build().unwrap();
        assert_eq!(field.field_type(), FieldType::Text);
        assert!(field.required);
        assert_eq!(field.description, None);
    }
}
