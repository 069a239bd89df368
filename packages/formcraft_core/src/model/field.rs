//! Field definitions
//!
//! A field is one question in a form. The `kind` tag selects which extra
//! attributes exist; attributes belonging to other kinds are unrepresentable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind-specific attributes of a field, discriminated by `kind`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldKind {
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    Select {
        #[serde(default)]
        options: Vec<String>,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    File {
        #[serde(default, rename = "acceptedFileTypes")]
        accepted_file_types: Vec<String>,
    },
}

impl FieldKind {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldKind::Text { .. } => FieldType::Text,
            FieldKind::Select { .. } => FieldType::Select,
            FieldKind::Number { .. } => FieldType::Number,
            FieldKind::File { .. } => FieldType::File,
        }
    }
}

/// The bare variant tag, without attributes.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Select,
    Number,
    File,
}

impl FieldType {
    pub const ALL: [FieldType; 4] = [
        FieldType::Text,
        FieldType::Select,
        FieldType::Number,
        FieldType::File,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Select => "select",
            FieldType::Number => "number",
            FieldType::File => "file",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a kind string names none of the four field types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldType(pub String);

impl fmt::Display for UnknownFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field kind '{}'", self.0)
    }
}

impl std::error::Error for UnknownFieldType {}

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(FieldType::Text),
            "select" => Ok(FieldType::Select),
            "number" => Ok(FieldType::Number),
            "file" => Ok(FieldType::File),
            other => Err(UnknownFieldType(other.to_string())),
        }
    }
}

/// One field of a form schema.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FieldDefinition {
    /// Assigned at creation, never changed.
    pub id: Uuid,
    pub label: String,
    /// Key under which answers are recorded. Expected to be unique per schema.
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldDefinition {
    /// Create a field with a fresh id.
    pub fn new(label: impl Into<String>, name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            name: name.into(),
            required: false,
            description: None,
            kind,
        }
    }

    pub fn text(label: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(label, name, FieldKind::Text { placeholder: None })
    }

    pub fn select(label: impl Into<String>, name: impl Into<String>, options: Vec<String>) -> Self {
        Self::new(label, name, FieldKind::Select { options })
    }

    pub fn number(label: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(label, name, FieldKind::Number { min: None, max: None })
    }

    pub fn file(label: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(
            label,
            name,
            FieldKind::File {
                accepted_file_types: Vec::new(),
            },
        )
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }
}

/// Split a comma-separated list, trimming each entry.
///
/// An empty input yields an empty list.
pub fn split_list(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|part| part.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_from_str() {
        assert_eq!("text".parse::<FieldType>().unwrap(), FieldType::Text);
        assert_eq!(" Number ".parse::<FieldType>().unwrap(), FieldType::Number);
        assert!("date".parse::<FieldType>().is_err());
    }

    #[test]
    fn test_split_list_trims() {
        assert_eq!(split_list("red, green ,blue"), vec!["red", "green", "blue"]);
        assert!(split_list("   ").is_empty());
    }

    #[test]
    fn test_serialized_shape_is_tagged_by_kind() {
        let field = FieldDefinition::file("Upload", "upload").required();
        let json = serde_json::to_value(&field).unwrap();

        assert_eq!(json["kind"], "file");
        assert_eq!(json["name"], "upload");
        assert_eq!(json["required"], true);
        assert!(json["acceptedFileTypes"].as_array().unwrap().is_empty());
        assert!(json.get("placeholder").is_none());
    }

    #[test]
    fn test_number_bounds_survive_serde() {
        let field = FieldDefinition::new(
            "Age",
            "age",
            FieldKind::Number {
                min: Some(0.0),
                max: Some(120.0),
            },
        );
        let json = serde_json::to_string(&field).unwrap();
        let back: FieldDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, field);
    }

    #[test]
    fn test_unknown_kind_is_rejected_on_load() {
        let json = format!(
            r#"{{"id":"{}","label":"When","name":"when","required":false,"kind":"date"}}"#,
            Uuid::new_v4()
        );
        assert!(serde_json::from_str::<FieldDefinition>(&json).is_err());
    }
}
