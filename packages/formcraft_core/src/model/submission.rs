//! Recorded answer-sets.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to a file chosen for a file field.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FileHandle {
    pub name: String,
    #[serde(default)]
    pub size: u64,
}

impl FileHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: 0,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Lower-cased extension including the dot, e.g. `.pdf`.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .filter(|(stem, _)| !stem.is_empty())
            .map(|(_, ext)| format!(".{}", ext.to_ascii_lowercase()))
    }
}

/// A validated answer.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Number(f64),
    Text(String),
    File(FileHandle),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::File(file) => f.write_str(&file.name),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<FileHandle> for FieldValue {
    fn from(value: FileHandle) -> Self {
        FieldValue::File(value)
    }
}

/// Answers keyed by field name.
pub type FormData = BTreeMap<String, FieldValue>;

/// One completed fill of a schema. Never mutated once recorded.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    /// Weak reference; the schema may be deleted later.
    pub form_id: Uuid,
    pub data: FormData,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(form_id: Uuid, data: FormData) -> Self {
        Self {
            id: Uuid::new_v4(),
            form_id,
            data,
            submitted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_json_shape() {
        let mut data = FormData::new();
        data.insert("q1".into(), FieldValue::from("hello"));
        data.insert("age".into(), FieldValue::Number(42.0));
        data.insert("notes".into(), FieldValue::Null);
        let submission = Submission::new(Uuid::new_v4(), data);

        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["formId"], submission.form_id.to_string());
        assert_eq!(json["data"]["q1"], "hello");
        assert_eq!(json["data"]["age"], 42.0);
        assert!(json["data"]["notes"].is_null());
        assert!(json["submittedAt"].as_str().unwrap().contains('T'));

        let back: Submission = serde_json::from_value(json).unwrap();
        assert_eq!(back, submission);
    }

    #[test]
    fn test_file_value_deserializes_as_file() {
        let value: FieldValue =
            serde_json::from_str(r#"{"name":"cv.PDF","size":1024}"#).unwrap();
        match value {
            FieldValue::File(file) => {
                assert_eq!(file.size, 1024);
                assert_eq!(file.extension().as_deref(), Some(".pdf"));
            }
            other => panic!("expected a file, got {:?}", other),
        }
    }

    #[test]
    fn test_extension_requires_stem() {
        assert_eq!(FileHandle::new(".bashrc").extension(), None);
        assert_eq!(FileHandle::new("README").extension(), None);
    }
}
