//! Display of recorded answers.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::model::{FieldValue, FormSchema, Submission};

/// Human-readable form of one answer.
pub fn format_output_value(value: Option<&FieldValue>) -> String {
    match value {
        None | Some(FieldValue::Null) => "Not provided".to_string(),
        Some(FieldValue::File(file)) => format!("File: {}", file.name),
        Some(other) => other.to_string(),
    }
}

/// A submission laid out by its schema: one `(label, value)` row per field.
#[derive(Clone, Debug, PartialEq)]
pub struct SubmissionView {
    pub form_name: String,
    pub submitted_at: DateTime<Utc>,
    pub rows: Vec<(String, String)>,
}

impl SubmissionView {
    pub fn new(schema: &FormSchema, submission: &Submission) -> Self {
        let rows = schema
            .items
            .iter()
            .map(|field| {
                (
                    field.label.clone(),
                    format_output_value(submission.data.get(&field.name)),
                )
            })
            .collect();
        Self {
            form_name: schema.name.clone(),
            submitted_at: submission.submitted_at,
            rows,
        }
    }
}

impl fmt::Display for SubmissionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} (submitted at {})",
            self.form_name,
            self.submitted_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        for (label, value) in &self.rows {
            writeln!(f, "  {}: {}", label, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldDefinition, FileHandle, FormData};

    #[test]
    fn test_format_output_value() {
        assert_eq!(format_output_value(None), "Not provided");
        assert_eq!(format_output_value(Some(&FieldValue::Null)), "Not provided");
        assert_eq!(
            format_output_value(Some(&FieldValue::File(FileHandle::new("cv.pdf")))),
            "File: cv.pdf"
        );
        assert_eq!(format_output_value(Some(&FieldValue::Number(42.0))), "42");
        assert_eq!(format_output_value(Some(&FieldValue::from("hi"))), "hi");
    }

    #[test]
    fn test_view_follows_schema_order() {
        let schema = FormSchema::named("Survey")
            .with_field(FieldDefinition::text("Zeta", "z"))
            .with_field(FieldDefinition::text("Alpha", "a"));
        let mut data = FormData::new();
        data.insert("a".into(), FieldValue::from("first"));
        let submission = Submission::new(schema.id, data);

        let view = SubmissionView::new(&schema, &submission);
        assert_eq!(
            view.rows,
            vec![
                ("Zeta".to_string(), "Not provided".to_string()),
                ("Alpha".to_string(), "first".to_string()),
            ]
        );
        assert!(view.to_string().starts_with("Survey (submitted at "));
    }
}
