//! Read-only bulk preview of a draft against its saved version.

use std::collections::HashSet;

use uuid::Uuid;

use crate::model::FormSchema;

use super::widget::FieldWidget;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowStatus {
    /// Present in the saved schema.
    Persisted,
    /// Added to the draft since the last save.
    Pending,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PreviewRow<'a> {
    pub widget: FieldWidget<'a>,
    pub status: RowStatus,
}

impl PreviewRow<'_> {
    /// Only fields that were not saved yet can be dropped from the preview.
    pub fn is_removable(&self) -> bool {
        self.status == RowStatus::Pending
    }
}

/// Every field of a schema with its widget. There is no submit path.
#[derive(Clone, Debug)]
pub struct BulkPreview<'a> {
    schema: &'a FormSchema,
    rows: Vec<PreviewRow<'a>>,
}

impl<'a> BulkPreview<'a> {
    /// Preview `draft`, marking fields already in `saved` as persisted.
    pub fn new(draft: &'a FormSchema, saved: Option<&FormSchema>) -> Self {
        let persisted: HashSet<Uuid> = saved
            .map(|s| s.items.iter().map(|f| f.id).collect())
            .unwrap_or_default();

        let rows = draft
            .items
            .iter()
            .map(|field| PreviewRow {
                widget: FieldWidget::new(field),
                status: if persisted.contains(&field.id) {
                    RowStatus::Persisted
                } else {
                    RowStatus::Pending
                },
            })
            .collect();

        Self { schema: draft, rows }
    }

    /// Preview a stored schema as-is.
    pub fn of_saved(schema: &'a FormSchema) -> Self {
        Self::new(schema, Some(schema))
    }

    pub fn title(&self) -> &str {
        &self.schema.name
    }

    pub fn rows(&self) -> &[PreviewRow<'a>] {
        &self.rows
    }

    pub fn pending(&self) -> impl Iterator<Item = &PreviewRow<'a>> {
        self.rows.iter().filter(|r| r.is_removable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldDefinition;

    #[test]
    fn test_new_fields_are_pending() {
        let saved = FormSchema::named("Saved").with_field(FieldDefinition::text("Q1", "q1"));
        let draft = saved.clone().with_field(FieldDefinition::number("Q2", "q2"));

        let preview = BulkPreview::new(&draft, Some(&saved));
        assert_eq!(preview.title(), "Saved");
        assert_eq!(preview.rows().len(), 2);
        assert_eq!(preview.rows()[0].status, RowStatus::Persisted);
        assert_eq!(preview.rows()[1].status, RowStatus::Pending);

        let pending: Vec<&str> = preview.pending().map(|r| r.widget.field.name.as_str()).collect();
        assert_eq!(pending, vec!["q2"]);
    }

    #[test]
    fn test_unsaved_draft_is_all_pending() {
        let draft = FormSchema::new().with_field(FieldDefinition::text("Q1", "q1"));
        let preview = BulkPreview::new(&draft, None);
        assert!(preview.rows().iter().all(PreviewRow::is_removable));
    }

    #[test]
    fn test_saved_schema_is_read_only() {
        let saved = FormSchema::named("S").with_field(FieldDefinition::text("Q1", "q1"));
        assert_eq!(BulkPreview::of_saved(&saved).pending().count(), 0);
    }
}
