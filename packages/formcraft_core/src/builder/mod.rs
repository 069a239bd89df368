//! Builder controller
//!
//! Holds the draft schema being authored. The draft is never persisted piece
//! by piece: `save` writes the whole schema, then starts a fresh draft.
//!
//! ```text
//! editing-new ──select_for_edit──▶ editing-existing
//!      ▲                                │
//!      └──────── save / cancel ─────────┘
//! ```

mod draft;

pub use draft::FieldDraft;

use thiserror::Error;
use uuid::Uuid;

use crate::model::{FieldDefinition, FormSchema};
use crate::service::FormService;
use crate::storage::StoreError;

#[derive(Error, Debug)]
pub enum BuilderError {
    #[error("Label is required")]
    MissingLabel,

    #[error("Name is required")]
    MissingName,

    #[error("Unknown field kind: {0}")]
    UnknownFieldKind(String),

    #[error("Invalid {bound} bound: '{value}' is not a number")]
    InvalidBound { bound: &'static str, value: String },

    #[error("A field named '{0}' already exists in this form")]
    DuplicateFieldName(String),

    #[error("Form not found: {0}")]
    UnknownSchema(Uuid),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuilderState {
    /// The draft is a new schema, not yet stored.
    EditingNew,
    /// The draft is a copy of the stored schema with this id.
    EditingExisting(Uuid),
}

#[derive(Debug)]
pub struct BuilderController {
    draft: FormSchema,
    state: BuilderState,
}

impl BuilderController {
    pub fn new() -> Self {
        Self {
            draft: FormSchema::new(),
            state: BuilderState::EditingNew,
        }
    }

    pub fn draft(&self) -> &FormSchema {
        &self.draft
    }

    pub fn state(&self) -> &BuilderState {
        &self.state
    }

    /// Id of the stored schema being edited, if any.
    pub fn selected(&self) -> Option<Uuid> {
        match self.state {
            BuilderState::EditingExisting(id) => Some(id),
            BuilderState::EditingNew => None,
        }
    }

    /// Append a field to the draft. Names must be unique within the draft.
    pub fn add_field(&mut self, field: FieldDefinition) -> Result<Uuid, BuilderError> {
        if self.draft.field_by_name(&field.name).is_some() {
            return Err(BuilderError::DuplicateFieldName(field.name));
        }
        let id = field.id;
        self.draft.items.push(field);
        Ok(id)
    }

    /// Build a field from authoring input and append it.
    pub fn add_field_from(&mut self, draft: &FieldDraft) -> Result<Uuid, BuilderError> {
        let field = draft.build()?;
        self.add_field(field)
    }

    /// Drop a field from the draft.
    pub fn remove_field(&mut self, field_id: &Uuid) -> Option<FieldDefinition> {
        let index = self.draft.items.iter().position(|f| f.id == *field_id)?;
        Some(self.draft.items.remove(index))
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    /// Load a stored schema into the draft for editing.
    pub fn select_for_edit(&mut self, service: &FormService, id: &Uuid) -> Result<(), BuilderError> {
        let schema = service
            .get_schema(id)
            .ok_or(BuilderError::UnknownSchema(*id))?;
        self.draft = schema.clone();
        self.state = BuilderState::EditingExisting(*id);
        Ok(())
    }

    /// Persist the draft and start a fresh one.
    ///
    /// A new draft is appended; an edited draft replaces the stored schema
    /// with its id (nothing is inserted if that schema is gone).
    pub fn save(&mut self, service: &mut FormService) -> Result<Uuid, BuilderError> {
        let draft = std::mem::take(&mut self.draft);
        let id = draft.id;
        let result = match self.state {
            BuilderState::EditingNew => service.create_schema(draft).map(|_| ()),
            BuilderState::EditingExisting(selected) => {
                service.update_schema(&selected, draft).map(|replaced| {
                    if !replaced {
                        log::warn!("form {} was deleted while being edited; edit discarded", selected);
                    }
                })
            }
        };

        // The draft was moved out either way; start over.
        self.reset();
        result?;
        Ok(id)
    }

    /// Discard the draft.
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Delete a stored schema and its submissions. If it is the one being
    /// edited, the builder starts a fresh draft.
    pub fn delete_schema(&mut self, service: &mut FormService, id: &Uuid) -> Result<usize, BuilderError> {
        let removed = service.delete_schema(id)?;
        if self.selected() == Some(*id) {
            self.reset();
        }
        Ok(removed)
    }

    fn reset(&mut self) {
        self.draft = FormSchema::new();
        self.state = BuilderState::EditingNew;
    }
}

impl Default for BuilderController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldType, DEFAULT_FORM_NAME};

    #[test]
    fn test_add_and_remove_fields() {
        let mut builder = BuilderController::new();
        let q1 = builder.add_field(FieldDefinition::text("Q1", "q1")).unwrap();
        builder.add_field(FieldDefinition::number("Q2", "q2")).unwrap();

        let removed = builder.remove_field(&q1).unwrap();
        assert_eq!(removed.name, "q1");
        assert!(builder.remove_field(&q1).is_none());
        assert_eq!(builder.draft().items.len(), 1);
        assert_eq!(builder.draft().items[0].name, "q2");
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let mut builder = BuilderController::new();
        builder.add_field(FieldDefinition::text("Email", "email")).unwrap();

        let err = builder
            .add_field(FieldDefinition::text("Email again", "email"))
            .unwrap_err();
        assert!(matches!(err, BuilderError::DuplicateFieldName(name) if name == "email"));
        assert_eq!(builder.draft().items.len(), 1);
    }

    #[test]
    fn test_save_new_appends_and_resets() {
        let mut service = FormService::in_memory();
        let mut builder = BuilderController::new();
        builder.rename("Survey");
        builder
            .add_field_from(&FieldDraft::new(FieldType::Text, "Question 1", "q1"))
            .unwrap();
        let expected = builder.draft().clone();

        let id = builder.save(&mut service).unwrap();

        assert_eq!(service.get_schema(&id), Some(&expected));
        assert_eq!(builder.state(), &BuilderState::EditingNew);
        assert_eq!(builder.draft().name, DEFAULT_FORM_NAME);
        assert!(builder.draft().items.is_empty());
        assert_ne!(builder.draft().id, id);
    }

    #[test]
    fn test_edit_existing_replaces() {
        let mut service = FormService::in_memory();
        let mut builder = BuilderController::new();
        builder.rename("Original");
        builder.add_field(FieldDefinition::text("Q1", "q1")).unwrap();
        let id = builder.save(&mut service).unwrap();

        builder.select_for_edit(&service, &id).unwrap();
        assert_eq!(builder.state(), &BuilderState::EditingExisting(id));
        builder.rename("Edited");
        builder.add_field(FieldDefinition::number("Q2", "q2")).unwrap();
        builder.save(&mut service).unwrap();

        assert_eq!(service.list_schemas().len(), 1);
        let stored = service.get_schema(&id).unwrap();
        assert_eq!(stored.name, "Edited");
        assert_eq!(stored.items.len(), 2);
        assert_eq!(builder.selected(), None);
    }

    #[test]
    fn test_saving_edit_of_deleted_schema_inserts_nothing() {
        let mut service = FormService::in_memory();
        let id = service.save_schema(FormSchema::named("Doomed")).unwrap();

        let mut builder = BuilderController::new();
        builder.select_for_edit(&service, &id).unwrap();
        service.delete_schema(&id).unwrap();

        builder.save(&mut service).unwrap();
        assert!(service.list_schemas().is_empty());
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut service = FormService::in_memory();
        let id = service.save_schema(FormSchema::named("Keep")).unwrap();

        let mut builder = BuilderController::new();
        builder.select_for_edit(&service, &id).unwrap();
        builder.rename("Changed");
        builder.cancel();

        assert_eq!(builder.state(), &BuilderState::EditingNew);
        assert_eq!(service.get_schema(&id).unwrap().name, "Keep");
    }

    #[test]
    fn test_delete_selected_schema_resets_builder() {
        let mut service = FormService::in_memory();
        let id = service.save_schema(FormSchema::named("Gone")).unwrap();

        let mut builder = BuilderController::new();
        builder.select_for_edit(&service, &id).unwrap();
        builder.delete_schema(&mut service, &id).unwrap();

        assert_eq!(builder.state(), &BuilderState::EditingNew);
        assert_eq!(builder.draft().name, DEFAULT_FORM_NAME);
    }

    #[test]
    fn test_select_unknown_schema() {
        let service = FormService::in_memory();
        let mut builder = BuilderController::new();
        let missing = Uuid::new_v4();
        assert!(matches!(
            builder.select_for_edit(&service, &missing),
            Err(BuilderError::UnknownSchema(id)) if id == missing
        ));
    }
}
