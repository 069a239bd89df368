//! Widget selection by field kind.

use crate::model::{FieldDefinition, FieldKind};

/// The input control a field is presented with.
#[derive(Clone, Debug, PartialEq)]
pub enum Widget {
    TextInput { placeholder: Option<String> },
    Dropdown { options: Vec<String> },
    NumberInput { min: Option<f64>, max: Option<f64> },
    /// `accept` is the accepted extensions joined with ",".
    FilePicker { accept: Option<String> },
}

impl Widget {
    pub fn for_field(field: &FieldDefinition) -> Self {
        match &field.kind {
            FieldKind::Text { placeholder } => Widget::TextInput {
                placeholder: placeholder.clone(),
            },
            FieldKind::Select { options } => Widget::Dropdown {
                options: options.clone(),
            },
            FieldKind::Number { min, max } => Widget::NumberInput {
                min: *min,
                max: *max,
            },
            FieldKind::File {
                accepted_file_types,
            } => Widget::FilePicker {
                accept: if accepted_file_types.is_empty() {
                    None
                } else {
                    Some(accepted_file_types.join(","))
                },
            },
        }
    }

    /// Short description of the control, e.g. for a terminal prompt.
    pub fn hint(&self) -> Option<String> {
        match self {
            Widget::TextInput { placeholder } => placeholder.clone(),
            Widget::Dropdown { options } if options.is_empty() => None,
            Widget::Dropdown { options } => Some(format!("one of: {}", options.join(", "))),
            Widget::NumberInput { min: None, max: None } => Some("number".to_string()),
            Widget::NumberInput { min, max } => Some(format!(
                "number in {}..{}",
                min.map(|m| m.to_string()).unwrap_or_default(),
                max.map(|m| m.to_string()).unwrap_or_default()
            )),
            Widget::FilePicker { accept: None } => Some("file path".to_string()),
            Widget::FilePicker { accept: Some(accept) } => Some(format!("file path ({})", accept)),
        }
    }
}

/// A field paired with its widget.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldWidget<'a> {
    pub field: &'a FieldDefinition,
    pub widget: Widget,
}

impl<'a> FieldWidget<'a> {
    pub fn new(field: &'a FieldDefinition) -> Self {
        Self {
            field,
            widget: Widget::for_field(field),
        }
    }

    /// Label with a trailing `*` on required fields.
    pub fn display_label(&self) -> String {
        if self.field.required {
            format!("{} *", self.field.label)
        } else {
            self.field.label.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldKind;

    #[test]
    fn test_file_accept_attribute() {
        let field = FieldDefinition::new(
            "Photo",
            "photo",
            FieldKind::File {
                accepted_file_types: vec![".png".into(), ".jpg".into()],
            },
        );
        assert_eq!(
            Widget::for_field(&field),
            Widget::FilePicker {
                accept: Some(".png,.jpg".into())
            }
        );
        assert_eq!(
            Widget::for_field(&FieldDefinition::file("Any", "any")),
            Widget::FilePicker { accept: None }
        );
    }

    #[test]
    fn test_number_hint() {
        let field = FieldDefinition::new(
            "Age",
            "age",
            FieldKind::Number {
                min: Some(18.0),
                max: None,
            },
        );
        assert_eq!(Widget::for_field(&field).hint().as_deref(), Some("number in 18.."));
    }

    #[test]
    fn test_required_label() {
        let field = FieldDefinition::text("Name", "name").required();
        assert_eq!(FieldWidget::new(&field).display_label(), "Name *");
    }
}
