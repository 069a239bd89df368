use std::collections::HashMap;

use crate::model::FileHandle;

/// Unvalidated widget input.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum RawValue {
    #[default]
    Empty,
    Text(String),
    File(FileHandle),
}

impl RawValue {
    /// Absent, or text that is blank after trimming.
    pub fn is_empty(&self) -> bool {
        match self {
            RawValue::Empty => true,
            RawValue::Text(s) => s.trim().is_empty(),
            RawValue::File(_) => false,
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<FileHandle> for RawValue {
    fn from(value: FileHandle) -> Self {
        RawValue::File(value)
    }
}

impl From<Option<FileHandle>> for RawValue {
    fn from(value: Option<FileHandle>) -> Self {
        value.map(RawValue::File).unwrap_or(RawValue::Empty)
    }
}

/// Raw input keyed by field name. Missing keys read as empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormInput {
    values: HashMap<String, RawValue>,
}

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<RawValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn clear(&mut self, name: &str) {
        self.values.remove(name);
    }

    pub fn get(&self, name: &str) -> &RawValue {
        static EMPTY: RawValue = RawValue::Empty;
        self.values.get(name).unwrap_or(&EMPTY)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
