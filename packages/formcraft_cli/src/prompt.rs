//! Line-based prompting on stdin.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use formcraft::model::{FieldDefinition, FieldKind, FileHandle};
use formcraft::render::FieldWidget;
use formcraft::RawValue;

/// What the user typed at a field prompt.
pub enum Answer {
    Value(RawValue),
    /// Empty line while a previous answer is shown: keep it.
    Keep,
    Back,
    /// The line could not be turned into input; ask the same field again.
    Invalid(String),
}

pub struct Prompter<R> {
    input: R,
}

impl Prompter<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }
}

impl<R: BufRead> Prompter<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("reading answer")?;
        if read == 0 {
            bail!("input closed");
        }
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }

    /// Prompt for one field. `allow_back` makes "<" mean "previous question".
    pub fn ask(&mut self, widget: &FieldWidget<'_>, prefill: Option<String>, allow_back: bool) -> Result<Answer> {
        let mut prompt = widget.display_label();
        if let Some(hint) = widget.widget.hint() {
            prompt.push_str(&format!(" [{}]", hint));
        }
        if let Some(prefill) = &prefill {
            prompt.push_str(&format!(" (current: {})", prefill));
        }
        if let Some(description) = &widget.field.description {
            println!("  {}", description);
        }
        print!("{}: ", prompt);
        io::stdout().flush()?;

        let line = self.read_line()?;
        if allow_back && line.trim() == "<" {
            return Ok(Answer::Back);
        }
        if line.is_empty() && prefill.is_some() {
            return Ok(Answer::Keep);
        }
        match raw_for(widget.field, &line) {
            Ok(raw) => Ok(Answer::Value(raw)),
            Err(e) => Ok(Answer::Invalid(format!("{:#}", e))),
        }
    }
}

/// Turn a typed line into widget input. File fields take a path.
fn raw_for(field: &FieldDefinition, line: &str) -> Result<RawValue> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(RawValue::Empty);
    }
    match &field.kind {
        FieldKind::File { accepted_file_types } => {
            let file = file_handle(Path::new(line))?;
            check_accepted(&file, accepted_file_types)?;
            Ok(RawValue::File(file))
        }
        FieldKind::Text { .. } | FieldKind::Select { .. } | FieldKind::Number { .. } => {
            Ok(RawValue::from(line))
        }
    }
}

/// Apply the picker's extension filter. Media-type entries such as `image/*`
/// are not checked here.
fn check_accepted(file: &FileHandle, accepted: &[String]) -> Result<()> {
    let extensions: Vec<String> = accepted
        .iter()
        .filter(|a| a.starts_with('.'))
        .map(|a| a.to_ascii_lowercase())
        .collect();
    if extensions.is_empty() {
        return Ok(());
    }
    match file.extension() {
        Some(ext) if extensions.contains(&ext) => Ok(()),
        _ => bail!("{} is not one of {}", file.name, extensions.join(",")),
    }
}

fn file_handle(path: &Path) -> Result<FileHandle> {
    let metadata = std::fs::metadata(path).with_context(|| format!("reading {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(FileHandle::new(name).with_size(metadata.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_and_prefill() {
        let field = FieldDefinition::text("Name", "name");
        let widget = FieldWidget::new(&field);
        let mut prompter = Prompter::new("<\n\n".as_bytes());

        assert!(matches!(prompter.ask(&widget, None, true).unwrap(), Answer::Back));
        assert!(matches!(
            prompter.ask(&widget, Some("Ada".into()), true).unwrap(),
            Answer::Keep
        ));
    }

    #[test]
    fn test_file_answer_reads_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.pdf");
        std::fs::write(&path, b"12345").unwrap();

        let field = FieldDefinition::file("CV", "cv");
        match raw_for(&field, path.to_str().unwrap()).unwrap() {
            RawValue::File(file) => {
                assert_eq!(file.name, "cv.pdf");
                assert_eq!(file.size, 5);
            }
            other => panic!("expected a file, got {:?}", other),
        }
        assert!(raw_for(&field, "/definitely/not/here.pdf").is_err());
    }

    #[test]
    fn test_bad_path_is_invalid_not_fatal() {
        let field = FieldDefinition::file("CV", "cv");
        let widget = FieldWidget::new(&field);
        let mut prompter = Prompter::new("/definitely/missing.pdf\n\n".as_bytes());

        match prompter.ask(&widget, None, true).unwrap() {
            Answer::Invalid(reason) => assert!(reason.contains("/definitely/missing.pdf")),
            _ => panic!("expected an invalid answer"),
        }
        assert!(matches!(
            prompter.ask(&widget, None, true).unwrap(),
            Answer::Value(RawValue::Empty)
        ));
    }

    #[test]
    fn test_accepted_extensions_filter_files() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("me.JPG");
        let notes = dir.path().join("notes.txt");
        std::fs::write(&photo, b"jpg").unwrap();
        std::fs::write(&notes, b"txt").unwrap();

        let field = FieldDefinition::new(
            "Photo",
            "photo",
            FieldKind::File {
                accepted_file_types: vec![".png".into(), ".jpg".into()],
            },
        );
        assert!(raw_for(&field, photo.to_str().unwrap()).is_ok());
        let err = raw_for(&field, notes.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains(".png,.jpg"));

        let images = FieldDefinition::new(
            "Photo",
            "photo",
            FieldKind::File {
                accepted_file_types: vec!["image/*".into()],
            },
        );
        assert!(raw_for(&images, notes.to_str().unwrap()).is_ok());
    }
}
