//! Subcommand implementations.

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use formcraft::builder::{BuilderController, FieldDraft};
use formcraft::config::FormcraftConfig;
use formcraft::model::{FieldDefinition, FieldValue, FormSchema};
use formcraft::remote::{HttpPagedSource, Pager};
use formcraft::render::{
    format_output_value, BulkPreview, FieldWidget, RenderError, SinglePageFill, StepOutcome,
    StepWizard, SubmissionView,
};
use formcraft::{FormService, RawValue, Submission};
use serde::Deserialize;
use uuid::Uuid;

use crate::prompt::{Answer, Prompter};

/// A form described in a JSON file for `import`.
#[derive(Deserialize)]
struct ImportedForm {
    name: String,
    #[serde(default)]
    fields: Vec<FieldDraft>,
}

fn open(config: &FormcraftConfig) -> FormService {
    FormService::from_config(config)
}

fn finish(mut service: FormService) -> Result<()> {
    if service.has_unsaved_changes() && !service.flush() {
        bail!("changes could not be written to disk; see the log for details");
    }
    Ok(())
}

fn find_schema(service: &FormService, id: Uuid) -> Result<FormSchema> {
    service
        .get_schema(&id)
        .cloned()
        .ok_or_else(|| anyhow!("no form with id {}", id))
}

pub fn list(config: &FormcraftConfig) -> Result<()> {
    let service = open(config);
    let schemas = service.list_schemas();
    if schemas.is_empty() {
        println!("No forms saved in {}", config.data_dir.display());
        return Ok(());
    }
    for schema in schemas {
        println!(
            "{}  {}  ({} field(s), {} submission(s))",
            schema.id,
            schema.name,
            schema.len(),
            service.submissions().count_for_form(&schema.id)
        );
    }
    Ok(())
}

pub fn show(config: &FormcraftConfig, id: Uuid) -> Result<()> {
    let service = open(config);
    let schema = find_schema(&service, id)?;
    let preview = BulkPreview::of_saved(&schema);

    println!("{}", preview.title());
    for (index, row) in preview.rows().iter().enumerate() {
        let field = row.widget.field;
        let hint = row.widget.widget.hint().map(|h| format!(" [{}]", h)).unwrap_or_default();
        println!(
            "  {}. {} ({}, key '{}'){}",
            index + 1,
            row.widget.display_label(),
            field.field_type(),
            field.name,
            hint
        );
        if let Some(description) = &field.description {
            println!("     {}", description);
        }
    }
    for name in schema.duplicate_names() {
        log::warn!("field name '{}' is used more than once; later answers overwrite earlier ones", name);
    }
    Ok(())
}

pub fn import(config: &FormcraftConfig, file: &Path) -> Result<()> {
    let contents = std::fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let imported: ImportedForm =
        serde_json::from_str(&contents).with_context(|| format!("parsing {}", file.display()))?;

    let mut service = open(config);
    let mut builder = BuilderController::new();
    builder.rename(imported.name);
    for (index, draft) in imported.fields.iter().enumerate() {
        builder
            .add_field_from(draft)
            .with_context(|| format!("field {} ('{}')", index + 1, draft.name))?;
    }
    let id = builder.save(&mut service)?;
    println!("Saved form {}", id);
    finish(service)
}

pub fn delete(config: &FormcraftConfig, id: Uuid) -> Result<()> {
    let mut service = open(config);
    if service.get_schema(&id).is_none() {
        println!("No form with id {}; nothing deleted", id);
        return Ok(());
    }
    let removed = service.delete_schema(&id)?;
    println!("Deleted form {} and {} submission(s)", id, removed);
    finish(service)
}

pub fn fill(config: &FormcraftConfig, id: Uuid, wizard: bool) -> Result<()> {
    let mut service = open(config);
    let schema = find_schema(&service, id)?;
    let mut prompter = Prompter::stdin();

    let submission = if wizard {
        fill_wizard(&mut service, &mut prompter, schema.clone())?
    } else {
        fill_single_page(&mut service, &mut prompter, schema.clone())?
    };

    println!();
    print!("{}", SubmissionView::new(&schema, &submission));
    finish(service)
}

fn fill_single_page<R: std::io::BufRead>(
    service: &mut FormService,
    prompter: &mut Prompter<R>,
    schema: FormSchema,
) -> Result<Submission> {
    let mut fill = SinglePageFill::new(schema);
    let fields = fill.schema().items.clone();
    let mut pending: Vec<&FieldDefinition> = fields.iter().collect();

    loop {
        for field in &pending {
            let widget = FieldWidget::new(field);
            loop {
                match prompter.ask(&widget, None, false)? {
                    Answer::Value(raw) => fill.set(field.name.clone(), raw),
                    Answer::Invalid(reason) => {
                        println!("  ! {}: {}", field.name, reason);
                        continue;
                    }
                    Answer::Keep | Answer::Back => {}
                }
                break;
            }
        }

        match fill.submit(&mut *service) {
            Ok(submission) => return Ok(submission),
            Err(RenderError::Validation(report)) => {
                for error in report.errors() {
                    println!("  ! {}", error);
                }
                println!("Please correct the fields above.");
                pending = fields
                    .iter()
                    .filter(|f| report.error_for(&f.name).is_some())
                    .collect();
            }
            Err(other) => return Err(other.into()),
        }
    }
}

fn fill_wizard<R: std::io::BufRead>(
    service: &mut FormService,
    prompter: &mut Prompter<R>,
    schema: FormSchema,
) -> Result<Submission> {
    let mut wizard = StepWizard::new(schema)?;

    loop {
        println!("{}", wizard.progress());
        let prefill = wizard
            .current_answer()
            .map(|value| format_output_value(Some(value)));
        // "<" always means back; on the first step it leaves the wizard where it is.
        let answer = prompter.ask(&wizard.current_widget(), prefill, true)?;

        let raw = match answer {
            Answer::Back => {
                wizard.previous();
                continue;
            }
            Answer::Invalid(reason) => {
                println!("  ! {}: {}", wizard.current_widget().field.name, reason);
                continue;
            }
            Answer::Keep => wizard
                .current_answer()
                .map(raw_from_answer)
                .unwrap_or_default(),
            Answer::Value(raw) => raw,
        };

        match wizard.next(raw, &mut *service) {
            Ok(StepOutcome::Advanced(_)) => {}
            Ok(StepOutcome::Submitted(submission)) => return Ok(submission),
            Err(RenderError::InvalidField(error)) => println!("  ! {}", error),
            Err(other) => return Err(other.into()),
        }
    }
}

/// Feed a stored answer back in as input.
fn raw_from_answer(value: &FieldValue) -> RawValue {
    match value {
        FieldValue::Null => RawValue::Empty,
        FieldValue::Number(n) => RawValue::Text(n.to_string()),
        FieldValue::Text(s) => RawValue::Text(s.clone()),
        FieldValue::File(file) => RawValue::File(file.clone()),
    }
}

pub fn submissions(config: &FormcraftConfig, form: Option<Uuid>) -> Result<()> {
    let service = open(config);
    let submissions = service.list_submissions(form.as_ref());
    if submissions.is_empty() {
        println!("No submissions");
        return Ok(());
    }
    for submission in submissions {
        match service.get_schema(&submission.form_id) {
            Some(schema) => print!("{}", SubmissionView::new(schema, submission)),
            None => {
                // Orphaned: the form is gone, show raw keys
                println!("{} (form {} deleted)", submission.submitted_at, submission.form_id);
                for (name, value) in &submission.data {
                    println!("  {}: {}", name, format_output_value(Some(value)));
                }
            }
        }
    }
    Ok(())
}

pub async fn browse(config: &FormcraftConfig, resource: &str, page: u32) -> Result<()> {
    let base_url = config
        .remote_base_url
        .as_deref()
        .ok_or_else(|| anyhow!("no remoteBaseUrl configured"))?;
    let source = HttpPagedSource::new(base_url, resource)?;
    let mut pager: Pager<serde_json::Value> = Pager::new(config.page_size);

    let current = pager.go_to(&source, page).await?;
    for item in &current.results {
        let label = item
            .get("name")
            .or_else(|| item.get("title"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| item.to_string());
        println!("  {}", label);
    }
    let total = pager.total_pages().unwrap_or(1);
    println!("Page {} of {}", pager.page(), total);
    Ok(())
}
