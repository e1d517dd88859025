//! Entry commands - add, show, edit, delete.

use chrono::{DateTime, Utc};
use dialoguer::Confirm;
use serde::Serialize;

use crate::cli::output;
use crate::cli::resolve::open_store;
use crate::core::record::Record;
use crate::core::store::resolve_id;
use crate::error::{Result, ValidationError};

/// JSON view of a record.
#[derive(Serialize)]
pub(crate) struct RecordView<'a> {
    id: &'a str,
    created_at: DateTime<Utc>,
    tags: &'a [String],
    content: &'a str,
}

impl<'a> From<&'a Record> for RecordView<'a> {
    fn from(record: &'a Record) -> Self {
        Self {
            id: record.id(),
            created_at: record.created_at(),
            tags: record.tags(),
            content: record.content(),
        }
    }
}

/// Add an entry.
pub fn add(store: Option<&str>, text: &[String], tags: Vec<String>) -> Result<()> {
    let content = text.join(" ");
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyContent.into());
    }

    let mut store = open_store(store)?;
    let record = store.add(&content, tags, Utc::now())?;

    output::success(&format!("added {}", output::id(record.id())));
    Ok(())
}

/// Show one entry.
pub fn show(store: Option<&str>, id: &str, json: bool) -> Result<()> {
    let store = open_store(store)?;
    let record = store.get(id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&RecordView::from(&record))?);
        return Ok(());
    }

    output::header(&format!("Entry {}", output::id(record.id())));
    output::kv("id:  ", record.id());
    output::kv("date:", record.created_at().format("%Y-%m-%d %H:%M UTC"));
    if !record.tags().is_empty() {
        output::kv("tags:", record.tags().join(", "));
    }
    output::rule();
    println!("{}", record.content());
    Ok(())
}

/// Change content and/or tags of an entry.
pub fn edit(
    store: Option<&str>,
    id: &str,
    content: Option<String>,
    tags: Option<Vec<String>>,
) -> Result<()> {
    if content.is_none() && tags.is_none() {
        output::warn("nothing to change");
        output::hint("pass --content and/or --tags");
        return Ok(());
    }
    if matches!(&content, Some(c) if c.trim().is_empty()) {
        return Err(ValidationError::EmptyContent.into());
    }

    let mut store = open_store(store)?;
    let existing = store.get(id)?;
    let content = content.unwrap_or_else(|| existing.content().to_string());
    let tags = tags.unwrap_or_else(|| existing.tags().to_vec());

    let updated = store.update(existing.id(), &content, tags)?;
    output::success(&format!("updated {}", output::id(updated.id())));
    Ok(())
}

/// Delete an entry, asking first unless `yes`.
pub fn delete(store: Option<&str>, id: &str, yes: bool) -> Result<()> {
    let mut store = open_store(store)?;
    let full_id = resolve_id(store.index(), id)?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete entry {}?", output::short_id(&full_id)))
            .default(false)
            .interact()?;
        if !confirmed {
            output::dimmed("cancelled");
            return Ok(());
        }
    }

    let outcome = store.delete(&full_id)?;
    if outcome.file_missing {
        output::warn("entry file was already missing; removed it from the index");
    }
    output::success(&format!("deleted {}", output::id(&outcome.id)));
    Ok(())
}
