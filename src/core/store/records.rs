//! Single-record create/read/update/delete.

use std::fs;
use std::io;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{resolve_id, RecordStore};
use crate::core::index::{IndexEntry, SearchIndex};
use crate::core::record::Record;
use crate::core::types::{RecordId, Tag};
use crate::error::{Error, Result, StoreError};

/// Result of a delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub id: RecordId,
    /// The ciphertext was already gone; only the index entry was removed.
    pub file_missing: bool,
}

impl RecordStore {
    /// Create, encrypt, and index a new record.
    ///
    /// # Errors
    ///
    /// If the encrypted write fails the index is untouched. If the write
    /// succeeds but the index cannot be persisted, returns
    /// `StoreError::IndexInconsistency`; the record exists on disk and
    /// `rebuild_index` will pick it up.
    pub fn add(&mut self, content: &str, tags: Vec<Tag>, now: DateTime<Utc>) -> Result<Record> {
        let recipients = self.directory.load()?;
        let record = Record::new(Uuid::new_v4().to_string(), now, content, tags);

        self.write_record(&record, &recipients)?;
        self.index.add(record.index_entry());

        if let Err(e) = self.persist_index_with(&self.index, &recipients) {
            self.index.remove(record.id());
            return Err(index_inconsistency(record.id(), "written but not indexed", e));
        }

        info!(id = record.id(), tags = record.tags().len(), "record added");
        Ok(record)
    }

    /// Load a record by full id or unique prefix.
    pub fn get(&self, id_or_prefix: &str) -> Result<Record> {
        let entry = self.resolve_entry(id_or_prefix)?;
        self.read_record(&entry.relative_location)
    }

    /// Replace a record's content and tags.
    ///
    /// Id, creation time, and location are preserved. The record is written
    /// at the current schema version, back to the file the index points at.
    pub fn update(&mut self, id_or_prefix: &str, content: &str, tags: Vec<Tag>) -> Result<Record> {
        let entry = self.resolve_entry(id_or_prefix)?;
        let existing = self.read_record(&entry.relative_location)?;
        let updated = existing
            .with_changes(content, tags)
            .relocated(&entry.relative_location);

        let recipients = self.directory.load()?;
        self.write_record(&updated, &recipients)?;

        let previous = self.index.remove(updated.id());
        self.index.add(updated.index_entry());

        if let Err(e) = self.persist_index_with(&self.index, &recipients) {
            restore_entry(&mut self.index, updated.id(), previous);
            return Err(index_inconsistency(updated.id(), "rewritten but index not updated", e));
        }

        info!(id = updated.id(), "record updated");
        Ok(updated)
    }

    /// Remove a record's ciphertext and its index entry.
    ///
    /// A ciphertext that is already missing while the index still lists it
    /// is logged as an inconsistency and the stale entry is dropped.
    pub fn delete(&mut self, id_or_prefix: &str) -> Result<DeleteOutcome> {
        let entry = self.resolve_entry(id_or_prefix)?;
        let id = entry.id.clone();
        let location = entry.relative_location.clone();

        let file_missing = match fs::remove_file(self.record_path(&location)) {
            Ok(()) => {
                debug!(location = %location, "record file removed");
                false
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(id = %id, location = %location, "record file already missing; dropping index entry");
                true
            }
            Err(source) => return Err(StoreError::Remove { location, source }.into()),
        };

        let previous = self.index.remove(&id);
        if let Err(e) = self.persist_index() {
            restore_entry(&mut self.index, &id, previous);
            return Err(index_inconsistency(&id, "file removed but still indexed", e));
        }

        info!(id = %id, "record deleted");
        Ok(DeleteOutcome { id, file_missing })
    }

    /// Index entries ordered by creation time. No decryption.
    pub fn list_all(&self, descending: bool) -> Vec<IndexEntry> {
        self.index.entries(descending).into_iter().cloned().collect()
    }

    pub(super) fn resolve_entry(&self, id_or_prefix: &str) -> Result<IndexEntry> {
        let id = resolve_id(&self.index, id_or_prefix)?;
        self.index
            .lookup(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id).into())
    }
}

fn restore_entry(index: &mut SearchIndex, id: &str, previous: Option<IndexEntry>) {
    index.remove(id);
    if let Some(entry) = previous {
        index.add(entry);
    }
}

fn index_inconsistency(id: &str, what: &str, cause: Error) -> Error {
    let detail = format!("{what}: {cause}");
    warn!(id, "index inconsistency: {}", detail);
    StoreError::IndexInconsistency {
        id: id.to_string(),
        detail,
    }
    .into()
}
