//! Store walking and index recovery.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info, warn};

use super::{RecordFailure, RecordStore};
use crate::core::constants;
use crate::core::index::SearchIndex;
use crate::error::{Result, StoreError};

/// Outcome of [`RecordStore::rebuild_index`].
#[derive(Debug, Default)]
pub struct RebuildReport {
    pub indexed: usize,
    pub skipped: Vec<RecordFailure>,
}

impl RecordStore {
    /// Every record file under `entries/`, relative to it, sorted.
    ///
    /// Hidden files (including in-flight temp files) are ignored.
    pub fn list_locations(&self) -> Result<Vec<String>> {
        let base = self.entries_dir();
        let mut out = Vec::new();
        match walk(&base, "", &mut out) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(out),
            Err(source) => {
                return Err(StoreError::Read {
                    location: constants::ENTRIES_DIR.to_string(),
                    source,
                }
                .into())
            }
        }
        out.sort();
        debug!(records = out.len(), "record files listed");
        Ok(out)
    }

    /// Rebuild the index from the record files on disk.
    ///
    /// Records that fail to decrypt or decode are skipped with a warning. The
    /// persisted index is replaced only once the new one has been written.
    pub fn rebuild_index(&mut self) -> Result<RebuildReport> {
        let mut report = RebuildReport::default();
        let mut index = SearchIndex::new();

        for location in self.list_locations()? {
            match self.read_record(&location) {
                Ok(record) => {
                    let mut entry = record.index_entry();
                    if entry.relative_location != location {
                        warn!(
                            id = %entry.id,
                            stored = %entry.relative_location,
                            found = %location,
                            "record found away from its stored location"
                        );
                        entry.relative_location = location;
                    }
                    index.add(entry);
                }
                Err(e) => {
                    warn!(location = %location, "skipping record during rebuild: {}", e);
                    report.skipped.push(RecordFailure {
                        location,
                        error: e.to_string(),
                    });
                }
            }
        }

        let recipients = self.directory.load()?;
        self.persist_index_with(&index, &recipients)?;
        report.indexed = index.len();
        self.index = index;

        info!(
            indexed = report.indexed,
            skipped = report.skipped.len(),
            "index rebuilt"
        );
        Ok(report)
    }
}

fn walk(dir: &Path, prefix: &str, out: &mut Vec<String>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }
        let relative = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}/{name}")
        };

        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            walk(&entry.path(), &relative, out)?;
        } else if file_type.is_file()
            && Path::new(&name).extension().and_then(|e| e.to_str()) == Some(constants::RECORD_EXT)
        {
            out.push(relative);
        }
    }
    Ok(())
}
