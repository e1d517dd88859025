//! Maintenance commands - rebuild and reencrypt.

use crate::cli::output;
use crate::cli::resolve::open_store;
use crate::core::rotation::RotationReport;
use crate::error::Result;

/// Rebuild the index from the entry files.
pub fn rebuild(store: Option<&str>) -> Result<()> {
    let mut store = open_store(store)?;
    let report = store.rebuild_index()?;

    for skipped in &report.skipped {
        output::warn(&format!("skipped {}: {}", skipped.location, skipped.error));
    }
    output::success(&format!("rebuilt index: {} entries", report.indexed));
    Ok(())
}

/// Re-encrypt everything for the current recipients.
pub fn reencrypt(store: Option<&str>) -> Result<()> {
    let mut store = open_store(store)?;
    let report = store.reencrypt_all()?;
    print_rotation(&report);
    Ok(())
}

/// Summarize a successful rotation.
pub(crate) fn print_rotation(report: &RotationReport) {
    output::success(&format!("re-encrypted {} entries and the index", report.succeeded));
}
