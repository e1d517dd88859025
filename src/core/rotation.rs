//! Recipient rotation.
//!
//! Rotation changes who can read a store and re-encrypts every record and
//! the index for the new set. It runs in phases:
//!
//! 1. back up the recipient directory
//! 2. commit the new recipient set
//! 3. list every record file
//! 4. re-encrypt each record, continuing past failures
//! 5. re-encrypt the index
//! 6. on any failure restore the backup; otherwise discard it
//!
//! Only the recipient change is rolled back. Records that were already
//! rewritten stay under the new set, and the [`RotationReport`] lists the
//! ones that were not, so a retry can finish the job.

use std::fmt;

use tracing::{debug, error, info, warn};

use crate::core::recipients::{RecipientDirectory, RecipientSet, Snapshot};
use crate::core::store::{RecordFailure, RecordStore};
use crate::core::types::PublicKey;
use crate::error::{Error, Result, RotationError};

/// Per-record outcome of a rotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RotationReport {
    pub total: usize,
    pub succeeded: usize,
    pub failures: Vec<RecordFailure>,
    pub index_error: Option<String>,
}

impl RotationReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn index_ok(&self) -> bool {
        self.index_error.is_none()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.index_error.is_none()
    }
}

impl fmt::Display for RotationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "records: {} total, {} re-encrypted, {} failed",
            self.total,
            self.succeeded,
            self.failed()
        )?;
        for failure in &self.failures {
            write!(f, "\n  - {}: {}", failure.location, failure.error)?;
        }
        if let Some(e) = &self.index_error {
            write!(f, "\n  - index: {}", e)?;
        }
        Ok(())
    }
}

/// A single rotation of a store to a target recipient set.
pub struct Rotation<'a> {
    store: &'a mut RecordStore,
    target: RecipientSet,
}

impl<'a> Rotation<'a> {
    pub fn new(store: &'a mut RecordStore, target: RecipientSet) -> Self {
        Self { store, target }
    }

    /// Run every phase and either commit or roll back the recipient change.
    ///
    /// # Errors
    ///
    /// - `RotationError::Backup` if the directory could not be backed up
    ///   (nothing was changed)
    /// - `RotationError::Aborted` if the run failed before re-encryption
    ///   (the recipient change was rolled back)
    /// - `RotationError::Failed` if any record or the index failed (rolled back)
    /// - `RotationError::RollbackFailed` if restoring the backup also failed
    pub fn run(self) -> Result<RotationReport> {
        let directory = self.store.directory();

        let snapshot = directory
            .snapshot()
            .map_err(|e| RotationError::Backup(Box::new(e)))?;
        debug!(recipients = self.target.len(), "recipient directory backed up");

        if let Err(e) = directory.commit(&self.target) {
            return Err(abort(directory, snapshot, e));
        }

        let locations = match self.store.list_locations() {
            Ok(locations) => locations,
            Err(e) => return Err(abort(directory, snapshot, e)),
        };

        let mut report = RotationReport {
            total: locations.len(),
            ..RotationReport::default()
        };

        for location in locations {
            match self.store.reencrypt_location(&location, &self.target) {
                Ok(()) => {
                    report.succeeded += 1;
                    debug!(location = %location, "record re-encrypted");
                }
                Err(e) => {
                    warn!(location = %location, "failed to re-encrypt record: {}", e);
                    report.failures.push(RecordFailure {
                        location,
                        error: e.to_string(),
                    });
                }
            }
        }

        if let Err(e) = self
            .store
            .persist_index_with(self.store.index(), &self.target)
        {
            warn!("failed to re-encrypt index: {}", e);
            report.index_error = Some(e.to_string());
        }

        if report.is_success() {
            discard(directory, snapshot);
            info!(records = report.succeeded, "rotation complete");
            return Ok(report);
        }

        match directory.restore(&snapshot) {
            Ok(()) => {
                discard(directory, snapshot);
                warn!(failed = report.failed(), "rotation failed, recipients rolled back");
                Err(RotationError::Failed { report }.into())
            }
            Err(e) => {
                error!(
                    backup = %snapshot.path().display(),
                    "rotation failed and restoring recipients failed: {}", e
                );
                Err(RotationError::RollbackFailed {
                    report,
                    rollback_error: e.to_string(),
                    backup: snapshot.path().to_path_buf(),
                }
                .into())
            }
        }
    }
}

fn abort(directory: &dyn RecipientDirectory, snapshot: Snapshot, cause: Error) -> Error {
    match directory.restore(&snapshot) {
        Ok(()) => {
            discard(directory, snapshot);
            RotationError::Aborted(Box::new(cause)).into()
        }
        Err(e) => {
            error!(
                backup = %snapshot.path().display(),
                "rotation aborted ({}) and restoring recipients failed: {}", cause, e
            );
            RotationError::RollbackFailed {
                report: RotationReport::default(),
                rollback_error: format!("{e} (after: {cause})"),
                backup: snapshot.path().to_path_buf(),
            }
            .into()
        }
    }
}

fn discard(directory: &dyn RecipientDirectory, snapshot: Snapshot) {
    let path = snapshot.path().to_path_buf();
    if let Err(e) = directory.discard(snapshot) {
        warn!(backup = %path.display(), "failed to remove recipient backup: {}", e);
    }
}

impl RecordStore {
    /// Rotate the store to a new recipient set.
    pub fn rotate_recipients(&mut self, target: RecipientSet) -> Result<RotationReport> {
        Rotation::new(self, target).run()
    }

    /// Re-encrypt everything under the unchanged current recipients.
    pub fn reencrypt_all(&mut self) -> Result<RotationReport> {
        let current = self.recipients()?;
        self.rotate_recipients(current)
    }

    /// Add a recipient and rotate.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::RecipientExists` if the key is already present.
    pub fn add_recipient(&mut self, key: &str) -> Result<RotationReport> {
        let target = self.recipients()?.with_added(key)?;
        self.rotate_recipients(target)
    }

    /// Remove a recipient and rotate.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::RecipientNotFound` if the key is absent, or
    /// `ConfigError::LastRecipient` if it is the only one.
    pub fn remove_recipient(&mut self, key: &str) -> Result<RotationReport> {
        let target = self.recipients()?.without(key)?;
        self.rotate_recipients(target)
    }

    /// Public keys currently authorized.
    pub fn recipient_keys(&self) -> Result<Vec<PublicKey>> {
        Ok(self.recipients()?.as_slice().to_vec())
    }
}
