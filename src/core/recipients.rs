//! Recipient directory.
//!
//! The ordered set of public keys allowed to decrypt a store, persisted in
//! `.sealbook.toml` as path rules (one for the index, one for record files)
//! that all carry the same comma-joined recipient list.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::core::fs::write_atomic;
use crate::core::types::PublicKey;
use crate::error::{ConfigError, Result};

/// An ordered, deduplicated, non-empty list of recipient identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientSet {
    keys: Vec<PublicKey>,
}

impl RecipientSet {
    /// Build a set from raw identifiers.
    ///
    /// Entries are trimmed, blanks are dropped, and duplicates keep their
    /// first position.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoRecipients` if nothing is left.
    pub fn new<I, S>(keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<PublicKey> = Vec::new();
        for key in keys {
            let key = key.as_ref().trim();
            if key.is_empty() || out.iter().any(|k| k == key) {
                continue;
            }
            out.push(key.to_string());
        }

        if out.is_empty() {
            return Err(ConfigError::NoRecipients.into());
        }
        Ok(Self { keys: out })
    }

    /// Parse a comma-separated list.
    pub fn parse(joined: &str) -> Result<Self> {
        Self::new(joined.split(','))
    }

    /// Comma-joined form, as stored in the rules file.
    pub fn joined(&self) -> String {
        self.keys.join(",")
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn as_slice(&self) -> &[PublicKey] {
        &self.keys
    }

    /// A new set with `key` appended.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::RecipientExists` if the key is already present.
    pub fn with_added(&self, key: &str) -> Result<Self> {
        let key = key.trim();
        if self.contains(key) {
            return Err(ConfigError::RecipientExists(key.to_string()).into());
        }
        Self::new(self.iter().chain(std::iter::once(key)))
    }

    /// A new set without `key`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::RecipientNotFound` if absent, or
    /// `ConfigError::LastRecipient` if it is the only one.
    pub fn without(&self, key: &str) -> Result<Self> {
        let key = key.trim();
        if !self.contains(key) {
            return Err(ConfigError::RecipientNotFound(key.to_string()).into());
        }
        if self.keys.len() == 1 {
            return Err(ConfigError::LastRecipient.into());
        }
        Self::new(self.iter().filter(|k| *k != key))
    }
}

/// Backup handle returned by [`RecipientDirectory::snapshot`].
#[derive(Debug, Clone)]
pub struct Snapshot {
    path: PathBuf,
}

impl Snapshot {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Where the backup lives.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Read/write access to a store's authorized recipients.
///
/// Rotation relies on `snapshot`/`restore` reproducing the previous state
/// exactly, byte for byte.
pub trait RecipientDirectory {
    /// Current recipient set.
    fn load(&self) -> Result<RecipientSet>;

    /// Persist a new recipient set.
    fn commit(&self, recipients: &RecipientSet) -> Result<()>;

    /// Save a copy of the current state.
    fn snapshot(&self) -> Result<Snapshot>;

    /// Put a snapshot back in place. The snapshot itself is left untouched.
    fn restore(&self, snapshot: &Snapshot) -> Result<()>;

    /// Delete a snapshot that is no longer needed.
    fn discard(&self, snapshot: Snapshot) -> Result<()>;
}

/// On-disk layout of `.sealbook.toml`.
#[derive(Debug, Serialize, Deserialize)]
struct RulesDocument {
    sealbook: Meta,
    #[serde(default)]
    rules: Vec<Rule>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Meta {
    #[serde(default)]
    version: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Rule {
    path_regex: String,
    #[serde(default)]
    recipients: String,
}

impl RulesDocument {
    fn for_recipients(recipients: &RecipientSet) -> Self {
        let joined = recipients.joined();
        Self {
            sealbook: Meta {
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            rules: vec![
                Rule {
                    path_regex: constants::INDEX_RULE.to_string(),
                    recipients: joined.clone(),
                },
                Rule {
                    path_regex: constants::ENTRIES_RULE.to_string(),
                    recipients: joined,
                },
            ],
        }
    }
}

/// The `.sealbook.toml` recipient directory at a store root.
#[derive(Debug, Clone)]
pub struct RulesFile {
    root: PathBuf,
}

impl RulesFile {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(constants::RECIPIENTS_FILE)
    }

    pub fn backup_path(&self) -> PathBuf {
        self.root.join(constants::RECIPIENTS_BACKUP_FILE)
    }

    pub fn exists(&self) -> bool {
        self.path().exists()
    }

    /// Write a fresh rules file for a new store.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::AlreadyInitialized` if one already exists.
    pub fn create(&self, recipients: &RecipientSet) -> Result<()> {
        if self.exists() {
            return Err(ConfigError::AlreadyInitialized(self.root.clone()).into());
        }
        self.commit(recipients)
    }

    fn read_document(&self) -> Result<RulesDocument> {
        let path = self.path();
        debug!(path = %path.display(), "loading recipient rules");

        if !path.exists() {
            return Err(ConfigError::NotInitialized(self.root.clone()).into());
        }
        let contents = fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
        let doc: RulesDocument = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        if doc.sealbook.version.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "version" }.into());
        }
        Ok(doc)
    }
}

impl RecipientDirectory for RulesFile {
    fn load(&self) -> Result<RecipientSet> {
        let doc = self.read_document()?;
        let first = doc.rules.first().ok_or(ConfigError::NoRules)?;
        let recipients = RecipientSet::parse(&first.recipients)?;

        debug!(recipients = recipients.len(), "recipient rules loaded");
        Ok(recipients)
    }

    fn commit(&self, recipients: &RecipientSet) -> Result<()> {
        debug!(recipients = recipients.len(), "saving recipient rules");

        let doc = RulesDocument::for_recipients(recipients);
        let contents = toml::to_string_pretty(&doc).map_err(ConfigError::Serialize)?;
        write_atomic(&self.path(), contents.as_bytes())?;
        Ok(())
    }

    fn snapshot(&self) -> Result<Snapshot> {
        let source = self.path();
        if !source.exists() {
            return Err(ConfigError::NotInitialized(self.root.clone()).into());
        }

        let backup = self.backup_path();
        fs::copy(&source, &backup)?;
        debug!(backup = %backup.display(), "recipient rules backed up");
        Ok(Snapshot::new(backup))
    }

    fn restore(&self, snapshot: &Snapshot) -> Result<()> {
        let bytes = fs::read(snapshot.path())?;
        write_atomic(&self.path(), &bytes)?;
        debug!(backup = %snapshot.path().display(), "recipient rules restored");
        Ok(())
    }

    fn discard(&self, snapshot: Snapshot) -> Result<()> {
        fs::remove_file(snapshot.path())?;
        Ok(())
    }
}
