//! The record store.
//!
//! `RecordStore` owns the encryption provider, the recipient directory, and
//! the in-memory [`SearchIndex`]. Every mutation writes ciphertext first and
//! only then touches the index, so a failed write never leaves an index
//! entry pointing at nothing.

mod maintenance;
mod records;
mod resolve;
mod search;

pub use maintenance::RebuildReport;
pub use records::DeleteOutcome;
pub use resolve::resolve_id;
pub use search::LoadReport;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::cipher::Cipher;
use crate::core::constants;
use crate::core::fs::{create_private_dir, write_atomic};
use crate::core::index::SearchIndex;
use crate::core::recipients::{RecipientDirectory, RecipientSet, RulesFile};
use crate::core::record::Record;
use crate::error::{ConfigError, Result, StoreError};

/// A record that could not be loaded or rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    /// Path relative to `entries/`.
    pub location: String,
    pub error: String,
}

/// An encrypted journal store rooted at a directory.
pub struct RecordStore {
    pub(super) root: PathBuf,
    pub(super) cipher: Box<dyn Cipher>,
    pub(super) directory: Box<dyn RecipientDirectory>,
    pub(super) index: SearchIndex,
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("root", &self.root)
            .field("cipher", &self.cipher.name())
            .field("records", &self.index.len())
            .finish()
    }
}

impl RecordStore {
    /// Create a new store at `root`.
    ///
    /// Creates the root and `entries/` directories, writes the recipient
    /// rules, and persists an empty index.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::AlreadyInitialized` if `root` already holds a
    /// store.
    pub fn initialize(
        root: impl Into<PathBuf>,
        recipients: &RecipientSet,
        cipher: impl Cipher + 'static,
    ) -> Result<Self> {
        let root = root.into();
        let rules = RulesFile::new(&root);
        if rules.exists() {
            return Err(ConfigError::AlreadyInitialized(root).into());
        }

        create_private_dir(&root)?;
        create_private_dir(&root.join(constants::ENTRIES_DIR))?;
        rules.create(recipients)?;

        let store = Self {
            root,
            cipher: Box::new(cipher),
            directory: Box::new(rules),
            index: SearchIndex::new(),
        };
        store.persist_index()?;

        info!(root = %store.root.display(), recipients = recipients.len(), "store initialized");
        Ok(store)
    }

    /// Open an existing store using its `.sealbook.toml` rules file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotInitialized` if there is no rules file, or a
    /// decrypt/parse error if the index cannot be read.
    pub fn open(root: impl Into<PathBuf>, cipher: impl Cipher + 'static) -> Result<Self> {
        let root = root.into();
        let rules = RulesFile::new(&root);
        if !rules.exists() {
            return Err(ConfigError::NotInitialized(root).into());
        }
        Self::open_with(root, cipher, rules)
    }

    /// Open a store with an explicit recipient directory.
    pub fn open_with(
        root: impl Into<PathBuf>,
        cipher: impl Cipher + 'static,
        directory: impl RecipientDirectory + 'static,
    ) -> Result<Self> {
        let mut store = Self {
            root: root.into(),
            cipher: Box::new(cipher),
            directory: Box::new(directory),
            index: SearchIndex::new(),
        };
        store.index = store.load_index()?;

        debug!(root = %store.root.display(), records = store.index.len(), "store opened");
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read-only view of the index.
    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn cipher_name(&self) -> &'static str {
        self.cipher.name()
    }

    /// The recipient directory backing this store.
    pub fn directory(&self) -> &dyn RecipientDirectory {
        self.directory.as_ref()
    }

    /// Current authorized recipients.
    pub fn recipients(&self) -> Result<RecipientSet> {
        self.directory.load()
    }

    pub fn entries_dir(&self) -> PathBuf {
        self.root.join(constants::ENTRIES_DIR)
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(constants::INDEX_FILE)
    }

    /// Absolute path for a location relative to `entries/`.
    pub fn record_path(&self, location: &str) -> PathBuf {
        self.entries_dir().join(location)
    }

    /// Encrypt the index under the current recipients and write it.
    pub fn persist_index(&self) -> Result<()> {
        let recipients = self.directory.load()?;
        self.persist_index_with(&self.index, &recipients)
    }

    pub(crate) fn persist_index_with(
        &self,
        index: &SearchIndex,
        recipients: &RecipientSet,
    ) -> Result<()> {
        let plaintext = index.to_json()?;
        let ciphertext = self
            .cipher
            .encrypt(&plaintext, recipients)
            .map_err(|source| StoreError::Encrypt {
                location: constants::INDEX_FILE.to_string(),
                source,
            })?;
        write_atomic(&self.index_path(), &ciphertext).map_err(|source| StoreError::Write {
            location: constants::INDEX_FILE.to_string(),
            source,
        })?;

        debug!(records = index.len(), "index persisted");
        Ok(())
    }

    fn load_index(&self) -> Result<SearchIndex> {
        let path = self.index_path();
        let ciphertext = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no index file, starting empty");
                return Ok(SearchIndex::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    location: constants::INDEX_FILE.to_string(),
                    source,
                }
                .into())
            }
        };
        if ciphertext.iter().all(u8::is_ascii_whitespace) {
            warn!("index file is empty; run `sealbook rebuild` to recover");
            return Ok(SearchIndex::new());
        }

        let plaintext = self
            .cipher
            .decrypt(&ciphertext)
            .map_err(|source| StoreError::Decrypt {
                location: constants::INDEX_FILE.to_string(),
                source,
            })?;
        Ok(SearchIndex::from_json(&plaintext)?)
    }

    /// Encrypt a record under `recipients` and write it to its location.
    pub(crate) fn write_record(&self, record: &Record, recipients: &RecipientSet) -> Result<()> {
        let location = record.relative_location();
        let plaintext = record.encode().map_err(|source| StoreError::Encode {
            location: location.to_string(),
            source,
        })?;
        let ciphertext = self
            .cipher
            .encrypt(&plaintext, recipients)
            .map_err(|source| StoreError::Encrypt {
                location: location.to_string(),
                source,
            })?;
        write_atomic(&self.record_path(location), &ciphertext).map_err(|source| {
            StoreError::Write {
                location: location.to_string(),
                source,
            }
        })?;

        debug!(location, "record written");
        Ok(())
    }

    /// Read and decrypt the record stored at `location`.
    pub(crate) fn read_record(&self, location: &str) -> Result<Record> {
        let ciphertext =
            fs::read(self.record_path(location)).map_err(|source| StoreError::Read {
                location: location.to_string(),
                source,
            })?;
        let plaintext = self
            .cipher
            .decrypt(&ciphertext)
            .map_err(|source| StoreError::Decrypt {
                location: location.to_string(),
                source,
            })?;
        let record = Record::decode(&plaintext).map_err(|source| StoreError::Decode {
            location: location.to_string(),
            source,
        })?;
        Ok(record)
    }

    /// Decrypt the record at `location` and write it back under `recipients`,
    /// upgraded to the current schema version.
    ///
    /// The rewritten record stores `location` as its own, so a file that was
    /// moved on disk stays where it was found.
    pub(crate) fn reencrypt_location(&self, location: &str, recipients: &RecipientSet) -> Result<()> {
        let record = self.read_record(location)?.relocated(location);
        self.write_record(&record, recipients)
    }
}
