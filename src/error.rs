//! Error types.
//!
//! Each concern owns a `thiserror` enum; they all fold into [`Error`] so the
//! library exposes a single `Result` alias.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::rotation::RotationReport;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Rotation(#[from] RotationError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Store configuration and store registry errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("store not initialized: {0} has no .sealbook.toml")]
    NotInitialized(PathBuf),

    #[error("store already initialized at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("no recipients configured")]
    NoRecipients,

    #[error("no rules found in .sealbook.toml")]
    NoRules,

    #[error("recipient already exists: {0}")]
    RecipientExists(String),

    #[error("recipient not found: {0}")]
    RecipientNotFound(String),

    #[error("cannot remove last recipient")]
    LastRecipient,

    #[error("store not found: {0}")]
    StoreNotFound(String),

    #[error("store already registered: {0}")]
    StoreExists(String),

    #[error("no stores configured")]
    NoStores,

    #[error("no default store set")]
    NoDefault,

    #[error("cannot remove default store {0}; set another default first")]
    RemoveDefault(String),

    #[error("config file is corrupted: {0}")]
    Corrupted(String),

    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("unable to determine home directory")]
    NoHome,
}

/// Encryption provider failures.
#[derive(Debug, Error)]
pub enum CipherError {
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("armor error: {0}")]
    ArmorFailed(String),
}

/// Record decode/encode failures.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("unsupported record schema version: {0}")]
    UnsupportedVersion(u32),

    #[error("invalid record: {0}")]
    InvalidRecord(&'static str),

    #[error("failed to parse record: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("failed to serialize record: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Record store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("id prefix too short: '{prefix}' (need at least {min} characters)")]
    PrefixTooShort { prefix: String, min: usize },

    #[error("id prefix '{prefix}' is ambiguous ({matches} records match)")]
    AmbiguousPrefix { prefix: String, matches: usize },

    #[error("failed to encrypt {location}: {source}")]
    Encrypt {
        location: String,
        #[source]
        source: CipherError,
    },

    #[error("failed to decrypt {location}: {source}")]
    Decrypt {
        location: String,
        #[source]
        source: CipherError,
    },

    #[error("failed to encode {location}: {source}")]
    Encode {
        location: String,
        #[source]
        source: RecordError,
    },

    #[error("failed to decode {location}: {source}")]
    Decode {
        location: String,
        #[source]
        source: RecordError,
    },

    #[error("failed to write {location}: {source}")]
    Write {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove {location}: {source}")]
    Remove {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {location}: {source}")]
    Read {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("index inconsistency for record {id}: {detail} (run `sealbook rebuild`)")]
    IndexInconsistency { id: String, detail: String },

    #[error("failed to parse index: {0}")]
    IndexParse(#[source] serde_json::Error),
}

/// Identity (private key) failures.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("no identity file at {0}")]
    NoIdentity(PathBuf),

    #[error("identity file already exists at {0} (use --force to overwrite)")]
    IdentityExists(PathBuf),

    #[error("identity file {0} contains no keys")]
    Empty(PathBuf),

    #[error("invalid identity: {0}")]
    InvalidFormat(String),

    #[error("failed to read identity: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("failed to write identity: {0}")]
    WriteFailed(#[source] std::io::Error),
}

/// Recipient rotation failures.
///
/// Both variants carry the full per-record report so callers can show
/// exactly which records are still under the old recipient set.
#[derive(Debug, Error)]
pub enum RotationError {
    #[error("failed to back up recipients: {0}")]
    Backup(#[source] Box<Error>),

    #[error("rotation aborted before re-encryption, recipients restored: {0}")]
    Aborted(#[source] Box<Error>),

    #[error("re-encryption failed, recipients rolled back\n{report}")]
    Failed { report: RotationReport },

    #[error(
        "CRITICAL: re-encryption failed AND restoring recipients failed: {rollback_error}\n\
         backup retained at {}\n{report}",
        backup.display()
    )]
    RollbackFailed {
        report: RotationReport,
        rollback_error: String,
        backup: PathBuf,
    },
}

/// Input validation failures.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("entry content cannot be empty")]
    EmptyContent,

    #[error("invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate { input: String },

    #[error("invalid date range: {start} is after {end}")]
    InvalidRange { start: String, end: String },
}
