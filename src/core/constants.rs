//! Constants used throughout sealbook.
//!
//! Centralizes file names, directory names, and environment variables.

/// Recipient directory file at the store root.
pub const RECIPIENTS_FILE: &str = ".sealbook.toml";

/// Backup of the recipient directory kept while a rotation is in flight.
pub const RECIPIENTS_BACKUP_FILE: &str = ".sealbook.toml.bak";

/// Encrypted index file at the store root.
pub const INDEX_FILE: &str = "index.age";

/// Directory holding the record tree (`entries/YYYY/MM/<id>.age`).
pub const ENTRIES_DIR: &str = "entries";

/// Extension of every encrypted artifact.
pub const RECORD_EXT: &str = "age";

/// Pattern matching the index artifact in the recipient rules.
pub const INDEX_RULE: &str = r"index\.age$";

/// Pattern matching record files in the recipient rules.
pub const ENTRIES_RULE: &str = r"entries/.*\.age$";

/// Per-user directory relative to HOME (~/.sealbook).
pub const HOME_DIR: &str = ".sealbook";

/// Global store registry file inside [`HOME_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Default identity file inside [`HOME_DIR`].
pub const IDENTITY_FILE: &str = "identity.key";

/// Overrides the identity file location.
pub const KEY_FILE_ENV: &str = "SEALBOOK_AGE_KEY_FILE";

/// Log filter environment variable.
pub const LOG_ENV: &str = "SEALBOOK_LOG";

/// Shortest id prefix accepted for lookups.
pub const MIN_PREFIX_LEN: usize = 8;

/// Index format version.
pub const INDEX_VERSION: &str = "1.0";
