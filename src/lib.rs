//! Sealbook - an encrypted, file-backed journal.
//!
//! Every entry is its own age-encrypted file. An encrypted index answers
//! id, date, and tag lookups without decrypting the whole store, and the set
//! of recipients can be rotated with rollback if any re-encryption fails.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── init          # Create and register a store
//! │   ├── keygen        # Generate an identity
//! │   ├── entries       # add / show / edit / delete
//! │   ├── list          # Recent entries
//! │   ├── search        # Date and tag search
//! │   ├── maintenance   # rebuild / reencrypt
//! │   ├── recipients    # Recipient management
//! │   ├── stores        # Store registry commands
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── record        # Versioned record model
//!     ├── index         # Search index
//!     ├── store/        # Record store
//!     ├── rotation      # Recipient rotation
//!     ├── recipients    # Recipient directory (.sealbook.toml)
//!     ├── cipher/       # Encryption providers
//!     │   ├── mod       # Cipher trait
//!     │   └── age       # age implementation
//!     ├── identity      # Ambient private keys
//!     └── config        # Global store registry
//! ```
//!
//! # Example
//!
//! ```no_run
//! use chrono::Utc;
//! use sealbook::core::identity::Identity;
//! use sealbook::core::recipients::RecipientSet;
//! use sealbook::core::store::RecordStore;
//!
//! # fn main() -> sealbook::error::Result<()> {
//! let identity = Identity::load_default()?;
//! let recipients = RecipientSet::new(identity.public_keys())?;
//! let mut store = RecordStore::initialize("journal", &recipients, identity.into_cipher())?;
//!
//! let record = store.add("first entry", vec!["notes".into()], Utc::now())?;
//! assert_eq!(store.get(&record.id()[..8])?.content(), "first entry");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::index::{IndexEntry, SearchIndex};
pub use crate::core::record::Record;
pub use crate::core::rotation::RotationReport;
pub use crate::core::store::RecordStore;
pub use crate::error::{Error, Result};
