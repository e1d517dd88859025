//! Init command - create and register a store.

use std::path::PathBuf;

use tracing::info;

use crate::cli::output;
use crate::core::cipher::{parse_recipient, Age};
use crate::core::config::{expand_home, Config};
use crate::core::identity::Identity;
use crate::core::recipients::RecipientSet;
use crate::core::store::RecordStore;
use crate::error::{Error, KeyError, Result};

/// Create a store at `path` and register it as `name`.
///
/// Without explicit recipients the store is encrypted to the caller's own
/// identity.
pub fn execute(name: &str, path: &str, recipients: Vec<String>) -> Result<()> {
    let root = absolute(expand_home(path)?)?;

    let identity = match Identity::load_default() {
        Ok(identity) => Some(identity),
        Err(Error::Key(KeyError::NoIdentity(_))) if !recipients.is_empty() => None,
        Err(e) => return Err(e),
    };

    let keys = if recipients.is_empty() {
        identity
            .as_ref()
            .map(Identity::public_keys)
            .unwrap_or_default()
    } else {
        recipients
    };
    let recipients = RecipientSet::new(&keys)?;
    for key in recipients.iter() {
        parse_recipient(key)?;
    }

    let cipher = match identity {
        Some(identity) => identity.into_cipher(),
        None => {
            output::warn("no identity file found; you will not be able to read this store");
            Age::new(Vec::new())
        }
    };

    info!("Initializing store {} at {}", name, root.display());
    RecordStore::initialize(&root, &recipients, cipher)?;

    let config_path = Config::default_path()?;
    let mut config = Config::load(&config_path)?;
    if config.upsert_store(name, root.clone())? {
        output::warn(&format!("store '{}' was already registered; path updated", name));
    }
    config.save(&config_path)?;

    output::success(&format!(
        "initialized {} at {}",
        name,
        output::path(root.display())
    ));
    output::kv("recipients:", recipients.len());
    Ok(())
}

fn absolute(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
