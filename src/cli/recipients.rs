//! Recipient commands.

use crate::cli::maintenance::print_rotation;
use crate::cli::output;
use crate::cli::resolve::open_store;
use crate::core::cipher::parse_recipient;
use crate::error::Result;

/// List the store's recipients.
pub fn list(store: Option<&str>) -> Result<()> {
    let store = open_store(store)?;
    let keys = store.recipient_keys()?;

    output::header(&format!("Recipients ({})", keys.len()));
    for key in &keys {
        output::list_item(key);
    }
    Ok(())
}

/// Add a recipient and re-encrypt the store for it.
pub fn add(store: Option<&str>, key: &str) -> Result<()> {
    let key = key.trim();
    parse_recipient(key)?;

    let mut store = open_store(store)?;
    let report = store.add_recipient(key)?;
    output::success(&format!("added recipient {}", output::path(key)));
    print_rotation(&report);
    Ok(())
}

/// Remove a recipient and re-encrypt the store without it.
pub fn rm(store: Option<&str>, key: &str) -> Result<()> {
    let mut store = open_store(store)?;
    let report = store.remove_recipient(key)?;
    output::success(&format!("removed recipient {}", output::path(key.trim())));
    print_rotation(&report);
    output::hint("the removed key can still read copies or backups made before now");
    Ok(())
}
