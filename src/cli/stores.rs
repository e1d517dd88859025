//! Store registry commands.

use crate::cli::output;
use crate::core::config::Config;
use crate::error::Result;

/// List registered stores, marking the default.
pub fn list() -> Result<()> {
    let config = Config::load_default()?;

    if config.stores.is_empty() {
        output::dimmed("no stores registered");
        output::hint(&format!(
            "run: {}",
            output::cmd("sealbook init -n NAME -p PATH")
        ));
        return Ok(());
    }

    output::header("Stores");
    for (name, entry) in &config.stores {
        let marker = if config.default_store.as_deref() == Some(name.as_str()) {
            "*"
        } else {
            " "
        };
        println!(
            "{} {}  {}",
            marker,
            name,
            output::path(entry.path.display())
        );
    }
    Ok(())
}

/// Make `name` the default store.
pub fn set_default(name: &str) -> Result<()> {
    let path = Config::default_path()?;
    let mut config = Config::load(&path)?;
    config.set_default(name)?;
    config.save(&path)?;

    output::success(&format!("default store is now {}", name));
    Ok(())
}

/// Unregister a store. Its files are left alone.
pub fn forget(name: &str) -> Result<()> {
    let path = Config::default_path()?;
    let mut config = Config::load(&path)?;
    let entry = config.remove_store(name)?;
    config.save(&path)?;

    output::success(&format!("forgot store {}", name));
    output::dimmed(&format!("files remain at {}", entry.path.display()));
    Ok(())
}
