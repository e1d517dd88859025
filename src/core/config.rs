//! Global store registry.
//!
//! `~/.sealbook/config.toml` maps store names to their root directories and
//! records which one is the default:
//!
//! ```toml
//! default_store = "personal"
//!
//! [stores.personal]
//! path = "/home/me/journal"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::core::fs::{create_private_dir, write_atomic};
use crate::error::{ConfigError, Result};

/// A registered store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreEntry {
    pub path: PathBuf,
}

/// Contents of the global config file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_store: Option<String>,
    #[serde(default)]
    pub stores: BTreeMap<String, StoreEntry>,
}

impl Config {
    /// `~/.sealbook/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
        Ok(home.join(constants::HOME_DIR).join(constants::CONFIG_FILE))
    }

    /// Load the config at the default location.
    pub fn load_default() -> Result<Self> {
        Self::load(&Self::default_path()?)
    }

    /// Load a config file.
    ///
    /// A missing file is an empty config. An empty file is treated as
    /// corrupted rather than silently dropping every registration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Corrupted` for an empty file and
    /// `ConfigError::Parse` for malformed TOML.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ConfigError::ReadFile(e).into()),
        };
        if contents.trim().is_empty() {
            return Err(ConfigError::Corrupted(format!("{} is empty", path.display())).into());
        }

        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;
        config.validate()?;

        debug!(stores = config.stores.len(), "config loaded");
        Ok(config)
    }

    /// Write the config, creating its directory (0700) if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_private_dir(parent)?;
            }
        }
        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        write_atomic(path, contents.as_bytes())?;
        debug!(path = %path.display(), "config saved");
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.default_store {
            if !self.stores.contains_key(name) {
                return Err(ConfigError::Corrupted(format!(
                    "default store '{name}' is not registered"
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Register a store. The first store added becomes the default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty name and
    /// `ConfigError::StoreExists` if the name is taken.
    pub fn add_store(&mut self, name: &str, path: PathBuf) -> Result<()> {
        let name = validate_name(name)?;
        if self.stores.contains_key(name) {
            return Err(ConfigError::StoreExists(name.to_string()).into());
        }

        self.stores.insert(name.to_string(), StoreEntry { path });
        if self.default_store.is_none() {
            self.default_store = Some(name.to_string());
        }
        Ok(())
    }

    /// Point an existing name at a new path, or register it if new.
    ///
    /// Returns `true` if an existing registration was replaced.
    pub fn upsert_store(&mut self, name: &str, path: PathBuf) -> Result<bool> {
        let name = validate_name(name)?;
        if let Some(entry) = self.stores.get_mut(name) {
            entry.path = path;
            return Ok(true);
        }
        self.add_store(name, path)?;
        Ok(false)
    }

    pub fn get_store(&self, name: &str) -> Result<&StoreEntry> {
        self.stores
            .get(name)
            .ok_or_else(|| ConfigError::StoreNotFound(name.to_string()).into())
    }

    /// The default store's name and entry.
    pub fn default_store(&self) -> Result<(&str, &StoreEntry)> {
        if self.stores.is_empty() {
            return Err(ConfigError::NoStores.into());
        }
        let name = self.default_store.as_deref().ok_or(ConfigError::NoDefault)?;
        Ok((name, self.get_store(name)?))
    }

    /// Resolve `name`, or the default store when `None`.
    pub fn resolve(&self, name: Option<&str>) -> Result<(String, PathBuf)> {
        match name {
            Some(name) => Ok((name.to_string(), self.get_store(name)?.path.clone())),
            None => {
                let (name, entry) = self.default_store()?;
                Ok((name.to_string(), entry.path.clone()))
            }
        }
    }

    pub fn set_default(&mut self, name: &str) -> Result<()> {
        self.get_store(name)?;
        self.default_store = Some(name.to_string());
        Ok(())
    }

    /// Unregister a store. The default store cannot be removed.
    pub fn remove_store(&mut self, name: &str) -> Result<StoreEntry> {
        if self.default_store.as_deref() == Some(name) {
            return Err(ConfigError::RemoveDefault(name.to_string()).into());
        }
        self.stores
            .remove(name)
            .ok_or_else(|| ConfigError::StoreNotFound(name.to_string()).into())
    }

    /// Registered names, sorted.
    pub fn store_names(&self) -> Vec<&str> {
        self.stores.keys().map(String::as_str).collect()
    }
}

fn validate_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "name",
            reason: "store name cannot be empty".to_string(),
        }
        .into());
    }
    Ok(name)
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &str) -> Result<PathBuf> {
    if path == "~" {
        return dirs::home_dir().ok_or_else(|| ConfigError::NoHome.into());
    }
    if let Some(rest) = path.strip_prefix("~/") {
        let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
        return Ok(home.join(rest));
    }
    Ok(PathBuf::from(path))
}
