//! Ambient private keys.
//!
//! Identities are read from `$SEALBOOK_AGE_KEY_FILE`, falling back to
//! `~/.sealbook/identity.key`. A file may hold several `AGE-SECRET-KEY-`
//! lines; blank lines and `#` comments are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use age::x25519;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::core::cipher::Age;
use crate::core::constants;
use crate::core::fs::{create_private_dir, write_atomic};
use crate::core::types::PublicKey;
use crate::error::{ConfigError, KeyError, Result};

/// Private keys available for decryption.
pub struct Identity {
    keys: Vec<x25519::Identity>,
    path: PathBuf,
}

impl Identity {
    /// Resolve the identity file location.
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(constants::KEY_FILE_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
        Ok(home
            .join(constants::HOME_DIR)
            .join(constants::IDENTITY_FILE))
    }

    /// Load identities from the default location.
    pub fn load_default() -> Result<Self> {
        Self::load(&Self::default_path()?)
    }

    /// Load every identity in `path`.
    ///
    /// # Errors
    ///
    /// - `KeyError::NoIdentity` if the file does not exist
    /// - `KeyError::InvalidFormat` for a line that is not an age identity
    /// - `KeyError::Empty` if no keys were found
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading identity");

        if !path.exists() {
            return Err(KeyError::NoIdentity(path.to_path_buf()).into());
        }

        #[cfg(unix)]
        warn_if_insecure(path);

        let contents = Zeroizing::new(fs::read_to_string(path).map_err(KeyError::ReadFailed)?);
        let keys = parse_identities(&contents)?;
        if keys.is_empty() {
            return Err(KeyError::Empty(path.to_path_buf()).into());
        }

        debug!(count = keys.len(), "identities loaded");
        Ok(Self {
            keys,
            path: path.to_path_buf(),
        })
    }

    /// Generate a new identity and write it to `path` (0600).
    ///
    /// Refuses to overwrite an existing file unless `force` is set.
    pub fn generate(path: &Path, force: bool) -> Result<Self> {
        if path.exists() && !force {
            return Err(KeyError::IdentityExists(path.to_path_buf()).into());
        }

        let key = x25519::Identity::generate();
        let public = key.to_public().to_string();

        use age::secrecy::ExposeSecret;
        let secret = key.to_string();
        let contents = Zeroizing::new(format!(
            "# created: {}\n# public key: {}\n{}\n",
            chrono::Utc::now().to_rfc3339(),
            public,
            secret.expose_secret()
        ));

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_private_dir(parent).map_err(KeyError::WriteFailed)?;
            }
        }
        write_atomic(path, contents.as_bytes()).map_err(KeyError::WriteFailed)?;
        debug!(path = %path.display(), "identity written");

        Ok(Self {
            keys: vec![key],
            path: path.to_path_buf(),
        })
    }

    /// Public keys for every loaded identity, in file order.
    pub fn public_keys(&self) -> Vec<PublicKey> {
        self.keys.iter().map(|k| k.to_public().to_string()).collect()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build the age cipher that decrypts with these identities.
    pub fn into_cipher(self) -> Age {
        Age::new(self.keys)
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("keys", &self.keys.len())
            .field("path", &self.path)
            .finish()
    }
}

fn parse_identities(contents: &str) -> Result<Vec<x25519::Identity>> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            line.parse::<x25519::Identity>()
                .map_err(|e: &str| KeyError::InvalidFormat(e.to_string()).into())
        })
        .collect()
}

#[cfg(unix)]
fn warn_if_insecure(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(meta) = fs::metadata(path) {
        let mode = meta.permissions().mode() & 0o777;
        if mode != 0o600 {
            warn!(
                "insecure identity file permissions {:o} on {}; run: chmod 600 {}",
                mode,
                path.display(),
                path.display()
            );
        }
    }
}
