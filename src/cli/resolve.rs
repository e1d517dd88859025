//! Store resolution for CLI commands.

use tracing::debug;

use crate::core::config::Config;
use crate::core::identity::Identity;
use crate::core::store::RecordStore;
use crate::error::Result;

/// Open the named store, or the default store when `name` is `None`.
///
/// Decryption uses the ambient identity file.
pub fn open_store(name: Option<&str>) -> Result<RecordStore> {
    let config = Config::load_default()?;
    let (name, path) = config.resolve(name)?;
    debug!(store = %name, path = %path.display(), "opening store");

    let identity = Identity::load_default()?;
    RecordStore::open(path, identity.into_cipher())
}
