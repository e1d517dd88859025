//! Keygen command - create the identity file.

use crate::cli::output;
use crate::core::identity::Identity;
use crate::error::Result;

/// Generate an identity at the default location.
pub fn execute(force: bool) -> Result<()> {
    let path = Identity::default_path()?;
    let identity = Identity::generate(&path, force)?;

    output::success(&format!("identity written to {}", output::path(path.display())));
    for key in identity.public_keys() {
        output::kv("public key:", key);
    }
    output::hint("share the public key with store owners so they can add you");
    Ok(())
}
