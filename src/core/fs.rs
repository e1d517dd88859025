//! Filesystem helpers for atomic, permission-restricted writes.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::trace;

/// Write `contents` to `path` atomically.
///
/// Data goes to a sibling temp file first and is then renamed over the
/// destination, so readers see either the old or the new file, never a torn
/// one. Parent directories are created as needed. On Unix the file is
/// restricted to 0600.
///
/// # Errors
///
/// Returns an error if the directory, temp file, or rename fails.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_private_dir(parent)?;
        }
    }

    let temp = temp_path(path);
    trace!(path = %path.display(), bytes = contents.len(), "atomic write");

    {
        let mut file = fs::File::create(&temp)?;
        restrict_permissions(&temp)?;
        file.write_all(contents)?;
        file.sync_all()?;
    }

    rename_with_fallback(&temp, path)
}

/// Create a directory tree, restricting new directories to 0700 on Unix.
pub fn create_private_dir(path: &Path) -> io::Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }

    Ok(())
}

/// Restrict a file to owner read/write (Unix only).
pub fn restrict_permissions(path: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    #[cfg(not(unix))]
    let _ = path;

    Ok(())
}

/// Rename a file, with fallback for platforms where rename fails if the target exists.
///
/// If the rename ultimately fails, the temp file is cleaned up.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "atomic rename failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            )
        })?;
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}
