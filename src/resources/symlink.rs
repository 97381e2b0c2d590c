//! Low-level symlink and directory mutations.
use std::path::Path;

use crate::error::{Error, Result};

/// Create a symlink at `link` pointing to `target`.
///
/// `target` is stored verbatim, so a relative target is interpreted relative
/// to the directory containing `link`.
///
/// # Errors
///
/// Returns an error if the link cannot be created, or on platforms without
/// native symbolic links.
#[cfg(unix)]
pub fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    std::os::unix::fs::symlink(target, link).map_err(|e| Error::io("create symlink", link, e))
}

/// Create a symlink at `link` pointing to `target`.
///
/// Symbolic links are only created on unix platforms.
///
/// # Errors
///
/// Always returns an [`std::io::ErrorKind::Unsupported`] error.
#[cfg(not(unix))]
pub fn create_symlink(_target: &Path, link: &Path) -> Result<()> {
    Err(Error::io(
        "create symlink",
        link,
        std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "symbolic links are only supported on unix platforms",
        ),
    ))
}

/// Remove the symlink at `path` without touching what it points to.
///
/// # Errors
///
/// Returns an error if `path` cannot be removed.
pub fn remove_symlink(path: &Path) -> Result<()> {
    std::fs::remove_file(path).map_err(|e| Error::io("remove symlink", path, e))
}

/// Create the directory `path` and any missing ancestors.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| Error::io("create directory", path, e))
}

/// Whether `path` itself is a symbolic link (dangling or not).
#[must_use]
pub fn is_symlink(path: &Path) -> bool {
    path.symlink_metadata()
        .is_ok_and(|meta| meta.file_type().is_symlink())
}
