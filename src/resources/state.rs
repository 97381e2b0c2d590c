//! Idempotent state checks for destination directories and symlinks.
//!
//! Each `check_*` function answers "must this be (re)created?" and, where the
//! answer involves a stale symlink, removes it so the caller can simply
//! create the object afresh.  A destination occupied by the wrong kind of
//! object is a configuration error; it is never overwritten.
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::symlink::remove_symlink;
use crate::error::{ConfigError, Error, Origin, Result};

/// Observed state of a destination path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathState {
    /// Nothing exists at the path.
    Missing,
    /// A directory, or a symlink resolving to one.
    Directory,
    /// A symbolic link that does not resolve to a directory.
    Symlink {
        /// The link's stored target.
        current: PathBuf,
    },
    /// Any other object (regular file, device, …).
    Other,
}

/// State of a path where a symlink to a particular target is wanted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    /// Nothing exists at the path.
    Missing,
    /// A symlink with the desired target.
    Correct,
    /// A symlink with some other target.
    Stale {
        /// The target it currently has.
        current: PathBuf,
    },
    /// A non-symlink object occupies the path.
    Conflict,
}

/// Classify what currently exists at `path`.
///
/// # Errors
///
/// Returns an error if the path's metadata cannot be read for a reason other
/// than it not existing.
pub fn inspect(path: &Path) -> Result<PathState> {
    let meta = match path.symlink_metadata() {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(PathState::Missing),
        Err(e) => return Err(Error::io("inspect", path, e)),
    };
    if path.is_dir() {
        return Ok(PathState::Directory);
    }
    if meta.file_type().is_symlink() {
        let current = std::fs::read_link(path).map_err(|e| Error::io("read symlink", path, e))?;
        return Ok(PathState::Symlink { current });
    }
    Ok(PathState::Other)
}

/// Compare the object at `path` with a symlink to `target`, without mutating.
///
/// # Errors
///
/// Returns an error if the path cannot be inspected.
pub fn link_state(path: &Path, target: &Path) -> Result<LinkState> {
    let meta = match path.symlink_metadata() {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LinkState::Missing),
        Err(e) => return Err(Error::io("inspect", path, e)),
    };
    if !meta.file_type().is_symlink() {
        return Ok(LinkState::Conflict);
    }
    let current = std::fs::read_link(path).map_err(|e| Error::io("read symlink", path, e))?;
    if current == target {
        Ok(LinkState::Correct)
    } else {
        Ok(LinkState::Stale { current })
    }
}

/// Check that `path` is, or can become, a directory.
///
/// Returns `true` if the directory needs to be created and `false` if it
/// already exists.
///
/// # Errors
///
/// Returns [`ConfigError::NotADirectory`] (prefixed with `origin`) if the
/// path exists as anything other than a directory.
pub fn check_directory(path: &Path, origin: Option<&Origin>) -> Result<bool> {
    match inspect(path)? {
        PathState::Missing => Ok(true),
        PathState::Directory => Ok(false),
        PathState::Symlink { .. } | PathState::Other => Err(ConfigError::NotADirectory {
            origin: origin.cloned(),
            path: path.to_path_buf(),
        }
        .into()),
    }
}

/// Check the symlink `path` against the desired `target`.
///
/// Returns `true` if the symlink needs to be (re)created.  A symlink with a
/// different target is removed first.  Returns `false` if the link already
/// points at `target`; nothing is touched in that case.
///
/// # Errors
///
/// Returns [`ConfigError::NotASymlink`] if a non-symlink object occupies
/// `path`, or an I/O error if a stale link cannot be removed.
pub fn check_symlink(path: &Path, target: &Path, origin: Option<&Origin>) -> Result<bool> {
    match link_state(path, target)? {
        LinkState::Missing => Ok(true),
        LinkState::Correct => Ok(false),
        LinkState::Stale { .. } => {
            remove_symlink(path)?;
            Ok(true)
        }
        LinkState::Conflict => Err(ConfigError::NotASymlink {
            origin: origin.cloned(),
            target: target.to_path_buf(),
            path: path.to_path_buf(),
        }
        .into()),
    }
}
