//! Mirror a directory tree as a tree of per-file symlinks.
use std::path::{Path, PathBuf};

use super::created::CreatedPaths;
use super::state::{check_directory, check_symlink};
use super::symlink::{create_dir, create_symlink};
use crate::error::{Error, Origin, Result, ValidationError};
use crate::paths;

/// How leaf link targets are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    /// Absolute, normalised path of the source file.
    Absolute,
    /// Source path relative to the directory holding the link.
    Relative,
}

impl Strategy {
    fn target(self, source: &Path, link_dir: &Path) -> Result<PathBuf> {
        match self {
            Self::Absolute => paths::absolute(source),
            Self::Relative => paths::relative(source, link_dir),
        }
    }
}

/// Create a symlink clone at `clone_root` of the tree rooted in `source_root`.
///
/// - `clone_root` is created if it doesn't exist;
/// - every non-directory entry of `source_root` gets a symlink of the same
///   name in `clone_root`;
/// - every subdirectory is cloned recursively into `clone_root/<name>`.
///
/// With `relative`, each link target is relative to the directory the link
/// lives in, so every level of the mirror can be moved together with its
/// sources.  Entries are visited in file-name order.  Everything created is
/// appended to `created`.
///
/// # Errors
///
/// Returns [`ValidationError::SourceNotDirectory`] if `source_root` is not a
/// directory, a configuration error on a destination type conflict, or an
/// I/O error.
pub fn symlink_clone(
    source_root: &Path,
    clone_root: &Path,
    created: &mut CreatedPaths,
    relative: bool,
    origin: Option<&Origin>,
) -> Result<()> {
    let strategy = if relative {
        Strategy::Relative
    } else {
        Strategy::Absolute
    };
    clone_tree(source_root, clone_root, created, strategy, origin)
}

fn clone_tree(
    source_root: &Path,
    clone_root: &Path,
    created: &mut CreatedPaths,
    strategy: Strategy,
    origin: Option<&Origin>,
) -> Result<()> {
    if !source_root.is_dir() {
        return Err(ValidationError::SourceNotDirectory {
            path: source_root.to_path_buf(),
        }
        .into());
    }
    if check_directory(clone_root, origin)? {
        create_dir(clone_root)?;
        created.record_dir(clone_root);
    }

    for name in sorted_entries(source_root)? {
        let source = source_root.join(&name);
        let clone = clone_root.join(&name);
        if source.is_dir() {
            clone_tree(&source, &clone, created, strategy, origin)?;
        } else {
            let target = strategy.target(&source, clone_root)?;
            if check_symlink(&clone, &target, origin)? {
                create_symlink(&target, &clone)?;
                created.record_link(clone);
            }
        }
    }
    Ok(())
}

/// Names of the direct children of `dir`, sorted.
fn sorted_entries(dir: &Path) -> Result<Vec<std::ffi::OsString>> {
    let mut names = std::fs::read_dir(dir)
        .map_err(|e| Error::io("read directory", dir, e))?
        .map(|entry| {
            entry
                .map(|e| e.file_name())
                .map_err(|e| Error::io("read directory entry", dir, e))
        })
        .collect::<Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}
