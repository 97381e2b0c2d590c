//! Lexical path helpers: absolute normalisation and relative targets.
//!
//! Link targets are computed without touching the filesystem, so a symlinked
//! source directory keeps its own name in the target instead of being
//! resolved to wherever it points.
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Resolve `.` and `..` components without consulting the filesystem.
///
/// `..` at the root stays at the root; `..` at the start of a relative path
/// is kept.
///
/// # Examples
///
/// ```
/// use resource_links::paths::normalize;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
/// assert_eq!(normalize(Path::new("/../x")), PathBuf::from("/x"));
/// ```
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                result.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => match result.components().next_back() {
                Some(Component::Normal(_)) => {
                    result.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                Some(Component::ParentDir | Component::CurDir) | None => {
                    result.push(component);
                }
            },
        }
    }
    if result.as_os_str().is_empty() {
        result.push(Component::CurDir);
    }
    result
}

/// Make `path` absolute against the current directory and normalise it.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(normalize(path));
    }
    let cwd = std::env::current_dir().map_err(|e| Error::io("read current directory", path, e))?;
    Ok(normalize(&cwd.join(path)))
}

/// Compute `path` relative to the directory `start`.
///
/// Both paths are made absolute first, so the result is valid as a symlink
/// target for a link that lives directly inside `start`.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn relative(path: &Path, start: &Path) -> Result<PathBuf> {
    Ok(relative_lexical(&absolute(path)?, &absolute(start)?))
}

/// Relative path between two absolute, normalised paths.
fn relative_lexical(path: &Path, start: &Path) -> PathBuf {
    let path_parts: Vec<Component<'_>> = path.components().collect();
    let start_parts: Vec<Component<'_>> = start.components().collect();
    let common = path_parts
        .iter()
        .zip(&start_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut result = PathBuf::new();
    for _ in common..start_parts.len() {
        result.push(Component::ParentDir);
    }
    for part in path_parts.iter().skip(common) {
        result.push(part);
    }
    if result.as_os_str().is_empty() {
        result.push(Component::CurDir);
    }
    result
}
