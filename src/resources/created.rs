//! Ordered log of the paths created during one run.
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Kind of filesystem object that was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatedKind {
    /// A real directory.
    Directory,
    /// A symbolic link.
    Symlink,
}

/// A single created path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedPath {
    /// Path of the new object.
    pub path: PathBuf,
    /// What was created there.
    pub kind: CreatedKind,
}

/// Append-only record of directories and symlinks created in a run.
///
/// Entries appear in creation order, so parents always precede their
/// children.  The log is for reporting; nothing reads it back to undo work.
///
/// # Examples
///
/// ```
/// use resource_links::resources::created::{CreatedKind, CreatedPaths};
///
/// let mut created = CreatedPaths::new();
/// created.record_dir("/htdocs");
/// created.record_link("/htdocs/++resource++foo");
/// assert_eq!(created.len(), 2);
/// assert_eq!(created.entries()[1].kind, CreatedKind::Symlink);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CreatedPaths {
    entries: Vec<CreatedPath>,
}

impl CreatedPaths {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly created directory.
    pub fn record_dir(&mut self, path: impl Into<PathBuf>) {
        self.push(path.into(), CreatedKind::Directory);
    }

    /// Record a newly created symlink.
    pub fn record_link(&mut self, path: impl Into<PathBuf>) {
        self.push(path.into(), CreatedKind::Symlink);
    }

    fn push(&mut self, path: PathBuf, kind: CreatedKind) {
        self.entries.push(CreatedPath { path, kind });
    }

    /// All entries in creation order.
    #[must_use]
    pub fn entries(&self) -> &[CreatedPath] {
        &self.entries
    }

    /// Created paths in creation order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|e| e.path.as_path())
    }

    /// Number of entries of the given kind.
    #[must_use]
    pub fn count(&self, kind: CreatedKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was created.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
