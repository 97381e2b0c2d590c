//! Source packages and the resource directories they contribute.
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// A source package contributing one or more resource directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Package identifier, e.g. `my.theme`.
    pub name: String,
    /// Declared resources, in declaration order.
    pub resources: Vec<Resource>,
}

/// One resource directory (or file) of a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Resource name; the link is created as `++resource++<name>`.
    pub name: String,
    /// Source path of the resource, already resolved against the package.
    pub path: PathBuf,
}

impl Package {
    /// Create a package with no resources.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resources: Vec::new(),
        }
    }

    /// Add a resource (builder style).
    #[must_use]
    pub fn with_resource(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.resources.push(Resource {
            name: name.into(),
            path: path.into(),
        });
        self
    }

    /// The `(resource name, source path)` pairs this package contributes.
    pub fn resource_dir_tuples(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.resources
            .iter()
            .map(|r| (r.name.as_str(), r.path.as_path()))
    }
}

/// A single entry in a package's `resources` list: either a plain path
/// (the resource is named after the package) or an explicit
/// `{ name, path }` pair.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResourceEntry {
    /// Plain string: `"static"`.
    Simple(String),
    /// Structured: `{ name = "my.theme.images", path = "img" }`.
    Named { name: String, path: String },
}

/// A `[[packages]]` table as written in the configuration file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct PackageSection {
    name: String,
    path: Option<String>,
    #[serde(default)]
    resources: Vec<ResourceEntry>,
}

impl PackageSection {
    /// Resolve relative paths against `base` and produce a [`Package`].
    ///
    /// The package `path` is resolved against `base`; resource paths are
    /// resolved against the package path (or `base` when it has none).
    pub(super) fn resolve(self, base: &Path) -> Package {
        let package_root = self
            .path
            .as_deref()
            .map_or_else(|| base.to_path_buf(), |p| base.join(p));

        let resources = self
            .resources
            .into_iter()
            .map(|entry| match entry {
                ResourceEntry::Simple(path) => Resource {
                    name: self.name.clone(),
                    path: package_root.join(path),
                },
                ResourceEntry::Named { name, path } => Resource {
                    name,
                    path: package_root.join(path),
                },
            })
            .collect();

        Package {
            name: self.name,
            resources,
        }
    }
}
