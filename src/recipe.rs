//! Link plan: turn validated options and declared packages into the
//! `++resource++` tree below the document root.
use std::path::{Path, PathBuf};

use crate::config::options::{
    self, DOCUMENT_ROOT, LINK_LEAVES, Options, PARTS_DIRECTORY, RELATIVE_LINKS, Ternary,
};
use crate::config::packages::Package;
use crate::error::{ConfigError, Origin, Result};
use crate::logging::Log;
use crate::paths;
use crate::resources::symlink::{create_dir, create_symlink, is_symlink, remove_symlink};
use crate::resources::{CreatedPaths, check_directory, check_symlink, symlink_clone};

/// Prefix of every top-level entry in the document root.
pub const RESOURCE_PREFIX: &str = "++resource++";

/// Name of the document root below the parts directory when not configured.
pub const DEFAULT_DOCUMENT_ROOT_NAME: &str = "htdocs";

/// How links are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkPolicy {
    /// Store link targets relative to the link's directory.
    pub relative_links: bool,
    /// Clone directories file by file; `None` means "auto".
    pub link_leaves: Option<bool>,
}

impl LinkPolicy {
    /// Read the policy from already validated options.
    ///
    /// # Errors
    ///
    /// Returns an error if either option holds text that was never validated.
    pub fn from_options(options: &Options) -> Result<Self> {
        let relative = options::ternary_bool(options.get(RELATIVE_LINKS).unwrap_or_default())?;
        let link_leaves = options::ternary_bool(options.get(LINK_LEAVES).unwrap_or_default())?;
        Ok(Self {
            relative_links: relative.unwrap_or(false),
            link_leaves,
        })
    }
}

/// One resource to be published: which package, where from, under what name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMapping<'a> {
    /// Contributing package.
    pub package: &'a str,
    /// Source file or directory.
    pub source: &'a Path,
    /// Resource name (without the `++resource++` prefix).
    pub name: &'a str,
}

impl ResourceMapping<'_> {
    /// Destination of this resource below `document_root`.
    #[must_use]
    pub fn clone_path(&self, document_root: &Path) -> PathBuf {
        document_root.join(format!("{RESOURCE_PREFIX}{}", self.name))
    }
}

/// Creates symbolic links to package resources below a document root.
#[derive(Debug, Clone)]
pub struct Recipe {
    options: Options,
    packages: Vec<Package>,
    document_root: PathBuf,
}

impl Recipe {
    /// Validate `options` and prepare a recipe for `packages`.
    ///
    /// `document-root` defaults to `<parts-directory>/htdocs`.  Tri-state
    /// options are normalised in place; `link-leaves = auto` is accepted
    /// syntactically but rejected as not implemented.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a missing parts directory (when no
    /// document root is given), a document root that is not a directory,
    /// or an invalid tri-state value.
    pub fn new(mut options: Options, packages: Vec<Package>) -> Result<Self> {
        let document_root = match options.get(DOCUMENT_ROOT) {
            Some(root) => paths::absolute(Path::new(root))?,
            None => {
                let parts = options
                    .get(PARTS_DIRECTORY)
                    .ok_or_else(|| ConfigError::MissingValue {
                        key: PARTS_DIRECTORY.to_string(),
                    })?;
                paths::absolute(&Path::new(parts).join(DEFAULT_DOCUMENT_ROOT_NAME))?
            }
        };
        options.set(DOCUMENT_ROOT, document_root.display().to_string());
        check_directory(&document_root, Some(&Origin::Key(DOCUMENT_ROOT.to_string())))?;

        options::check_ternary_value(
            LINK_LEAVES,
            &mut options,
            &[Ternary::Yes, Ternary::No, Ternary::Auto],
            &[Ternary::Yes, Ternary::No],
        )?;
        options::check_ternary_value(
            RELATIVE_LINKS,
            &mut options,
            &[Ternary::Yes, Ternary::No],
            &[Ternary::Yes, Ternary::No],
        )?;

        Ok(Self {
            options,
            packages,
            document_root,
        })
    }

    /// The normalised options.
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// The absolute document root.
    #[must_use]
    pub fn document_root(&self) -> &Path {
        &self.document_root
    }

    /// Every resource mapping, package by package in declaration order.
    pub fn mappings(&self) -> impl Iterator<Item = ResourceMapping<'_>> {
        self.packages.iter().flat_map(package_mappings)
    }

    /// Create the symbolic resource links according to the options.
    ///
    /// Returns the directories and symlinks created, in creation order.
    /// Running again with unchanged input creates nothing.  A failure stops
    /// the run; whatever was created before it stays on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if `link-leaves` is `auto`, a destination is occupied
    /// by the wrong kind of object, a resource cannot be cloned, or a
    /// filesystem call fails.
    pub fn install(&self, log: &dyn Log) -> Result<CreatedPaths> {
        let policy = LinkPolicy::from_options(&self.options)?;
        let Some(link_leaves) = policy.link_leaves else {
            return Err(ConfigError::NotImplemented {
                key: LINK_LEAVES.to_string(),
                value: Ternary::Auto.to_string(),
            }
            .into());
        };

        let mut created = CreatedPaths::new();
        let root_origin = Origin::Key(DOCUMENT_ROOT.to_string());
        if check_directory(&self.document_root, Some(&root_origin))? {
            create_dir(&self.document_root)?;
            created.record_dir(&self.document_root);
            log.debug(&format!("created {}", self.document_root.display()));
        }

        for pkg in &self.packages {
            let before = created.len();
            let origin = Origin::Package(pkg.name.clone());
            for mapping in package_mappings(pkg) {
                self.link_resource(&mapping, link_leaves, policy, &origin, &mut created, log)?;
            }
            log.info(&format!(
                "{}: {} resource(s), {} path(s) created",
                pkg.name,
                pkg.resources.len(),
                created.len() - before
            ));
        }

        Ok(created)
    }

    /// Same as [`install`](Self::install); the operation is idempotent.
    ///
    /// # Errors
    ///
    /// See [`install`](Self::install).
    pub fn update(&self, log: &dyn Log) -> Result<CreatedPaths> {
        self.install(log)
    }

    fn link_resource(
        &self,
        mapping: &ResourceMapping<'_>,
        link_leaves: bool,
        policy: LinkPolicy,
        origin: &Origin,
        created: &mut CreatedPaths,
        log: &dyn Log,
    ) -> Result<()> {
        let clone_path = mapping.clone_path(&self.document_root);

        if !mapping.source.is_dir() || !link_leaves {
            let target = if policy.relative_links {
                paths::relative(mapping.source, &self.document_root)?
            } else {
                paths::absolute(mapping.source)?
            };
            if check_symlink(&clone_path, &target, Some(origin))? {
                create_symlink(&target, &clone_path)?;
                log.debug(&format!(
                    "linked {} -> {}",
                    clone_path.display(),
                    target.display()
                ));
                created.record_link(clone_path);
            }
            return Ok(());
        }

        if is_symlink(&clone_path) {
            log.debug(&format!(
                "replacing single link {} with a per-file tree",
                clone_path.display()
            ));
            remove_symlink(&clone_path)?;
        }
        let before = created.len();
        symlink_clone(
            mapping.source,
            &clone_path,
            created,
            policy.relative_links,
            Some(origin),
        )?;
        for path in created.paths().skip(before) {
            log.debug(&format!("created {}", path.display()));
        }
        Ok(())
    }
}

/// The mappings contributed by one package, in declaration order.
fn package_mappings(pkg: &Package) -> impl Iterator<Item = ResourceMapping<'_>> {
    pkg.resource_dir_tuples()
        .map(move |(name, source)| ResourceMapping {
            package: &pkg.name,
            source,
            name,
        })
}
