//! Configuration loading: link options and the declared source packages.
pub mod options;
pub mod packages;
pub mod toml_loader;

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use options::{DOCUMENT_ROOT, Options, PARTS_DIRECTORY};
use packages::{Package, PackageSection};

/// Default configuration file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "resource-links.toml";

/// Parts directory used when the configuration names none.
pub const DEFAULT_PARTS_DIRECTORY: &str = "parts";

/// On-disk shape of the configuration file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    options: Options,
    #[serde(default)]
    packages: Vec<PackageSection>,
}

/// Everything loaded for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// The configuration file this was loaded from.
    pub path: PathBuf,
    /// Directory that relative paths in the file are resolved against.
    pub base_dir: PathBuf,
    /// Raw option values (path options already resolved against `base_dir`).
    pub options: Options,
    /// Declared packages, in file order.
    pub packages: Vec<Package>,
}

impl Config {
    /// Load the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml_loader::load_config(path)?;
        Ok(Self::from_file(path, file))
    }

    /// Parse configuration `content` as if it had been read from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if `content` is not a valid configuration.
    pub fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml_loader::parse_config(path, content)?;
        Ok(Self::from_file(path, file))
    }

    fn from_file(path: &Path, file: ConfigFile) -> Self {
        let base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        let mut options = file.options;
        if options.get(PARTS_DIRECTORY).is_none() {
            options.set(
                PARTS_DIRECTORY,
                base_dir.join(DEFAULT_PARTS_DIRECTORY).display().to_string(),
            );
        }
        for key in [PARTS_DIRECTORY, DOCUMENT_ROOT] {
            if let Some(value) = options.get(key)
                && Path::new(value).is_relative()
            {
                let resolved = base_dir.join(value).display().to_string();
                options.set(key, resolved);
            }
        }

        let packages = file
            .packages
            .into_iter()
            .map(|p| p.resolve(&base_dir))
            .collect();

        Self {
            path: path.to_path_buf(),
            base_dir,
            options,
            packages,
        }
    }

    /// Total number of declared resources across all packages.
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.packages.iter().map(|p| p.resources.len()).sum()
    }
}
