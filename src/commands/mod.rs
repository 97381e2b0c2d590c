//! Subcommand implementations.
pub mod check;
pub mod install;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::options::{DOCUMENT_ROOT, LINK_LEAVES, RELATIVE_LINKS};
use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::logging::Log;
use crate::recipe::Recipe;

/// Shared state produced by the common command setup sequence.
///
/// Locates and loads the configuration file, applies command-line
/// overrides, and validates the result into a [`Recipe`].
#[derive(Debug)]
pub struct CommandSetup {
    /// The loaded configuration, overrides applied.
    pub config: Config,
    /// The validated link plan.
    pub recipe: Recipe,
}

impl CommandSetup {
    /// Load the configuration and build the recipe.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed,
    /// or if the resulting options fail validation.
    pub fn init(global: &GlobalOpts, log: &dyn Log) -> Result<Self> {
        let path = resolve_config_path(global)?;

        log.stage("Loading configuration");
        let mut config = Config::load(&path)
            .with_context(|| format!("loading configuration from {}", path.display()))?;
        apply_overrides(&mut config, global);
        log.info(&format!(
            "loaded {} package(s), {} resource(s)",
            config.packages.len(),
            config.resource_count()
        ));
        for (key, value) in config.options.iter() {
            log.debug(&format!("{key} = {value}"));
        }

        log.stage("Validating options");
        let recipe = Recipe::new(config.options.clone(), config.packages.clone())
            .context("invalid options")?;
        log.info(&format!("document root: {}", recipe.document_root().display()));

        Ok(Self { config, recipe })
    }
}

/// Resolve the configuration file from `--config` (or its environment
/// variable), falling back to [`DEFAULT_CONFIG_FILE`] in the current
/// directory.
///
/// # Errors
///
/// Returns an error if no path was given and the default file is absent.
pub fn resolve_config_path(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(ref path) = global.config {
        return Ok(path.clone());
    }

    let default = Path::new(DEFAULT_CONFIG_FILE);
    if default.is_file() {
        return Ok(default.to_path_buf());
    }

    anyhow::bail!(
        "no {DEFAULT_CONFIG_FILE} in the current directory. Use --config or set RESOURCE_LINKS_CONFIG"
    );
}

/// Apply command-line option overrides on top of the file's options.
pub fn apply_overrides(config: &mut Config, global: &GlobalOpts) {
    if let Some(ref root) = global.document_root {
        config
            .options
            .set(DOCUMENT_ROOT, root.display().to_string());
    }
    if let Some(ref value) = global.link_leaves {
        config.options.set(LINK_LEAVES, value.clone());
    }
    if let Some(ref value) = global.relative_links {
        config.options.set(RELATIVE_LINKS, value.clone());
    }
}
