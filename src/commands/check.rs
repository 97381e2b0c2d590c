//! `check`: validate the configuration and print the plan.
use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::logging::Log;
use crate::recipe::Recipe;

use super::CommandSetup;

/// Run the check command: validate the configuration and show the plan
/// without touching the disk.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or validated.
pub fn run(global: &GlobalOpts, log: &dyn Log) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    for line in source_lines(&setup.config)
        .into_iter()
        .chain(plan_lines(&setup.recipe))
    {
        log.info(&line);
    }
    Ok(())
}

/// Where the configuration came from and what relative paths resolve against.
#[must_use]
pub fn source_lines(config: &Config) -> Vec<String> {
    vec![
        format!("config: {}", config.path.display()),
        format!("base directory: {}", config.base_dir.display()),
    ]
}

/// Describe the normalised options and every planned mapping, one per line.
#[must_use]
pub fn plan_lines(recipe: &Recipe) -> Vec<String> {
    let mut lines: Vec<String> = recipe
        .options()
        .iter()
        .map(|(key, value)| format!("{key} = {value}"))
        .collect();
    let root = recipe.document_root();
    lines.extend(recipe.mappings().map(|m| {
        format!(
            "[{}] {} -> {}",
            m.package,
            m.clone_path(root).display(),
            m.source.display()
        )
    }));
    lines
}
