//! `install` and `update`: create the planned links and report them.
use anyhow::{Context as _, Result};

use crate::cli::{GlobalOpts, InstallOpts};
use crate::logging::Log;
use crate::resources::{CreatedKind, CreatedPaths};

use super::CommandSetup;

/// Which of the two equivalent entry points was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// First-time installation.
    Install,
    /// Re-run after the configuration or the sources changed.
    Update,
}

impl Mode {
    const fn verb(self) -> &'static str {
        match self {
            Self::Install => "Installing",
            Self::Update => "Updating",
        }
    }
}

/// Run the install or update command.
///
/// # Errors
///
/// Returns an error if configuration loading, option validation, or any
/// filesystem step fails.
pub fn run(global: &GlobalOpts, opts: &InstallOpts, mode: Mode, log: &dyn Log) -> Result<()> {
    log.info(&format!("resource-links {}", crate::logging::version()));

    let setup = CommandSetup::init(global, log)?;
    let created = link(&setup, mode, log)?;

    if opts.json {
        let mut stdout = std::io::stdout().lock();
        write_json(&mut stdout, &created)?;
    }
    Ok(())
}

/// Create the links planned by `setup` and log a summary.
///
/// # Errors
///
/// Returns an error if the recipe fails.
pub fn link(setup: &CommandSetup, mode: Mode, log: &dyn Log) -> Result<CreatedPaths> {
    log.stage(&format!(
        "{} resources into {}",
        mode.verb(),
        setup.recipe.document_root().display()
    ));

    let created = match mode {
        Mode::Install => setup.recipe.install(log),
        Mode::Update => setup.recipe.update(log),
    }
    .context("linking resources")?;

    log.info(&summary(&created));
    Ok(created)
}

/// One-line summary of a run.
#[must_use]
pub fn summary(created: &CreatedPaths) -> String {
    if created.is_empty() {
        return "everything up to date".to_string();
    }
    format!(
        "created {} director{} and {} symlink{}",
        created.count(CreatedKind::Directory),
        if created.count(CreatedKind::Directory) == 1 {
            "y"
        } else {
            "ies"
        },
        created.count(CreatedKind::Symlink),
        if created.count(CreatedKind::Symlink) == 1 {
            ""
        } else {
            "s"
        },
    )
}

/// Write the created-path log as pretty JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if serialisation or writing fails.
pub fn write_json(out: &mut dyn std::io::Write, created: &CreatedPaths) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, created).context("serialising created paths")?;
    writeln!(out)?;
    Ok(())
}
