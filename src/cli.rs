//! Command-line interface definition.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point.
#[derive(Parser, Debug)]
#[command(
    name = "resource-links",
    about = "Publish package resources as ++resource++ symlinks below a document root",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Shared options.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Configuration file (default: ./resource-links.toml)
    #[arg(short, long, global = true, env = "RESOURCE_LINKS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the document root
    #[arg(long, global = true)]
    pub document_root: Option<PathBuf>,

    /// Override link-leaves (yes, no, auto)
    #[arg(long, global = true)]
    pub link_leaves: Option<String>,

    /// Override relative-links (yes, no)
    #[arg(long, global = true)]
    pub relative_links: Option<String>,

    /// Also write a plain-text log to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the resource links
    Install(InstallOpts),
    /// Bring existing resource links up to date
    Update(InstallOpts),
    /// Validate the configuration and show the planned links
    Check,
    /// Print version information
    Version,
}

impl Command {
    /// Whether the command prints machine-readable output on stdout.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self, Self::Install(opts) | Self::Update(opts) if opts.json)
    }
}

/// Options for the `install` and `update` subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct InstallOpts {
    /// Print the created paths as JSON on stdout
    #[arg(long)]
    pub json: bool,
}
