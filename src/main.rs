//! `resource-links` command-line entry point.
use anyhow::Result;
use clap::Parser;

use resource_links::cli::{Cli, Command};
use resource_links::commands::{self, install::Mode};
use resource_links::logging::{self, ConsoleTarget, Logger};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    if matches!(args.command, Command::Version) {
        println!("resource-links {}", logging::version());
        return Ok(());
    }

    let console = if args.command.is_json() {
        ConsoleTarget::Stderr
    } else {
        ConsoleTarget::Split
    };
    logging::init_subscriber(args.verbose, console, args.global.log_file.as_deref())?;
    let log = Logger;

    match args.command {
        Command::Install(ref opts) => {
            commands::install::run(&args.global, opts, Mode::Install, &log)
        }
        Command::Update(ref opts) => {
            commands::install::run(&args.global, opts, Mode::Update, &log)
        }
        Command::Check => commands::check::run(&args.global, &log),
        Command::Version => Ok(()),
    }
}
