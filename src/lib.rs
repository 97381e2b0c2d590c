//! Publish package resources below a web document root.
//!
//! Every declared resource becomes a `++resource++<name>` entry in the
//! document root: either a single symbolic link to the source, or (with
//! `link-leaves`) a tree of real directories whose files are individual
//! links.  All operations are idempotent, so a second run with unchanged
//! input creates nothing.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: load the TOML file and validate tri-state options
//! - **[`resources`]**: idempotent filesystem checks, links and tree clones
//! - **[`recipe`]**: the link plan tying options and packages together
//! - **[`commands`]**: top-level subcommand orchestration (`install`, `update`, `check`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod paths;
pub mod recipe;
pub mod resources;
