#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
#![cfg(unix)]
//! Integration tests for the `install` and `update` commands.
//!
//! Each test builds a temporary buildout with source packages and a
//! configuration file, runs the link plan through [`CommandSetup`], and
//! inspects the resulting document root.

mod common;

use std::fs;
use std::path::{Path, PathBuf};

use common::{TestContextBuilder, theme_buildout};
use resource_links::cli::GlobalOpts;
use resource_links::commands::install::{self, Mode};
use resource_links::logging::NullLog;
use resource_links::resources::CreatedKind;

fn run(ctx: &common::IntegrationTestContext, mode: Mode) -> resource_links::resources::CreatedPaths {
    install::link(&ctx.setup(), mode, &NullLog).expect("link resources")
}

// ---------------------------------------------------------------------------
// Single links
// ---------------------------------------------------------------------------

/// Without `link-leaves`, a directory resource becomes one link and the log
/// holds exactly the document root and that link.
#[test]
fn single_link_per_resource() {
    let ctx = TestContextBuilder::new()
        .with_file("src/foo/index.html", "<html/>")
        .with_package("foo", "foo", ".")
        .build();

    let created = run(&ctx, Mode::Install);

    let link = ctx.document_root().join("++resource++foo");
    assert_eq!(created.len(), 2);
    assert_eq!(created.entries()[0].path, ctx.document_root());
    assert_eq!(created.entries()[0].kind, CreatedKind::Directory);
    assert_eq!(created.entries()[1].path, link);
    assert_eq!(created.entries()[1].kind, CreatedKind::Symlink);
    assert_eq!(
        fs::read_link(&link).unwrap(),
        ctx.root_path().join("src/foo")
    );
    assert_eq!(fs::read_to_string(link.join("index.html")).unwrap(), "<html/>");
}

/// `relative-links` stores the target relative to the document root.
#[test]
fn relative_single_link_resolves() {
    let ctx = theme_buildout().with_option("relative-links", "yes").build();

    run(&ctx, Mode::Install);

    let link = ctx.document_root().join("++resource++my.app.js");
    assert_eq!(
        fs::read_link(&link).unwrap(),
        PathBuf::from("../../src/my.app/app.js")
    );
    assert_eq!(fs::read_to_string(&link).unwrap(), "main()");
}

// ---------------------------------------------------------------------------
// Link leaves
// ---------------------------------------------------------------------------

/// With `link-leaves`, directories become real directories and only files
/// are links; file resources stay single links.
#[test]
fn link_leaves_tree() {
    let ctx = theme_buildout().with_option("link-leaves", "yes").build();

    let created = run(&ctx, Mode::Install);

    assert_eq!(created.count(CreatedKind::Directory), 4);
    assert_eq!(created.count(CreatedKind::Symlink), 4);
    let theme = ctx.document_root().join("++resource++my.theme");
    assert!(!fs::symlink_metadata(&theme).unwrap().file_type().is_symlink());
    assert!(fs::symlink_metadata(theme.join("css/site.css")).unwrap().file_type().is_symlink());

    let tree = ctx.document_tree();
    insta::assert_snapshot!("link_leaves_tree", tree.trim_end());
}

/// Relative per-file links are relative to their own directory and resolve
/// to the sources.
#[test]
fn relative_link_leaves_resolve() {
    let ctx = theme_buildout()
        .with_option("link-leaves", "on")
        .with_option("relative-links", "true")
        .build();

    run(&ctx, Mode::Install);

    let css = ctx.document_root().join("++resource++my.theme/css/site.css");
    assert_eq!(
        fs::read_link(&css).unwrap(),
        PathBuf::from("../../../../src/my.theme/static/css/site.css")
    );
    assert_eq!(fs::read_to_string(&css).unwrap(), "body {}");
}

/// Turning `link-leaves` on replaces an earlier single link with a tree.
#[test]
fn enabling_link_leaves_replaces_single_link() {
    let ctx = theme_buildout().build();
    run(&ctx, Mode::Install);
    let theme = ctx.document_root().join("++resource++my.theme");
    assert!(fs::symlink_metadata(&theme).unwrap().file_type().is_symlink());

    let global = GlobalOpts {
        link_leaves: Some("yes".to_string()),
        ..ctx.global()
    };
    let setup = ctx.setup_with(&global).unwrap();
    let created = install::link(&setup, Mode::Update, &NullLog).unwrap();

    assert!(fs::symlink_metadata(&theme).unwrap().is_dir());
    assert_eq!(created.entries()[0].path, theme);
    assert_eq!(
        fs::read_to_string(theme.join("img/logo.png")).unwrap(),
        "png"
    );
    // Sources are untouched by the removal of the old link.
    assert!(ctx.root_path().join("src/my.theme/static/index.html").is_file());
}

// ---------------------------------------------------------------------------
// Idempotence
// ---------------------------------------------------------------------------

/// A second run with unchanged input creates nothing.
#[test]
fn update_after_install_creates_nothing() {
    let ctx = theme_buildout().with_option("link-leaves", "yes").build();
    let first = run(&ctx, Mode::Install);
    let tree = ctx.document_tree();

    let second = run(&ctx, Mode::Update);

    assert!(!first.is_empty());
    assert!(second.is_empty());
    assert_eq!(ctx.document_tree(), tree);
    assert_eq!(install::summary(&second), "everything up to date");
}

/// New source files show up on update; existing links are left alone.
#[test]
fn update_picks_up_new_files() {
    let ctx = theme_buildout().with_option("link-leaves", "yes").build();
    run(&ctx, Mode::Install);

    let new_file = ctx.root_path().join("src/my.theme/static/css/print.css");
    fs::write(&new_file, "@media print {}").unwrap();
    let created = run(&ctx, Mode::Update);

    assert_eq!(created.len(), 1);
    assert_eq!(
        created.entries()[0].path,
        ctx.document_root().join("++resource++my.theme/css/print.css")
    );
}

/// Switching to relative links rewrites stale absolute links in place.
#[test]
fn switching_to_relative_links_heals_stale_links() {
    let ctx = theme_buildout().build();
    run(&ctx, Mode::Install);

    let global = GlobalOpts {
        relative_links: Some("yes".to_string()),
        ..ctx.global()
    };
    let setup = ctx.setup_with(&global).unwrap();
    let created = install::link(&setup, Mode::Update, &NullLog).unwrap();

    assert_eq!(created.count(CreatedKind::Symlink), 2);
    assert!(
        fs::read_link(ctx.document_root().join("++resource++my.theme"))
            .unwrap()
            .is_relative()
    );
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

/// A disallowed tri-state value names the key and the value.
#[test]
fn disallowed_link_leaves_value() {
    let ctx = theme_buildout().with_option("link-leaves", "sometimes").build();
    let err = ctx.setup_with(&ctx.global()).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("link-leaves"), "{msg}");
    assert!(msg.contains("sometimes"), "{msg}");
    assert!(!ctx.document_root().exists());
}

/// `auto` is recognised but not implemented.
#[test]
fn auto_link_leaves_not_implemented() {
    let ctx = theme_buildout().with_option("link-leaves", "auto").build();
    let err = ctx.setup_with(&ctx.global()).unwrap_err();
    assert!(format!("{err:#}").contains("not implemented yet"));
}

/// A regular file at a link location is a conflict naming the package.
#[test]
fn file_in_the_way_of_a_link() {
    let ctx = theme_buildout().build();
    let blocker = ctx.document_root().join("++resource++my.theme");
    fs::create_dir_all(ctx.document_root()).unwrap();
    fs::write(&blocker, "not a link").unwrap();

    let err = install::link(&ctx.setup(), Mode::Install, &NullLog).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("Error processing package 'my.theme'"), "{msg}");
    assert!(msg.contains("is not a symbolic link"), "{msg}");
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "not a link");
}

/// A document root occupied by a file is rejected before anything is linked.
#[test]
fn document_root_is_a_file() {
    let ctx = theme_buildout().build();
    fs::create_dir_all(ctx.root_path().join("parts")).unwrap();
    fs::write(ctx.document_root(), "").unwrap();

    let err = ctx.setup_with(&ctx.global()).unwrap_err();
    assert!(format!("{err:#}").contains("is not a directory"));
}

/// An explicit document root from the command line wins over the default.
#[test]
fn document_root_override() {
    let ctx = theme_buildout().build();
    let root = ctx.root_path().join("var/www");
    let global = GlobalOpts {
        document_root: Some(root.clone()),
        ..ctx.global()
    };
    let setup = ctx.setup_with(&global).unwrap();
    install::link(&setup, Mode::Install, &NullLog).unwrap();

    assert!(root.join("++resource++my.theme").exists());
    assert!(!ctx.document_root().exists());
}

// ---------------------------------------------------------------------------
// JSON output
// ---------------------------------------------------------------------------

/// `--json` output lists every created path with its kind, in order.
#[test]
fn json_lists_created_paths() {
    let ctx = theme_buildout().build();
    let created = run(&ctx, Mode::Install);

    let mut buf = Vec::new();
    install::write_json(&mut buf, &created).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    let entries = value.as_array().unwrap();

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["kind"], "directory");
    assert_eq!(
        Path::new(entries[1]["path"].as_str().unwrap()),
        ctx.document_root().join("++resource++my.theme")
    );
    assert_eq!(entries[2]["kind"], "symlink");
}

/// Run the binary against `ctx` with `args` and return its output.
fn run_binary(
    ctx: &common::IntegrationTestContext,
    args: &[&str],
    rust_log: Option<&str>,
) -> std::process::Output {
    let mut cmd = std::process::Command::new(env!("CARGO_BIN_EXE_resource-links"));
    cmd.arg("--config").arg(ctx.config_path()).args(args);
    cmd.env_remove("RESOURCE_LINKS_CONFIG");
    match rust_log {
        Some(filter) => cmd.env("RUST_LOG", filter),
        None => cmd.env_remove("RUST_LOG"),
    };
    cmd.output().expect("run resource-links")
}

/// With `--json`, stdout holds only the JSON document even when verbose
/// logging is on; log lines go to stderr.
#[test]
fn json_stdout_stays_clean_when_verbose() {
    let ctx = theme_buildout().build();

    let out = run_binary(&ctx, &["-v", "install", "--json"], None);

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let value: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout is a single JSON document");
    assert_eq!(value.as_array().unwrap().len(), 3);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Loading configuration"), "{stderr}");
    assert!(stderr.contains("linked "), "{stderr}");
}

/// `RUST_LOG` cannot push log lines into the JSON output either.
#[test]
fn json_stdout_stays_clean_with_rust_log() {
    let ctx = theme_buildout().build();

    let out = run_binary(&ctx, &["update", "--json"], Some("debug"));

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let value: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout is a single JSON document");
    assert!(value.is_array());
}

/// Without `--json`, informational output still goes to stdout.
#[test]
fn plain_install_logs_to_stdout() {
    let ctx = theme_buildout().build();

    let out = run_binary(&ctx, &["install"], None);

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Loading configuration"), "{stdout}");
    assert!(serde_json::from_slice::<serde_json::Value>(&out.stdout).is_err());
}
