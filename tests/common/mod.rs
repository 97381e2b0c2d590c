// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed buildout and a fluent builder so
// each integration test can set up source packages and a configuration
// file without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use resource_links::cli::GlobalOpts;
use resource_links::commands::CommandSetup;
use resource_links::config::DEFAULT_CONFIG_FILE;
use resource_links::logging::NullLog;

/// An isolated buildout backed by a [`tempfile::TempDir`].
///
/// Contains `resource-links.toml`, the source packages under `src/`, and
/// (after a run) the document root under `parts/htdocs`.
pub struct IntegrationTestContext {
    /// Temporary buildout directory.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Path to the buildout root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Path to the configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.root.path().join(DEFAULT_CONFIG_FILE)
    }

    /// Default document root, `parts/htdocs`.
    pub fn document_root(&self) -> PathBuf {
        self.root.path().join("parts").join("htdocs")
    }

    /// Global options pointing at this buildout's configuration file.
    pub fn global(&self) -> GlobalOpts {
        GlobalOpts {
            config: Some(self.config_path()),
            ..GlobalOpts::default()
        }
    }

    /// Load and validate the configuration with `global` overrides applied.
    pub fn setup_with(&self, global: &GlobalOpts) -> anyhow::Result<CommandSetup> {
        CommandSetup::init(global, &NullLog)
    }

    /// Load and validate the configuration file as written.
    pub fn setup(&self) -> CommandSetup {
        self.setup_with(&self.global()).expect("command setup")
    }

    /// Overwrite the configuration file.
    pub fn write_config(&self, content: &str) {
        std::fs::write(self.config_path(), content).expect("write config file");
    }

    /// List everything below the document root, one entry per line,
    /// relative to the buildout: `d path/` for directories and
    /// `l path -> target` for symlinks.
    pub fn document_tree(&self) -> String {
        let mut out = String::new();
        let root = self.document_root();
        if root.exists() {
            walk(self.root.path(), &root, &mut out);
        }
        out
    }
}

fn walk(base: &Path, dir: &Path, out: &mut String) {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .expect("read dir")
        .map(|e| e.expect("dir entry").path())
        .collect();
    entries.sort();
    for path in entries {
        let shown = path.strip_prefix(base).expect("below base").display().to_string();
        let meta = std::fs::symlink_metadata(&path).expect("metadata");
        if meta.file_type().is_symlink() {
            let target = std::fs::read_link(&path).expect("read link");
            let target = target
                .strip_prefix(base)
                .map_or_else(|_| target.display().to_string(), |t| format!("<root>/{}", t.display()));
            writeln!(out, "l {shown} -> {target}").expect("write");
        } else if meta.is_dir() {
            writeln!(out, "d {shown}/").expect("write");
            walk(base, &path, out);
        } else {
            writeln!(out, "f {shown}").expect("write");
        }
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
    options: Vec<(String, String)>,
    packages: Vec<String>,
}

impl TestContextBuilder {
    /// Begin building an empty buildout.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext {
                root: tempfile::tempdir().expect("create temp dir"),
            },
            options: Vec::new(),
            packages: Vec::new(),
        }
    }

    /// Set an entry of the `[options]` table.
    pub fn with_option(mut self, key: &str, value: &str) -> Self {
        self.options.push((key.to_string(), value.to_string()));
        self
    }

    /// Create a file with `content` at `rel`, relative to the buildout.
    pub fn with_file(self, rel: &str, content: &str) -> Self {
        let path = self.ctx.root.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create source parent");
        }
        std::fs::write(&path, content).expect("write source file");
        self
    }

    /// Declare a package rooted at `src/<name>` with one named resource.
    pub fn with_package(mut self, name: &str, resource: &str, rel_path: &str) -> Self {
        self.packages.push(format!(
            "[[packages]]\nname = \"{name}\"\npath = \"src/{name}\"\nresources = [{{ name = \"{resource}\", path = \"{rel_path}\" }}]\n"
        ));
        self
    }

    /// Write the configuration file and return the context.
    pub fn build(self) -> IntegrationTestContext {
        let mut config = String::from("[options]\n");
        for (key, value) in &self.options {
            writeln!(config, "{key} = \"{value}\"").expect("write");
        }
        for package in &self.packages {
            config.push('\n');
            config.push_str(package);
        }
        self.ctx.write_config(&config);
        self.ctx
    }
}

/// The standard fixture: a theme package with a nested static directory
/// and a script package with a single file resource.
pub fn theme_buildout() -> TestContextBuilder {
    TestContextBuilder::new()
        .with_file("src/my.theme/static/index.html", "<html/>")
        .with_file("src/my.theme/static/css/site.css", "body {}")
        .with_file("src/my.theme/static/img/logo.png", "png")
        .with_file("src/my.app/app.js", "main()")
        .with_package("my.theme", "my.theme", "static")
        .with_package("my.app", "my.app.js", "app.js")
}
