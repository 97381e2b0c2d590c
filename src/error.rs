//! Domain-specific error types for the resource link engine.
//!
//! Library code returns the typed errors below; command handlers at the CLI
//! boundary convert them to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! Error
//! ├── Config(ConfigError)         : option values, wrong object types, config file
//! ├── Validation(ValidationError) : caller contract violations
//! └── Io { op, path, source }     : a filesystem call failed
//! ```

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias for results carrying the crate [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type for the resource link engine.
#[derive(Error, Debug)]
pub enum Error {
    /// User-facing configuration problem; aborts the run.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Caller passed input that violates an API contract.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A filesystem operation failed.
    #[error("{op} {}: {source}", path.display())]
    Io {
        /// Short name of the operation (e.g. `"create symlink"`).
        op: &'static str,
        /// Path the operation was applied to.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl Error {
    /// Wrap an I/O error with the operation and path it belongs to.
    #[must_use]
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

/// What a destination path is being checked on behalf of.
///
/// Used to prefix conflict messages so they can be diagnosed without
/// re-running with extra verbosity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// An option key, e.g. `document-root`.
    Key(String),
    /// A source package being processed.
    Package(String),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "{key}: "),
            Self::Package(pkg) => write!(f, "Error processing package '{pkg}': "),
        }
    }
}

/// Render an optional [`Origin`] as a message prefix.
fn prefix(origin: Option<&Origin>) -> String {
    origin.map(ToString::to_string).unwrap_or_default()
}

/// User-facing configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required option is empty and has no default.
    #[error("'{key}': a value is required!")]
    MissingValue {
        /// Option key.
        key: String,
    },

    /// The value is malformed or not permitted for this key.
    #[error("'{key}': value '{value}' is not allowed.")]
    NotAllowed {
        /// Option key.
        key: String,
        /// Raw value as given.
        value: String,
    },

    /// The value is accepted syntactically but the feature does not exist yet.
    #[error("'{key}': Sorry, '{value}' is not implemented yet.")]
    NotImplemented {
        /// Option key.
        key: String,
        /// Raw value as given.
        value: String,
    },

    /// A path that must be a directory exists as something else.
    #[error("{}'{}' exists but is not a directory!", prefix(origin.as_ref()), path.display())]
    NotADirectory {
        /// Option key or package the check was made for.
        origin: Option<Origin>,
        /// Offending path.
        path: PathBuf,
    },

    /// A path where a symlink belongs exists as a non-symlink object.
    #[error(
        "{}Error creating symbolic link to '{}': '{}' exists but is not a symbolic link!",
        prefix(origin.as_ref()),
        target.display(),
        path.display()
    )]
    NotASymlink {
        /// Package the link was created for.
        origin: Option<Origin>,
        /// Desired link target.
        target: PathBuf,
        /// Offending path.
        path: PathBuf,
    },

    /// The configuration file is not valid TOML or has the wrong shape.
    #[error("Invalid configuration in {file}: {message}")]
    InvalidSyntax {
        /// Path of the configuration file.
        file: String,
        /// Parser message.
        message: String,
    },

    /// The configuration file could not be read.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Contract violations by the caller.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The root of a tree clone is not a directory.
    #[error("original '{}' is not a directory", path.display())]
    SourceNotDirectory {
        /// The offending source root.
        path: PathBuf,
    },

    /// Text passed to `ternary_bool` was never validated.
    #[error("Boolean value or 'auto' expected; got '{value}'")]
    InvalidTernary {
        /// The unrecognised value.
        value: String,
    },
}
