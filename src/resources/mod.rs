//! Idempotent filesystem primitives: state checks, symlink creation and the
//! recursive tree clone.
pub mod clone;
pub mod created;
pub mod state;
pub mod symlink;

pub use clone::symlink_clone;
pub use created::{CreatedKind, CreatedPath, CreatedPaths};
pub use state::{LinkState, PathState, check_directory, check_symlink};
