//! Error types for the runner module.
//!
//! This submodule isolates derive-macro-affected code to scope lint suppressions
//! narrowly. The `unused_assignments` lint fires in some Rust versions due to
//! thiserror/miette derive macro expansion.

// Scoped suppression for version-dependent lint false positives from
// miette/thiserror derive macros. Since `#[expect]` fails when the lint doesn't
// fire, we must use `#[allow]` here.
// FIXME(rust-lang/rust#130021): remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating the project.
#[derive(Debug, Error, Diagnostic)]
pub enum RunnerError {
    /// The project root is missing or is not a directory.
    #[error("project root {} is not a directory", .path.display())]
    #[diagnostic(
        code(ninjaconf::runner::root_not_directory),
        help("pass an existing project directory with --root, or run from inside the project")
    )]
    RootNotDirectory {
        /// The path that was attempted.
        path: PathBuf,
    },

    /// The canonical project root cannot be represented as UTF-8.
    #[error("project root {} is not valid UTF-8", .path.display())]
    #[diagnostic(
        code(ninjaconf::runner::root_not_utf8),
        help("move the project to a directory whose path is valid UTF-8")
    )]
    NonUtf8Root {
        /// The canonicalised path.
        path: PathBuf,
    },
}
