//! Path resolution helpers for the runner module.
//!
//! Centralises project root and output path logic so the main runner module
//! stays focused on the generation pipeline.

use crate::cli::Cli;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::path::{Path, PathBuf};

use super::{BUILD_FILE, RunnerError};

/// Determine the canonical project root from the CLI's `--root` option.
///
/// Defaults to the current directory.
///
/// # Errors
/// Returns [`RunnerError::RootNotDirectory`] if the root does not exist or is
/// a file, and [`RunnerError::NonUtf8Root`] if its canonical form is not
/// UTF-8.
pub(super) fn resolve_root(cli: &Cli) -> Result<Utf8PathBuf> {
    let requested = cli.root.as_deref().unwrap_or_else(|| Path::new("."));
    if !requested.is_dir() {
        return Err(RunnerError::RootNotDirectory {
            path: requested.to_path_buf(),
        }
        .into());
    }
    let canonical: PathBuf = fs::canonicalize(requested)
        .with_context(|| format!("canonicalising {}", requested.display()))?;
    Utf8PathBuf::from_path_buf(canonical).map_err(|path| RunnerError::NonUtf8Root { path }.into())
}

/// Path of the generated build file inside `root`.
#[must_use]
pub(super) fn build_file_path(root: &Utf8Path) -> Utf8PathBuf {
    root.join(BUILD_FILE)
}
