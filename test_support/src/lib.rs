//! Test utilities for building throwaway projects.
//!
//! This crate provides fixtures for laying out C++ source trees, fake
//! `pkg-config` executables and error formatting helpers used across the
//! integration tests.

pub mod error;
pub mod ninja;
pub mod pkg_config;
pub mod project;

pub use error::display_error_chain;
pub use pkg_config::{FakePackage, fake_pkg_config};
pub use project::ProjectTree;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Make a script file executable on Unix platforms.
#[cfg(unix)]
pub(crate) fn make_script_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)
        .with_context(|| format!("read metadata {}", path.display()))?
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)
        .with_context(|| format!("set permissions {}", path.display()))?;
    Ok(())
}

#[cfg(not(unix))]
pub(crate) fn make_script_executable(_path: &Path) -> Result<()> {
    Ok(())
}
