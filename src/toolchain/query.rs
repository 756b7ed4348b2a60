//! Package-metadata lookups.
//!
//! [`PackageQuery`] is the narrow seam between flag resolution and the
//! outside world. [`PkgConfig`] implements it by running `pkg-config`.

use std::env;
use std::ffi::OsString;
use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;
use std::process::Command;

use pkg_config_env::{PKG_CONFIG_ENV, PKG_CONFIG_PROGRAM};
use serde::Serialize;
use tracing::debug;

use super::QueryError;

/// Kind of flags requested from the metadata source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    /// Compiler requirements (`--cflags`).
    Cflags,
    /// Linker requirements (`--libs`).
    Libs,
}

impl QueryMode {
    /// Command line switch selecting this mode.
    #[must_use]
    pub const fn as_flag(self) -> &'static str {
        match self {
            Self::Cflags => "--cflags",
            Self::Libs => "--libs",
        }
    }
}

impl Display for QueryMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cflags => f.write_str("cflags"),
            Self::Libs => f.write_str("libs"),
        }
    }
}

/// Source of per-package compiler and linker flags.
pub trait PackageQuery {
    /// Return the flags `package` requires for `mode`.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] when the metadata cannot be obtained.
    fn query(&self, package: &str, mode: QueryMode) -> Result<String, QueryError>;
}

/// [`PackageQuery`] backed by the `pkg-config` executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkgConfig {
    program: PathBuf,
}

impl PkgConfig {
    /// Use `program` as the metadata tool.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Use the program named by [`PKG_CONFIG_ENV`], falling back to
    /// `pkg-config` on `PATH`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| env::var_os(key))
    }

    fn from_env_with<F>(mut read_env: F) -> Self
    where
        F: FnMut(&str) -> Option<OsString>,
    {
        let program = read_env(PKG_CONFIG_ENV)
            .filter(|value| !value.is_empty())
            .map_or_else(|| PathBuf::from(PKG_CONFIG_PROGRAM), PathBuf::from);
        Self { program }
    }

    /// Path of the program this query runs.
    #[must_use]
    pub fn program(&self) -> &std::path::Path {
        &self.program
    }
}

impl PackageQuery for PkgConfig {
    fn query(&self, package: &str, mode: QueryMode) -> Result<String, QueryError> {
        let program = self.program.display().to_string();
        debug!(%program, package, %mode, "querying package metadata");
        let output = Command::new(&self.program)
            .arg(mode.as_flag())
            .arg(package)
            .output()
            .map_err(|source| QueryError::Spawn {
                program: program.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(QueryError::Exit {
                program,
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        let stdout = String::from_utf8(output.stdout).map_err(|_| QueryError::NonUtf8 {
            program: program.clone(),
        })?;
        Ok(stdout.trim().to_owned())
    }
}
