//! Helpers for checking generated files with the system `ninja` binary.

use std::path::Path;
use std::process::{Command, ExitStatus, Output};
use thiserror::Error;

/// Errors that can occur when driving Ninja from integration tests.
#[derive(Error, Debug)]
pub enum NinjaProbeError {
    /// The `ninja --version` probe failed to spawn, most likely because Ninja
    /// is not present in `PATH`.
    #[error("failed to spawn `ninja --version`: {0}")]
    ProbeSpawn(#[source] std::io::Error),
    /// `ninja --version` executed but returned a non-success status.
    #[error("`ninja --version` returned non-success status: {0}")]
    ProbeFailed(ExitStatus),
    /// Running Ninja against the build file failed to spawn.
    #[error("failed to spawn ninja: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Ensure Ninja is available. Callers should skip their scenario when this
/// returns `Err`.
pub fn probe_ninja() -> Result<(), NinjaProbeError> {
    let output = Command::new("ninja")
        .arg("--version")
        .output()
        .map_err(NinjaProbeError::ProbeSpawn)?;

    if !output.status.success() {
        return Err(NinjaProbeError::ProbeFailed(output.status));
    }
    Ok(())
}

/// Dry-run Ninja in `dir`, listing every edge it would run without invoking
/// the compiler.
pub fn dry_run(dir: &Path) -> Result<Output, NinjaProbeError> {
    Command::new("ninja")
        .args(["-n", "-C"])
        .arg(dir)
        .output()
        .map_err(NinjaProbeError::Spawn)
}
