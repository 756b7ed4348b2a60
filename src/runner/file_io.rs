//! File creation helpers for the runner.
//! Writes the build file with write-then-replace semantics, or streams it to
//! standard output.

use crate::runner::NinjaContent;
use anyhow::{Context, Result as AnyResult};
use camino::Utf8Path;
use std::io::{self, Write};
use tempfile::{Builder, NamedTempFile};
use tracing::info;

/// Write `content` to `path` atomically.
///
/// The text goes to a temporary file in the destination directory, which is
/// flushed, synced and then renamed over `path`. If any step fails the
/// previous file at `path`, if any, is left as it was.
pub fn write_ninja_file(path: &Utf8Path, content: &NinjaContent) -> AnyResult<()> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let mut tmp = Builder::new()
        .prefix(".ninjaconf.")
        .suffix(".tmp")
        .tempfile_in(dir)
        .with_context(|| format!("create temporary file in {dir}"))?;
    fill_temp_file(&mut tmp, content)
        .with_context(|| format!("write temporary file {}", tmp.path().display()))?;
    tmp.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("replace {path}"))?;
    info!("Wrote Ninja file to {path}");
    Ok(())
}

fn fill_temp_file(tmp: &mut NamedTempFile, content: &NinjaContent) -> io::Result<()> {
    let handle = tmp.as_file_mut();
    handle.write_all(content.as_str().as_bytes())?;
    handle.flush()?;
    set_readable_permissions(handle)?;
    handle.sync_all()
}

/// Give the build file the usual `0644` mode instead of the private mode
/// temporary files are created with.
#[cfg(unix)]
fn set_readable_permissions(file: &std::fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_readable_permissions(_file: &std::fs::File) -> io::Result<()> {
    Ok(())
}

fn is_broken_pipe(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::BrokenPipe
}

fn write_all_ignoring_broken_pipe(writer: &mut impl Write, buf: &[u8]) -> io::Result<()> {
    match writer.write_all(buf) {
        Ok(()) => Ok(()),
        Err(err) if is_broken_pipe(&err) => Ok(()),
        Err(err) => Err(err),
    }
}

fn flush_ignoring_broken_pipe(writer: &mut impl Write) -> io::Result<()> {
    match writer.flush() {
        Ok(()) => Ok(()),
        Err(err) if is_broken_pipe(&err) => Ok(()),
        Err(err) => Err(err),
    }
}

/// Print `content` to standard output, treating a closed pipe as success.
pub fn write_ninja_stdout(content: &NinjaContent) -> AnyResult<()> {
    let mut stdout = io::stdout().lock();
    write_all_ignoring_broken_pipe(&mut stdout, content.as_str().as_bytes())
        .context("write Ninja file to stdout")?;
    flush_ignoring_broken_pipe(&mut stdout).context("flush stdout")?;
    Ok(())
}
