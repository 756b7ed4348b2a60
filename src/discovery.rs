//! Source file discovery.
//!
//! Lists the source files directly inside one project subdirectory. Results
//! are sorted by file name so repeated runs over an unchanged tree see the
//! same order regardless of how the filesystem enumerates entries.

use std::path::PathBuf;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A source file found during discovery.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceFile {
    path: Utf8PathBuf,
}

impl SourceFile {
    /// Wrap a path that is expected to live under the project root.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Full path of the source, rooted like the directory it was found in.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// File name without its extension.
    #[must_use]
    pub fn stem(&self) -> Option<&str> {
        self.path.file_stem()
    }
}

/// Errors raised while listing a source directory.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The directory or one of its entries could not be read.
    #[error("failed to read {dir}")]
    Read {
        /// Directory being listed.
        dir: Utf8PathBuf,
        /// Underlying walk error.
        #[source]
        source: walkdir::Error,
    },
    /// An entry's name is not valid UTF-8.
    #[error("source path {} is not valid UTF-8", .path.display())]
    NonUtf8Path {
        /// Offending path.
        path: PathBuf,
    },
}

/// Return the files directly under `root/subdir` whose extension is one of
/// `extensions`, sorted by file name.
///
/// A missing directory yields an empty list.
///
/// # Errors
///
/// Returns [`DiscoveryError`] when the directory cannot be read or contains a
/// non-UTF-8 file name.
pub fn discover(
    root: &Utf8Path,
    subdir: &Utf8Path,
    extensions: &[String],
) -> Result<Vec<SourceFile>, DiscoveryError> {
    let dir = root.join(normalize(subdir));
    if !dir.is_dir() {
        warn!(dir = %dir, "source directory not found; no sources discovered");
        return Ok(Vec::new());
    }

    let mut sources = Vec::new();
    let walker = WalkDir::new(dir.as_std_path())
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    for entry in walker {
        let entry = entry.map_err(|source| DiscoveryError::Read {
            dir: dir.clone(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = Utf8PathBuf::from_path_buf(entry.into_path())
            .map_err(|path| DiscoveryError::NonUtf8Path { path })?;
        if has_source_extension(&path, extensions) {
            sources.push(SourceFile::new(path));
        }
    }
    debug!(dir = %dir, count = sources.len(), "discovered sources");
    Ok(sources)
}

fn has_source_extension(path: &Utf8Path, extensions: &[String]) -> bool {
    path.extension()
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
}

/// Lexically normalise `path`, dropping `.` and folding `..` where possible.
///
/// Leading `..` components that cannot be folded are kept so that a
/// directory outside the root stays outside it.
#[must_use]
pub fn normalize(path: &Utf8Path) -> Utf8PathBuf {
    let mut parts: Vec<Utf8Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => match parts.last() {
                Some(Utf8Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Utf8Component::RootDir | Utf8Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    parts.iter().collect()
}
