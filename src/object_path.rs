//! Mapping from source files to object files.
//!
//! An object path is the source path made relative to the project root,
//! placed under the object directory, with its extension replaced by `o`.
//! The mapping depends only on the root, the object directory and the source
//! path, so distinct relative sources with distinct stems map to distinct
//! objects.

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

use crate::discovery::SourceFile;

/// Extension given to object files.
pub const OBJECT_EXTENSION: &str = "o";

/// Errors raised when a source path cannot be mapped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// The source does not live under the project root.
    #[error("source {source_path} is outside the project root {root}")]
    OutsideRoot {
        /// Offending source.
        source_path: Utf8PathBuf,
        /// Declared project root.
        root: Utf8PathBuf,
    },
    /// The source path names a directory rather than a file.
    #[error("source {source_path} has no file name")]
    NoFileName {
        /// Offending source.
        source_path: Utf8PathBuf,
    },
}

/// Source and object paths for one compile step, both relative to the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedSource {
    /// Source path relative to the project root.
    pub source: Utf8PathBuf,
    /// Object path relative to the project root.
    pub object: Utf8PathBuf,
}

/// Derives object output paths for sources under a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMapper {
    root: Utf8PathBuf,
    obj_dir: Utf8PathBuf,
}

impl ObjectMapper {
    /// Place objects next to their sources.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            obj_dir: Utf8PathBuf::new(),
        }
    }

    /// Place objects under `obj_dir`, itself relative to the root.
    #[must_use]
    pub fn with_obj_dir(mut self, obj_dir: impl Into<Utf8PathBuf>) -> Self {
        self.obj_dir = obj_dir.into();
        self
    }

    /// Project root the mapper resolves against.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Map `source` to its root-relative source and object paths.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::OutsideRoot`] if `source` is not under the root
    /// and [`PathError::NoFileName`] if it has no file name.
    pub fn map(&self, source: &SourceFile) -> Result<MappedSource, PathError> {
        let relative = source
            .path()
            .strip_prefix(&self.root)
            .map_err(|_| PathError::OutsideRoot {
                source_path: source.path().to_owned(),
                root: self.root.clone(),
            })?;
        if relative.file_name().is_none() {
            return Err(PathError::NoFileName {
                source_path: source.path().to_owned(),
            });
        }
        let object = self.obj_dir.join(relative).with_extension(OBJECT_EXTENSION);
        Ok(MappedSource {
            source: relative.to_owned(),
            object,
        })
    }
}
