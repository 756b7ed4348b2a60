//! Throwaway C++ project trees.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// A temporary project root populated with source files.
///
/// The directory is removed when the value is dropped.
#[derive(Debug)]
pub struct ProjectTree {
    dir: TempDir,
    root: Utf8PathBuf,
}

impl ProjectTree {
    /// Create an empty project root.
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("create project dir")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow::anyhow!("non-UTF-8 temp dir {}", path.display()))?;
        Ok(Self { dir, root })
    }

    /// Create a project with `src/` holding `sources` and `tests/` holding
    /// `tests`, each given as file names.
    pub fn with_sources(sources: &[&str], tests: &[&str]) -> Result<Self> {
        let tree = Self::new()?;
        tree.mkdir("src")?;
        tree.mkdir("tests")?;
        for name in sources {
            tree.touch(&format!("src/{name}"))?;
        }
        for name in tests {
            tree.touch(&format!("tests/{name}"))?;
        }
        Ok(tree)
    }

    /// Project root as a UTF-8 path.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Project root as a standard path.
    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }

    /// Create the directory `relative` below the root, with parents.
    pub fn mkdir(&self, relative: &str) -> Result<Utf8PathBuf> {
        let path = self.root.join(relative);
        fs::create_dir_all(&path).with_context(|| format!("create {path}"))?;
        Ok(path)
    }

    /// Write a one-line source file at `relative`, creating parents.
    pub fn touch(&self, relative: &str) -> Result<Utf8PathBuf> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        fs::write(&path, format!("// {relative}\n")).with_context(|| format!("write {path}"))?;
        Ok(path)
    }

    /// Read the file at `relative` below the root.
    pub fn read(&self, relative: &str) -> Result<String> {
        let path = self.root.join(relative);
        fs::read_to_string(&path).with_context(|| format!("read {path}"))
    }
}
