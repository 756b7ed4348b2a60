//! Project layout captured once from the command line.

use camino::{Utf8Path, Utf8PathBuf};

use crate::cli::Cli;
use crate::ir::{TargetKind, TargetSpec};
use crate::object_path::ObjectMapper;
use crate::toolchain::{BuildMode, FlagOverrides, ToolchainRequest};

/// Where a project's sources live and what gets built from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Canonical project root.
    pub root: Utf8PathBuf,
    /// Program sources, relative to the root.
    pub src_dir: Utf8PathBuf,
    /// Test sources, relative to the root.
    pub test_dir: Utf8PathBuf,
    /// Program executable and default target.
    pub name: Utf8PathBuf,
    /// Test harness executable.
    pub test_name: Utf8PathBuf,
    /// File stem of the source defining the program's entry point.
    pub entry_point: String,
    /// Source extensions to discover.
    pub extensions: Vec<String>,
    /// Object directory relative to the root; empty means next to sources.
    pub obj_dir: Utf8PathBuf,
}

impl ProjectLayout {
    /// Capture the layout options of `cli` for the project at `root`.
    #[must_use]
    pub fn from_cli(cli: &Cli, root: Utf8PathBuf) -> Self {
        Self {
            root,
            src_dir: Utf8PathBuf::from(&cli.src_dir),
            test_dir: Utf8PathBuf::from(&cli.test_dir),
            name: Utf8PathBuf::from(&cli.name),
            test_name: Utf8PathBuf::from(&cli.test_name),
            entry_point: cli.entry_point.clone(),
            extensions: cli.extensions.clone(),
            obj_dir: cli.obj_dir.as_deref().map(Utf8PathBuf::from).unwrap_or_default(),
        }
    }

    /// The program target followed by the test harness reusing its objects.
    #[must_use]
    pub fn targets(&self) -> [TargetSpec; 2] {
        [
            TargetSpec::new(self.name.clone(), self.src_dir.clone(), TargetKind::Primary),
            TargetSpec::new(
                self.test_name.clone(),
                self.test_dir.clone(),
                TargetKind::reusing(self.name.clone()),
            ),
        ]
    }

    /// Object mapper rooted at this project.
    #[must_use]
    pub fn object_mapper(&self) -> ObjectMapper {
        ObjectMapper::new(self.root.clone()).with_obj_dir(self.obj_dir.clone())
    }

    /// Project root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

/// Capture the toolchain options of `cli` for the project described by
/// `layout`.
#[must_use]
pub fn toolchain_request(cli: &Cli, layout: &ProjectLayout) -> ToolchainRequest {
    ToolchainRequest {
        mode: if cli.release {
            BuildMode::Release
        } else {
            BuildMode::Debug
        },
        compiler: cli.cxx.clone(),
        linker: cli.ld.clone(),
        overrides: FlagOverrides {
            compile_flags: cli.cxxflags.clone(),
            link_flags: cli.ldflags.clone(),
            dep_flags: cli.depflags.clone(),
        },
        root: layout.root.clone(),
        include_dir: layout.src_dir.to_string(),
        packages: cli.packages.clone(),
    }
}
