//! Build graph types.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use thiserror::Error;

use crate::discovery::SourceFile;
use crate::object_path::PathError;

/// How a target obtains its objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetKind {
    /// Links only the objects discovered in its own directory.
    Primary,
    /// Additionally links another target's objects, minus its entry point.
    Secondary {
        /// Name of the target whose objects are reused.
        reuses: Utf8PathBuf,
    },
}

impl TargetKind {
    /// Secondary target reusing the objects of `target`.
    #[must_use]
    pub fn reusing(target: impl Into<Utf8PathBuf>) -> Self {
        Self::Secondary {
            reuses: target.into(),
        }
    }
}

/// Description of one executable to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    /// Output path of the executable, relative to the project root.
    pub name: Utf8PathBuf,
    /// Directory whose sources belong to this target.
    pub subdir: Utf8PathBuf,
    /// Whether objects are reused from another target.
    pub kind: TargetKind,
}

impl TargetSpec {
    /// Describe a target named `name` built from `subdir`.
    #[must_use]
    pub fn new(
        name: impl Into<Utf8PathBuf>,
        subdir: impl Into<Utf8PathBuf>,
        kind: TargetKind,
    ) -> Self {
        Self {
            name: name.into(),
            subdir: subdir.into(),
            kind,
        }
    }
}

/// A target together with the sources discovered for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredTarget {
    /// Target description.
    pub spec: TargetSpec,
    /// Sources in discovery order.
    pub sources: Vec<SourceFile>,
}

/// Produces one object from one source via the compile rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompileEdge {
    /// Source path relative to the project root.
    pub source: Utf8PathBuf,
    /// Object path relative to the project root.
    pub object: Utf8PathBuf,
}

/// Produces one executable from ordered objects via the link rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkEdge {
    /// Executable path relative to the project root.
    pub output: Utf8PathBuf,
    /// Objects in link order.
    pub inputs: Vec<Utf8PathBuf>,
}

/// The complete compile and link plan for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildGraph {
    /// Compile edges in registration order.
    pub compile_edges: Vec<CompileEdge>,
    /// Link edges in target order.
    pub link_edges: Vec<LinkEdge>,
    /// Target built when Ninja runs without arguments.
    pub default_target: Utf8PathBuf,
}

impl BuildGraph {
    /// Find the link edge producing `output`.
    #[must_use]
    pub fn link_edge(&self, output: impl AsRef<Utf8Path>) -> Option<&LinkEdge> {
        let wanted = output.as_ref();
        self.link_edges
            .iter()
            .find(|edge| edge.output.as_path() == wanted)
    }

    /// Find the compile edge producing `object`.
    #[must_use]
    pub fn compile_edge(&self, object: impl AsRef<Utf8Path>) -> Option<&CompileEdge> {
        let wanted = object.as_ref();
        self.compile_edges
            .iter()
            .find(|edge| edge.object.as_path() == wanted)
    }
}

/// Errors produced while assembling a [`BuildGraph`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IrGenError {
    /// Two distinct sources would write the same object.
    #[error("sources {first} and {second} both produce object {object}")]
    DuplicateOutput {
        /// Contested object path.
        object: Utf8PathBuf,
        /// Source registered first.
        first: Utf8PathBuf,
        /// Source that collided with it.
        second: Utf8PathBuf,
    },

    /// A source could not be mapped to an object path.
    #[error(transparent)]
    Path(#[from] PathError),

    /// Two targets share a name.
    #[error("target {target} is declared more than once")]
    DuplicateTarget {
        /// Repeated target name.
        target: Utf8PathBuf,
    },

    /// A secondary target reuses a target that was not declared before it.
    #[error("target {target} reuses unknown target {reused}")]
    UnknownTarget {
        /// Secondary target.
        target: Utf8PathBuf,
        /// Missing target it refers to.
        reused: Utf8PathBuf,
    },

    /// An executable would overwrite an object file.
    #[error("target {target} has the same path as an object file")]
    TargetShadowsObject {
        /// Conflicting target name.
        target: Utf8PathBuf,
    },

    /// No primary target was requested, so there is no default goal.
    #[error("no primary target was requested")]
    NoPrimaryTarget,
}
