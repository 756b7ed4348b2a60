//! Intermediate Representation structures.
//!
//! This module defines the build graph assembled from discovered sources.
//! The IR mirrors the conceptual model of Ninja (compile and link edges plus
//! a default target) without embedding any Ninja-specific syntax.
//!
//! # Examples
//!
//! ```
//! use ninjaconf::discovery::SourceFile;
//! use ninjaconf::ir::{BuildGraph, DiscoveredTarget, TargetKind, TargetSpec};
//! use ninjaconf::object_path::ObjectMapper;
//!
//! let mapper = ObjectMapper::new("/p");
//! let targets = [
//!     DiscoveredTarget {
//!         spec: TargetSpec::new("app", "src", TargetKind::Primary),
//!         sources: vec![SourceFile::new("/p/src/lib.cc"), SourceFile::new("/p/src/main.cc")],
//!     },
//!     DiscoveredTarget {
//!         spec: TargetSpec::new("tests/run", "tests", TargetKind::reusing("app")),
//!         sources: vec![SourceFile::new("/p/tests/main.cc")],
//!     },
//! ];
//! let graph = BuildGraph::assemble(&targets, &mapper, "main").expect("assemble");
//! let harness = graph.link_edge("tests/run").expect("harness edge");
//! assert_eq!(harness.inputs, ["tests/main.o", "src/lib.o"]);
//! assert_eq!(graph.default_target, "app");
//! ```

mod assemble;
mod graph;

pub use graph::{
    BuildGraph, CompileEdge, DiscoveredTarget, IrGenError, LinkEdge, TargetKind, TargetSpec,
};
