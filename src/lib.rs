//! Ninjaconf core library.
//!
//! This library resolves C++ toolchain flags, discovers a project's sources,
//! assembles the compile and link graph, and renders it as a Ninja build
//! file.

pub mod cli;
pub mod discovery;
pub mod ir;
pub mod ninja_gen;
pub mod object_path;
pub mod runner;
pub mod toolchain;
