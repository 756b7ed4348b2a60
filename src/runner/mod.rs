//! CLI execution and the generation pipeline.
//!
//! This module keeps `main` minimal by providing a single entry point. It
//! resolves the toolchain, discovers sources, assembles the build graph and
//! writes the resulting Ninja file. Each stage attaches its own context so a
//! failure names the step that went wrong.

mod error;
mod file_io;
mod path_helpers;
mod project;

pub use error::RunnerError;
pub use file_io::{write_ninja_file, write_ninja_stdout};
pub use project::{ProjectLayout, toolchain_request};

use crate::cli::Cli;
use crate::discovery;
use crate::ir::{BuildGraph, DiscoveredTarget};
use crate::ninja_gen;
use crate::toolchain::{self, PackageQuery, PkgConfig};
use anyhow::{Context, Result};
use tracing::debug;

use path_helpers::{build_file_path, resolve_root};

/// Name of the generated build file, written to the project root.
pub const BUILD_FILE: &str = "build.ninja";

/// Wrapper around generated Ninja manifest text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NinjaContent(String);
impl NinjaContent {
    /// Store the provided Ninja manifest string.
    #[must_use]
    pub const fn new(content: String) -> Self {
        Self(content)
    }
    /// Borrow the underlying manifest text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
    /// Consume the wrapper returning the owned manifest string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Execute the parsed [`Cli`], querying packages with `pkg-config`.
///
/// # Errors
///
/// Returns an error naming the failed stage if the root is invalid, a package
/// query fails, discovery fails, the graph is inconsistent, or the build file
/// cannot be written.
pub fn run(cli: &Cli) -> Result<()> {
    run_with_query(cli, &PkgConfig::from_env())
}

/// Execute the parsed [`Cli`] using `query` for package metadata.
///
/// # Errors
///
/// See [`run`].
pub fn run_with_query<Q>(cli: &Cli, query: &Q) -> Result<()>
where
    Q: PackageQuery + ?Sized,
{
    let root = resolve_root(cli).context("locating project root")?;
    let layout = ProjectLayout::from_cli(cli, root);
    let ninja = generate_ninja(cli, &layout, query)?;
    if cli.stdout {
        write_ninja_stdout(&ninja)?;
    } else {
        let path = build_file_path(layout.root());
        write_ninja_file(&path, &ninja).with_context(|| format!("writing {path}"))?;
    }
    Ok(())
}

/// Generate the Ninja file for the project described by `layout`.
///
/// # Errors
///
/// Returns an error if toolchain resolution, discovery, graph assembly or
/// rendering fails.
///
/// # Examples
/// ```ignore
/// use ninjaconf::cli::Cli;
/// use ninjaconf::runner::{ProjectLayout, generate_ninja};
/// use ninjaconf::toolchain::PkgConfig;
/// let cli = Cli::default();
/// let layout = ProjectLayout::from_cli(&cli, "/work".into());
/// let ninja = generate_ninja(&cli, &layout, &PkgConfig::from_env()).expect("generate");
/// assert!(ninja.as_str().contains("rule cxx"));
/// ```
pub fn generate_ninja<Q>(cli: &Cli, layout: &ProjectLayout, query: &Q) -> Result<NinjaContent>
where
    Q: PackageQuery + ?Sized,
{
    let request = toolchain_request(cli, layout);
    let toolchain =
        toolchain::resolve(&request, query).context("resolving toolchain flags")?;
    if tracing::enabled!(tracing::Level::DEBUG) {
        let json = serde_json::to_string_pretty(&toolchain).context("serialising toolchain")?;
        debug!("Toolchain:\n{json}");
    }

    let mut discovered = Vec::new();
    for spec in layout.targets() {
        let sources = discovery::discover(layout.root(), &spec.subdir, &layout.extensions)
            .with_context(|| format!("discovering sources in {}", spec.subdir))?;
        discovered.push(DiscoveredTarget { spec, sources });
    }

    let graph = BuildGraph::assemble(&discovered, &layout.object_mapper(), &layout.entry_point)
        .context("assembling build graph")?;
    if tracing::enabled!(tracing::Level::DEBUG) {
        let json = serde_json::to_string_pretty(&graph).context("serialising build graph")?;
        debug!("Graph:\n{json}");
    }

    let ninja = ninja_gen::generate(&graph, &toolchain).context("rendering Ninja file")?;
    Ok(NinjaContent::new(ninja))
}
