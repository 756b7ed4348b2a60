//! Ninja file generator.
//!
//! This module converts a [`crate::ir::BuildGraph`] and its
//! [`crate::toolchain::ToolchainConfig`] into the textual representation
//! expected by the Ninja build system. Edges are written in the order the
//! graph stores them, which is itself deterministic, so identical inputs
//! produce byte-identical output.

use std::borrow::Cow;
use std::fmt::{self, Display, Formatter, Write};

use camino::Utf8Path;
use itertools::Itertools;
use thiserror::Error;

use crate::ir::{BuildGraph, CompileEdge, LinkEdge};
use crate::toolchain::ToolchainConfig;

/// Name of the rule compiling one source into one object.
pub const COMPILE_RULE: &str = "cxx";
/// Name of the rule linking objects into an executable.
pub const LINK_RULE: &str = "link";
/// Depfile location declared by the compile rule.
pub const DEPFILE: &str = "$out.d";

macro_rules! write_kv {
    ($f:expr, $key:expr, $val:expr) => {
        writeln!($f, "  {} = {}", $key, $val)?
    };
}

/// Errors raised while rendering a Ninja file.
#[derive(Debug, Error)]
pub enum NinjaGenError {
    /// Ninja has no escape for newlines in paths.
    #[error("path {path:?} contains a newline and cannot be written to a Ninja file")]
    NewlineInPath {
        /// Offending path.
        path: String,
    },
    /// Ninja rule commands must fit on a single line.
    #[error("command for rule '{rule}' contains a newline")]
    NewlineInCommand {
        /// Rule whose command is invalid.
        rule: &'static str,
    },
    /// Writing to the output buffer failed.
    #[error("failed to format Ninja output")]
    Format(#[from] fmt::Error),
}

/// Generate a Ninja build file as a string.
///
/// # Errors
///
/// Returns [`NinjaGenError`] if a path or command cannot be represented in
/// Ninja syntax.
pub fn generate(graph: &BuildGraph, toolchain: &ToolchainConfig) -> Result<String, NinjaGenError> {
    let mut out = String::new();

    let compile = compile_command(toolchain);
    let link = link_command(toolchain);
    ensure_single_line(COMPILE_RULE, &compile)?;
    ensure_single_line(LINK_RULE, &link)?;
    write!(
        out,
        "{}",
        NamedRule {
            name: COMPILE_RULE,
            depfile: Some(DEPFILE),
            command: &compile,
        }
    )?;
    write!(
        out,
        "{}",
        NamedRule {
            name: LINK_RULE,
            depfile: None,
            command: &link,
        }
    )?;

    for edge in &graph.compile_edges {
        write!(out, "{}", DisplayCompile::new(edge)?)?;
    }
    if !graph.compile_edges.is_empty() {
        writeln!(out)?;
    }

    for edge in &graph.link_edges {
        write!(out, "{}", DisplayLink::new(edge)?)?;
    }
    if !graph.link_edges.is_empty() {
        writeln!(out)?;
    }

    writeln!(out, "default {}", escape_path(&graph.default_target)?)?;
    Ok(out)
}

/// Compiler invocation template for the compile rule.
#[must_use]
pub fn compile_command(toolchain: &ToolchainConfig) -> String {
    join_words(&[
        toolchain.compiler.as_str(),
        toolchain.compile_flags.as_str(),
        "-c $in -o $out",
    ])
}

/// Linker invocation template for the link rule.
#[must_use]
pub fn link_command(toolchain: &ToolchainConfig) -> String {
    join_words(&[
        toolchain.linker.as_str(),
        "$in",
        toolchain.link_flags.as_str(),
        "-o $out",
    ])
}

fn join_words(words: &[&str]) -> String {
    words
        .iter()
        .map(|word| word.trim())
        .filter(|word| !word.is_empty())
        .join(" ")
}

fn ensure_single_line(rule: &'static str, command: &str) -> Result<(), NinjaGenError> {
    if command.contains(['\n', '\r']) {
        return Err(NinjaGenError::NewlineInCommand { rule });
    }
    Ok(())
}

/// Escape `path` for use in a Ninja `build` or `default` statement.
///
/// Dollar signs, spaces and colons are prefixed with `$`.
///
/// # Errors
///
/// Returns [`NinjaGenError::NewlineInPath`] when the path contains a line
/// break, which Ninja cannot express.
pub fn escape_path(path: &Utf8Path) -> Result<Cow<'_, str>, NinjaGenError> {
    let raw = path.as_str();
    if raw.contains(['\n', '\r']) {
        return Err(NinjaGenError::NewlineInPath {
            path: raw.to_owned(),
        });
    }
    if !raw.contains(['$', ' ', ':']) {
        return Ok(Cow::Borrowed(raw));
    }
    let mut escaped = String::with_capacity(raw.len() + 4);
    for ch in raw.chars() {
        if matches!(ch, '$' | ' ' | ':') {
            escaped.push('$');
        }
        escaped.push(ch);
    }
    Ok(Cow::Owned(escaped))
}

fn escape_all<'a, I>(paths: I) -> Result<String, NinjaGenError>
where
    I: IntoIterator<Item = &'a camino::Utf8PathBuf>,
{
    let escaped: Vec<Cow<'a, str>> = paths
        .into_iter()
        .map(|path| escape_path(path))
        .collect::<Result<_, _>>()?;
    Ok(escaped.iter().join(" "))
}

/// Wrapper struct to display a rule declaration.
struct NamedRule<'a> {
    name: &'static str,
    depfile: Option<&'static str>,
    command: &'a str,
}

impl Display for NamedRule<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "rule {}", self.name)?;
        if let Some(depfile) = self.depfile {
            write_kv!(f, "depfile", depfile);
        }
        write_kv!(f, "command", self.command);
        writeln!(f)
    }
}

/// Wrapper struct to display a compile edge with pre-escaped paths.
struct DisplayCompile<'a> {
    object: Cow<'a, str>,
    source: Cow<'a, str>,
}

impl<'a> DisplayCompile<'a> {
    fn new(edge: &'a CompileEdge) -> Result<Self, NinjaGenError> {
        Ok(Self {
            object: escape_path(&edge.object)?,
            source: escape_path(&edge.source)?,
        })
    }
}

impl Display for DisplayCompile<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "build {}: {COMPILE_RULE} {}", self.object, self.source)
    }
}

/// Wrapper struct to display a link edge with pre-escaped paths.
struct DisplayLink<'a> {
    output: Cow<'a, str>,
    inputs: String,
}

impl<'a> DisplayLink<'a> {
    fn new(edge: &'a LinkEdge) -> Result<Self, NinjaGenError> {
        Ok(Self {
            output: escape_path(&edge.output)?,
            inputs: escape_all(&edge.inputs)?,
        })
    }
}

impl Display for DisplayLink<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "build {}: {LINK_RULE}", self.output)?;
        if !self.inputs.is_empty() {
            write!(f, " {}", self.inputs)?;
        }
        writeln!(f)
    }
}
