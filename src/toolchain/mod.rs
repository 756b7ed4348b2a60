//! Toolchain flag resolution.
//!
//! Turns the build mode, optional flag overrides and per-package metadata
//! into an immutable [`ToolchainConfig`]. Flags are assembled in a fixed
//! order so identical inputs always produce identical strings:
//!
//! 1. the compile override, or the common baseline plus one mode's flags;
//! 2. every package's `--cflags`;
//! 3. (link flags only) the link override, or a copy of the compile flags so
//!    far, followed by every package's `--libs`;
//! 4. (compile flags only) the depfile flags.
//!
//! Values taken from the filesystem or from package metadata end up inside a
//! Ninja `command`, so they are shell-quoted where they are paths and have
//! every `$` doubled. Overrides and depfile flags are passed through
//! verbatim since they may reference Ninja variables such as `$out`.
//!
//! # Examples
//!
//! ```
//! use camino::Utf8PathBuf;
//! use ninjaconf::toolchain::{
//!     BuildMode, FlagOverrides, PackageQuery, QueryError, QueryMode, ToolchainRequest, resolve,
//! };
//!
//! struct NoPackages;
//! impl PackageQuery for NoPackages {
//!     fn query(&self, _: &str, _: QueryMode) -> Result<String, QueryError> {
//!         Ok(String::new())
//!     }
//! }
//!
//! let request = ToolchainRequest {
//!     mode: BuildMode::Release,
//!     compiler: "c++".into(),
//!     linker: "c++".into(),
//!     overrides: FlagOverrides::default(),
//!     root: Utf8PathBuf::from("/work"),
//!     include_dir: "src".into(),
//!     packages: Vec::new(),
//! };
//! let config = resolve(&request, &NoPackages).expect("resolve");
//! assert!(config.compile_flags.contains("-O3 -flto"));
//! assert!(config.compile_flags.ends_with("-MMD -MF $out.d"));
//! ```

mod error;
mod query;

pub use error::{QueryError, ToolchainError};
pub use query::{PackageQuery, PkgConfig, QueryMode};

use std::fmt::{self, Display, Formatter};

use camino::Utf8PathBuf;
use serde::Serialize;
use tracing::debug;

/// Flags shared by both build modes. `{include}` expands to the header
/// directory under the root, quoted as one shell word.
pub const COMMON_FLAGS: &str = "-Wall -Wextra -std=c++17 -I{include} -fPIC";
/// Flags added in debug mode.
pub const DEBUG_FLAGS: &str = "-O0 -g -DDEBUG";
/// Flags added in release mode.
pub const RELEASE_FLAGS: &str = "-O3 -flto";
/// Default depfile flags; `$out` is expanded by Ninja.
pub const DEFAULT_DEP_FLAGS: &str = "-MMD -MF $out.d";

const ROOT_PLACEHOLDER: &str = "{root}";
const INCLUDE_PLACEHOLDER: &str = "{include}";

/// Optimisation profile selecting the default flags.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Unoptimised build with debug information.
    #[default]
    Debug,
    /// Optimised build with link-time optimisation.
    Release,
}

impl BuildMode {
    /// Flags appended to the common baseline for this mode.
    #[must_use]
    pub const fn flags(self) -> &'static str {
        match self {
            Self::Debug => DEBUG_FLAGS,
            Self::Release => RELEASE_FLAGS,
        }
    }
}

impl Display for BuildMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => f.write_str("debug"),
            Self::Release => f.write_str("release"),
        }
    }
}

/// User-supplied flag strings.
///
/// `None` requests the defaults. `Some("")` is an explicit empty override and
/// suppresses them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagOverrides {
    /// Replaces the baseline and mode flags for compilation.
    pub compile_flags: Option<String>,
    /// Replaces the copy of the compile flags used for linking.
    pub link_flags: Option<String>,
    /// Depfile flags, always appended to the compile flags.
    pub dep_flags: String,
}

impl Default for FlagOverrides {
    fn default() -> Self {
        Self {
            compile_flags: None,
            link_flags: None,
            dep_flags: DEFAULT_DEP_FLAGS.to_owned(),
        }
    }
}

/// Everything needed to resolve a [`ToolchainConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainRequest {
    /// Selected build mode.
    pub mode: BuildMode,
    /// Compiler executable.
    pub compiler: String,
    /// Linker executable.
    pub linker: String,
    /// Explicit flag overrides.
    pub overrides: FlagOverrides,
    /// Absolute project root substituted for `{root}`.
    pub root: Utf8PathBuf,
    /// Header directory relative to the root, added to the include path.
    pub include_dir: String,
    /// Packages whose metadata is queried, in order.
    pub packages: Vec<String>,
}

/// Fully resolved compiler and linker invocation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolchainConfig {
    /// Compiler executable.
    pub compiler: String,
    /// Linker executable.
    pub linker: String,
    /// Final compiler flags, depfile flags included.
    pub compile_flags: String,
    /// Final linker flags.
    pub link_flags: String,
    /// Depfile flags appended to [`Self::compile_flags`].
    pub dep_flags: String,
    /// Mode the defaults were taken from.
    pub mode: BuildMode,
}

/// Resolve the toolchain configuration for `request`.
///
/// # Errors
///
/// Returns [`ToolchainError::Query`] if any package lookup fails and
/// [`ToolchainError::UnquotableRoot`] if the root contains a NUL byte.
pub fn resolve<Q>(request: &ToolchainRequest, query: &Q) -> Result<ToolchainConfig, ToolchainError>
where
    Q: PackageQuery + ?Sized,
{
    let mut compile_flags = request.overrides.compile_flags.as_deref().map_or_else(
        || {
            let include = format!("{}/{}", request.root, request.include_dir);
            let mut flags =
                COMMON_FLAGS.replace(INCLUDE_PLACEHOLDER, &quote_path(request, &include)?);
            push_segment(&mut flags, request.mode.flags());
            Ok::<_, ToolchainError>(flags)
        },
        |flags| {
            let root = quote_path(request, request.root.as_str())?;
            Ok(flags.replace(ROOT_PLACEHOLDER, &root))
        },
    )?;
    for package in &request.packages {
        let cflags = query_package(query, package, QueryMode::Cflags)?;
        push_segment(&mut compile_flags, &escape_dollars(&cflags));
    }

    let mut link_flags = request
        .overrides
        .link_flags
        .clone()
        .unwrap_or_else(|| compile_flags.clone());
    for package in &request.packages {
        let libs = query_package(query, package, QueryMode::Libs)?;
        push_segment(&mut link_flags, &escape_dollars(&libs));
    }

    push_segment(&mut compile_flags, &request.overrides.dep_flags);

    let config = ToolchainConfig {
        compiler: request.compiler.clone(),
        linker: request.linker.clone(),
        compile_flags,
        link_flags,
        dep_flags: request.overrides.dep_flags.clone(),
        mode: request.mode,
    };
    debug!(mode = %config.mode, compile_flags = %config.compile_flags, link_flags = %config.link_flags, "resolved toolchain");
    Ok(config)
}

/// Quote `path` as a single shell word and escape it for a Ninja command.
fn quote_path(request: &ToolchainRequest, path: &str) -> Result<String, ToolchainError> {
    shlex::try_quote(path)
        .map(|quoted| escape_dollars(&quoted))
        .map_err(|_| ToolchainError::UnquotableRoot {
            root: request.root.to_string(),
        })
}

/// Double every `$` so Ninja passes it to the shell literally.
fn escape_dollars(text: &str) -> String {
    text.replace('$', "$$")
}

fn query_package<Q>(query: &Q, package: &str, mode: QueryMode) -> Result<String, ToolchainError>
where
    Q: PackageQuery + ?Sized,
{
    query
        .query(package, mode)
        .map_err(|source| ToolchainError::Query {
            package: package.to_owned(),
            mode,
            source,
        })
}

/// Append `segment` separated by a single space, ignoring blank segments.
fn push_segment(flags: &mut String, segment: &str) {
    let trimmed = segment.trim();
    if trimmed.is_empty() {
        return;
    }
    if !flags.is_empty() {
        flags.push(' ');
    }
    flags.push_str(trimmed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "-O3", "-O3")]
    #[case("-Wall", "-O3", "-Wall -O3")]
    #[case("-Wall", "   ", "-Wall")]
    #[case("-Wall", " -lfmt \n", "-Wall -lfmt")]
    fn push_segment_separates_with_single_space(
        #[case] initial: &str,
        #[case] segment: &str,
        #[case] expected: &str,
    ) {
        let mut flags = initial.to_owned();
        push_segment(&mut flags, segment);
        assert_eq!(flags, expected);
    }

    #[rstest]
    #[case(BuildMode::Debug, DEBUG_FLAGS, "debug")]
    #[case(BuildMode::Release, RELEASE_FLAGS, "release")]
    fn build_mode_flags(#[case] mode: BuildMode, #[case] flags: &str, #[case] name: &str) {
        assert_eq!(mode.flags(), flags);
        assert_eq!(mode.to_string(), name);
    }

    #[rstest]
    #[case("-lfmt", "-lfmt")]
    #[case("-Wl,-rpath,$ORIGIN/lib", "-Wl,-rpath,$$ORIGIN/lib")]
    #[case("$$", "$$$$")]
    fn escape_dollars_doubles_every_dollar(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_dollars(input), expected);
    }

    #[test]
    fn default_mode_is_debug() {
        assert_eq!(BuildMode::default(), BuildMode::Debug);
    }
}
