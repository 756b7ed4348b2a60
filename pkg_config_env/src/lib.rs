#![forbid(unsafe_code)]

//! Shared constants naming the package-metadata tool used across ninjaconf
//! crates (library, tests, and helpers).

/// Environment variable override for the `pkg-config` executable.
///
/// # Examples
///
/// ```
/// use pkg_config_env::{PKG_CONFIG_ENV, PKG_CONFIG_PROGRAM};
/// let program = std::env::var(PKG_CONFIG_ENV)
///     .unwrap_or_else(|_| PKG_CONFIG_PROGRAM.to_owned());
/// assert!(!program.is_empty());
/// ```
pub const PKG_CONFIG_ENV: &str = "NINJACONF_PKG_CONFIG";

/// Default package-metadata executable looked up on `PATH`.
pub const PKG_CONFIG_PROGRAM: &str = "pkg-config";
