//! Fake `pkg-config` executables with canned answers.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::make_script_executable;

/// Canned `pkg-config` answers for a single package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakePackage {
    /// Package name as passed on the command line.
    pub name: &'static str,
    /// Output of `--cflags`.
    pub cflags: &'static str,
    /// Output of `--libs`.
    pub libs: &'static str,
}

impl FakePackage {
    /// Describe a package answering `cflags` and `libs`.
    pub const fn new(name: &'static str, cflags: &'static str, libs: &'static str) -> Self {
        Self { name, cflags, libs }
    }
}

/// Create a fake `pkg-config` answering `--cflags` and `--libs` for
/// `packages`.
///
/// Unknown packages make the script print a diagnostic to stderr and exit
/// with status `1`, mirroring the real tool. The script records nothing and
/// has no side effects.
///
/// Returns the temporary directory and the path to the executable.
pub fn fake_pkg_config(packages: &[FakePackage]) -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new().context("fake_pkg_config: create temp dir")?;
    let path = dir.path().join("pkg-config");
    fs::write(&path, script(packages))
        .with_context(|| format!("fake_pkg_config: write script {}", path.display()))?;
    make_script_executable(&path)?;
    Ok((dir, path))
}

fn script(packages: &[FakePackage]) -> String {
    let mut body = String::from("#!/bin/sh\ncase \"$1 $2\" in\n");
    for package in packages {
        body.push_str(&format!(
            "  \"--cflags {name}\") echo '{cflags}' ;;\n  \"--libs {name}\") echo '{libs}' ;;\n",
            name = package.name,
            cflags = package.cflags,
            libs = package.libs,
        ));
    }
    body.push_str(concat!(
        "  *) echo \"Package $2 was not found in the pkg-config search path\" >&2\n",
        "     exit 1 ;;\n",
        "esac\n",
    ));
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::process::Command;

    #[rstest]
    #[case("--cflags", "-I/opt/gtest/include")]
    #[case("--libs", "-lgtest")]
    fn known_package_is_answered(#[case] flag: &str, #[case] expected: &str) {
        let (_dir, path) = fake_pkg_config(&[FakePackage::new(
            "gtest",
            "-I/opt/gtest/include",
            "-lgtest",
        )])
        .expect("fake pkg-config");
        let output = Command::new(&path)
            .args([flag, "gtest"])
            .output()
            .expect("run script");
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), expected);
    }

    #[test]
    fn unknown_package_fails() {
        let (_dir, path) = fake_pkg_config(&[]).expect("fake pkg-config");
        let output = Command::new(&path)
            .args(["--cflags", "nosuchpkg"])
            .output()
            .expect("run script");
        assert_eq!(output.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&output.stderr).contains("nosuchpkg"));
    }
}
