//! Integration tests for CLI execution using `assert_cmd`.
//!
//! These tests invoke the compiled binary against throwaway project trees,
//! with a fake `pkg-config` selected through the environment, and verify the
//! build file it writes.
#![cfg(unix)]

use anyhow::{Context, Result, ensure};
use assert_cmd::Command;
use pkg_config_env::PKG_CONFIG_ENV;
use predicates::prelude::*;
use std::path::Path;
use test_support::{FakePackage, ProjectTree, fake_pkg_config};

const GTEST: FakePackage = FakePackage::new("gtest", "-I/opt/gtest/include", "-lgtest -pthread");

fn ninjaconf(pkg_config: &Path, root: &Path) -> Result<Command> {
    let mut cmd = Command::cargo_bin("ninjaconf").context("locate ninjaconf binary")?;
    cmd.env(PKG_CONFIG_ENV, pkg_config).arg("--root").arg(root);
    Ok(cmd)
}

#[test]
fn writes_build_file_for_project() -> Result<()> {
    let (_pkg_dir, pkg_config) = fake_pkg_config(&[GTEST])?;
    let tree = ProjectTree::with_sources(&["a.cc", "b.cc", "main.cc"], &["t.cc"])?;
    ninjaconf(&pkg_config, tree.path())?
        .args(["--pkg", "gtest"])
        .assert()
        .success();

    let ninja = tree.read("build.ninja")?;
    ensure!(
        ninja.contains("build tests/run: link tests/t.o src/a.o src/b.o\n"),
        "harness should reuse program objects without main.o, got:\n{ninja}"
    );
    ensure!(
        ninja.contains("-I/opt/gtest/include") && ninja.contains("-lgtest -pthread -o $out"),
        "package flags should be applied, got:\n{ninja}"
    );
    ensure!(ninja.ends_with("default app\n"), "default should be app");
    Ok(())
}

#[test]
fn repeated_runs_are_byte_identical() -> Result<()> {
    let (_pkg_dir, pkg_config) = fake_pkg_config(&[GTEST])?;
    let tree = ProjectTree::with_sources(&["z.cc", "a.cc", "main.cc"], &["t2.cc", "t1.cc"])?;
    ninjaconf(&pkg_config, tree.path())?
        .args(["-p", "gtest"])
        .assert()
        .success();
    let first = tree.read("build.ninja")?;
    ninjaconf(&pkg_config, tree.path())?
        .args(["-p", "gtest"])
        .assert()
        .success();
    let second = tree.read("build.ninja")?;
    ensure!(first == second, "outputs differ:\n{first}\n---\n{second}");
    Ok(())
}

#[test]
fn release_mode_selects_release_flags() -> Result<()> {
    let (_pkg_dir, pkg_config) = fake_pkg_config(&[])?;
    let tree = ProjectTree::with_sources(&["main.cc"], &[])?;
    ninjaconf(&pkg_config, tree.path())?
        .arg("--release")
        .assert()
        .success();
    let ninja = tree.read("build.ninja")?;
    ensure!(ninja.contains("-O3 -flto"), "missing release flags:\n{ninja}");
    ensure!(!ninja.contains("-O0 -g"), "debug flags leaked:\n{ninja}");
    Ok(())
}

#[test]
fn stdout_mode_prints_without_writing() -> Result<()> {
    let (_pkg_dir, pkg_config) = fake_pkg_config(&[])?;
    let tree = ProjectTree::with_sources(&["main.cc"], &["t.cc"])?;
    ninjaconf(&pkg_config, tree.path())?
        .arg("--stdout")
        .assert()
        .success()
        .stdout(predicate::str::contains("rule cxx").and(predicate::str::contains("default app")));
    ensure!(
        !tree.root().join("build.ninja").exists(),
        "--stdout should not write build.ninja"
    );
    Ok(())
}

#[test]
fn failed_package_query_keeps_previous_file() -> Result<()> {
    let (_pkg_dir, pkg_config) = fake_pkg_config(&[])?;
    let tree = ProjectTree::with_sources(&["main.cc"], &[])?;
    std::fs::write(tree.root().join("build.ninja"), "# previous\n")
        .context("seed previous build file")?;
    ninjaconf(&pkg_config, tree.path())?
        .args(["--pkg", "nosuchpkg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nosuchpkg"));
    ensure!(
        tree.read("build.ninja")? == "# previous\n",
        "previous build file should be untouched"
    );
    Ok(())
}

#[test]
fn failed_package_query_writes_nothing() -> Result<()> {
    let (_pkg_dir, pkg_config) = fake_pkg_config(&[])?;
    let tree = ProjectTree::with_sources(&["main.cc"], &[])?;
    ninjaconf(&pkg_config, tree.path())?
        .args(["--pkg", "nosuchpkg"])
        .assert()
        .failure();
    ensure!(
        !tree.root().join("build.ninja").exists(),
        "no build file should be written on failure"
    );
    Ok(())
}

#[test]
fn missing_root_fails() -> Result<()> {
    let (_pkg_dir, pkg_config) = fake_pkg_config(&[])?;
    let tree = ProjectTree::new()?;
    ninjaconf(&pkg_config, &tree.path().join("absent"))?
        .assert()
        .failure()
        .stderr(predicate::str::contains("locating project root"));
    Ok(())
}

#[test]
fn colliding_sources_fail() -> Result<()> {
    let (_pkg_dir, pkg_config) = fake_pkg_config(&[])?;
    let tree = ProjectTree::with_sources(&["util.cc", "util.cpp", "main.cc"], &[])?;
    ninjaconf(&pkg_config, tree.path())?
        .args(["--ext", "cc", "--ext", "cpp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("src/util.o"));
    ensure!(
        !tree.root().join("build.ninja").exists(),
        "no build file should be written on failure"
    );
    Ok(())
}

#[test]
fn flag_overrides_replace_defaults() -> Result<()> {
    let (_pkg_dir, pkg_config) = fake_pkg_config(&[])?;
    let tree = ProjectTree::with_sources(&["main.cc"], &[])?;
    ninjaconf(&pkg_config, tree.path())?
        .args(["--cxx", "clang++", "--cxxflags=-O2 -DNDEBUG", "--ldflags=-static"])
        .assert()
        .success();
    let ninja = tree.read("build.ninja")?;
    ensure!(
        ninja.contains("command = clang++ -O2 -DNDEBUG -MMD -MF $out.d -c $in -o $out\n"),
        "compile override not applied:\n{ninja}"
    );
    ensure!(
        ninja.contains("command = c++ $in -static -o $out\n"),
        "link override not applied:\n{ninja}"
    );
    Ok(())
}
