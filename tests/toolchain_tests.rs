//! Tests for toolchain flag resolution using a mocked package source.
//!
//! The mock stands in for `pkg-config` so the tests control every answer and
//! can assert exactly which lookups happen.

use camino::Utf8PathBuf;
use mockall::{Sequence, mock, predicate::eq};
use ninjaconf::ninja_gen::{compile_command, link_command};
use ninjaconf::toolchain::{
    BuildMode, DEBUG_FLAGS, FlagOverrides, PackageQuery, QueryError, QueryMode, RELEASE_FLAGS,
    ToolchainError, ToolchainRequest, resolve,
};
use rstest::{fixture, rstest};
use test_support::display_error_chain;

mock! {
    pub Packages {}
    impl PackageQuery for Packages {
        fn query(&self, package: &str, mode: QueryMode) -> Result<String, QueryError>;
    }
}

#[fixture]
fn request() -> ToolchainRequest {
    ToolchainRequest {
        mode: BuildMode::Debug,
        compiler: "c++".into(),
        linker: "c++".into(),
        overrides: FlagOverrides::default(),
        root: Utf8PathBuf::from("/work"),
        include_dir: "src".into(),
        packages: Vec::new(),
    }
}

fn no_packages() -> MockPackages {
    let mut packages = MockPackages::new();
    packages.expect_query().never();
    packages
}

#[rstest]
#[case(BuildMode::Debug, DEBUG_FLAGS, RELEASE_FLAGS)]
#[case(BuildMode::Release, RELEASE_FLAGS, DEBUG_FLAGS)]
fn exactly_one_mode_contributes_flags(
    mut request: ToolchainRequest,
    #[case] mode: BuildMode,
    #[case] present: &str,
    #[case] absent: &str,
) {
    request.mode = mode;
    let config = resolve(&request, &no_packages()).expect("resolve");
    assert!(config.compile_flags.contains(present));
    assert!(!config.compile_flags.contains(absent));
    assert!(config.link_flags.contains(present));
    assert_eq!(config.mode, mode);
}

#[rstest]
fn debug_defaults_are_assembled_in_order(request: ToolchainRequest) {
    let config = resolve(&request, &no_packages()).expect("resolve");
    assert_eq!(
        config.compile_flags,
        "-Wall -Wextra -std=c++17 -I/work/src -fPIC -O0 -g -DDEBUG -MMD -MF $out.d"
    );
    assert_eq!(
        config.link_flags,
        "-Wall -Wextra -std=c++17 -I/work/src -fPIC -O0 -g -DDEBUG"
    );
    assert_eq!(config.dep_flags, "-MMD -MF $out.d");
}

#[rstest]
fn compile_override_replaces_defaults_but_keeps_depflags(mut request: ToolchainRequest) {
    request.overrides.compile_flags = Some("-O2".into());
    let config = resolve(&request, &no_packages()).expect("resolve");
    assert_eq!(config.compile_flags, "-O2 -MMD -MF $out.d");
    assert_eq!(config.link_flags, "-O2");
}

#[rstest]
fn root_placeholder_in_override_is_quoted(mut request: ToolchainRequest) {
    request.root = Utf8PathBuf::from("/my project");
    request.overrides.compile_flags = Some("-I{root}/include".into());
    let config = resolve(&request, &no_packages()).expect("resolve");
    assert_eq!(config.compile_flags, "-I'/my project'/include -MMD -MF $out.d");
}

#[rstest]
fn dollars_from_root_and_packages_are_escaped_for_ninja(mut request: ToolchainRequest) {
    request.root = Utf8PathBuf::from("/work$dir");
    request.packages = vec!["zlib".into()];
    let mut packages = MockPackages::new();
    packages
        .expect_query()
        .with(eq("zlib"), eq(QueryMode::Cflags))
        .return_once(|_, _| Ok("-I$HOME/zlib".into()));
    packages
        .expect_query()
        .with(eq("zlib"), eq(QueryMode::Libs))
        .return_once(|_, _| Ok("-Wl,-rpath,$ORIGIN/lib -lz".into()));
    let config = resolve(&request, &packages).expect("resolve");

    let compile = compile_command(&config);
    assert!(compile.contains("-I'/work$$dir/src'"), "got: {compile}");
    assert!(compile.contains("-I$$HOME/zlib"), "got: {compile}");
    // Depfile flags keep their Ninja variable.
    assert!(compile.ends_with("-MMD -MF $out.d -c $in -o $out"), "got: {compile}");

    let link = link_command(&config);
    assert!(link.contains("-Wl,-rpath,$$ORIGIN/lib -lz -o $out"), "got: {link}");
}

#[rstest]
fn override_keeps_ninja_variables_but_escapes_root(mut request: ToolchainRequest) {
    request.root = Utf8PathBuf::from("/work$dir");
    request.overrides.compile_flags = Some("-I{root}/include -DOUT=$out".into());
    let config = resolve(&request, &no_packages()).expect("resolve");
    assert_eq!(
        config.compile_flags,
        "-I'/work$$dir'/include -DOUT=$out -MMD -MF $out.d"
    );
}

#[rstest]
#[case("/work", "my src", "-I'/work/my src'")]
#[case("/my work", "src", "-I'/my work/src'")]
#[case("/work", "include", "-I/work/include")]
fn include_directory_is_one_shell_word(
    mut request: ToolchainRequest,
    #[case] root: &str,
    #[case] include_dir: &str,
    #[case] expected: &str,
) {
    request.root = Utf8PathBuf::from(root);
    request.include_dir = include_dir.into();
    let config = resolve(&request, &no_packages()).expect("resolve");
    let compile = compile_command(&config);
    assert!(compile.contains(&format!(" {expected} -fPIC")), "got: {compile}");
    assert!(config.link_flags.contains(expected), "got: {}", config.link_flags);
}

#[rstest]
fn empty_overrides_suppress_defaults(mut request: ToolchainRequest) {
    request.overrides = FlagOverrides {
        compile_flags: Some(String::new()),
        link_flags: Some(String::new()),
        dep_flags: String::new(),
    };
    let config = resolve(&request, &no_packages()).expect("resolve");
    assert_eq!(config.compile_flags, "");
    assert_eq!(config.link_flags, "");
}

#[rstest]
fn link_override_still_receives_package_libs(mut request: ToolchainRequest) {
    request.packages = vec!["fmt".into()];
    request.overrides.link_flags = Some("-static".into());
    let mut packages = MockPackages::new();
    packages
        .expect_query()
        .with(eq("fmt"), eq(QueryMode::Cflags))
        .return_once(|_, _| Ok("-I/opt/fmt/include".into()));
    packages
        .expect_query()
        .with(eq("fmt"), eq(QueryMode::Libs))
        .return_once(|_, _| Ok("-lfmt".into()));
    let config = resolve(&request, &packages).expect("resolve");
    assert_eq!(config.link_flags, "-static -lfmt");
    assert!(config.compile_flags.contains("-I/opt/fmt/include"));
}

#[rstest]
fn package_flags_follow_request_order(mut request: ToolchainRequest) {
    request.packages = vec!["gtest".into(), "fmt".into()];
    let mut packages = MockPackages::new();
    let mut seq = Sequence::new();
    for (package, mode, answer) in [
        ("gtest", QueryMode::Cflags, "-I/g"),
        ("fmt", QueryMode::Cflags, "-I/f"),
        ("gtest", QueryMode::Libs, "-lgtest"),
        ("fmt", QueryMode::Libs, "-lfmt"),
    ] {
        packages
            .expect_query()
            .with(eq(package), eq(mode))
            .times(1)
            .in_sequence(&mut seq)
            .return_once(move |_, _| Ok(answer.to_owned()));
    }
    let config = resolve(&request, &packages).expect("resolve");
    assert!(config.compile_flags.ends_with("-O0 -g -DDEBUG -I/g -I/f -MMD -MF $out.d"));
    // The link copy carries the package cflags before the libs.
    assert!(config.link_flags.ends_with("-O0 -g -DDEBUG -I/g -I/f -lgtest -lfmt"));
}

#[rstest]
fn failed_query_is_fatal(mut request: ToolchainRequest) {
    request.packages = vec!["nosuchpkg".into()];
    let mut packages = MockPackages::new();
    packages
        .expect_query()
        .with(eq("nosuchpkg"), eq(QueryMode::Cflags))
        .times(1)
        .returning(|_, _| {
            Err(QueryError::Exit {
                program: "pkg-config".into(),
                status: Some(1),
                stderr: "Package nosuchpkg was not found".into(),
            })
        });
    let err = resolve(&request, &packages).expect_err("query failure");
    assert!(matches!(
        &err,
        ToolchainError::Query {
            mode: QueryMode::Cflags,
            package,
            ..
        } if package == "nosuchpkg"
    ));
    assert_eq!(
        display_error_chain(&err),
        "querying cflags for package 'nosuchpkg' failed: \
         pkg-config exited with status 1: Package nosuchpkg was not found"
    );
}

#[rstest]
fn unquotable_root_is_rejected(mut request: ToolchainRequest) {
    request.root = Utf8PathBuf::from("/bad\0root");
    let err = resolve(&request, &no_packages()).expect_err("NUL in root");
    assert!(matches!(err, ToolchainError::UnquotableRoot { .. }));
}

#[rstest]
fn compiler_and_linker_are_passed_through(mut request: ToolchainRequest) {
    request.compiler = "clang++".into();
    request.linker = "g++".into();
    let config = resolve(&request, &no_packages()).expect("resolve");
    assert_eq!(config.compiler, "clang++");
    assert_eq!(config.linker, "g++");
}
