//! Command line interface definition using clap.
//!
//! This module defines the [`Cli`] structure. It is also compiled by
//! `build.rs` to render the manual page, so it only depends on `clap` and the
//! standard library.

use clap::Parser;
use std::path::PathBuf;

/// Default compiler and linker driver.
pub const DEFAULT_CXX: &str = "c++";
/// Default flags asking the compiler to write a depfile next to each object.
pub const DEFAULT_DEPFLAGS: &str = "-MMD -MF $out.d";

/// Generate a Ninja build file for a C++ project.
#[derive(Debug, Parser, Clone, PartialEq, Eq)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project root directory; defaults to the current directory.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Enable release mode instead of the default debug mode.
    #[arg(short, long)]
    pub release: bool,

    /// C++ compiler.
    #[arg(short = 'c', long, value_name = "PROG", default_value = DEFAULT_CXX)]
    pub cxx: String,

    /// C++ compiler flags; replaces the mode defaults entirely.
    #[arg(short = 'C', long, value_name = "FLAGS", allow_hyphen_values = true)]
    pub cxxflags: Option<String>,

    /// Depfile generation flags, always appended to the compiler flags.
    #[arg(
        short = 'D',
        long,
        value_name = "FLAGS",
        default_value = DEFAULT_DEPFLAGS,
        allow_hyphen_values = true
    )]
    pub depflags: String,

    /// Linker.
    #[arg(short = 'l', long, value_name = "PROG", default_value = DEFAULT_CXX)]
    pub ld: String,

    /// Linker flags; equal to the compiler flags when omitted.
    #[arg(short = 'L', long, value_name = "FLAGS", allow_hyphen_values = true)]
    pub ldflags: Option<String>,

    /// Package whose `pkg-config` flags are added to the build.
    ///
    /// May be repeated.
    #[arg(short = 'p', long = "pkg", value_name = "NAME")]
    pub packages: Vec<String>,

    /// Directory holding the program sources, relative to the root.
    #[arg(long, value_name = "DIR", default_value = "src")]
    pub src_dir: String,

    /// Directory holding the test sources, relative to the root.
    #[arg(long, value_name = "DIR", default_value = "tests")]
    pub test_dir: String,

    /// Name of the program executable and default Ninja target.
    #[arg(short = 'n', long, value_name = "NAME", default_value = "app")]
    pub name: String,

    /// Name of the test harness executable.
    #[arg(long, value_name = "NAME", default_value = "tests/run")]
    pub test_name: String,

    /// File stem of the program source defining the entry point.
    ///
    /// Its object is left out of the test harness.
    #[arg(long, value_name = "STEM", default_value = "main")]
    pub entry_point: String,

    /// Source file extension to discover. May be repeated.
    #[arg(long = "ext", value_name = "EXT", default_values_t = [String::from("cc")])]
    pub extensions: Vec<String>,

    /// Directory for object files, relative to the root.
    ///
    /// Objects are written next to their sources when omitted.
    #[arg(long, value_name = "DIR")]
    pub obj_dir: Option<String>,

    /// Print the build file to standard output instead of writing it.
    #[arg(long)]
    pub stdout: bool,

    /// Enable verbose diagnostic logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            root: None,
            release: false,
            cxx: DEFAULT_CXX.to_owned(),
            cxxflags: None,
            depflags: DEFAULT_DEPFLAGS.to_owned(),
            ld: DEFAULT_CXX.to_owned(),
            ldflags: None,
            packages: Vec::new(),
            src_dir: String::from("src"),
            test_dir: String::from("tests"),
            name: String::from("app"),
            test_name: String::from("tests/run"),
            entry_point: String::from("main"),
            extensions: vec![String::from("cc")],
            obj_dir: None,
            stdout: false,
            verbose: false,
        }
    }
}
