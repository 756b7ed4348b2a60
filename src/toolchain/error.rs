//! Error types for toolchain resolution.

use std::io;

use thiserror::Error;

use super::QueryMode;

/// Failure of a single package-metadata lookup.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The metadata tool could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// Program that was invoked.
        program: String,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
    /// The metadata tool ran but reported failure.
    #[error("{program} exited with {}: {stderr}", describe_status(.status))]
    Exit {
        /// Program that was invoked.
        program: String,
        /// Exit status (`None` when terminated by a signal).
        status: Option<i32>,
        /// Captured standard error, trimmed.
        stderr: String,
    },
    /// The metadata tool printed something that is not UTF-8.
    #[error("{program} printed non-UTF-8 output")]
    NonUtf8 {
        /// Program that was invoked.
        program: String,
    },
}

/// Errors raised while resolving a [`super::ToolchainConfig`].
#[derive(Debug, Error)]
pub enum ToolchainError {
    /// A package's compile or link requirements could not be determined.
    #[error("querying {mode} for package '{package}' failed")]
    Query {
        /// Package that was queried.
        package: String,
        /// Kind of flags requested.
        mode: QueryMode,
        /// Cause of the failure.
        #[source]
        source: QueryError,
    },
    /// The project root cannot be quoted for the shell.
    #[error("project root '{root}' cannot be quoted for the shell")]
    UnquotableRoot {
        /// Offending root path.
        root: String,
    },
}

fn describe_status(status: &Option<i32>) -> String {
    status.map_or_else(|| String::from("a signal"), |code| format!("status {code}"))
}
