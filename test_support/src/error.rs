//! Error chain rendering for assertions on failed runs.

use std::error::Error;
use std::iter;

/// Render `err` followed by each of its sources, separated by `": "`.
///
/// This matches the `{:#}` form `anyhow` prints for a context chain, so tests
/// can compare typed errors and runner errors against the same text. Pass an
/// [`anyhow::Error`] via [`AsRef::as_ref`].
///
/// # Examples
///
/// ```
/// use test_support::display_error_chain;
///
/// let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory");
/// assert_eq!(display_error_chain(&missing), "no such directory");
/// ```
pub fn display_error_chain(err: &(dyn Error + 'static)) -> String {
    iter::successors(Some(err), |&current| current.source())
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}
