//! Result type used by the command line front end.
//!
//! Library operations return [`release_publisher::Result`]; the binary wraps
//! every failure in a `color-eyre` report for colored, contextual output.

use color_eyre::eyre::Result as EyreResult;

/// Result type of all CLI commands.
///
/// ```rust,ignore
/// use crate::result::Result;
/// use color_eyre::eyre::Context;
///
/// fn read_notes(path: &Path) -> Result<String> {
///     let notes = std::fs::read_to_string(path)
///         .wrap_err("Failed to read release notes")?;
///     Ok(notes)
/// }
/// ```
pub type Result<T> = EyreResult<T>;
