//! Configuration constants and source-addressing helpers.

use std::path::Path;

/// Prefix used for the descriptor of file-backed documents.
pub const FILE_URI_PREFIX: &str = "file://";

/// HTTP timeout in seconds for URL-backed documents.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Default maximum size of a fetched resource document in bytes (16 MB).
///
/// Resource documents are small; anything larger is almost certainly not one.
pub const DEFAULT_MAX_RESPONSE_SIZE: u64 = 16 * 1024 * 1024;

/// User agent string sent when fetching URL-backed documents.
pub const USER_AGENT: &str = concat!("uitext/", env!("CARGO_PKG_VERSION"));

/// Build the `file://` descriptor for a path.
///
/// # Examples
/// ```
/// use uitext::config::file_descriptor;
///
/// assert_eq!(file_descriptor("/srv/text/gui.xml"), "file:///srv/text/gui.xml");
/// ```
pub fn file_descriptor(path: impl AsRef<Path>) -> String {
    format!("{FILE_URI_PREFIX}{}", path.as_ref().display())
}

/// Strip the `file://` prefix from a source descriptor, if present.
///
/// Strings without the prefix are returned unchanged, so plain paths can be
/// passed wherever a descriptor is accepted.
///
/// # Examples
/// ```
/// use uitext::config::strip_file_prefix;
///
/// assert_eq!(strip_file_prefix("file:///srv/text/gui.xml"), "/srv/text/gui.xml");
/// assert_eq!(strip_file_prefix("texts/gui.xml"), "texts/gui.xml");
/// ```
pub fn strip_file_prefix(descriptor: &str) -> &str {
    descriptor
        .strip_prefix(FILE_URI_PREFIX)
        .unwrap_or(descriptor)
}
