//! Filesystem access for file-backed documents.
//!
//! Documents never touch `std::fs` directly; they go through a
//! [`Filesystem`] so that modification times can be simulated in tests.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::{ResourceError, Result};

/// Stat and read operations needed by file-backed documents.
pub trait Filesystem: Send + Sync {
    /// Modification time of `path` in epoch milliseconds.
    fn modified(&self, path: &Path) -> Result<i64>;

    /// Read the whole file at `path` as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> Result<String>;
}

/// [`Filesystem`] backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
    fn modified(&self, path: &Path) -> Result<i64> {
        let modified = fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .map_err(|source| ResourceError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(DateTime::<Utc>::from(modified).timestamp_millis())
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|source| ResourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        bytes_to_string(bytes, &path.display().to_string())
    }
}

/// Convert raw document bytes to a string, rejecting invalid UTF-8.
///
/// A leading byte order mark is dropped.
pub fn bytes_to_string(bytes: Vec<u8>, descriptor: &str) -> Result<String> {
    let text = String::from_utf8(bytes).map_err(|_| ResourceError::Encoding {
        descriptor: descriptor.to_string(),
    })?;
    match text.strip_prefix('\u{feff}') {
        Some(stripped) => Ok(stripped.to_string()),
        None => Ok(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_os_filesystem_reads_and_stats() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<content/>").unwrap();

        let fs = OsFilesystem;
        assert_eq!(fs.read_to_string(file.path()).unwrap(), "<content/>");
        assert!(fs.modified(file.path()).unwrap() > 0);
    }

    #[test]
    fn test_os_filesystem_missing_file() {
        let result = OsFilesystem.modified(Path::new("/nonexistent/uitext/content.xml"));
        assert!(matches!(result, Err(ResourceError::Io { .. })));
    }

    #[test]
    fn test_bytes_to_string_strips_bom() {
        let bytes = b"\xEF\xBB\xBF<content/>".to_vec();
        assert_eq!(bytes_to_string(bytes, "test").unwrap(), "<content/>");
    }

    #[test]
    fn test_bytes_to_string_rejects_invalid_utf8() {
        let result = bytes_to_string(vec![0xff, 0xfe, 0x00], "broken.xml");
        assert!(matches!(
            result,
            Err(ResourceError::Encoding { descriptor }) if descriptor == "broken.xml"
        ));
    }
}
