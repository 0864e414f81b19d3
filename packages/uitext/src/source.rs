//! Resource sources and how their raw XML is obtained.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use url::Url;

use crate::config::{file_descriptor, strip_file_prefix};
use crate::error::{ResourceError, Result};
use crate::http::{Fetcher, HttpFetcher};
use crate::storage::{Filesystem, OsFilesystem};

/// Kind of a [`ResourceSource`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    File,
    Uri,
    InlineString,
}

impl SourceKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Uri => "uri",
            Self::InlineString => "inline string",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a resource document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceSource {
    /// Local file; the only kind whose freshness can be checked.
    File(PathBuf),
    /// Document behind a URL, fetched once.
    Uri(String),
    /// XML text held in memory.
    InlineString(String),
}

impl ResourceSource {
    /// File source from a path or a `file://` descriptor.
    pub fn file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match path.to_str() {
            Some(text) => Self::File(PathBuf::from(strip_file_prefix(text))),
            None => Self::File(path.to_path_buf()),
        }
    }

    #[must_use]
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::File(_) => SourceKind::File,
            Self::Uri(_) => SourceKind::Uri,
            Self::InlineString(_) => SourceKind::InlineString,
        }
    }

    /// Human-readable descriptor used in logs and error messages.
    #[must_use]
    pub fn descriptor(&self) -> String {
        match self {
            Self::File(path) => file_descriptor(path),
            Self::Uri(uri) => uri.clone(),
            Self::InlineString(_) => "<inline>".to_string(),
        }
    }

    /// Read the raw XML of this source.
    pub fn read(&self, backends: &Backends) -> Result<String> {
        match self {
            Self::File(path) => backends.filesystem.read_to_string(path),
            Self::Uri(uri) => read_uri(uri, backends),
            Self::InlineString(xml) => Ok(xml.clone()),
        }
    }
}

/// `file:` URLs are read locally, everything else goes through the fetcher.
fn read_uri(uri: &str, backends: &Backends) -> Result<String> {
    let url = Url::parse(uri).map_err(|source| ResourceError::InvalidUrl {
        url: uri.to_string(),
        source,
    })?;

    if url.scheme() == "file" {
        let path = url.to_file_path().map_err(|()| ResourceError::Io {
            path: PathBuf::from(url.path()),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "file URL does not name a local path",
            ),
        })?;
        return backends.filesystem.read_to_string(&path);
    }

    backends.fetcher.fetch(url.as_str())
}

/// I/O backends shared by a registry and the documents it loads.
#[derive(Clone)]
pub struct Backends {
    pub filesystem: Arc<dyn Filesystem>,
    pub fetcher: Arc<dyn Fetcher>,
}

impl Backends {
    #[must_use]
    pub fn new(filesystem: Arc<dyn Filesystem>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            filesystem,
            fetcher,
        }
    }
}

impl Default for Backends {
    fn default() -> Self {
        Self::new(Arc::new(OsFilesystem), Arc::new(HttpFetcher::new()))
    }
}

impl fmt::Debug for Backends {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backends").finish_non_exhaustive()
    }
}
