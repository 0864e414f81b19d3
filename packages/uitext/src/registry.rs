//! Cache of loaded documents by content name.
//!
//! The registry maps a logical content name to one [`Document`]. Loads are
//! serialized through a single registry-wide lock, so two callers can never
//! both see a name as uncached and construct it twice. Freshness is owned by
//! the document: loading a cached file-backed name asks the document to
//! refresh itself, URL and inline documents are never refreshed.
//!
//! # Example
//!
//! ```no_run
//! use uitext::codes::Language;
//! use uitext::Registry;
//!
//! let registry = Registry::new();
//! let doc = registry.load_from_file("shop", "texts/shop.xml")?;
//! let gui = doc.get_group("gui", Language::En, None)?;
//! let label = gui.as_ref().and_then(|g| g.get("search"));
//! # Ok::<(), uitext::ResourceError>(())
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, LazyLock, Mutex, PoisonError, RwLock};

use crate::document::Document;
use crate::error::Result;
use crate::source::{Backends, ResourceSource};

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Process-lifetime cache of documents by content name.
#[derive(Debug)]
pub struct Registry {
    backends: Backends,
    cache: RwLock<HashMap<String, Arc<Document>>>,
    load_lock: Mutex<()>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create an empty registry using the operating system and HTTP.
    #[must_use]
    pub fn new() -> Self {
        Self::with_backends(Backends::default())
    }

    /// Create an empty registry with custom I/O backends.
    #[must_use]
    pub fn with_backends(backends: Backends) -> Self {
        Self {
            backends,
            cache: RwLock::new(HashMap::new()),
            load_lock: Mutex::new(()),
        }
    }

    /// The process-wide registry.
    #[must_use]
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Load a file-backed document, or return the cached one.
    ///
    /// A cached file-backed document is reparsed first when its file
    /// changed. `path` may be a plain path or a `file://` descriptor.
    pub fn load_from_file(
        &self,
        content_name: &str,
        path: impl AsRef<Path>,
    ) -> Result<Arc<Document>> {
        let source = ResourceSource::file(path);
        self.load(content_name, source, true)
    }

    /// Load a URL-backed document, or return the cached one.
    ///
    /// URL-backed documents are fetched once and never refreshed.
    pub fn load_from_url(&self, content_name: &str, url: &str) -> Result<Arc<Document>> {
        self.load(content_name, ResourceSource::Uri(url.to_string()), false)
    }

    /// Load a document from XML text, or return the cached one.
    pub fn load_from_str(&self, content_name: &str, xml: &str) -> Result<Arc<Document>> {
        self.load(
            content_name,
            ResourceSource::InlineString(xml.to_string()),
            false,
        )
    }

    /// Get a cached document without loading or refreshing anything.
    #[must_use]
    pub fn lookup(&self, content_name: &str) -> Option<Arc<Document>> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(content_name)
            .cloned()
    }

    /// Cached content names, sorted.
    #[must_use]
    pub fn content_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Number of cached documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn load(
        &self,
        content_name: &str,
        source: ResourceSource,
        refresh: bool,
    ) -> Result<Arc<Document>> {
        let _guard = self.load_lock.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(doc) = self.lookup(content_name) {
            if doc.source() != &source {
                tracing::debug!(
                    content_name,
                    cached = %doc.source().descriptor(),
                    requested = %source.descriptor(),
                    "Content name already cached from another source"
                );
            }
            if refresh && doc.refresh()? {
                tracing::debug!(content_name, "Refreshed cached document");
            } else {
                tracing::debug!(content_name, "Document cache hit");
            }
            return Ok(doc);
        }

        tracing::debug!(content_name, source = %source.descriptor(), "Loading document");
        let doc = Arc::new(Document::load(source, self.backends.clone())?);
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(content_name.to_string(), Arc::clone(&doc));
        Ok(doc)
    }
}
