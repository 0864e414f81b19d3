//! A loaded resource document and its freshness policy.
//!
//! # Refresh model
//!
//! The parsed groups live in an immutable snapshot behind an [`ArcSwap`].
//! Readers load the current snapshot without locking. A refresh parses the
//! source into a new working set and only stores a new snapshot once the
//! whole parse has succeeded, so a broken edit never disturbs lookups that
//! were answerable before it.
//!
//! File-backed documents compare the file's modification time with the one
//! recorded at the last parse on every [`Document::get_group`]. Reparses are
//! serialized per document and re-checked after acquiring the lock, so two
//! readers noticing the same change parse it once.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use arc_swap::ArcSwap;

use crate::codes::{Country, Language};
use crate::error::{ResourceError, Result};
use crate::group::Group;
use crate::parser::{GroupMap, Parser};
use crate::source::{Backends, ResourceSource, SourceKind};

/// Published state of a document.
#[derive(Debug, Clone)]
struct Snapshot {
    groups: Arc<GroupMap>,
    /// Modification time the groups were parsed from (0 when unknown).
    last_modified: i64,
    /// Modification time of a revision that failed to parse.
    rejected: Option<i64>,
}

impl Snapshot {
    fn is_current(&self, modified: i64) -> bool {
        self.last_modified == modified || self.rejected == Some(modified)
    }
}

/// One loaded resource: its source, its parsed groups and its timestamp.
pub struct Document {
    source: ResourceSource,
    backends: Backends,
    snapshot: ArcSwap<Snapshot>,
    refresh_lock: Mutex<()>,
}

impl Document {
    /// Load and parse a document.
    ///
    /// A returned document is always queryable: construction fails if the
    /// first parse fails.
    pub fn load(source: ResourceSource, backends: Backends) -> Result<Self> {
        let last_modified = match &source {
            ResourceSource::File(path) => backends.filesystem.modified(path)?,
            ResourceSource::Uri(_) | ResourceSource::InlineString(_) => 0,
        };
        let groups = Parser::new(&source, &backends).parse()?;

        Ok(Self {
            source,
            backends,
            snapshot: ArcSwap::from_pointee(Snapshot {
                groups: Arc::new(groups),
                last_modified,
                rejected: None,
            }),
            refresh_lock: Mutex::new(()),
        })
    }

    /// Parse XML text held in memory, using the default backends.
    pub fn from_xml(xml: impl Into<String>) -> Result<Self> {
        Self::load(ResourceSource::InlineString(xml.into()), Backends::default())
    }

    /// Get a group bound to `(language, country)`.
    ///
    /// File-backed documents are refreshed first if the file changed since
    /// the last parse. Returns `Ok(None)` when the group does not exist.
    pub fn get_group(
        &self,
        name: &str,
        language: Language,
        country: Option<Country>,
    ) -> Result<Option<Group>> {
        self.refresh()?;
        Ok(self
            .get_group_without_check(name)
            .map(|group| group.bind(language, country)))
    }

    /// Get an unbound group from the current snapshot, skipping the
    /// freshness check.
    #[must_use]
    pub fn get_group_without_check(&self, name: &str) -> Option<Group> {
        self.snapshot.load().groups.get(name).cloned()
    }

    /// Reparse a file-backed document if its file changed.
    ///
    /// Returns `Ok(true)` when a new snapshot was published. Documents of
    /// other kinds are never refreshed. A revision that fails to parse is
    /// reported once and then ignored until the file changes again.
    pub fn refresh(&self) -> Result<bool> {
        let ResourceSource::File(path) = &self.source else {
            return Ok(false);
        };

        let modified = self.backends.filesystem.modified(path)?;
        if self.snapshot.load().is_current(modified) {
            return Ok(false);
        }

        let _guard = self.lock_refresh();
        // Another reader may have handled this revision while we waited.
        let current = self.snapshot.load_full();
        if current.is_current(modified) {
            return Ok(false);
        }

        tracing::info!(
            source = %self.source.descriptor(),
            previous = current.last_modified,
            modified,
            "Resource file changed, reparsing"
        );
        match Parser::new(&self.source, &self.backends).parse() {
            Ok(groups) => {
                self.publish(groups, modified);
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(
                    source = %self.source.descriptor(),
                    error = %e,
                    "Reparse failed, keeping previous groups"
                );
                self.snapshot.store(Arc::new(Snapshot {
                    rejected: Some(modified),
                    ..(*current).clone()
                }));
                Err(e)
            }
        }
    }

    /// Reparse the document unconditionally.
    ///
    /// On failure the previous groups stay in place.
    pub fn reload(&self) -> Result<()> {
        let _guard = self.lock_refresh();
        let modified = match &self.source {
            ResourceSource::File(path) => self.backends.filesystem.modified(path)?,
            ResourceSource::Uri(_) | ResourceSource::InlineString(_) => 0,
        };
        let groups = Parser::new(&self.source, &self.backends).parse()?;
        self.publish(groups, modified);
        Ok(())
    }

    fn publish(&self, groups: GroupMap, modified: i64) {
        self.snapshot.store(Arc::new(Snapshot {
            groups: Arc::new(groups),
            last_modified: modified,
            rejected: None,
        }));
    }

    fn lock_refresh(&self) -> MutexGuard<'_, ()> {
        self.refresh_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Where this document was loaded from.
    #[must_use]
    pub fn source(&self) -> &ResourceSource {
        &self.source
    }

    #[must_use]
    pub fn source_kind(&self) -> SourceKind {
        self.source.kind()
    }

    /// Modification time of the parsed revision in epoch milliseconds, 0
    /// for documents that are not file-backed.
    #[must_use]
    pub fn last_modified(&self) -> i64 {
        self.snapshot.load().last_modified
    }

    /// Names of all groups, sorted.
    #[must_use]
    pub fn group_names(&self) -> Vec<String> {
        self.snapshot.load().groups.keys().cloned().collect()
    }

    /// All groups of the current snapshot, unbound.
    #[must_use]
    pub fn groups(&self) -> Arc<GroupMap> {
        Arc::clone(&self.snapshot.load().groups)
    }

    /// URL of a URI-backed document.
    pub fn uri(&self) -> Result<&str> {
        match &self.source {
            ResourceSource::Uri(uri) => Ok(uri),
            other => Err(wrong_kind(SourceKind::Uri, other)),
        }
    }

    /// Path of a file-backed document.
    pub fn file_path(&self) -> Result<&Path> {
        match &self.source {
            ResourceSource::File(path) => Ok(path),
            other => Err(wrong_kind(SourceKind::File, other)),
        }
    }

    /// XML text of an inline document.
    pub fn xml(&self) -> Result<&str> {
        match &self.source {
            ResourceSource::InlineString(xml) => Ok(xml),
            other => Err(wrong_kind(SourceKind::InlineString, other)),
        }
    }
}

fn wrong_kind(expected: SourceKind, actual: &ResourceSource) -> ResourceError {
    ResourceError::WrongSourceKind {
        expected,
        actual: actual.kind(),
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.snapshot.load();
        f.debug_struct("Document")
            .field("source", &self.source.descriptor())
            .field("groups", &snapshot.groups.len())
            .field("last_modified", &snapshot.last_modified)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH: &str = r#"<content>
  <group name="gui">
    <text id="search">
      <lang id="en">Search</lang>
      <lang id="de">Suchen</lang>
    </text>
  </group>
</content>"#;

    #[test]
    fn test_round_trip_lookup() {
        let doc = Document::from_xml(SEARCH).unwrap();

        let en = doc.get_group("gui", Language::En, None).unwrap().unwrap();
        assert_eq!(en.get("search"), Some("Search"));

        let de_at = doc
            .get_group("gui", Language::De, Some(Country::At))
            .unwrap()
            .unwrap();
        assert_eq!(de_at.get("search"), Some("Suchen"));
    }

    #[test]
    fn test_missing_group_is_none() {
        let doc = Document::from_xml(SEARCH).unwrap();
        assert!(doc.get_group("menu", Language::En, None).unwrap().is_none());
        assert!(doc.get_group_without_check("menu").is_none());
    }

    #[test]
    fn test_bound_copies_share_entries() {
        let doc = Document::from_xml(SEARCH).unwrap();
        let en = doc.get_group("gui", Language::En, None).unwrap().unwrap();
        let stored = doc.get_group_without_check("gui").unwrap();

        assert!(en.shares_entries_with(&stored));
        assert_eq!(stored.language(), None);
    }

    #[test]
    fn test_inline_document_metadata() {
        let doc = Document::from_xml(SEARCH).unwrap();
        assert_eq!(doc.source_kind(), SourceKind::InlineString);
        assert_eq!(doc.last_modified(), 0);
        assert_eq!(doc.group_names(), vec!["gui".to_string()]);
        assert!(!doc.refresh().unwrap());
    }

    #[test]
    fn test_source_kind_accessors() {
        let doc = Document::from_xml(SEARCH).unwrap();
        assert_eq!(doc.xml().unwrap(), SEARCH);
        assert!(matches!(
            doc.uri(),
            Err(ResourceError::WrongSourceKind {
                expected: SourceKind::Uri,
                actual: SourceKind::InlineString,
            })
        ));
        assert!(matches!(
            doc.file_path(),
            Err(ResourceError::WrongSourceKind {
                expected: SourceKind::File,
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_document_fails_to_load() {
        let result = Document::from_xml("<content/>");
        assert!(matches!(result, Err(ResourceError::Schema { .. })));
    }

    #[test]
    fn test_reload_inline_keeps_content() {
        let doc = Document::from_xml(SEARCH).unwrap();
        doc.reload().unwrap();
        let en = doc.get_group("gui", Language::En, None).unwrap().unwrap();
        assert_eq!(en.get("search"), Some("Search"));
    }
}
