//! Named groups of localized strings and their fallback resolution.

use std::collections::HashMap;
use std::sync::Arc;

use crate::codes::{Country, Language};

/// Build the compound key under which a text variant is stored.
///
/// # Examples
/// ```
/// use uitext::codes::{Country, Language};
/// use uitext::group::compound_key;
///
/// assert_eq!(compound_key("search", Language::De, None), "search_de");
/// assert_eq!(compound_key("search", Language::De, Some(Country::At)), "search_de_at");
/// ```
pub fn compound_key(id: &str, language: Language, country: Option<Country>) -> String {
    match country {
        Some(country) => format!("{id}_{}_{}", language.as_str(), country.as_str()),
        None => format!("{id}_{}", language.as_str()),
    }
}

/// A named set of localized text entries.
///
/// Groups handed out by a [`Document`](crate::Document) are bound copies:
/// they carry the caller's `(language, country)` and share the entries map
/// with the stored group. Entries are copy-on-write, so writing through a
/// copy never affects the group it was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    name: String,
    entries: Arc<HashMap<String, String>>,
    language: Option<Language>,
    country: Option<Country>,
}

impl Group {
    /// Create an empty, unbound group.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Arc::default(),
            language: None,
            country: None,
        }
    }

    /// Get the group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Language this copy is bound to, if any.
    #[must_use]
    pub fn language(&self) -> Option<Language> {
        self.language
    }

    /// Country this copy is bound to, if any.
    #[must_use]
    pub fn country(&self) -> Option<Country> {
        self.country
    }

    /// Create a copy bound to `(language, country)` sharing the same entries.
    #[must_use]
    pub fn bind(&self, language: Language, country: Option<Country>) -> Self {
        Self {
            name: self.name.clone(),
            entries: Arc::clone(&self.entries),
            language: Some(language),
            country,
        }
    }

    /// Resolve a text id using the bound language and country.
    ///
    /// Lookup order, first match wins:
    /// 1. `id_<language>_<country>` (only when a country is bound)
    /// 2. `id_<language>`
    /// 3. `id` (system string)
    ///
    /// An unbound group only resolves system strings.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&str> {
        if let Some(language) = self.language {
            if let Some(country) = self.country {
                if let Some(text) = self.entries.get(&compound_key(id, language, Some(country))) {
                    return Some(text);
                }
            }
            if let Some(text) = self.entries.get(&compound_key(id, language, None)) {
                return Some(text);
            }
        }
        self.entries.get(id).map(String::as_str)
    }

    /// Store a language or country variant, replacing any previous value.
    pub fn put(
        &mut self,
        language: Language,
        country: Option<Country>,
        id: &str,
        text: impl Into<String>,
    ) {
        let key = compound_key(id, language, country);
        Arc::make_mut(&mut self.entries).insert(key, text.into());
    }

    /// Store a language-independent system string, replacing any previous value.
    pub fn put_system(&mut self, id: &str, text: impl Into<String>) {
        Arc::make_mut(&mut self.entries).insert(id.to_string(), text.into());
    }

    /// Number of stored entries across all variants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the group has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored compound keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Stored `(compound key, text)` pairs, sorted by key.
    #[must_use]
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .entries
            .iter()
            .map(|(key, text)| (key.as_str(), text.as_str()))
            .collect();
        entries.sort_unstable();
        entries
    }

    /// Whether two groups share the same entries map.
    #[must_use]
    pub fn shares_entries_with(&self, other: &Group) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}
