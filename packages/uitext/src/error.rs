//! Error types for resource loading and lookup.
//!
//! A missing lookup is never an error: groups and strings that do not exist
//! are reported as `None`. Everything here is a failure to obtain or parse a
//! resource document, or a misuse of a source-specific accessor.

use std::path::PathBuf;

use thiserror::Error;

use crate::source::SourceKind;

/// Main error type for the uitext library.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Reading or stat-ing a backing file failed.
    #[error("Failed to access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP client could not be constructed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Fetching a URL-backed document failed.
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Remote document exceeds the configured size limit.
    #[error("Response from {url} is too large: {size} bytes (limit {limit})")]
    ResponseTooLarge { url: String, size: u64, limit: u64 },

    /// The given string is not a valid URL.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Source bytes are not valid UTF-8.
    #[error("Resource {descriptor} is not valid UTF-8")]
    Encoding { descriptor: String },

    /// The document is not well-formed XML.
    #[error("XML parsing failed: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The document is well-formed but violates the resource grammar.
    #[error("Invalid resource document at {line}:{column}: {message}")]
    Schema {
        line: u32,
        column: u32,
        message: String,
    },

    /// Language code outside the supported vocabulary.
    #[error("Unknown language code: '{0}'")]
    UnknownLanguage(String),

    /// Country code outside the supported vocabulary.
    #[error("Unknown country code: '{0}'")]
    UnknownCountry(String),

    /// A source-specific accessor was called on a document of another kind.
    #[error("Wrong source kind: expected {expected}, document is {actual}")]
    WrongSourceKind {
        expected: SourceKind,
        actual: SourceKind,
    },

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Result type alias for uitext operations.
pub type Result<T> = std::result::Result<T, ResourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_display() {
        let err = ResourceError::Schema {
            line: 3,
            column: 7,
            message: "<text> requires an 'id' attribute".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid resource document at 3:7: <text> requires an 'id' attribute"
        );
    }

    #[test]
    fn test_wrong_source_kind_display() {
        let err = ResourceError::WrongSourceKind {
            expected: SourceKind::Uri,
            actual: SourceKind::File,
        };
        assert_eq!(
            err.to_string(),
            "Wrong source kind: expected uri, document is file"
        );
    }

    #[test]
    fn test_unknown_codes_display() {
        assert!(ResourceError::UnknownLanguage("xx".to_string())
            .to_string()
            .contains("'xx'"));
        assert!(ResourceError::UnknownCountry("fr".to_string())
            .to_string()
            .contains("'fr'"));
    }
}
