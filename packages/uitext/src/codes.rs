//! Closed language and country vocabularies accepted by the resource grammar.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ResourceError;

/// Language of a text variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    De,
    En,
    Fr,
    It,
    Es,
    Pl,
    Nl,
    Ru,
    /// Language-independent system string.
    Sys,
}

impl Language {
    /// All supported languages, in grammar order.
    pub const ALL: [Language; 9] = [
        Self::De,
        Self::En,
        Self::Fr,
        Self::It,
        Self::Es,
        Self::Pl,
        Self::Nl,
        Self::Ru,
        Self::Sys,
    ];

    /// Get the code as written in resource documents.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::De => "de",
            Self::En => "en",
            Self::Fr => "fr",
            Self::It => "it",
            Self::Es => "es",
            Self::Pl => "pl",
            Self::Nl => "nl",
            Self::Ru => "ru",
            Self::Sys => "sys",
        }
    }

    /// Whether this is the language-independent system pseudo-language.
    #[must_use]
    pub fn is_system(&self) -> bool {
        matches!(self, Self::Sys)
    }
}

impl FromStr for Language {
    type Err = ResourceError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|language| language.as_str() == code)
            .ok_or_else(|| ResourceError::UnknownLanguage(code.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Country of a regional text variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    At,
    De,
    Ch,
    Uk,
    Us,
    Ru,
}

impl Country {
    /// All supported countries, in grammar order.
    pub const ALL: [Country; 6] = [
        Self::At,
        Self::De,
        Self::Ch,
        Self::Uk,
        Self::Us,
        Self::Ru,
    ];

    /// Get the code as written in resource documents.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::At => "at",
            Self::De => "de",
            Self::Ch => "ch",
            Self::Uk => "uk",
            Self::Us => "us",
            Self::Ru => "ru",
        }
    }
}

impl FromStr for Country {
    type Err = ResourceError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|country| country.as_str() == code)
            .ok_or_else(|| ResourceError::UnknownCountry(code.to_string()))
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes_parse_back() {
        for language in Language::ALL {
            assert_eq!(language.as_str().parse::<Language>().unwrap(), language);
        }
    }

    #[test]
    fn test_country_codes_parse_back() {
        for country in Country::ALL {
            assert_eq!(country.as_str().parse::<Country>().unwrap(), country);
        }
    }

    #[test]
    fn test_codes_are_case_sensitive() {
        assert!("EN".parse::<Language>().is_err());
        assert!("US".parse::<Country>().is_err());
    }

    #[test]
    fn test_unknown_codes_rejected() {
        assert!(matches!(
            "xx".parse::<Language>(),
            Err(ResourceError::UnknownLanguage(code)) if code == "xx"
        ));
        assert!(matches!(
            "fr".parse::<Country>(),
            Err(ResourceError::UnknownCountry(code)) if code == "fr"
        ));
    }

    #[test]
    fn test_system_language() {
        assert!(Language::Sys.is_system());
        assert!(!Language::En.is_system());
    }
}
