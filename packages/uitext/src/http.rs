//! HTTP retrieval for URL-backed documents.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::{DEFAULT_MAX_RESPONSE_SIZE, HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::error::{ResourceError, Result};
use crate::storage::bytes_to_string;

/// Retrieval of remote resource documents.
pub trait Fetcher: Send + Sync {
    /// Fetch the document at `url` as UTF-8 text.
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` configured with timeout and user agent.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// [`Fetcher`] using a blocking HTTP client.
///
/// A single attempt is made per fetch; callers own any retry policy.
#[derive(Debug, Clone, Copy)]
pub struct HttpFetcher {
    max_size: u64,
}

impl HttpFetcher {
    /// Create a fetcher with the default response size limit.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_size: DEFAULT_MAX_RESPONSE_SIZE,
        }
    }

    /// Override the maximum accepted response size in bytes.
    #[must_use]
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    /// Maximum accepted response size in bytes.
    #[must_use]
    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    fn check_size(&self, url: &str, size: u64) -> Result<()> {
        if size > self.max_size {
            return Err(ResourceError::ResponseTooLarge {
                url: url.to_string(),
                size,
                limit: self.max_size,
            });
        }
        Ok(())
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        let client = create_client()?;
        let fetch_error = |source| ResourceError::Fetch {
            url: url.to_string(),
            source,
        };

        tracing::debug!(url, "Fetching resource document");
        let response = client
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(fetch_error)?;

        if let Some(length) = response.content_length() {
            self.check_size(url, length)?;
        }

        let bytes = response.bytes().map_err(fetch_error)?;
        self.check_size(url, bytes.len() as u64)?;

        bytes_to_string(bytes.to_vec(), url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        let client = create_client();
        assert!(client.is_ok());
    }

    #[test]
    fn test_size_limit() {
        let fetcher = HttpFetcher::new().with_max_size(10);
        assert_eq!(fetcher.max_size(), 10);
        assert!(fetcher.check_size("http://example.test/a.xml", 10).is_ok());
        assert!(matches!(
            fetcher.check_size("http://example.test/a.xml", 11),
            Err(ResourceError::ResponseTooLarge {
                size: 11,
                limit: 10,
                ..
            })
        ));
    }
}
