//! URL fetching.
//!
//! The [`Fetcher`] trait abstracts the fetch-and-strip-HTML step so
//! hosts and tests can swap implementations. Production fetchers should
//! be wrapped in [`ValidatedFetcher`] for SSRF protection.

pub mod http;
pub mod validator;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::FetchResult;

pub use http::HttpFetcher;
pub use validator::{UrlValidator, ValidatedFetcher};

/// A fetched page, already stripped to readable text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedPage {
    /// The URL that was requested
    pub url: String,

    /// The URL after redirects
    pub final_url: String,

    /// Page title if the response had one
    pub title: Option<String>,

    /// Readable text content
    pub text: String,

    /// Content type from the response headers
    pub content_type: Option<String>,

    /// SHA-256 hash of the text, hex-encoded
    pub content_hash: String,

    /// When the page was fetched
    pub fetched_at: DateTime<Utc>,
}

impl FetchedPage {
    /// Create a new fetched page; the content hash is computed from the text.
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        let url = url.into();
        let text = text.into();
        let content_hash = Self::hash_content(&text);
        Self {
            final_url: url.clone(),
            url,
            title: None,
            text,
            content_type: None,
            content_hash,
            fetched_at: Utc::now(),
        }
    }

    /// Calculate the SHA-256 hash of content.
    pub fn hash_content(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Set the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the final URL after redirects.
    pub fn with_final_url(mut self, final_url: impl Into<String>) -> Self {
        self.final_url = final_url.into();
        self
    }

    /// Set the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Check if this page has any non-whitespace content.
    pub fn has_content(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Fetcher trait for retrieving page text from a URL.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch a URL and return its readable text.
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage>;

    /// The fetcher name (for logging).
    fn name(&self) -> &str {
        "unknown"
    }
}
