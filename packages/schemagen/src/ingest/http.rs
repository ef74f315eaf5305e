//! HTTP fetcher with HTML-to-text stripping.

use async_trait::async_trait;
use chrono::Utc;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult};
use crate::ingest::{FetchedPage, Fetcher};

const DEFAULT_USER_AGENT: &str = "schemagen/0.1 (+https://github.com/schemagen)";

/// Fetches a URL over HTTP and strips HTML responses to readable text.
///
/// Non-HTML bodies pass through as-is, and if stripping yields nothing
/// the raw body is used, so downstream always sees whatever content
/// existed.
pub struct HttpFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    /// Create a new HTTP fetcher with a 30-second timeout.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

/// Does this body look like HTML even without a content-type header?
fn smells_like_html(body: &str) -> bool {
    let head = body.trim_start().get(..64).unwrap_or(body.trim_start());
    let lower = head.to_lowercase();
    lower.starts_with("<!doctype html") || lower.starts_with("<html")
}

/// Extract the `<title>` text from HTML.
pub fn extract_title(html: &str) -> Option<String> {
    let title_pattern = Regex::new(r"(?is)<title[^>]*>(.*?)</title>").ok()?;
    title_pattern
        .captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Strip HTML down to readable text.
///
/// Scripts and styles are removed, block-level closers become newlines,
/// remaining tags are dropped, basic entities are decoded, and runs of
/// blank lines are collapsed.
pub fn strip_html(html: &str) -> String {
    let mut text = html.to_string();

    let script_pattern = Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap();
    let style_pattern = Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap();
    text = script_pattern.replace_all(&text, "").to_string();
    text = style_pattern.replace_all(&text, "").to_string();

    let newline_pattern = Regex::new(r"(?i)<br\s*/?>|</p>|</div>|</li>|</h[1-6]>").unwrap();
    text = newline_pattern.replace_all(&text, "\n").to_string();

    let tag_pattern = Regex::new(r"<[^>]+>").unwrap();
    text = tag_pattern.replace_all(&text, "").to_string();

    text = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    let multi_newline = Regex::new(r"\n{3,}").unwrap();
    text = multi_newline.replace_all(&text, "\n\n").to_string();

    text.trim().to_string()
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        debug!(url = %url, "HTTP fetch starting");

        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "HTTP request failed");
                FetchError::Http(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = response.text().await.map_err(FetchError::Http)?;

        let is_html = content_type
            .as_deref()
            .map(|ct| ct.contains("text/html"))
            .unwrap_or_else(|| smells_like_html(&body));

        let (title, text) = if is_html {
            let title = extract_title(&body);
            let stripped = strip_html(&body);
            // Fallback: never lose the content entirely
            let text = if stripped.is_empty() { body } else { stripped };
            (title, text)
        } else {
            (None, body)
        };

        debug!(url = %url, final_url = %final_url, text_len = text.len(), "HTTP fetch done");

        let mut page = FetchedPage::new(url, text).with_final_url(final_url);
        if let Some(title) = title {
            page = page.with_title(title);
        }
        if let Some(ct) = content_type {
            page = page.with_content_type(ct);
        }
        page.fetched_at = Utc::now();

        Ok(page)
    }

    fn name(&self) -> &str {
        "http"
    }
}
