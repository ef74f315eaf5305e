//! Testing utilities including mock implementations.
//!
//! Useful for testing hosts of the library without real AI or network
//! calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::ai::AI;
use crate::error::{AiError, AiResult, FetchError, FetchResult};
use crate::ingest::{FetchedPage, Fetcher};
use crate::types::record::{
    Article, Event, FaqPage, HowTo, HowToStep, Product, QaPair,
};
use crate::types::{SchemaKind, SchemaRecord};

/// Record of a call made to the mock AI.
#[derive(Debug, Clone)]
pub struct MockAiCall {
    pub kind: SchemaKind,
    pub content_len: usize,
}

/// A mock AI returning deterministic, configurable records.
#[derive(Default)]
pub struct MockAI {
    /// Predefined records by (kind, content)
    records: Arc<RwLock<HashMap<(SchemaKind, String), SchemaRecord>>>,

    /// When set, every call fails with this message
    failure: Arc<RwLock<Option<String>>>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<MockAiCall>>>,
}

impl MockAI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Predefine the record returned for exactly this (kind, content).
    pub fn with_record(
        self,
        kind: SchemaKind,
        content: impl Into<String>,
        record: SchemaRecord,
    ) -> Self {
        self.records
            .write()
            .unwrap()
            .insert((kind, content.into()), record);
        self
    }

    /// Make every extraction fail with an API error.
    pub fn fail_with(self, message: impl Into<String>) -> Self {
        *self.failure.write().unwrap() = Some(message.into());
        self
    }

    /// Calls made so far.
    pub fn calls(&self) -> Vec<MockAiCall> {
        self.calls.read().unwrap().clone()
    }

    /// Number of extraction calls made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// A plausible default record for a kind, derived from the content.
    fn synthesize(kind: SchemaKind, content: &str) -> SchemaRecord {
        let first_line = content
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("untitled")
            .to_string();

        match kind {
            SchemaKind::FaqPage => SchemaRecord::FaqPage(FaqPage {
                items: vec![QaPair::new(first_line, "Synthesized answer.")],
            }),
            SchemaKind::HowTo => SchemaRecord::HowTo(HowTo {
                name: first_line,
                description: None,
                total_time: None,
                steps: vec![HowToStep::new("Synthesized step.")],
            }),
            SchemaKind::Article => SchemaRecord::Article(Article {
                headline: first_line,
                description: None,
                author: None,
                date_published: None,
                image: None,
            }),
            SchemaKind::Product => SchemaRecord::Product(Product {
                name: first_line,
                description: None,
                brand: None,
                sku: None,
                price: None,
                price_currency: None,
                availability: None,
            }),
            SchemaKind::Event => SchemaRecord::Event(Event {
                name: first_line,
                description: None,
                start_date: "2024-01-01".to_string(),
                end_date: None,
                location_name: None,
                location_address: None,
                organizer: None,
                url: None,
            }),
        }
    }
}

#[async_trait]
impl AI for MockAI {
    async fn extract(&self, kind: SchemaKind, content: &str) -> AiResult<SchemaRecord> {
        self.calls.write().unwrap().push(MockAiCall {
            kind,
            content_len: content.len(),
        });

        if let Some(message) = self.failure.read().unwrap().clone() {
            return Err(AiError::Api {
                status: 500,
                message,
            });
        }

        if let Some(record) = self
            .records
            .read()
            .unwrap()
            .get(&(kind, content.to_string()))
        {
            return Ok(record.clone());
        }

        Ok(Self::synthesize(kind, content))
    }
}

/// A mock fetcher serving predefined pages.
#[derive(Default)]
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<String, FetchedPage>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve this page for its URL.
    pub fn with_page(self, page: FetchedPage) -> Self {
        self.pages.write().unwrap().insert(page.url.clone(), page);
        self
    }

    /// Serve plain text for a URL.
    pub fn with_text(self, url: impl Into<String>, text: impl Into<String>) -> Self {
        let url = url.into();
        let page = FetchedPage::new(url.clone(), text);
        self.pages.write().unwrap().insert(url, page);
        self
    }

    /// URLs fetched so far.
    pub fn fetched_urls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        self.calls.write().unwrap().push(url.to_string());

        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                status: 404,
                url: url.to_string(),
            })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_ai_predefined_record() {
        let record = SchemaRecord::FaqPage(FaqPage {
            items: vec![QaPair::new("Q?", "A.")],
        });
        let ai = MockAI::new().with_record(SchemaKind::FaqPage, "input", record.clone());
        let result = ai.extract(SchemaKind::FaqPage, "input").await.unwrap();
        assert_eq!(result, record);
        assert_eq!(ai.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_ai_synthesizes_default() {
        let ai = MockAI::new();
        let result = ai.extract(SchemaKind::Article, "My Headline\nbody").await.unwrap();
        match result {
            SchemaRecord::Article(article) => assert_eq!(article.headline, "My Headline"),
            other => panic!("wrong record: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_mock_ai_failure() {
        let ai = MockAI::new().fail_with("boom");
        let result = ai.extract(SchemaKind::FaqPage, "x").await;
        assert!(matches!(result, Err(AiError::Api { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_mock_fetcher() {
        let fetcher = MockFetcher::new().with_text("https://example.com/", "page text");
        let page = fetcher.fetch("https://example.com/").await.unwrap();
        assert_eq!(page.text, "page text");
        assert!(matches!(
            fetcher.fetch("https://missing.example/").await,
            Err(FetchError::Status { status: 404, .. })
        ));
        assert_eq!(fetcher.fetched_urls().len(), 2);
    }
}
