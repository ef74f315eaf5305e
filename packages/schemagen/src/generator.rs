//! Generation pipeline: resolve input, build a record, render it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ai::AI;
use crate::error::{GeneratorError, Result};
use crate::ingest::Fetcher;
use crate::parse;
use crate::render::{self, OutputFormat};
use crate::types::{SchemaKind, SchemaRecord};

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Cap on content characters handed to the AI
    pub max_content_chars: usize,

    /// Skip the prefix parsers and go straight to the AI
    pub prefer_ai: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_content_chars: 12_000,
            prefer_ai: false,
        }
    }
}

/// What to generate from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Input {
    /// Free-form or prefixed text
    Text(String),
    /// A URL to fetch and strip
    Url(String),
}

/// One generation request.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub input: Input,
    pub kind: SchemaKind,
    pub format: OutputFormat,
}

/// Where URL input came from, echoed back in the outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    pub url: String,
    pub final_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A completed generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generated {
    /// The structured record the output was rendered from
    pub record: SchemaRecord,

    /// The rendered output
    pub output: String,

    pub format: OutputFormat,
    pub kind: SchemaKind,

    /// Whether the AI built the record (vs. a prefix parser)
    pub used_ai: bool,

    /// Non-fatal parse warnings
    pub warnings: Vec<String>,

    /// Present for URL input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceInfo>,
}

/// The conversion pipeline: input resolution, record building, rendering.
///
/// Parsing is tried first for prefixed input; the AI (when configured)
/// is the fallback for free-form content, or the first choice when
/// `prefer_ai` is set.
pub struct Generator {
    fetcher: Arc<dyn Fetcher>,
    ai: Option<Arc<dyn AI>>,
    config: GeneratorConfig,
}

impl Generator {
    /// Create a generator with no AI configured.
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            ai: None,
            config: GeneratorConfig::default(),
        }
    }

    /// Attach an AI for free-form extraction.
    pub fn with_ai(mut self, ai: Arc<dyn AI>) -> Self {
        self.ai = Some(ai);
        self
    }

    /// Override the default configuration.
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Whether an AI is configured.
    pub fn has_ai(&self) -> bool {
        self.ai.is_some()
    }

    /// Run the full pipeline for one request.
    pub async fn generate(&self, request: GenerateRequest) -> Result<Generated> {
        let GenerateRequest {
            input,
            kind,
            format,
        } = request;

        // 1. Resolve input to plain text
        let (content, source) = match input {
            Input::Text(text) => (text, None),
            Input::Url(url) => {
                info!(url = %url, kind = %kind, "fetching URL input");
                let page = self.fetcher.fetch(&url).await?;
                let source = SourceInfo {
                    url,
                    final_url: page.final_url.clone(),
                    title: page.title.clone(),
                };
                (page.text, Some(source))
            }
        };

        if content.trim().is_empty() {
            return Err(GeneratorError::EmptyInput);
        }

        // 2. Build the record
        let (record, warnings, used_ai) = self.build_record(kind, &content).await?;

        // 3. Render
        let output = render::render(&record, format);

        info!(kind = %kind, format = %format, used_ai, "generated schema output");

        Ok(Generated {
            record,
            output,
            format,
            kind,
            used_ai,
            warnings,
            source,
        })
    }

    /// Build a record from plain text: parser first unless `prefer_ai`,
    /// AI as fallback when configured.
    async fn build_record(
        &self,
        kind: SchemaKind,
        content: &str,
    ) -> Result<(SchemaRecord, Vec<String>, bool)> {
        if self.config.prefer_ai {
            let ai = self.ai.as_ref().ok_or(GeneratorError::AiNotConfigured)?;
            let record = ai
                .extract(kind, truncate_chars(content, self.config.max_content_chars))
                .await?;
            return Ok((record, Vec::new(), true));
        }

        match parse::parse(kind, content) {
            Ok((record, warnings)) => Ok((record, warnings, false)),
            Err(parse_err) => match &self.ai {
                Some(ai) => {
                    debug!(kind = %kind, error = %parse_err, "prefix parse failed, falling back to AI");
                    let record = ai
                        .extract(kind, truncate_chars(content, self.config.max_content_chars))
                        .await?;
                    Ok((record, Vec::new(), true))
                }
                None => Err(parse_err.into()),
            },
        }
    }
}

/// Truncate to at most `max` characters without splitting a char.
fn truncate_chars(content: &str, max: usize) -> &str {
    match content.char_indices().nth(max) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}

/// Parse prefixed text into a record, for hosts composing their own flow.
pub fn build_record(
    kind: SchemaKind,
    content: &str,
) -> crate::error::ParseResult<(SchemaRecord, Vec<String>)> {
    parse::parse(kind, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.max_content_chars, 12_000);
        assert!(!config.prefer_ai);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("ab", 3), "ab");
    }
}
