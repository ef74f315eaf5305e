//! Content-to-Structured-Data Converter
//!
//! A thin converter from free-form or prefixed text (or a fetched URL)
//! into Schema.org structured data, rendered as JSON-LD or HTML
//! Microdata.
//!
//! # Pipeline
//!
//! 1. Resolve input: text is used directly; URLs are fetched and
//!    stripped to readable text.
//! 2. Build a record: a deterministic prefix parser runs first, with a
//!    hosted AI model as the fallback for free-form content.
//! 3. Render the record to the requested format.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use schemagen::{Generator, GenerateRequest, Input, SchemaKind, OutputFormat};
//! use schemagen::ingest::{HttpFetcher, ValidatedFetcher};
//! use schemagen::ai::OpenAI;
//!
//! let fetcher = Arc::new(ValidatedFetcher::new(HttpFetcher::new()));
//! let generator = Generator::new(fetcher).with_ai(Arc::new(OpenAI::from_env()?));
//!
//! let generated = generator
//!     .generate(GenerateRequest {
//!         input: Input::Text("Q: What is this?\nA: A converter.".into()),
//!         kind: SchemaKind::FaqPage,
//!         format: OutputFormat::JsonLd,
//!     })
//!     .await?;
//! println!("{}", generated.output);
//! ```
//!
//! # Modules
//!
//! - [`types`] - Schema kinds and record shapes
//! - [`parse`] - Deterministic prefix-text parsers
//! - [`render`] - JSON-LD and Microdata rendering
//! - [`ai`] - AI extraction trait and OpenAI implementation
//! - [`ingest`] - URL fetching with SSRF protection
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod ai;
pub mod error;
pub mod generator;
pub mod ingest;
pub mod parse;
pub mod render;
pub mod security;
pub mod testing;
pub mod types;

// Re-export core types at crate root
pub use error::{
    AiError, FetchError, GeneratorError, ParseError, Result, SecurityError,
};
pub use generator::{
    build_record, Generated, GenerateRequest, Generator, GeneratorConfig, Input, SourceInfo,
};
pub use render::{render, OutputFormat};
pub use types::{
    Article, Availability, Event, FaqPage, HowTo, HowToStep, Product, QaPair, SchemaKind,
    SchemaRecord,
};

// Re-export the seams hosts wire together
pub use ai::AI;
pub use ingest::{Fetcher, FetchedPage, HttpFetcher, UrlValidator, ValidatedFetcher};
