//! AI extraction.
//!
//! The [`AI`] trait abstracts the one LLM capability this library
//! needs: turning already-plain text into a structured record of a
//! given kind. Implementations wrap specific providers and handle
//! prompting and response parsing.

pub mod openai;
pub mod prompts;

use async_trait::async_trait;

use crate::error::AiResult;
use crate::types::{SchemaKind, SchemaRecord};

pub use openai::OpenAI;

/// Opaque text-to-structured-fields function over plain text.
#[async_trait]
pub trait AI: Send + Sync {
    /// Extract a record of the given kind from free-form content.
    ///
    /// Implementations must uphold the record invariants: non-empty
    /// Q&A lists and steps, non-empty required fields, and no
    /// invented values for fields the content doesn't state.
    async fn extract(&self, kind: SchemaKind, content: &str) -> AiResult<SchemaRecord>;
}
