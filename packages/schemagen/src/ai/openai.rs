//! OpenAI implementation of the [`AI`] trait.
//!
//! One chat-completions call per extraction, using OpenAI's
//! `json_schema` structured response format with a per-kind schema
//! derived from the response types below.
//!
//! # Example
//!
//! ```rust,ignore
//! use schemagen::ai::OpenAI;
//!
//! let ai = OpenAI::from_env()?.with_model("gpt-4o");
//! let record = ai.extract(SchemaKind::FaqPage, content).await?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ai::prompts::{extract_system_prompt, format_extract_prompt};
use crate::ai::AI;
use crate::error::{AiError, AiResult};
use crate::security::SecretString;
use crate::types::record::{
    Article, Availability, Event, FaqPage, HowTo, HowToStep, Product, QaPair,
};
use crate::types::{SchemaKind, SchemaRecord};

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MAX_CONTENT_CHARS: usize = 12_000;

/// OpenAI-backed extraction.
#[derive(Clone)]
pub struct OpenAI {
    client: Client,
    api_key: SecretString,
    model: String,
    base_url: String,
    max_content_chars: usize,
}

impl OpenAI {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: SecretString::new(api_key),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_content_chars: DEFAULT_MAX_CONTENT_CHARS,
        }
    }

    /// Create from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> AiResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| AiError::Config("OPENAI_API_KEY not set".to_string()))?;
        Ok(Self::new(api_key))
    }

    /// Set the chat model (default: gpt-4o-mini).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Cap on content characters sent to the model.
    pub fn with_max_content_chars(mut self, chars: usize) -> Self {
        self.max_content_chars = chars;
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Make a structured chat-completions request and return the raw
    /// message content.
    async fn chat_structured(
        &self,
        system: &str,
        user: &str,
        schema_name: &str,
        schema: serde_json::Value,
    ) -> AiResult<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user.to_string(),
                },
            ],
            temperature: 0.0,
            response_format: ResponseFormat {
                format_type: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: schema_name.to_string(),
                    strict: true,
                    schema,
                },
            },
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose()),
            )
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse = response.json().await?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AiError::InvalidResponse("no choices in response".to_string()))
    }
}

#[async_trait]
impl AI for OpenAI {
    async fn extract(&self, kind: SchemaKind, content: &str) -> AiResult<SchemaRecord> {
        let content = truncate_chars(content, self.max_content_chars);
        let system = extract_system_prompt(kind);
        let user = format_extract_prompt(kind, content);
        let schema_name = format!("{}_extraction", kind.as_str());

        debug!(kind = %kind, model = %self.model, content_len = content.len(), "AI extract starting");

        match kind {
            SchemaKind::FaqPage => {
                let schema = openai_schema::<LlmFaqPage>();
                let raw = self.chat_structured(&system, &user, &schema_name, schema).await?;
                parse_payload::<LlmFaqPage>(&raw)?.into_record()
            }
            SchemaKind::HowTo => {
                let schema = openai_schema::<LlmHowTo>();
                let raw = self.chat_structured(&system, &user, &schema_name, schema).await?;
                parse_payload::<LlmHowTo>(&raw)?.into_record()
            }
            SchemaKind::Article => {
                let schema = openai_schema::<LlmArticle>();
                let raw = self.chat_structured(&system, &user, &schema_name, schema).await?;
                parse_payload::<LlmArticle>(&raw)?.into_record()
            }
            SchemaKind::Product => {
                let schema = openai_schema::<LlmProduct>();
                let raw = self.chat_structured(&system, &user, &schema_name, schema).await?;
                parse_payload::<LlmProduct>(&raw)?.into_record()
            }
            SchemaKind::Event => {
                let schema = openai_schema::<LlmEvent>();
                let raw = self.chat_structured(&system, &user, &schema_name, schema).await?;
                parse_payload::<LlmEvent>(&raw)?.into_record()
            }
        }
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: JsonSchemaFormat,
}

#[derive(Serialize)]
struct JsonSchemaFormat {
    name: String,
    strict: bool,
    schema: serde_json::Value,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

// =============================================================================
// LLM response types
// =============================================================================

/// A question and its answer.
#[derive(Debug, Deserialize, JsonSchema)]
struct LlmQaPair {
    /// The question, as asked in the content
    question: String,
    /// The full answer to the question
    answer: String,
}

/// All question-and-answer pairs found in the content, in order.
#[derive(Debug, Deserialize, JsonSchema)]
struct LlmFaqPage {
    items: Vec<LlmQaPair>,
}

/// One step of the guide.
#[derive(Debug, Deserialize, JsonSchema)]
struct LlmHowToStep {
    /// Short step title, only when the text titles the step separately
    name: Option<String>,
    /// The step's instruction text
    text: String,
}

/// The how-to guide described by the content.
#[derive(Debug, Deserialize, JsonSchema)]
struct LlmHowTo {
    /// Name of the task being explained
    name: String,
    /// Short description of the guide, when stated
    description: Option<String>,
    /// Total time as an ISO-8601 duration (e.g. PT30M), when stated
    total_time: Option<String>,
    steps: Vec<LlmHowToStep>,
}

/// The article described by the content.
#[derive(Debug, Deserialize, JsonSchema)]
struct LlmArticle {
    /// The article headline
    headline: String,
    /// Short description or standfirst, when stated
    description: Option<String>,
    /// Author name, when stated
    author: Option<String>,
    /// Publication date as ISO-8601, when stated
    date_published: Option<String>,
    /// Representative image URL, when stated
    image: Option<String>,
}

/// Product availability keyword.
#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
enum LlmAvailability {
    InStock,
    OutOfStock,
    PreOrder,
    Discontinued,
}

impl From<LlmAvailability> for Availability {
    fn from(value: LlmAvailability) -> Self {
        match value {
            LlmAvailability::InStock => Availability::InStock,
            LlmAvailability::OutOfStock => Availability::OutOfStock,
            LlmAvailability::PreOrder => Availability::PreOrder,
            LlmAvailability::Discontinued => Availability::Discontinued,
        }
    }
}

/// The product described by the content.
#[derive(Debug, Deserialize, JsonSchema)]
struct LlmProduct {
    /// The product name
    name: String,
    /// Short description, when stated
    description: Option<String>,
    /// Brand name, when stated
    brand: Option<String>,
    /// Stock keeping unit, when stated
    sku: Option<String>,
    /// Price as written, without a currency symbol, when stated
    price: Option<String>,
    /// ISO 4217 currency code, when stated
    price_currency: Option<String>,
    /// Availability, when stated
    availability: Option<LlmAvailability>,
}

/// The event described by the content.
#[derive(Debug, Deserialize, JsonSchema)]
struct LlmEvent {
    /// The event name
    name: String,
    /// Short description, when stated
    description: Option<String>,
    /// Start date as ISO-8601
    start_date: String,
    /// End date as ISO-8601, when stated
    end_date: Option<String>,
    /// Venue name, when stated
    location_name: Option<String>,
    /// Street address, when stated
    location_address: Option<String>,
    /// Organizer name, when stated
    organizer: Option<String>,
    /// Event URL, when stated
    url: Option<String>,
}

// =============================================================================
// Mapping into records, with invariant enforcement
// =============================================================================

/// Treat empty-string optionals as absent. Models sometimes emit ""
/// instead of null under strict schemas.
fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn required(value: String, field: &'static str) -> AiResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        return Err(AiError::MissingField { field });
    }
    Ok(trimmed)
}

impl LlmFaqPage {
    fn into_record(self) -> AiResult<SchemaRecord> {
        let items: Vec<QaPair> = self
            .items
            .into_iter()
            .filter_map(|pair| {
                let question = pair.question.trim().to_string();
                let answer = pair.answer.trim().to_string();
                (!question.is_empty() && !answer.is_empty())
                    .then_some(QaPair { question, answer })
            })
            .collect();

        if items.is_empty() {
            return Err(AiError::EmptyExtraction);
        }
        Ok(SchemaRecord::FaqPage(FaqPage { items }))
    }
}

impl LlmHowTo {
    fn into_record(self) -> AiResult<SchemaRecord> {
        let steps: Vec<HowToStep> = self
            .steps
            .into_iter()
            .filter_map(|step| {
                let text = step.text.trim().to_string();
                (!text.is_empty()).then(|| HowToStep {
                    name: non_empty(step.name),
                    text,
                })
            })
            .collect();

        if steps.is_empty() {
            return Err(AiError::EmptyExtraction);
        }
        Ok(SchemaRecord::HowTo(HowTo {
            name: required(self.name, "name")?,
            description: non_empty(self.description),
            total_time: non_empty(self.total_time),
            steps,
        }))
    }
}

impl LlmArticle {
    fn into_record(self) -> AiResult<SchemaRecord> {
        Ok(SchemaRecord::Article(Article {
            headline: required(self.headline, "headline")?,
            description: non_empty(self.description),
            author: non_empty(self.author),
            date_published: non_empty(self.date_published),
            image: non_empty(self.image),
        }))
    }
}

impl LlmProduct {
    fn into_record(self) -> AiResult<SchemaRecord> {
        Ok(SchemaRecord::Product(Product {
            name: required(self.name, "name")?,
            description: non_empty(self.description),
            brand: non_empty(self.brand),
            sku: non_empty(self.sku),
            price: non_empty(self.price),
            price_currency: non_empty(self.price_currency),
            availability: self.availability.map(Into::into),
        }))
    }
}

impl LlmEvent {
    fn into_record(self) -> AiResult<SchemaRecord> {
        Ok(SchemaRecord::Event(Event {
            name: required(self.name, "name")?,
            description: non_empty(self.description),
            start_date: required(self.start_date, "start_date")?,
            end_date: non_empty(self.end_date),
            location_name: non_empty(self.location_name),
            location_address: non_empty(self.location_address),
            organizer: non_empty(self.organizer),
            url: non_empty(self.url),
        }))
    }
}

// =============================================================================
// Response parsing and schema generation
// =============================================================================

/// Strip markdown code fences some models wrap JSON in.
fn strip_code_fences(raw: &str) -> &str {
    raw.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

fn parse_payload<T: DeserializeOwned>(raw: &str) -> AiResult<T> {
    serde_json::from_str(raw)
        .or_else(|_| serde_json::from_str(strip_code_fences(raw)))
        .map_err(|e| AiError::InvalidResponse(e.to_string()))
}

/// Generate an OpenAI-compatible JSON schema for a response type.
///
/// OpenAI's strict mode requires `additionalProperties: false` on every
/// object, all properties listed in `required` (nullable ones included),
/// and fully inlined schemas with no `$ref`.
fn openai_schema<T: JsonSchema>() -> serde_json::Value {
    let schema = schema_for!(T);
    let mut value = serde_json::to_value(schema).unwrap_or_default();

    fix_object_schemas(&mut value);

    let definitions = if let serde_json::Value::Object(map) = &value {
        map.get("definitions").cloned()
    } else {
        None
    };
    if let Some(defs) = definitions {
        inline_refs(&mut value, &defs);
    }

    if let serde_json::Value::Object(map) = &mut value {
        map.remove("definitions");
        map.remove("$schema");
    }

    value
}

fn fix_object_schemas(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            if map.get("type") == Some(&serde_json::Value::String("object".to_string())) {
                map.insert(
                    "additionalProperties".to_string(),
                    serde_json::Value::Bool(false),
                );
                if let Some(serde_json::Value::Object(props)) = map.get("properties") {
                    let all_keys: Vec<serde_json::Value> = props
                        .keys()
                        .map(|k| serde_json::Value::String(k.clone()))
                        .collect();
                    map.insert("required".to_string(), serde_json::Value::Array(all_keys));
                }
            }
            for (_, v) in map.iter_mut() {
                fix_object_schemas(v);
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr.iter_mut() {
                fix_object_schemas(item);
            }
        }
        _ => {}
    }
}

fn inline_refs(value: &mut serde_json::Value, definitions: &serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            if let Some(serde_json::Value::String(reference)) = map.get("$ref") {
                let name = reference.rsplit('/').next().unwrap_or_default().to_string();
                if let Some(definition) = definitions.get(&name) {
                    *value = definition.clone();
                    inline_refs(value, definitions);
                    return;
                }
            }
            for (_, v) in map.iter_mut() {
                inline_refs(v, definitions);
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr.iter_mut() {
                inline_refs(item, definitions);
            }
        }
        _ => {}
    }
}

/// Truncate to at most `max` characters without splitting a char.
fn truncate_chars(content: &str, max: usize) -> &str {
    match content.char_indices().nth(max) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}
