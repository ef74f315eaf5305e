//! Record shapes filled by the prefix parsers or the AI.
//!
//! These are the fixed intermediate shapes between input parsing and
//! output rendering. Renderers consume them; parsers and AI mapping
//! produce them and are responsible for keeping them well-formed
//! (non-empty Q&A lists, non-empty required fields).

use serde::{Deserialize, Serialize};

use crate::types::kind::SchemaKind;

/// One question/answer pair in a FAQ page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

impl QaPair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// An FAQ page: an ordered, non-empty list of Q&A pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqPage {
    pub items: Vec<QaPair>,
}

/// One step in a how-to guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HowToStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub text: String,
}

impl HowToStep {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            name: None,
            text: text.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A how-to guide with a non-empty ordered list of steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HowTo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ISO-8601 duration, e.g. "PT30M"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time: Option<String>,
    pub steps: Vec<HowToStep>,
}

/// An article or blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// ISO-8601 date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_published: Option<String>,
    /// Image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Product availability, mapped to Schema.org ItemAvailability URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    InStock,
    OutOfStock,
    PreOrder,
    Discontinued,
}

impl Availability {
    /// The Schema.org URL form used in JSON-LD and microdata output.
    pub fn as_schema_org_url(&self) -> &'static str {
        match self {
            Availability::InStock => "https://schema.org/InStock",
            Availability::OutOfStock => "https://schema.org/OutOfStock",
            Availability::PreOrder => "https://schema.org/PreOrder",
            Availability::Discontinued => "https://schema.org/Discontinued",
        }
    }

    /// Parse a free-form availability phrase. Unknown phrases return `None`;
    /// callers decide whether that warrants a warning.
    pub fn parse(value: &str) -> Option<Availability> {
        match value.trim().to_lowercase().as_str() {
            "in stock" | "instock" | "available" => Some(Availability::InStock),
            "out of stock" | "outofstock" | "sold out" | "soldout" | "unavailable" => {
                Some(Availability::OutOfStock)
            }
            "preorder" | "pre-order" | "pre order" => Some(Availability::PreOrder),
            "discontinued" => Some(Availability::Discontinued),
            _ => None,
        }
    }
}

/// A product with optional pricing and availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
}

/// An event with a required start date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ISO-8601 date or datetime
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Sum type over the five record shapes.
///
/// Hosts echo this back to callers so they can see exactly which fields
/// the parser or AI filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaRecord {
    FaqPage(FaqPage),
    HowTo(HowTo),
    Article(Article),
    Product(Product),
    Event(Event),
}

impl SchemaRecord {
    /// Which schema kind this record is.
    pub fn kind(&self) -> SchemaKind {
        match self {
            SchemaRecord::FaqPage(_) => SchemaKind::FaqPage,
            SchemaRecord::HowTo(_) => SchemaKind::HowTo,
            SchemaRecord::Article(_) => SchemaKind::Article,
            SchemaRecord::Product(_) => SchemaKind::Product,
            SchemaRecord::Event(_) => SchemaKind::Event,
        }
    }
}
