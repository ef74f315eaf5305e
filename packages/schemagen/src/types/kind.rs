//! Supported Schema.org types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The Schema.org types this library can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
    FaqPage,
    HowTo,
    Article,
    Product,
    Event,
}

impl SchemaKind {
    /// All supported kinds, for host listings.
    pub fn all() -> &'static [SchemaKind] {
        &[
            SchemaKind::FaqPage,
            SchemaKind::HowTo,
            SchemaKind::Article,
            SchemaKind::Product,
            SchemaKind::Event,
        ]
    }

    /// The Schema.org `@type` / `itemtype` name.
    pub fn as_schema_org_type(&self) -> &'static str {
        match self {
            SchemaKind::FaqPage => "FAQPage",
            SchemaKind::HowTo => "HowTo",
            SchemaKind::Article => "Article",
            SchemaKind::Product => "Product",
            SchemaKind::Event => "Event",
        }
    }

    /// Stable snake_case identifier, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::FaqPage => "faq_page",
            SchemaKind::HowTo => "how_to",
            SchemaKind::Article => "article",
            SchemaKind::Product => "product",
            SchemaKind::Event => "event",
        }
    }

    /// One-line description for host listings.
    pub fn description(&self) -> &'static str {
        match self {
            SchemaKind::FaqPage => "Frequently asked questions with answers",
            SchemaKind::HowTo => "Step-by-step instructions for completing a task",
            SchemaKind::Article => "A news article or blog post",
            SchemaKind::Product => "A product with pricing and availability",
            SchemaKind::Event => "An event with dates, location, and organizer",
        }
    }

    /// Example prefix-formatted input for this kind.
    pub fn example_input(&self) -> &'static str {
        match self {
            SchemaKind::FaqPage => {
                "Q: What is your return policy?\n\
                 A: We accept returns within 30 days of purchase with original receipt.\n\
                 \n\
                 Q: Do you offer international shipping?\n\
                 A: Yes, we ship to over 100 countries worldwide.\n\
                 \n\
                 Q: How long does delivery take?\n\
                 A: Standard delivery takes 3-5 business days, express delivery 1-2 days."
            }
            SchemaKind::HowTo => {
                "How to brew pour-over coffee\n\
                 A simple method for a clean, bright cup.\n\
                 \n\
                 1. Boil water to 96 degrees Celsius.\n\
                 2. Grind 20 grams of coffee to a medium-fine consistency.\n\
                 3. Rinse the filter and add the grounds.\n\
                 4. Pour water slowly in circles, then let it drain."
            }
            SchemaKind::Article => {
                "Headline: Local Library Expands Weekend Hours\n\
                 Author: Dana Reyes\n\
                 Date: 2024-03-14\n\
                 Description: The central branch will open Sundays starting next month.\n\
                 Image: https://example.com/library.jpg"
            }
            SchemaKind::Product => {
                "Name: Thermal Travel Mug\n\
                 Brand: Northwind\n\
                 SKU: NW-TM-16\n\
                 Price: 24.99\n\
                 Currency: USD\n\
                 Availability: in stock\n\
                 Description: Keeps drinks hot for 8 hours."
            }
            SchemaKind::Event => {
                "Name: Spring Plant Swap\n\
                 Start: 2024-05-04\n\
                 End: 2024-05-04\n\
                 Location: Community Garden Pavilion\n\
                 Address: 200 Garden Way, Minneapolis, MN\n\
                 Organizer: Friends of the Garden\n\
                 URL: https://example.com/plant-swap\n\
                 Description: Bring a plant, take a plant."
            }
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "faq" | "faqpage" | "faq-page" | "faq_page" => Ok(SchemaKind::FaqPage),
            "howto" | "how-to" | "how_to" => Ok(SchemaKind::HowTo),
            "article" => Ok(SchemaKind::Article),
            "product" => Ok(SchemaKind::Product),
            "event" => Ok(SchemaKind::Event),
            other => Err(format!("unknown schema type: {}", other)),
        }
    }
}
