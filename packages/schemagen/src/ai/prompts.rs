//! LLM prompts for schema extraction.
//!
//! One system prompt per schema kind, sharing a preamble that keeps the
//! model from inventing fields the content doesn't state.

use crate::types::SchemaKind;

/// Shared rules for every extraction prompt.
pub const EXTRACT_PREAMBLE: &str = "\
You extract structured data from text for Schema.org markup.

Rules:
- Extract only what the text explicitly states. Never invent values.
- Omit optional fields the text does not mention (use null).
- Dates must be ISO-8601 (YYYY-MM-DD, or full RFC 3339 when a time is given).
- Durations must be ISO-8601 (e.g. PT30M for 30 minutes).
- Preserve the order items appear in the text.";

/// FAQPage extraction instructions.
pub const EXTRACT_FAQ_PROMPT: &str = "\
Extract every question-and-answer pair from the content.
A pair needs both a question and its answer; skip incomplete ones.";

/// HowTo extraction instructions.
pub const EXTRACT_HOWTO_PROMPT: &str = "\
Extract the how-to guide: its name, an optional short description, the
total time if stated (ISO-8601 duration), and every step in order. Give
a step a name only when the text titles it separately from its body.";

/// Article extraction instructions.
pub const EXTRACT_ARTICLE_PROMPT: &str = "\
Extract the article's headline, and when stated: a short description,
the author's name, the publication date, and a representative image URL.";

/// Product extraction instructions.
pub const EXTRACT_PRODUCT_PROMPT: &str = "\
Extract the product's name, and when stated: description, brand, SKU,
price (number as written, no currency symbol), price currency (ISO 4217
code), and availability (in_stock, out_of_stock, pre_order, or
discontinued).";

/// Event extraction instructions.
pub const EXTRACT_EVENT_PROMPT: &str = "\
Extract the event's name and start date, and when stated: description,
end date, venue name, street address, organizer, and event URL.";

/// The system prompt for extracting the given kind.
pub fn extract_system_prompt(kind: SchemaKind) -> String {
    let specific = match kind {
        SchemaKind::FaqPage => EXTRACT_FAQ_PROMPT,
        SchemaKind::HowTo => EXTRACT_HOWTO_PROMPT,
        SchemaKind::Article => EXTRACT_ARTICLE_PROMPT,
        SchemaKind::Product => EXTRACT_PRODUCT_PROMPT,
        SchemaKind::Event => EXTRACT_EVENT_PROMPT,
    };
    format!("{}\n\n{}", EXTRACT_PREAMBLE, specific)
}

/// Format the user message for an extraction request.
pub fn format_extract_prompt(kind: SchemaKind, content: &str) -> String {
    format!(
        "Extract {} data from this content:\n\n{}",
        kind.as_schema_org_type(),
        content
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_includes_preamble() {
        for kind in SchemaKind::all() {
            let prompt = extract_system_prompt(*kind);
            assert!(prompt.contains("Never invent values"));
            assert!(prompt.len() > EXTRACT_PREAMBLE.len());
        }
    }

    #[test]
    fn test_format_extract_prompt_interpolates() {
        let prompt = format_extract_prompt(SchemaKind::Event, "the content body");
        assert!(prompt.contains("Event"));
        assert!(prompt.contains("the content body"));
    }
}
