//! Prefix-text parsers.
//!
//! Each schema kind has a deterministic parser for its prefixed input
//! format. Parsing either succeeds with a record (and any warnings) or
//! fails with a [`ParseError`]; callers decide whether to fall back to
//! AI extraction.

pub mod faq;
pub mod fields;
pub mod howto;

pub use faq::parse_faq;
pub use fields::{parse_article, parse_event, parse_product};
pub use howto::parse_howto;

use crate::error::ParseResult;
use crate::types::{SchemaKind, SchemaRecord};

/// Parse prefixed text into a record of the given kind.
///
/// Returns the record plus any non-fatal warnings (unrecognized keys,
/// unnormalizable dates, and the like).
pub fn parse(kind: SchemaKind, input: &str) -> ParseResult<(SchemaRecord, Vec<String>)> {
    match kind {
        SchemaKind::FaqPage => {
            let faq = parse_faq(input)?;
            Ok((SchemaRecord::FaqPage(faq), Vec::new()))
        }
        SchemaKind::HowTo => {
            let howto = parse_howto(input)?;
            Ok((SchemaRecord::HowTo(howto), Vec::new()))
        }
        SchemaKind::Article => {
            let (article, warnings) = parse_article(input)?;
            Ok((SchemaRecord::Article(article), warnings))
        }
        SchemaKind::Product => {
            let (product, warnings) = parse_product(input)?;
            Ok((SchemaRecord::Product(product), warnings))
        }
        SchemaKind::Event => {
            let (event, warnings) = parse_event(input)?;
            Ok((SchemaRecord::Event(event), warnings))
        }
    }
}
