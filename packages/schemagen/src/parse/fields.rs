//! `Key: value` field-line parsers for Article, Product, and Event.
//!
//! Keys are case-insensitive and have per-type aliases. Unrecognized
//! keys are skipped with a warning; lines without a colon continue the
//! description once one has started. Date-ish values are normalized to
//! ISO-8601 when they match a known format, otherwise kept raw with a
//! warning.

use chrono::{DateTime, NaiveDate};

use crate::error::{ParseError, ParseResult};
use crate::types::record::{Article, Availability, Event, Product};

/// One parsed input line.
enum Line<'a> {
    /// `Key: value` with the key lowercased
    Field(String, &'a str),
    /// No colon; candidate description continuation
    Bare(&'a str),
}

fn split_lines(input: &str) -> Vec<Line<'_>> {
    input
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.split_once(':') {
                Some((key, value)) => Some(Line::Field(
                    key.trim().to_lowercase(),
                    value.trim(),
                )),
                None => Some(Line::Bare(trimmed)),
            }
        })
        .collect()
}

/// Normalize a date-ish value to ISO-8601, recording a warning when the
/// value doesn't match any known format.
fn normalize_date(value: &str, field: &str, warnings: &mut Vec<String>) -> String {
    let v = value.trim();
    if NaiveDate::parse_from_str(v, "%Y-%m-%d").is_ok() {
        return v.to_string();
    }
    if DateTime::parse_from_rfc3339(v).is_ok() {
        return v.to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(v, "%m/%d/%Y") {
        return date.format("%Y-%m-%d").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(v, "%B %e, %Y") {
        return date.format("%Y-%m-%d").to_string();
    }
    warnings.push(format!(
        "could not normalize {} '{}' to ISO-8601; keeping as-is",
        field, v
    ));
    v.to_string()
}

fn set_or_append(slot: &mut Option<String>, value: &str) {
    match slot {
        Some(existing) => {
            existing.push(' ');
            existing.push_str(value);
        }
        None => *slot = Some(value.to_string()),
    }
}

/// Parse `Key: value` lines into an article.
pub fn parse_article(input: &str) -> ParseResult<(Article, Vec<String>)> {
    let mut warnings = Vec::new();
    let mut headline: Option<String> = None;
    let mut description: Option<String> = None;
    let mut author: Option<String> = None;
    let mut date_published: Option<String> = None;
    let mut image: Option<String> = None;

    for line in split_lines(input) {
        match line {
            Line::Field(key, value) => match key.as_str() {
                "headline" | "title" => headline = Some(value.to_string()),
                "author" | "by" => author = Some(value.to_string()),
                "date" | "published" | "date published" => {
                    date_published = Some(normalize_date(value, "date_published", &mut warnings));
                }
                "description" | "summary" => description = Some(value.to_string()),
                "image" => image = Some(value.to_string()),
                other => warnings.push(format!("unrecognized field: {}", other)),
            },
            Line::Bare(text) => {
                if description.is_some() {
                    set_or_append(&mut description, text);
                } else {
                    warnings.push(format!("ignored line without a field key: {}", text));
                }
            }
        }
    }

    let headline = headline
        .filter(|h| !h.is_empty())
        .ok_or(ParseError::MissingField("headline"))?;

    Ok((
        Article {
            headline,
            description,
            author,
            date_published,
            image,
        },
        warnings,
    ))
}

/// Parse `Key: value` lines into a product.
pub fn parse_product(input: &str) -> ParseResult<(Product, Vec<String>)> {
    let mut warnings = Vec::new();
    let mut name: Option<String> = None;
    let mut description: Option<String> = None;
    let mut brand: Option<String> = None;
    let mut sku: Option<String> = None;
    let mut price: Option<String> = None;
    let mut price_currency: Option<String> = None;
    let mut availability: Option<Availability> = None;

    for line in split_lines(input) {
        match line {
            Line::Field(key, value) => match key.as_str() {
                "name" | "title" => name = Some(value.to_string()),
                "brand" => brand = Some(value.to_string()),
                "sku" => sku = Some(value.to_string()),
                "price" => price = Some(value.to_string()),
                "currency" | "price currency" => price_currency = Some(value.to_string()),
                "availability" | "stock" => match Availability::parse(value) {
                    Some(a) => availability = Some(a),
                    None => warnings.push(format!("unrecognized availability: {}", value)),
                },
                "description" => description = Some(value.to_string()),
                other => warnings.push(format!("unrecognized field: {}", other)),
            },
            Line::Bare(text) => {
                if description.is_some() {
                    set_or_append(&mut description, text);
                } else {
                    warnings.push(format!("ignored line without a field key: {}", text));
                }
            }
        }
    }

    if price.is_some() && price_currency.is_none() {
        warnings.push("price given without a currency".to_string());
    }

    let name = name
        .filter(|n| !n.is_empty())
        .ok_or(ParseError::MissingField("name"))?;

    Ok((
        Product {
            name,
            description,
            brand,
            sku,
            price,
            price_currency,
            availability,
        },
        warnings,
    ))
}

/// Parse `Key: value` lines into an event.
pub fn parse_event(input: &str) -> ParseResult<(Event, Vec<String>)> {
    let mut warnings = Vec::new();
    let mut name: Option<String> = None;
    let mut description: Option<String> = None;
    let mut start_date: Option<String> = None;
    let mut end_date: Option<String> = None;
    let mut location_name: Option<String> = None;
    let mut location_address: Option<String> = None;
    let mut organizer: Option<String> = None;
    let mut url: Option<String> = None;

    for line in split_lines(input) {
        match line {
            Line::Field(key, value) => match key.as_str() {
                "name" | "title" => name = Some(value.to_string()),
                "start" | "start date" | "starts" => {
                    start_date = Some(normalize_date(value, "start_date", &mut warnings));
                }
                "end" | "end date" | "ends" => {
                    end_date = Some(normalize_date(value, "end_date", &mut warnings));
                }
                "location" | "venue" => location_name = Some(value.to_string()),
                "address" => location_address = Some(value.to_string()),
                "organizer" | "organized by" => organizer = Some(value.to_string()),
                "url" | "link" => url = Some(value.to_string()),
                "description" => description = Some(value.to_string()),
                other => warnings.push(format!("unrecognized field: {}", other)),
            },
            Line::Bare(text) => {
                if description.is_some() {
                    set_or_append(&mut description, text);
                } else {
                    warnings.push(format!("ignored line without a field key: {}", text));
                }
            }
        }
    }

    let name = name
        .filter(|n| !n.is_empty())
        .ok_or(ParseError::MissingField("name"))?;
    let start_date = start_date
        .filter(|d| !d.is_empty())
        .ok_or(ParseError::MissingField("start_date"))?;

    Ok((
        Event {
            name,
            description,
            start_date,
            end_date,
            location_name,
            location_address,
            organizer,
            url,
        },
        warnings,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_aliases() {
        let input = "Title: Big News\nBy: Jo Smith\nPublished: 2024-03-14\nSummary: Something happened.";
        let (article, warnings) = parse_article(input).unwrap();
        assert_eq!(article.headline, "Big News");
        assert_eq!(article.author.as_deref(), Some("Jo Smith"));
        assert_eq!(article.date_published.as_deref(), Some("2024-03-14"));
        assert_eq!(article.description.as_deref(), Some("Something happened."));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_article_missing_headline() {
        assert!(matches!(
            parse_article("Author: Jo"),
            Err(ParseError::MissingField("headline"))
        ));
    }

    #[test]
    fn test_date_normalization() {
        let mut warnings = Vec::new();
        assert_eq!(
            normalize_date("03/14/2024", "date", &mut warnings),
            "2024-03-14"
        );
        assert_eq!(
            normalize_date("March 14, 2024", "date", &mut warnings),
            "2024-03-14"
        );
        assert_eq!(
            normalize_date("2024-03-14", "date", &mut warnings),
            "2024-03-14"
        );
        assert!(warnings.is_empty());

        assert_eq!(normalize_date("someday", "date", &mut warnings), "someday");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_rfc3339_kept_verbatim() {
        let mut warnings = Vec::new();
        assert_eq!(
            normalize_date("2024-03-14T18:00:00-05:00", "date", &mut warnings),
            "2024-03-14T18:00:00-05:00"
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_product_warnings() {
        let input = "Name: Mug\nPrice: 9.99\nColor: blue\nAvailability: who knows";
        let (product, warnings) = parse_product(input).unwrap();
        assert_eq!(product.name, "Mug");
        assert_eq!(product.price.as_deref(), Some("9.99"));
        assert!(product.availability.is_none());
        // unrecognized key, unknown availability, missing currency
        assert_eq!(warnings.len(), 3);
    }

    #[test]
    fn test_product_availability() {
        let input = "Name: Mug\nStock: sold out";
        let (product, _) = parse_product(input).unwrap();
        assert_eq!(product.availability, Some(Availability::OutOfStock));
    }

    #[test]
    fn test_event_required_fields() {
        assert!(matches!(
            parse_event("Name: Party"),
            Err(ParseError::MissingField("start_date"))
        ));
        assert!(matches!(
            parse_event("Start: 2024-05-04"),
            Err(ParseError::MissingField("name"))
        ));
    }

    #[test]
    fn test_event_full() {
        let input = "Name: Plant Swap\nStart: 05/04/2024\nEnd: 05/05/2024\n\
                     Venue: The Pavilion\nAddress: 200 Garden Way\n\
                     Organized by: Friends of the Garden\nLink: https://example.com/swap";
        let (event, warnings) = parse_event(input).unwrap();
        assert_eq!(event.start_date, "2024-05-04");
        assert_eq!(event.end_date.as_deref(), Some("2024-05-05"));
        assert_eq!(event.location_name.as_deref(), Some("The Pavilion"));
        assert_eq!(event.organizer.as_deref(), Some("Friends of the Garden"));
        assert_eq!(event.url.as_deref(), Some("https://example.com/swap"));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_description_continuation() {
        let input = "Headline: News\nDescription: First part\nand the rest of it.";
        let (article, warnings) = parse_article(input).unwrap();
        assert_eq!(
            article.description.as_deref(),
            Some("First part and the rest of it.")
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_bare_line_before_description_warns() {
        let input = "stray text\nHeadline: News";
        let (_, warnings) = parse_article(input).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("stray text"));
    }
}
