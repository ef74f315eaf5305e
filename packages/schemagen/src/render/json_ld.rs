//! JSON-LD rendering.
//!
//! Each kind has a serde document struct whose field order puts
//! `@context` and `@type` first; `Option` fields are omitted when
//! `None`. Output is pretty-printed with 2-space indentation.

use serde::Serialize;

use crate::types::record::{
    Article, Event, FaqPage, HowTo, Product, SchemaRecord,
};

const SCHEMA_ORG: &str = "https://schema.org";

#[derive(Serialize)]
struct QuestionDoc {
    #[serde(rename = "@type")]
    r#type: &'static str,
    name: String,
    #[serde(rename = "acceptedAnswer")]
    accepted_answer: AnswerDoc,
}

#[derive(Serialize)]
struct AnswerDoc {
    #[serde(rename = "@type")]
    r#type: &'static str,
    text: String,
}

#[derive(Serialize)]
struct FaqPageDoc {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    r#type: &'static str,
    #[serde(rename = "mainEntity")]
    main_entity: Vec<QuestionDoc>,
}

#[derive(Serialize)]
struct HowToStepDoc {
    #[serde(rename = "@type")]
    r#type: &'static str,
    position: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    text: String,
}

#[derive(Serialize)]
struct HowToDoc {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    r#type: &'static str,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "totalTime", skip_serializing_if = "Option::is_none")]
    total_time: Option<String>,
    step: Vec<HowToStepDoc>,
}

#[derive(Serialize)]
struct PersonDoc {
    #[serde(rename = "@type")]
    r#type: &'static str,
    name: String,
}

#[derive(Serialize)]
struct ArticleDoc {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    r#type: &'static str,
    headline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<PersonDoc>,
    #[serde(rename = "datePublished", skip_serializing_if = "Option::is_none")]
    date_published: Option<String>,
}

#[derive(Serialize)]
struct BrandDoc {
    #[serde(rename = "@type")]
    r#type: &'static str,
    name: String,
}

#[derive(Serialize)]
struct OfferDoc {
    #[serde(rename = "@type")]
    r#type: &'static str,
    price: String,
    #[serde(rename = "priceCurrency", skip_serializing_if = "Option::is_none")]
    price_currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    availability: Option<&'static str>,
}

#[derive(Serialize)]
struct ProductDoc {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    r#type: &'static str,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    brand: Option<BrandDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offers: Option<OfferDoc>,
}

#[derive(Serialize)]
struct PlaceDoc {
    #[serde(rename = "@type")]
    r#type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<String>,
}

#[derive(Serialize)]
struct OrganizationDoc {
    #[serde(rename = "@type")]
    r#type: &'static str,
    name: String,
}

#[derive(Serialize)]
struct EventDoc {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    r#type: &'static str,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "startDate")]
    start_date: String,
    #[serde(rename = "endDate", skip_serializing_if = "Option::is_none")]
    end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<PlaceDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    organizer: Option<OrganizationDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

fn to_pretty(doc: &impl Serialize) -> String {
    serde_json::to_string_pretty(doc).expect("JSON-LD document serializes")
}

/// Render an FAQ page as JSON-LD.
pub fn faq_page_json_ld(faq: &FaqPage) -> String {
    let doc = FaqPageDoc {
        context: SCHEMA_ORG,
        r#type: "FAQPage",
        main_entity: faq
            .items
            .iter()
            .map(|pair| QuestionDoc {
                r#type: "Question",
                name: pair.question.clone(),
                accepted_answer: AnswerDoc {
                    r#type: "Answer",
                    text: pair.answer.clone(),
                },
            })
            .collect(),
    };
    to_pretty(&doc)
}

/// Render a how-to guide as JSON-LD.
pub fn how_to_json_ld(howto: &HowTo) -> String {
    let doc = HowToDoc {
        context: SCHEMA_ORG,
        r#type: "HowTo",
        name: howto.name.clone(),
        description: howto.description.clone(),
        total_time: howto.total_time.clone(),
        step: howto
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| HowToStepDoc {
                r#type: "HowToStep",
                position: i + 1,
                name: step.name.clone(),
                text: step.text.clone(),
            })
            .collect(),
    };
    to_pretty(&doc)
}

/// Render an article as JSON-LD.
pub fn article_json_ld(article: &Article) -> String {
    let doc = ArticleDoc {
        context: SCHEMA_ORG,
        r#type: "Article",
        headline: article.headline.clone(),
        description: article.description.clone(),
        image: article.image.clone(),
        author: article.author.clone().map(|name| PersonDoc {
            r#type: "Person",
            name,
        }),
        date_published: article.date_published.clone(),
    };
    to_pretty(&doc)
}

/// Render a product as JSON-LD. `offers` is present iff a price is set.
pub fn product_json_ld(product: &Product) -> String {
    let doc = ProductDoc {
        context: SCHEMA_ORG,
        r#type: "Product",
        name: product.name.clone(),
        description: product.description.clone(),
        brand: product.brand.clone().map(|name| BrandDoc {
            r#type: "Brand",
            name,
        }),
        sku: product.sku.clone(),
        offers: product.price.clone().map(|price| OfferDoc {
            r#type: "Offer",
            price,
            price_currency: product.price_currency.clone(),
            availability: product.availability.map(|a| a.as_schema_org_url()),
        }),
    };
    to_pretty(&doc)
}

/// Render an event as JSON-LD. `location` is present iff a location name
/// or address is set.
pub fn event_json_ld(event: &Event) -> String {
    let location = if event.location_name.is_some() || event.location_address.is_some() {
        Some(PlaceDoc {
            r#type: "Place",
            name: event.location_name.clone(),
            address: event.location_address.clone(),
        })
    } else {
        None
    };

    let doc = EventDoc {
        context: SCHEMA_ORG,
        r#type: "Event",
        name: event.name.clone(),
        description: event.description.clone(),
        start_date: event.start_date.clone(),
        end_date: event.end_date.clone(),
        location,
        organizer: event.organizer.clone().map(|name| OrganizationDoc {
            r#type: "Organization",
            name,
        }),
        url: event.url.clone(),
    };
    to_pretty(&doc)
}

/// Render any record as JSON-LD.
pub fn render_json_ld(record: &SchemaRecord) -> String {
    match record {
        SchemaRecord::FaqPage(faq) => faq_page_json_ld(faq),
        SchemaRecord::HowTo(howto) => how_to_json_ld(howto),
        SchemaRecord::Article(article) => article_json_ld(article),
        SchemaRecord::Product(product) => product_json_ld(product),
        SchemaRecord::Event(event) => event_json_ld(event),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::record::{Availability, HowToStep, QaPair};

    #[test]
    fn test_faq_structure() {
        let faq = FaqPage {
            items: vec![QaPair::new("What is Schema.org?", "A vocabulary.")],
        };
        let output = faq_page_json_ld(&faq);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["@context"], "https://schema.org");
        assert_eq!(value["@type"], "FAQPage");
        assert_eq!(value["mainEntity"][0]["@type"], "Question");
        assert_eq!(value["mainEntity"][0]["name"], "What is Schema.org?");
        assert_eq!(value["mainEntity"][0]["acceptedAnswer"]["@type"], "Answer");
        assert_eq!(value["mainEntity"][0]["acceptedAnswer"]["text"], "A vocabulary.");
    }

    #[test]
    fn test_context_and_type_come_first() {
        let faq = FaqPage {
            items: vec![QaPair::new("Q", "A")],
        };
        let output = faq_page_json_ld(&faq);
        let context_pos = output.find("@context").unwrap();
        let type_pos = output.find("@type").unwrap();
        let entity_pos = output.find("mainEntity").unwrap();
        assert!(context_pos < type_pos && type_pos < entity_pos);
    }

    #[test]
    fn test_pretty_printed_two_space_indent() {
        let faq = FaqPage {
            items: vec![QaPair::new("Q", "A")],
        };
        let output = faq_page_json_ld(&faq);
        assert!(output.contains("\n  \"@context\""));
    }

    #[test]
    fn test_howto_positions_are_one_based() {
        let howto = HowTo {
            name: "Guide".to_string(),
            description: None,
            total_time: Some("PT10M".to_string()),
            steps: vec![HowToStep::new("first"), HowToStep::new("second")],
        };
        let value: serde_json::Value =
            serde_json::from_str(&how_to_json_ld(&howto)).unwrap();
        assert_eq!(value["step"][0]["position"], 1);
        assert_eq!(value["step"][1]["position"], 2);
        assert_eq!(value["totalTime"], "PT10M");
        assert!(value.get("description").is_none());
    }

    #[test]
    fn test_product_offers_only_with_price() {
        let mut product = Product {
            name: "Mug".to_string(),
            description: None,
            brand: Some("Northwind".to_string()),
            sku: Some("NW-1".to_string()),
            price: None,
            price_currency: None,
            availability: Some(Availability::InStock),
        };
        let value: serde_json::Value =
            serde_json::from_str(&product_json_ld(&product)).unwrap();
        assert!(value.get("offers").is_none());
        assert_eq!(value["brand"]["@type"], "Brand");

        product.price = Some("9.99".to_string());
        let value: serde_json::Value =
            serde_json::from_str(&product_json_ld(&product)).unwrap();
        assert_eq!(value["offers"]["price"], "9.99");
        assert_eq!(
            value["offers"]["availability"],
            "https://schema.org/InStock"
        );
        assert!(value["offers"].get("priceCurrency").is_none());
    }

    #[test]
    fn test_event_location_grouping() {
        let event = Event {
            name: "Swap".to_string(),
            description: None,
            start_date: "2024-05-04".to_string(),
            end_date: None,
            location_name: None,
            location_address: Some("200 Garden Way".to_string()),
            organizer: None,
            url: None,
        };
        let value: serde_json::Value = serde_json::from_str(&event_json_ld(&event)).unwrap();
        assert_eq!(value["location"]["@type"], "Place");
        assert_eq!(value["location"]["address"], "200 Garden Way");
        assert!(value["location"].get("name").is_none());
        assert_eq!(value["startDate"], "2024-05-04");
    }

    use crate::types::SchemaRecord;

    #[test]
    fn test_always_valid_json() {
        let records = vec![
            SchemaRecord::FaqPage(FaqPage {
                items: vec![QaPair::new("He said \"hi\"", "with <tags> & things")],
            }),
            SchemaRecord::Article(Article {
                headline: "T".to_string(),
                description: None,
                author: None,
                date_published: None,
                image: None,
            }),
        ];
        for record in &records {
            let output = render_json_ld(record);
            assert!(serde_json::from_str::<serde_json::Value>(&output).is_ok());
        }
    }
}
