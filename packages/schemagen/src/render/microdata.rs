//! HTML Microdata rendering.
//!
//! Text templates with 2-space nesting. Visible text goes in heading,
//! paragraph, and span elements; machine-only values go in `<meta>`
//! tags and URL values in `<link>` tags. Everything interpolated is
//! entity-escaped first.

use std::fmt::Write;

use crate::types::record::{
    Article, Event, FaqPage, HowTo, Product, SchemaRecord,
};

/// Escape HTML special characters.
///
/// Replacement order matters: `&` must go first or the other entities
/// get double-escaped.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render an FAQ page as microdata.
///
/// Container div, one Question div per pair with a nested Answer div,
/// and no trailing newline after the closing tag.
pub fn faq_page_microdata(faq: &FaqPage) -> String {
    let mut html = String::from("<div itemscope itemtype=\"https://schema.org/FAQPage\">\n");

    for pair in &faq.items {
        html.push_str(
            "  <div itemscope itemprop=\"mainEntity\" itemtype=\"https://schema.org/Question\">\n",
        );
        let _ = writeln!(
            html,
            "    <h3 itemprop=\"name\">{}</h3>",
            escape_html(&pair.question)
        );
        html.push_str(
            "    <div itemscope itemprop=\"acceptedAnswer\" itemtype=\"https://schema.org/Answer\">\n",
        );
        let _ = writeln!(
            html,
            "      <div itemprop=\"text\">{}</div>",
            escape_html(&pair.answer)
        );
        html.push_str("    </div>\n");
        html.push_str("  </div>\n");
    }

    html.push_str("</div>");
    html
}

/// Render a how-to guide as microdata.
pub fn how_to_microdata(howto: &HowTo) -> String {
    let mut html = String::from("<div itemscope itemtype=\"https://schema.org/HowTo\">\n");

    let _ = writeln!(
        html,
        "  <h2 itemprop=\"name\">{}</h2>",
        escape_html(&howto.name)
    );
    if let Some(description) = &howto.description {
        let _ = writeln!(
            html,
            "  <p itemprop=\"description\">{}</p>",
            escape_html(description)
        );
    }
    if let Some(total_time) = &howto.total_time {
        let _ = writeln!(
            html,
            "  <meta itemprop=\"totalTime\" content=\"{}\">",
            escape_html(total_time)
        );
    }

    for (i, step) in howto.steps.iter().enumerate() {
        html.push_str(
            "  <div itemscope itemprop=\"step\" itemtype=\"https://schema.org/HowToStep\">\n",
        );
        let _ = writeln!(html, "    <meta itemprop=\"position\" content=\"{}\">", i + 1);
        if let Some(name) = &step.name {
            let _ = writeln!(html, "    <h3 itemprop=\"name\">{}</h3>", escape_html(name));
        }
        let _ = writeln!(
            html,
            "    <div itemprop=\"text\">{}</div>",
            escape_html(&step.text)
        );
        html.push_str("  </div>\n");
    }

    html.push_str("</div>");
    html
}

/// Render an article as microdata.
pub fn article_microdata(article: &Article) -> String {
    let mut html = String::from("<div itemscope itemtype=\"https://schema.org/Article\">\n");

    let _ = writeln!(
        html,
        "  <h2 itemprop=\"headline\">{}</h2>",
        escape_html(&article.headline)
    );
    if let Some(description) = &article.description {
        let _ = writeln!(
            html,
            "  <p itemprop=\"description\">{}</p>",
            escape_html(description)
        );
    }
    if let Some(image) = &article.image {
        let _ = writeln!(
            html,
            "  <link itemprop=\"image\" href=\"{}\">",
            escape_html(image)
        );
    }
    if let Some(author) = &article.author {
        html.push_str(
            "  <span itemscope itemprop=\"author\" itemtype=\"https://schema.org/Person\">\n",
        );
        let _ = writeln!(
            html,
            "    <span itemprop=\"name\">{}</span>",
            escape_html(author)
        );
        html.push_str("  </span>\n");
    }
    if let Some(date_published) = &article.date_published {
        let _ = writeln!(
            html,
            "  <meta itemprop=\"datePublished\" content=\"{}\">",
            escape_html(date_published)
        );
    }

    html.push_str("</div>");
    html
}

/// Render a product as microdata.
pub fn product_microdata(product: &Product) -> String {
    let mut html = String::from("<div itemscope itemtype=\"https://schema.org/Product\">\n");

    let _ = writeln!(
        html,
        "  <h2 itemprop=\"name\">{}</h2>",
        escape_html(&product.name)
    );
    if let Some(description) = &product.description {
        let _ = writeln!(
            html,
            "  <p itemprop=\"description\">{}</p>",
            escape_html(description)
        );
    }
    if let Some(brand) = &product.brand {
        html.push_str(
            "  <span itemscope itemprop=\"brand\" itemtype=\"https://schema.org/Brand\">\n",
        );
        let _ = writeln!(
            html,
            "    <span itemprop=\"name\">{}</span>",
            escape_html(brand)
        );
        html.push_str("  </span>\n");
    }
    if let Some(sku) = &product.sku {
        let _ = writeln!(
            html,
            "  <meta itemprop=\"sku\" content=\"{}\">",
            escape_html(sku)
        );
    }
    if let Some(price) = &product.price {
        html.push_str(
            "  <div itemscope itemprop=\"offers\" itemtype=\"https://schema.org/Offer\">\n",
        );
        let _ = writeln!(
            html,
            "    <span itemprop=\"price\">{}</span>",
            escape_html(price)
        );
        if let Some(currency) = &product.price_currency {
            let _ = writeln!(
                html,
                "    <meta itemprop=\"priceCurrency\" content=\"{}\">",
                escape_html(currency)
            );
        }
        if let Some(availability) = product.availability {
            let _ = writeln!(
                html,
                "    <link itemprop=\"availability\" href=\"{}\">",
                availability.as_schema_org_url()
            );
        }
        html.push_str("  </div>\n");
    }

    html.push_str("</div>");
    html
}

/// Render an event as microdata.
pub fn event_microdata(event: &Event) -> String {
    let mut html = String::from("<div itemscope itemtype=\"https://schema.org/Event\">\n");

    let _ = writeln!(
        html,
        "  <h2 itemprop=\"name\">{}</h2>",
        escape_html(&event.name)
    );
    if let Some(description) = &event.description {
        let _ = writeln!(
            html,
            "  <p itemprop=\"description\">{}</p>",
            escape_html(description)
        );
    }
    let _ = writeln!(
        html,
        "  <meta itemprop=\"startDate\" content=\"{}\">",
        escape_html(&event.start_date)
    );
    if let Some(end_date) = &event.end_date {
        let _ = writeln!(
            html,
            "  <meta itemprop=\"endDate\" content=\"{}\">",
            escape_html(end_date)
        );
    }
    if event.location_name.is_some() || event.location_address.is_some() {
        html.push_str(
            "  <div itemscope itemprop=\"location\" itemtype=\"https://schema.org/Place\">\n",
        );
        if let Some(name) = &event.location_name {
            let _ = writeln!(html, "    <span itemprop=\"name\">{}</span>", escape_html(name));
        }
        if let Some(address) = &event.location_address {
            let _ = writeln!(
                html,
                "    <div itemprop=\"address\">{}</div>",
                escape_html(address)
            );
        }
        html.push_str("  </div>\n");
    }
    if let Some(organizer) = &event.organizer {
        html.push_str(
            "  <span itemscope itemprop=\"organizer\" itemtype=\"https://schema.org/Organization\">\n",
        );
        let _ = writeln!(
            html,
            "    <span itemprop=\"name\">{}</span>",
            escape_html(organizer)
        );
        html.push_str("  </span>\n");
    }
    if let Some(url) = &event.url {
        let _ = writeln!(html, "  <link itemprop=\"url\" href=\"{}\">", escape_html(url));
    }

    html.push_str("</div>");
    html
}

/// Render any record as microdata.
pub fn render_microdata(record: &SchemaRecord) -> String {
    match record {
        SchemaRecord::FaqPage(faq) => faq_page_microdata(faq),
        SchemaRecord::HowTo(howto) => how_to_microdata(howto),
        SchemaRecord::Article(article) => article_microdata(article),
        SchemaRecord::Product(product) => product_microdata(product),
        SchemaRecord::Event(event) => event_microdata(event),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::record::{Availability, QaPair};
    use proptest::prelude::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"A & B's"</b>"#),
            "&lt;b&gt;&quot;A &amp; B&#39;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_faq_exact_output() {
        let faq = FaqPage {
            items: vec![QaPair::new("What is it?", "A thing.")],
        };
        let expected = "<div itemscope itemtype=\"https://schema.org/FAQPage\">
  <div itemscope itemprop=\"mainEntity\" itemtype=\"https://schema.org/Question\">
    <h3 itemprop=\"name\">What is it?</h3>
    <div itemscope itemprop=\"acceptedAnswer\" itemtype=\"https://schema.org/Answer\">
      <div itemprop=\"text\">A thing.</div>
    </div>
  </div>
</div>";
        assert_eq!(faq_page_microdata(&faq), expected);
    }

    #[test]
    fn test_faq_escapes_user_text() {
        let faq = FaqPage {
            items: vec![QaPair::new("<script>alert(1)</script>", "a & b")],
        };
        let output = faq_page_microdata(&faq);
        assert!(!output.contains("<script>"));
        assert!(output.contains("&lt;script&gt;"));
        assert!(output.contains("a &amp; b"));
    }

    #[test]
    fn test_product_offer_block() {
        let product = Product {
            name: "Mug".to_string(),
            description: None,
            brand: None,
            sku: Some("NW-1".to_string()),
            price: Some("9.99".to_string()),
            price_currency: Some("USD".to_string()),
            availability: Some(Availability::InStock),
        };
        let output = product_microdata(&product);
        assert!(output.contains("itemtype=\"https://schema.org/Offer\""));
        assert!(output.contains("<meta itemprop=\"sku\" content=\"NW-1\">"));
        assert!(output.contains("<meta itemprop=\"priceCurrency\" content=\"USD\">"));
        assert!(output
            .contains("<link itemprop=\"availability\" href=\"https://schema.org/InStock\">"));
    }

    #[test]
    fn test_product_without_price_has_no_offer() {
        let product = Product {
            name: "Mug".to_string(),
            description: None,
            brand: None,
            sku: None,
            price: None,
            price_currency: Some("USD".to_string()),
            availability: None,
        };
        let output = product_microdata(&product);
        assert!(!output.contains("Offer"));
        assert!(!output.contains("priceCurrency"));
    }

    #[test]
    fn test_event_machine_values_in_meta() {
        let event = Event {
            name: "Swap".to_string(),
            description: None,
            start_date: "2024-05-04".to_string(),
            end_date: Some("2024-05-05".to_string()),
            location_name: Some("Pavilion".to_string()),
            location_address: None,
            organizer: None,
            url: Some("https://example.com/swap?a=1&b=2".to_string()),
        };
        let output = event_microdata(&event);
        assert!(output.contains("<meta itemprop=\"startDate\" content=\"2024-05-04\">"));
        assert!(output.contains("<meta itemprop=\"endDate\" content=\"2024-05-05\">"));
        // URL escaped inside the attribute
        assert!(output.contains("href=\"https://example.com/swap?a=1&amp;b=2\""));
    }

    proptest! {
        #[test]
        fn prop_escaped_text_has_no_raw_specials(s in ".*") {
            let escaped = escape_html(&s);
            prop_assert!(!escaped.contains('<'));
            prop_assert!(!escaped.contains('>'));
            prop_assert!(!escaped.contains('"'));
            prop_assert!(!escaped.contains('\''));
            // every remaining '&' starts an entity we produced
            for (i, _) in escaped.match_indices('&') {
                let rest = &escaped[i..];
                prop_assert!(
                    rest.starts_with("&amp;")
                        || rest.starts_with("&lt;")
                        || rest.starts_with("&gt;")
                        || rest.starts_with("&quot;")
                        || rest.starts_with("&#39;")
                );
            }
        }

        #[test]
        fn prop_faq_microdata_never_leaks_tags(q in "[^\u{0}]*", a in "[^\u{0}]*") {
            prop_assume!(!q.trim().is_empty() && !a.trim().is_empty());
            let faq = FaqPage { items: vec![QaPair::new(q, a)] };
            let output = faq_page_microdata(&faq);
            prop_assert!(!output.contains("<script"));
        }
    }
}
