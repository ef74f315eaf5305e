//! End-to-end pipeline tests with mock AI and fetcher.

use std::sync::Arc;

use schemagen::testing::{MockAI, MockFetcher};
use schemagen::{
    FaqPage, GenerateRequest, Generator, GeneratorConfig, GeneratorError, Input, OutputFormat,
    ParseError, QaPair, SchemaKind, SchemaRecord, ValidatedFetcher,
};

fn request(input: Input, kind: SchemaKind, format: OutputFormat) -> GenerateRequest {
    GenerateRequest {
        input,
        kind,
        format,
    }
}

#[tokio::test]
async fn text_input_parses_without_ai() {
    let ai = Arc::new(MockAI::new());
    let generator = Generator::new(Arc::new(MockFetcher::new())).with_ai(ai.clone());

    let generated = generator
        .generate(request(
            Input::Text("Q: One?\nA: Yes.\n\nQ: Two?\nA: Also.".to_string()),
            SchemaKind::FaqPage,
            OutputFormat::JsonLd,
        ))
        .await
        .unwrap();

    assert!(!generated.used_ai);
    assert_eq!(ai.call_count(), 0);
    assert!(generated.source.is_none());

    let value: serde_json::Value = serde_json::from_str(&generated.output).unwrap();
    assert_eq!(value["@type"], "FAQPage");
    assert_eq!(value["mainEntity"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn free_form_text_falls_back_to_ai() {
    let record = SchemaRecord::FaqPage(FaqPage {
        items: vec![QaPair::new("From the AI?", "Indeed.")],
    });
    let ai = Arc::new(
        MockAI::new().with_record(SchemaKind::FaqPage, "free-form prose about things", record),
    );
    let generator = Generator::new(Arc::new(MockFetcher::new())).with_ai(ai.clone());

    let generated = generator
        .generate(request(
            Input::Text("free-form prose about things".to_string()),
            SchemaKind::FaqPage,
            OutputFormat::Microdata,
        ))
        .await
        .unwrap();

    assert!(generated.used_ai);
    assert_eq!(ai.call_count(), 1);
    assert!(generated.output.contains("From the AI?"));
}

#[tokio::test]
async fn parse_error_propagates_without_ai() {
    let generator = Generator::new(Arc::new(MockFetcher::new()));

    let err = generator
        .generate(request(
            Input::Text("free-form prose".to_string()),
            SchemaKind::FaqPage,
            OutputFormat::JsonLd,
        ))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        GeneratorError::Parse(ParseError::NoPairs)
    ));
}

#[tokio::test]
async fn prefer_ai_skips_the_parser() {
    let ai = Arc::new(MockAI::new());
    let generator = Generator::new(Arc::new(MockFetcher::new()))
        .with_ai(ai.clone())
        .with_config(GeneratorConfig {
            prefer_ai: true,
            ..Default::default()
        });

    // This input would parse cleanly, but prefer_ai goes to the AI anyway
    let generated = generator
        .generate(request(
            Input::Text("Q: Parseable?\nA: Yes.".to_string()),
            SchemaKind::FaqPage,
            OutputFormat::JsonLd,
        ))
        .await
        .unwrap();

    assert!(generated.used_ai);
    assert_eq!(ai.call_count(), 1);
}

#[tokio::test]
async fn prefer_ai_without_ai_is_an_error() {
    let generator = Generator::new(Arc::new(MockFetcher::new())).with_config(GeneratorConfig {
        prefer_ai: true,
        ..Default::default()
    });

    let err = generator
        .generate(request(
            Input::Text("Q: X?\nA: Y.".to_string()),
            SchemaKind::FaqPage,
            OutputFormat::JsonLd,
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, GeneratorError::AiNotConfigured));
}

#[tokio::test]
async fn url_input_records_source() {
    let fetcher = Arc::new(
        MockFetcher::new().with_page(
            schemagen::FetchedPage::new(
                "https://example.com/faq",
                "Q: Fetched?\nA: Yes, from the web.",
            )
            .with_title("FAQ Page")
            .with_final_url("https://www.example.com/faq"),
        ),
    );
    let generator = Generator::new(fetcher.clone());

    let generated = generator
        .generate(request(
            Input::Url("https://example.com/faq".to_string()),
            SchemaKind::FaqPage,
            OutputFormat::JsonLd,
        ))
        .await
        .unwrap();

    let source = generated.source.unwrap();
    assert_eq!(source.url, "https://example.com/faq");
    assert_eq!(source.final_url, "https://www.example.com/faq");
    assert_eq!(source.title.as_deref(), Some("FAQ Page"));
    assert_eq!(fetcher.fetched_urls(), vec!["https://example.com/faq"]);
}

#[tokio::test]
async fn url_fetch_failure_is_not_silently_textified() {
    let generator = Generator::new(Arc::new(MockFetcher::new()));

    let err = generator
        .generate(request(
            Input::Url("https://missing.example/".to_string()),
            SchemaKind::FaqPage,
            OutputFormat::JsonLd,
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, GeneratorError::Fetch(_)));
}

#[tokio::test]
async fn empty_resolved_content_is_an_error() {
    let fetcher =
        Arc::new(MockFetcher::new().with_text("https://example.com/empty", "   \n  "));
    let generator = Generator::new(fetcher);

    let err = generator
        .generate(request(
            Input::Url("https://example.com/empty".to_string()),
            SchemaKind::FaqPage,
            OutputFormat::JsonLd,
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, GeneratorError::EmptyInput));

    let generator2 = Generator::new(Arc::new(MockFetcher::new()));
    let err = generator2
        .generate(request(
            Input::Text("".to_string()),
            SchemaKind::FaqPage,
            OutputFormat::JsonLd,
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, GeneratorError::EmptyInput));
}

#[tokio::test]
async fn ai_failure_after_parse_failure_reports_ai_error() {
    let ai = Arc::new(MockAI::new().fail_with("model unavailable"));
    let generator = Generator::new(Arc::new(MockFetcher::new())).with_ai(ai);

    let err = generator
        .generate(request(
            Input::Text("free-form prose".to_string()),
            SchemaKind::FaqPage,
            OutputFormat::JsonLd,
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, GeneratorError::Ai(_)));
}

#[tokio::test]
async fn ai_content_is_truncated_to_cap() {
    let ai = Arc::new(MockAI::new());
    let generator = Generator::new(Arc::new(MockFetcher::new()))
        .with_ai(ai.clone())
        .with_config(GeneratorConfig {
            max_content_chars: 100,
            prefer_ai: true,
        });

    let long_input = "x".repeat(5_000);
    generator
        .generate(request(
            Input::Text(long_input),
            SchemaKind::Article,
            OutputFormat::JsonLd,
        ))
        .await
        .unwrap();

    assert_eq!(ai.calls()[0].content_len, 100);
}

#[tokio::test]
async fn validated_fetcher_blocks_internal_targets() {
    let inner = MockFetcher::new().with_text("http://169.254.169.254/", "secrets");
    let generator = Generator::new(Arc::new(ValidatedFetcher::new(inner)));

    let err = generator
        .generate(request(
            Input::Url("http://169.254.169.254/".to_string()),
            SchemaKind::FaqPage,
            OutputFormat::JsonLd,
        ))
        .await
        .unwrap_err();

    match err {
        GeneratorError::Fetch(fetch_err) => {
            assert!(fetch_err.to_string().contains("security"));
        }
        other => panic!("expected fetch error, got {:?}", other),
    }
}

#[tokio::test]
async fn every_kind_renders_both_formats_from_examples() {
    let generator = Generator::new(Arc::new(MockFetcher::new()));

    for kind in SchemaKind::all() {
        for format in [OutputFormat::JsonLd, OutputFormat::Microdata] {
            let generated = generator
                .generate(request(
                    Input::Text(kind.example_input().to_string()),
                    *kind,
                    format,
                ))
                .await
                .unwrap_or_else(|e| panic!("{} as {} failed: {}", kind, format, e));

            assert_eq!(generated.kind, *kind);
            match format {
                OutputFormat::JsonLd => {
                    let value: serde_json::Value =
                        serde_json::from_str(&generated.output).unwrap();
                    assert_eq!(value["@type"], kind.as_schema_org_type());
                }
                OutputFormat::Microdata => {
                    assert!(generated.output.contains(&format!(
                        "https://schema.org/{}",
                        kind.as_schema_org_type()
                    )));
                }
            }
        }
    }
}
