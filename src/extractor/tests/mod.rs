use chrono::Utc;
use reqwest::StatusCode;
use std::fs;
use std::io;
use std::sync::{Arc, Mutex};
use url::Url;

use crate::extractor::{
    MAX_HTML_CHARS, MAX_TEXT_CHARS, extract, log_extraction, reader::NO_TITLE,
};
use crate::fetcher::types::PageResponse;

#[test]
fn test_extract_article() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/article.html")
        .expect("Failed to read test fixture");

    let content = extract(&create_test_response(html, "https://example.com/article"));

    assert_eq!(content.title, "Sample Article - News Site");
    assert_eq!(
        content.meta_description,
        "A sample article used to exercise the extractor."
    );
    assert_eq!(content.meta_keywords, "sample, article, extraction");
    assert_eq!(
        content.headings,
        vec!["Sample Article", "Background", "Findings"]
    );
    assert_eq!(content.schema_markup.len(), 1);
    assert!(content.schema_markup[0].contains("NewsArticle"));
    assert_eq!(content.links, vec!["https://example.org/source"]);
    assert_eq!(content.images, vec!["/images/sample.jpg"]);

    assert!(content.text_content.contains("first paragraph"));
    assert!(content.text_content.contains("second paragraph"));
    assert!(!content.text_content.contains("Site navigation"));
    assert!(!content.text_content.contains("trackPageView"));
    assert!(!content.text_content.contains("  "));
    assert!(!content.text_content.contains('\n'));
}

#[test]
fn test_extract_blog_without_content_area() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/blog.html")
        .expect("Failed to read test fixture");

    let content = extract(&create_test_response(html, "https://blog.example.com/post"));

    assert_eq!(content.title, "How to Build Better Software");
    assert!(content.schema_markup.is_empty());
    assert!(content.text_content.contains("Building better software"));
    assert!(content.text_content.contains("Key Principles"));
    assert_eq!(content.meta_description, "");
}

#[test]
fn test_empty_page_uses_placeholders() {
    let content = extract(&create_test_response(
        "<html><head></head><body></body></html>".to_string(),
        "https://example.com/empty",
    ));

    assert_eq!(content.title, NO_TITLE);
    assert!(content.headings.is_empty());
    assert!(content.text_content.is_empty());
}

#[test]
fn test_caps_text_and_markup() {
    let html = format!(
        "<html><head><title>Big</title></head><body><main>{}</main></body></html>",
        "word ".repeat(30_000)
    );

    let content = extract(&create_test_response(html, "https://example.com/big"));

    assert_eq!(content.text_content.chars().count(), MAX_TEXT_CHARS);
    assert_eq!(content.html.chars().count(), MAX_HTML_CHARS);
}

#[test]
fn test_malformed_html() {
    let html =
        "<html><head><title>Broken</title><body><p>Unclosed tags<div>More content".to_string();

    let content = extract(&create_test_response(html, "https://example.com/broken"));

    assert_eq!(content.title, "Broken");
    assert!(content.text_content.contains("Unclosed tags"));
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

#[test]
fn test_extraction_log_reports_structure_and_char_counts() {
    let html = r#"<html><head><title>Café</title>
        <meta name="description" content="Coffee">
        <script type="application/ld+json">{"@type": "CafeOrCoffeeShop"}</script>
        </head><body><main><h1>Café</h1><p>Crème brûlée</p>
        <img src="/cup.png"><a href="https://example.org/menu">menu</a></main></body></html>"#;
    let content = extract(&create_test_response(html.to_string(), "https://example.com"));
    let chars = content.text_content.chars().count();
    assert!(chars < content.text_content.len());

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, || log_extraction(&content));

    let output = logs.contents();
    assert!(output.contains("extracted page content"), "{output}");
    assert!(output.contains(&format!("text_chars={chars} ")), "{output}");
    assert!(output.contains("has_title=true"), "{output}");
    assert!(output.contains("has_meta_description=true"), "{output}");
    assert!(output.contains("has_meta_keywords=false"), "{output}");
    assert!(output.contains("heading_count=1"), "{output}");
    assert!(output.contains("short_headings=1"), "{output}");
    assert!(output.contains("has_schema_markup=true"), "{output}");
    assert!(output.contains("has_structured_content=true"), "{output}");
    assert!(output.contains("link_count=1"), "{output}");
    assert!(output.contains("image_count=1"), "{output}");
}

fn create_test_response(html: String, url: &str) -> PageResponse {
    PageResponse {
        url_final: Url::parse(url).unwrap(),
        status: StatusCode::OK,
        charset: "UTF-8",
        body_utf8: html,
        fetched_at: Utc::now(),
    }
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(
            html in ".*",
            url in "https://[a-z]+\\.com/[a-z]*"
        ) {
            let _ = extract(&create_test_response(html, &url));
        }

        #[test]
        fn test_extract_respects_caps(html in ".*") {
            let content = extract(&create_test_response(html, "https://example.com"));
            prop_assert!(content.text_content.chars().count() <= MAX_TEXT_CHARS);
            prop_assert!(content.html.chars().count() <= MAX_HTML_CHARS);
        }
    }
}
