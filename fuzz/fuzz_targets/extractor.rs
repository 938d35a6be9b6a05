#![no_main]

use chrono::Utc;
use libfuzzer_sys::fuzz_target;
use reqwest::StatusCode;
use url::Url;

use geolens::extractor::{MAX_HTML_CHARS, MAX_TEXT_CHARS, extract};
use geolens::fetcher::types::PageResponse;

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data).to_string();

    let response = PageResponse {
        url_final: Url::parse("https://example.com").unwrap(),
        status: StatusCode::OK,
        charset: "UTF-8",
        body_utf8: html,
        fetched_at: Utc::now(),
    };

    let content = extract(&response);
    assert!(content.text_content.chars().count() <= MAX_TEXT_CHARS);
    assert!(content.html.chars().count() <= MAX_HTML_CHARS);
    assert!(!content.title.is_empty());
});
