pub mod cleaner;
pub mod model;
pub mod reader;
pub mod structure;

#[cfg(test)]
mod tests;

pub use model::{ContentStructure, ExtractedContent, HeadingLengths};
pub use structure::analyze_structure;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::fetcher::{FetchError, Fetcher, types::PageResponse};

/// Cap on the cleaned text handed downstream.
pub const MAX_TEXT_CHARS: usize = 10_000;
/// Cap on the raw markup kept alongside it.
pub const MAX_HTML_CHARS: usize = 50_000;

pub fn extract(resp: &PageResponse) -> ExtractedContent {
    let signals = reader::read(&resp.body_utf8);

    let cleaned = cleaner::collapse_whitespace(&signals.main_text);
    let text_content = cleaner::truncate_chars(&cleaned, MAX_TEXT_CHARS).to_string();
    let html = cleaner::truncate_chars(&resp.body_utf8, MAX_HTML_CHARS).to_string();

    ExtractedContent {
        url: resp.url_final.clone(),
        title: signals.title,
        meta_description: signals.meta_description,
        meta_keywords: signals.meta_keywords,
        headings: signals.headings,
        schema_markup: signals.schema_markup,
        links: signals.links,
        images: signals.images,
        text_content,
        html,
        fetched_at: resp.fetched_at,
    }
}

/// Where page content comes from.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn extract(&self, url: &str) -> Result<ExtractedContent, FetchError>;
}

/// Fetches over HTTP and runs [`extract`] on the result.
#[derive(Clone)]
pub struct HttpContentSource {
    fetcher: Fetcher,
}

impl HttpContentSource {
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }
}

impl Default for HttpContentSource {
    fn default() -> Self {
        Self::new(Fetcher::shared())
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    #[instrument(skip(self))]
    async fn extract(&self, url: &str) -> Result<ExtractedContent, FetchError> {
        let page = self.fetcher.fetch(url).await?;
        let content = extract(&page);
        log_extraction(&content);
        Ok(content)
    }
}

/// Debug summary of what a page offers, built from its [`ContentStructure`].
pub fn log_extraction(content: &ExtractedContent) {
    let structure = analyze_structure(content);
    debug!(
        title = %content.title,
        text_chars = structure.content_length,
        has_title = structure.has_title,
        has_meta_description = structure.has_meta_description,
        has_meta_keywords = structure.has_meta_keywords,
        heading_count = structure.heading_count,
        short_headings = structure.heading_lengths.short,
        medium_headings = structure.heading_lengths.medium,
        long_headings = structure.heading_lengths.long,
        has_schema_markup = structure.has_schema_markup,
        has_structured_content = structure.has_structured_content,
        link_count = structure.link_count,
        image_count = structure.image_count,
        "extracted page content"
    );
}
