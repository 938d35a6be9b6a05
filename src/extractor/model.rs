use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Salient signals pulled out of one fetched page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedContent {
    pub url: Url,
    pub title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    /// Non-empty `h1`..`h6` texts in document order.
    pub headings: Vec<String>,
    /// Each valid JSON-LD block, re-serialized.
    pub schema_markup: Vec<String>,
    /// Absolute outbound links.
    pub links: Vec<String>,
    /// `img` sources as written in the markup.
    pub images: Vec<String>,
    /// Cleaned main-content text, capped at [`MAX_TEXT_CHARS`](super::MAX_TEXT_CHARS).
    pub text_content: String,
    /// Raw markup, capped at [`MAX_HTML_CHARS`](super::MAX_HTML_CHARS).
    pub html: String,
    pub fetched_at: DateTime<Utc>,
}

/// Coarse length histogram of the page headings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingLengths {
    /// Under 50 characters.
    pub short: usize,
    /// 50 to 99 characters.
    pub medium: usize,
    /// 100 characters or more.
    pub long: usize,
}

/// Presence flags and counts derived from an [`ExtractedContent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStructure {
    pub has_title: bool,
    pub has_meta_description: bool,
    pub has_meta_keywords: bool,
    pub heading_count: usize,
    pub heading_lengths: HeadingLengths,
    pub has_schema_markup: bool,
    pub link_count: usize,
    pub image_count: usize,
    /// Length of the cleaned text, in characters.
    pub content_length: usize,
    pub has_structured_content: bool,
}
