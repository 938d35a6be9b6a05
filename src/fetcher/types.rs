use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use url::Url;

/// A decoded HTML document as returned by the target site.
#[derive(Debug, Clone)]
pub struct PageResponse {
    /// URL after redirects (and after the plaintext retry, if one happened).
    pub url_final: Url,
    pub status: StatusCode,
    /// Name of the encoding the body was decoded from.
    pub charset: &'static str,
    pub body_utf8: String,
    pub fetched_at: DateTime<Utc>,
}
