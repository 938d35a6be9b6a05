use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    #[schema(example = "https://example.com")]
    pub url: Option<String>,
}

impl AnalyzeRequest {
    /// The URL as submitted, once it is known to be present and absolute.
    pub fn validate(&self) -> Result<&str, String> {
        let raw = match self.url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => return Err("URL is required".to_string()),
        };
        Url::parse(raw).map_err(|_| "Invalid URL format".to_string())?;
        Ok(raw)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: Option<&str>) -> AnalyzeRequest {
        AnalyzeRequest {
            url: url.map(str::to_string),
        }
    }

    #[test]
    fn test_analyze_request_valid() {
        let req = request(Some("https://example.com/page"));
        assert_eq!(req.validate().unwrap(), "https://example.com/page");
    }

    #[test]
    fn test_analyze_request_missing_url() {
        assert_eq!(request(None).validate().unwrap_err(), "URL is required");
        assert_eq!(request(Some("")).validate().unwrap_err(), "URL is required");
    }

    #[test]
    fn test_analyze_request_relative_url() {
        assert_eq!(
            request(Some("example.com")).validate().unwrap_err(),
            "Invalid URL format"
        );
        assert_eq!(
            request(Some("/just/a/path")).validate().unwrap_err(),
            "Invalid URL format"
        );
    }

    #[test]
    fn test_analyze_request_deserializes_without_url() {
        let parsed: AnalyzeRequest = serde_json::from_str("{}").unwrap();
        assert!(parsed.url.is_none());
    }
}
