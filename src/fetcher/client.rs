use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder, header};
use tracing::{info, instrument, warn};
use url::Url;

use crate::fetcher::{errors::FetchError, pipeline::process_response, types::PageResponse};

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
const USER_AGENT: &str = "Mozilla/5.0 (compatible; GEOAnalyzer/1.0; +https://geo-analyzer.com)";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    build_client(DEFAULT_TIMEOUT).unwrap_or_else(|e| panic!("failed to build HTTP client: {e}"))
});

pub fn build_client(timeout: Duration) -> Result<Client, FetchError> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        header::HeaderValue::from_static("en-US,en;q=0.5"),
    );
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        header::HeaderValue::from_static("1"),
    );

    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10).min(timeout))
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .default_headers(headers)
        .build()
        .map_err(|e| FetchError::Unknown(e.to_string()))
}

pub fn get_client() -> &'static Client {
    &HTTP_CLIENT
}

/// Fetch with the shared default client.
pub async fn fetch(url: &str) -> Result<PageResponse, FetchError> {
    Fetcher::shared().fetch(url).await
}

/// Page fetcher bound to one HTTP client.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(timeout)?,
        })
    }

    pub fn shared() -> Self {
        Self {
            client: get_client().clone(),
        }
    }

    /// GET `url`; a TLS certificate failure on https is retried once over http.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn fetch(&self, url: &str) -> Result<PageResponse, FetchError> {
        let parsed_url = Url::parse(url)?;
        if !matches!(parsed_url.scheme(), "http" | "https") {
            return Err(FetchError::UnsupportedScheme(parsed_url.scheme().to_string()));
        }

        with_plaintext_retry(parsed_url, |url| self.fetch_once(url)).await
    }

    async fn fetch_once(&self, url: Url) -> Result<PageResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        if let Some(content_length) = response.content_length()
            && content_length > MAX_BODY_SIZE
        {
            return Err(FetchError::BodyTooLarge(content_length));
        }

        let final_url = response.url().clone();
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Http { status });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("text/html")
            .to_string();

        if !content_type.contains("text/html") && !content_type.contains("application/xhtml") {
            return Err(FetchError::UnsupportedContentType(content_type));
        }

        let body = response
            .bytes()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        // Content-Length may be missing or wrong
        if body.len() as u64 > MAX_BODY_SIZE {
            return Err(FetchError::BodyTooLarge(body.len() as u64));
        }

        info!(status = %status, bytes = body.len(), "fetched page");
        Ok(process_response(final_url, status, &content_type, &body))
    }
}

/// Run `attempt` on `url`; if it fails with a TLS error and `url` is https,
/// run it once more on the plain http URL.
pub async fn with_plaintext_retry<T, F, Fut>(url: Url, attempt: F) -> Result<T, FetchError>
where
    F: Fn(Url) -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    match attempt(url.clone()).await {
        Err(err) if err.is_tls() => match plaintext_fallback(&url) {
            Some(http_url) => {
                warn!(error = %err, "https failed, retrying over http");
                attempt(http_url).await
            }
            None => Err(err),
        },
        other => other,
    }
}

/// The same URL over plain http, if it was https to begin with.
pub fn plaintext_fallback(url: &Url) -> Option<Url> {
    if url.scheme() != "https" {
        return None;
    }
    let mut http_url = url.clone();
    http_url.set_scheme("http").ok()?;
    // An explicit :443 would be wrong for plain http.
    if http_url.port() == Some(443) {
        http_url.set_port(None).ok()?;
    }
    Some(http_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recording_attempt(
        calls: &Mutex<Vec<String>>,
        outcome: impl Fn(&Url) -> Result<&'static str, FetchError>,
    ) -> impl Fn(Url) -> std::future::Ready<Result<&'static str, FetchError>> {
        move |url: Url| {
            calls.lock().unwrap().push(url.to_string());
            std::future::ready(outcome(&url))
        }
    }

    #[tokio::test]
    async fn tls_failure_on_https_is_retried_over_http() {
        let calls = Mutex::new(Vec::new());
        let attempt = recording_attempt(&calls, |url| match url.scheme() {
            "https" => Err(FetchError::Tls("invalid peer certificate".into())),
            _ => Ok("page"),
        });

        let result = with_plaintext_retry(Url::parse("https://example.com/a").unwrap(), attempt).await;

        assert_eq!(result.unwrap(), "page");
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["https://example.com/a", "http://example.com/a"]
        );
    }

    #[tokio::test]
    async fn tls_failure_on_retry_is_returned() {
        let calls = Mutex::new(Vec::new());
        let attempt = recording_attempt(&calls, |_| Err(FetchError::Tls("certificate".into())));

        let result = with_plaintext_retry(Url::parse("https://example.com/").unwrap(), attempt).await;

        assert!(matches!(result, Err(FetchError::Tls(_))));
        assert_eq!(calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn other_failures_are_not_retried() {
        let calls = Mutex::new(Vec::new());
        let attempt = recording_attempt(&calls, |_| Err(FetchError::Connect("refused".into())));

        let result = with_plaintext_retry(Url::parse("https://example.com/").unwrap(), attempt).await;

        assert!(matches!(result, Err(FetchError::Connect(_))));
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn tls_failure_over_http_is_not_retried() {
        let calls = Mutex::new(Vec::new());
        let attempt = recording_attempt(&calls, |_| Err(FetchError::Tls("certificate".into())));

        let result = with_plaintext_retry(Url::parse("http://example.com/").unwrap(), attempt).await;

        assert!(matches!(result, Err(FetchError::Tls(_))));
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn plaintext_fallback_swaps_scheme() {
        let url = Url::parse("https://example.com/a?b=c").unwrap();
        let fallback = plaintext_fallback(&url).unwrap();
        assert_eq!(fallback.as_str(), "http://example.com/a?b=c");
    }

    #[test]
    fn plaintext_fallback_drops_tls_port() {
        let url = Url::parse("https://example.com:443/").unwrap();
        assert_eq!(
            plaintext_fallback(&url).unwrap().as_str(),
            "http://example.com/"
        );
        let url = Url::parse("https://example.com:8443/").unwrap();
        assert_eq!(
            plaintext_fallback(&url).unwrap().as_str(),
            "http://example.com:8443/"
        );
    }

    #[test]
    fn plaintext_fallback_ignores_http() {
        let url = Url::parse("http://example.com/").unwrap();
        assert!(plaintext_fallback(&url).is_none());
    }
}
