use std::error::Error as StdError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unsupported url scheme: {0}")]
    UnsupportedScheme(String),

    #[error("tls error: {0}")]
    Tls(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("connect timeout")]
    ConnectTimeout,

    #[error("request timeout")]
    RequestTimeout,

    #[error("too many redirects")]
    RedirectLoop,

    #[error("http error {status}")]
    Http { status: reqwest::StatusCode },

    #[error("body too large ({0} bytes)")]
    BodyTooLarge(u64),

    #[error("unsupported content-type: {0}")]
    UnsupportedContentType(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("unknown: {0}")]
    Unknown(String),
}

impl FetchError {
    pub fn is_tls(&self) -> bool {
        matches!(self, Self::Tls(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::ConnectTimeout | Self::RequestTimeout)
    }

    /// Message shown to whoever asked for `url` to be analyzed.
    pub fn user_message(&self, url: &str) -> String {
        match self {
            Self::Tls(_) => format!(
                "SSL certificate error: The website {url} has an invalid SSL certificate. \
                 This is a security issue on their end."
            ),
            Self::Connect(_) => format!(
                "Connection failed: Unable to reach {url}. \
                 The site may be down, blocked, or have network issues."
            ),
            Self::ConnectTimeout | Self::RequestTimeout => format!(
                "Request timeout: {url} took too long to respond. \
                 The site may be slow or overloaded."
            ),
            other => format!("Failed to extract content from {url}: {other}"),
        }
    }

    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            if err.is_connect() {
                Self::ConnectTimeout
            } else {
                Self::RequestTimeout
            }
        } else if mentions_certificate(&err) {
            Self::Tls(chain_to_string(&err))
        } else if err.is_connect() {
            Self::Connect(chain_to_string(&err))
        } else if err.is_redirect() {
            Self::RedirectLoop
        } else if let Some(status) = err.status() {
            Self::Http { status }
        } else if err.is_body() || err.is_decode() {
            Self::Io(err.to_string())
        } else {
            Self::Unknown(chain_to_string(&err))
        }
    }
}

// reqwest has no dedicated TLS flag; the rustls/native-tls cause ends up
// somewhere in the source chain.
fn mentions_certificate(err: &reqwest::Error) -> bool {
    is_certificate_failure(&chain_to_string(err))
}

/// Whether an error chain rendered as text describes a certificate failure.
pub fn is_certificate_failure(chain: &str) -> bool {
    let text = chain.to_lowercase();
    text.contains("certificate") || text.contains("self-signed") || text.contains("self signed")
}

fn chain_to_string(err: &reqwest::Error) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        parts.push(cause.to_string());
        source = cause.source();
    }
    parts.join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tailored_messages_per_failure_kind() {
        let url = "https://example.com";

        let tls = FetchError::Tls("self-signed certificate".into()).user_message(url);
        assert!(tls.starts_with("SSL certificate error"));
        assert!(tls.contains(url));

        let connect = FetchError::Connect("refused".into()).user_message(url);
        assert!(connect.starts_with("Connection failed"));

        let timeout = FetchError::RequestTimeout.user_message(url);
        assert!(timeout.starts_with("Request timeout"));
        assert_eq!(FetchError::ConnectTimeout.user_message(url), timeout);

        let other = FetchError::Http {
            status: reqwest::StatusCode::NOT_FOUND,
        }
        .user_message(url);
        assert!(other.starts_with("Failed to extract content from https://example.com"));
        assert!(other.contains("404"));
    }

    #[test]
    fn certificate_failures_are_recognised_in_error_chains() {
        assert!(is_certificate_failure(
            "error sending request: client error (Connect): invalid peer certificate: UnknownIssuer"
        ));
        assert!(is_certificate_failure(
            "error trying to connect: self signed certificate in certificate chain"
        ));
        assert!(is_certificate_failure("Self-Signed chain rejected"));
        assert!(!is_certificate_failure(
            "error trying to connect: tcp connect error: Connection refused (os error 111)"
        ));
        assert!(!is_certificate_failure("operation timed out"));
    }

    #[test]
    fn classification_helpers() {
        assert!(FetchError::Tls("x".into()).is_tls());
        assert!(!FetchError::Connect("x".into()).is_tls());
        assert!(FetchError::RequestTimeout.is_timeout());
        assert!(!FetchError::BodyTooLarge(1).is_timeout());
    }
}
