use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("reasoning engine API key not configured")]
    MissingApiKey,

    #[error("engine request failed: {0}")]
    Transport(String),

    #[error("engine request timed out")]
    Timeout,

    #[error("engine returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("could not decode engine reply: {0}")]
    Decode(String),

    #[error("no response from reasoning engine")]
    EmptyResponse,
}

impl EngineError {
    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
