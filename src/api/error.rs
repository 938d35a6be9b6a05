use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::analysis::AnalyzeError;
use crate::api::dtos::ErrorResponse;

pub const EXTRACTION_FAILURE_MESSAGE: &str =
    "Unable to access the website. Please check the URL and try again.";
pub const ENGINE_FAILURE_MESSAGE: &str = "AI analysis failed. Please try again later.";
pub const MISCONFIGURED_MESSAGE: &str = "OpenAI API key not configured";
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred during analysis";

/// Errors surfaced to callers of the analyze endpoint.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{}", EXTRACTION_FAILURE_MESSAGE)]
    ExtractionFailure,

    #[error("{}", ENGINE_FAILURE_MESSAGE)]
    ReasoningEngineFailure,

    #[error("{}", MISCONFIGURED_MESSAGE)]
    Misconfigured,

    #[error("{}", UNEXPECTED_MESSAGE)]
    Unexpected,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) | Self::ExtractionFailure => StatusCode::BAD_REQUEST,
            Self::ReasoningEngineFailure | Self::Misconfigured | Self::Unexpected => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<AnalyzeError> for ApiError {
    fn from(err: AnalyzeError) -> Self {
        match err {
            AnalyzeError::Extraction(_) => Self::ExtractionFailure,
            AnalyzeError::Engine(_) => Self::ReasoningEngineFailure,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
