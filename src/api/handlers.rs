use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::{error, info, warn};

use crate::{
    analysis::{AnalysisResult, AnalyzeError},
    api::{
        dtos::{AnalyzeRequest, ErrorResponse},
        error::ApiError,
    },
    app_state::AppState,
};

#[utoipa::path(
    post,
    path = "/api/analyze",
    tag = "analysis",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis completed", body = AnalysisResult),
        (status = 400, description = "Invalid URL or site unreachable", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse),
        (status = 500, description = "Engine failure or misconfiguration", body = ErrorResponse)
    )
)]
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!(error = %rejection, "rejected analyze request body");
        ApiError::InvalidInput("Invalid request body".to_string())
    })?;

    let url = payload.validate().map_err(ApiError::InvalidInput)?;

    // Nothing touches the network until the engine can actually be called.
    if !state.engine_configured {
        error!("analyze called without an engine API key");
        return Err(ApiError::Misconfigured);
    }

    info!(%url, "starting analysis");
    // A panic anywhere in the pipeline must still answer with an error body.
    let analyzer = Arc::clone(&state.analyzer);
    let target = url.to_string();
    let outcome = tokio::spawn(async move { analyzer.analyze(&target).await })
        .await
        .map_err(|join_err| {
            error!(error = %join_err, "analysis task aborted");
            ApiError::Unexpected
        })?;

    match outcome {
        Ok(result) => Ok(Json(result)),
        Err(err) => {
            match &err {
                AnalyzeError::Extraction(fetch) => {
                    warn!(detail = %fetch.user_message(url), "analysis failed")
                }
                AnalyzeError::Engine(engine) => error!(error = %engine, "analysis failed"),
            }
            Err(err.into())
        }
    }
}
