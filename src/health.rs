use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub engine_configured: bool,
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Health check successful", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    debug!("Health check");
    Json(HealthResponse {
        status: "OK".to_string(),
        model: state.analyzer.model().to_string(),
        engine_configured: state.engine_configured,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Analyzer;
    use crate::engine::MockReasoningEngine;
    use crate::extractor::MockContentSource;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_reports_model() {
        let mut engine = MockReasoningEngine::new();
        engine.expect_model().return_const("gpt-test".to_string());
        let state = AppState::new(
            Analyzer::new(Arc::new(MockContentSource::new()), Arc::new(engine)),
            false,
        );
        let app = Router::new()
            .route("/healthz", get(health_check))
            .with_state(state);

        let response = app
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let health: HealthResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(health.status, "OK");
        assert_eq!(health.model, "gpt-test");
        assert!(!health.engine_configured);
    }
}
