use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::Request,
    response::Response,
};
use geolens::{
    analysis::Analyzer,
    app::router,
    app_state::AppState,
    engine::ReasoningEngine,
    extractor::HttpContentSource,
    fetcher::Fetcher,
};
use serde_json::Value;

/// Full router over a real HTTP content source and the given engine.
pub fn test_app(engine: impl ReasoningEngine + 'static, engine_configured: bool) -> Router {
    let fetcher = Fetcher::new(std::time::Duration::from_secs(5)).unwrap();
    let analyzer = Analyzer::new(
        Arc::new(HttpContentSource::new(fetcher)),
        Arc::new(engine),
    );
    router(AppState::new(analyzer, engine_configured), None)
}

pub fn analyze_request(url: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::json!({ "url": url }).to_string()))
        .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
