use axum::{
    Router,
    http::{Method, Request, header::CONTENT_TYPE},
    middleware::from_fn_with_state,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info_span;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    analysis::types::{
        AnalysisResult, ContentGap, ContentSnapshot, DetectedEntity, PerformanceMetrics,
        PillarScore, PillarScores, Recommendation,
    },
    api::{
        dtos::{AnalyzeRequest, ErrorResponse},
        handlers,
    },
    app_state::AppState,
    health::{self, HealthResponse},
    middleware::{RateLimit, rate_limit_middleware},
};

#[derive(OpenApi)]
#[openapi(
    info(title = "geolens", description = "Generative engine optimization analysis"),
    paths(handlers::analyze, health::health_check),
    components(schemas(
        AnalyzeRequest,
        ErrorResponse,
        AnalysisResult,
        PillarScores,
        PillarScore,
        Recommendation,
        DetectedEntity,
        ContentGap,
        ContentSnapshot,
        PerformanceMetrics,
        HealthResponse
    )),
    tags(
        (name = "analysis", description = "Website analysis"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

/// Full application router. The rate limit, when given, applies to the
/// analyze route only and needs the server to provide `ConnectInfo`.
pub fn router(state: AppState, rate_limit: Option<RateLimit>) -> Router {
    let mut analyze = Router::new().route("/api/analyze", post(handlers::analyze));
    if let Some(limit) = rate_limit {
        analyze = analyze.route_layer(from_fn_with_state(limit, rate_limit_middleware));
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    let trace = TraceLayer::new_for_http().make_span_with(|req: &Request<_>| {
        let request_id = req
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");
        info_span!(
            "http",
            method = %req.method(),
            uri = %req.uri(),
            request_id = %request_id
        )
    });

    Router::new()
        .merge(analyze)
        .route("/healthz", get(health::health_check))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(trace)
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/analyze"));
        assert!(doc.paths.paths.contains_key("/healthz"));
    }
}
