use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    app_state::AppState,
    health::{self, HealthResponse},
    meta::{
        self,
        dtos::{ErrorResponse, MetaResponse},
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(meta::handlers::get_meta, health::health_check),
    components(schemas(MetaResponse, ErrorResponse, HealthResponse)),
    tags(
        (name = "meta", description = "Page title and meta tag lookup"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;

/// The HTTP application: metadata lookup, health check and API docs.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(meta::get_meta).options(meta::preflight))
        .route("/api", get(meta::get_meta).options(meta::preflight))
        .route("/healthz", get(health::health_check))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}
