//! Application route configuration.

use std::time::Duration;

use axum::body::Body;
use axum::http::{HeaderValue, Request, Response};
use axum::Router;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Span;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{health_routes, user_routes};
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::{Config, API_LOGGER};

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .nest("/health", health_routes())
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/users", user_routes())
        // Global middleware
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .on_request(|request: &Request<Body>, _: &Span| {
                    tracing::debug!(
                        logger = API_LOGGER,
                        method = %request.method(),
                        uri = %request.uri(),
                        "Request started"
                    );
                })
                .on_response(|response: &Response<Body>, latency: Duration, _: &Span| {
                    tracing::debug!(
                        logger = API_LOGGER,
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis() as u64,
                        "Request finished"
                    );
                })
                .on_eos(())
                .on_failure(|failure: ServerErrorsFailureClass, latency: Duration, _: &Span| {
                    tracing::error!(
                        logger = API_LOGGER,
                        %failure,
                        latency_ms = latency.as_millis() as u64,
                        "Request failed"
                    );
                }),
        )
        .with_state(state)
}

/// CORS policy from the configured origins
fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(logger = API_LOGGER, "Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
