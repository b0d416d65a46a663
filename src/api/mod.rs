//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Resource endpoints are mounted under `/api/v1`; health and config
//! endpoints sit at the root.

pub mod caller;
pub mod dto;
pub mod handlers;
pub mod openapi;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::ws::handler::ws_handler;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/docs")
                .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        )
    };

    router
}

/// Builds the full application: REST, WebSocket, tracing, and CORS layers,
/// bound to the given state.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(build_router())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
