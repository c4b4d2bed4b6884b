pub mod health;
pub mod websocket;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router
///
/// # Routes
///
/// - `GET /ws` - player WebSocket
/// - `GET /health` - liveness check
/// - `GET /stats` - match statistics
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/stats", get(health::stats))
        .route("/ws", get(websocket::websocket_handler))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
