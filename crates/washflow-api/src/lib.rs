//! Washflow: HTTP API over the appointment lifecycle engine.

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

use state::AppState;

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/catalog", routes::catalog::router())
        .nest("/api/v1/users", routes::users::router())
        .nest("/api/v1/appointments", routes::appointments::router())
        .nest("/api/v1/reports", routes::reports::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
