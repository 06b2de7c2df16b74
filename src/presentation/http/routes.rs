//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use super::handlers;
use crate::presentation::middleware::{auth_middleware, optional_auth_middleware};
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes(state.clone()))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        .with_state(state)
}

/// API v1 routes
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new().nest("/servers", server_routes(state))
}

/// Server routes
///
/// The list endpoint is public but carries optional authentication so the
/// `by_user` filter can see the caller. Write routes require a valid token.
fn server_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(handlers::server::create_server))
        .route("/{server_id}/icon", put(handlers::server::upload_server_icon))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(handlers::server::list_servers))
        .route_layer(middleware::from_fn_with_state(
            state,
            optional_auth_middleware,
        ))
        .merge(protected)
}
