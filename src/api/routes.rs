//! API Routes
//!
//! Configures the Axum router for the local store.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    del_handler, get_handler, health_handler, ping_handler, require_bearer, sadd_handler,
    setex_handler, smembers_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// Store commands require the bearer token; `/health` and `/stats` do not.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let commands = Router::new()
        .route("/ping", post(ping_handler))
        .route("/get/:key", get(get_handler))
        .route("/setex", post(setex_handler))
        .route("/del", post(del_handler))
        .route("/sadd", post(sadd_handler))
        .route("/smembers/:key", get(smembers_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    Router::new()
        .merge(commands)
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
