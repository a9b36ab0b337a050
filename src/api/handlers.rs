//! API Handlers
//!
//! HTTP request handlers for each store command.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Json,
};
use tracing::debug;

use crate::error::StoreError;
use crate::models::{
    DelRequest, HealthResponse, Reply, SaddRequest, SetexRequest, StoreStatsResponse,
};
use crate::store::MemoryStore;

/// Result type of command handlers.
pub type CommandResult<T> = Result<Json<Reply<T>>, StoreError>;

/// Application state shared across all handlers.
///
/// Contains the store wrapped in Arc<RwLock<>> for thread-safe access and
/// the bearer token clients must present.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe store
    pub store: Arc<RwLock<MemoryStore>>,
    /// Accepted bearer token
    pub token: Arc<str>,
}

impl AppState {
    /// Creates a new AppState around `store`.
    pub fn new(store: MemoryStore, token: impl Into<Arc<str>>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            token: token.into(),
        }
    }

    /// Creates an empty store from configuration.
    pub fn from_config(config: &crate::config::StoreConfig) -> Self {
        Self::new(MemoryStore::new(), config.token.as_str())
    }
}

/// Rejects requests without `Authorization: Bearer <token>`.
pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StoreError> {
    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    if presented != Some(&*state.token) {
        debug!(path = %request.uri().path(), "Rejected request with bad token");
        return Err(StoreError::Unauthorized);
    }

    Ok(next.run(request).await)
}

/// Handler for POST /ping
pub async fn ping_handler() -> Json<Reply<String>> {
    Json(Reply::new("PONG".to_string()))
}

/// Handler for GET /get/:key
///
/// Acquires the write lock since reads drop expired values.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> CommandResult<Option<String>> {
    let mut store = state.store.write().await;
    Ok(Json(Reply::new(store.get(&key)?)))
}

/// Handler for POST /setex
pub async fn setex_handler(
    State(state): State<AppState>,
    Json(req): Json<SetexRequest>,
) -> CommandResult<String> {
    if let Some(error_msg) = req.validate() {
        return Err(StoreError::InvalidRequest(error_msg));
    }

    let mut store = state.store.write().await;
    store.setex(req.key, req.ex, req.value)?;

    Ok(Json(Reply::new("OK".to_string())))
}

/// Handler for POST /del
pub async fn del_handler(
    State(state): State<AppState>,
    Json(req): Json<DelRequest>,
) -> CommandResult<u64> {
    let mut store = state.store.write().await;
    Ok(Json(Reply::new(store.del(&req.keys))))
}

/// Handler for POST /sadd
pub async fn sadd_handler(
    State(state): State<AppState>,
    Json(req): Json<SaddRequest>,
) -> CommandResult<u64> {
    if let Some(error_msg) = req.validate() {
        return Err(StoreError::InvalidRequest(error_msg));
    }

    let mut store = state.store.write().await;
    Ok(Json(Reply::new(store.sadd(&req.key, &req.members)?)))
}

/// Handler for GET /smembers/:key
pub async fn smembers_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> CommandResult<Vec<String>> {
    let mut store = state.store.write().await;
    Ok(Json(Reply::new(store.smembers(&key)?)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StoreStatsResponse> {
    let store = state.store.read().await;
    let (strings, sets) = store.counts();

    Json(StoreStatsResponse {
        strings,
        sets,
        expired: store.expired_count(),
    })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
