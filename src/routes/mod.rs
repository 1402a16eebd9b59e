//! Page and service route handlers

pub mod invoice;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::cache::CacheStats;
use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub cache: CacheStats,
}

/// Liveness check with cache state for monitoring
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        cache: state.cache.stats(),
    })
}
