use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

use crate::api::response::{ApiError, JSend};
use crate::AppState;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub schema_version: Option<u64>,
    pub status: String,
    pub version: String,
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<JSend<HealthResponse>>, ApiError> {
    let db = state
        .store
        .open()
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;
    let schema_version = db
        .schema_version()
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(JSend::success(HealthResponse {
        schema_version,
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Fallback for everything neither the interceptor nor a route claims.
pub async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}
