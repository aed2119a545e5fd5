//! HTTP handlers

pub mod blog;
pub mod contact;
pub mod error;
pub mod games;
pub mod newsletter;
pub mod reviews;

pub use error::ApiError;

use crate::AppState;
use astro_core::{EntityId, StoreStats};
use axum::{extract::State, Json};
use serde::Serialize;

/// Body of a successful write
#[derive(Debug, Serialize)]
pub struct Created {
    pub message: &'static str,
    pub id: EntityId,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    records: StoreStats,
}

pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let records = state
        .store
        .stats()
        .await
        .map_err(|e| ApiError::internal("Failed to read store", e))?;
    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        records,
    }))
}

/// Fallback for unknown `/api` paths
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found")
}
