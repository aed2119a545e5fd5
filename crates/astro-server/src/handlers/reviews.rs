//! Review handlers

use super::ApiError;
use crate::AppState;
use astro_core::{EntityId, Review};
use axum::{
    extract::{Path, State},
    Json,
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Review>>, ApiError> {
    let reviews = state
        .store
        .get_all_reviews()
        .await
        .map_err(|e| ApiError::internal("Failed to fetch reviews", e))?;
    Ok(Json(reviews))
}

/// The id arrives as a raw path segment so a non-integer is a 400 with our
/// own envelope rather than axum's path rejection. Integers too large for an
/// id cannot match any review.
pub async fn list_for_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<Vec<Review>>, ApiError> {
    let Some(game_id) = parse_game_id(&game_id)? else {
        return Ok(Json(Vec::new()));
    };

    let reviews = state
        .store
        .get_reviews_by_game_id(game_id)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch reviews", e))?;
    Ok(Json(reviews))
}

/// `Ok(None)` for an integer outside the id range.
fn parse_game_id(raw: &str) -> Result<Option<EntityId>, ApiError> {
    let raw = raw.trim();
    let digits = raw.strip_prefix(['-', '+']).unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::BadRequest("Invalid game ID"));
    }
    Ok(raw.parse::<EntityId>().ok())
}
