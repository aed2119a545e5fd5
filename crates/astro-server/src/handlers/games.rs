//! Game handlers

use super::ApiError;
use crate::AppState;
use astro_core::Game;
use axum::{
    extract::{Path, State},
    Json,
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Game>>, ApiError> {
    let games = state
        .store
        .get_all_games()
        .await
        .map_err(|e| ApiError::internal("Failed to fetch games", e))?;
    Ok(Json(games))
}

pub async fn get(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Game>, ApiError> {
    state
        .store
        .get_game_by_slug(&slug)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch game", e))?
        .map(Json)
        .ok_or(ApiError::NotFound("Game not found"))
}
