//! Blog handlers

use super::ApiError;
use crate::AppState;
use astro_core::BlogPost;
use axum::{
    extract::{Path, State},
    Json,
};

/// Newest post first.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<BlogPost>>, ApiError> {
    let posts = state
        .store
        .get_all_blog_posts()
        .await
        .map_err(|e| ApiError::internal("Failed to fetch blog posts", e))?;
    Ok(Json(posts))
}

pub async fn get(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>, ApiError> {
    state
        .store
        .get_blog_post_by_slug(&slug)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch blog post", e))?
        .map(Json)
        .ok_or(ApiError::NotFound("Blog post not found"))
}
