//! Newsletter subscription handler

use super::{ApiError, Created};
use crate::AppState;
use astro_core::NewsletterForm;
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use tracing::info;

const INVALID: &str = "Invalid email";

/// Subscribing twice with one email answers with the original subscription.
pub async fn subscribe(
    State(state): State<AppState>,
    payload: Result<Json<NewsletterForm>, JsonRejection>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let Json(form) = payload.map_err(|rejection| ApiError::from_rejection(INVALID, rejection))?;
    let subscription = form.validate().map_err(|errors| ApiError::Validation {
        message: INVALID,
        errors,
    })?;

    let subscription = state
        .store
        .create_newsletter_subscription(subscription)
        .await
        .map_err(|e| ApiError::internal("Failed to subscribe", e))?;

    info!("Newsletter subscription: {} (id={})", subscription.email, subscription.id);

    Ok((
        StatusCode::CREATED,
        Json(Created {
            message: "Subscribed successfully",
            id: subscription.id,
        }),
    ))
}
