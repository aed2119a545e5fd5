//! Contact form handler

use super::{ApiError, Created};
use crate::AppState;
use astro_core::ContactForm;
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use tracing::info;

const INVALID: &str = "Invalid form data";

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let Json(form) = payload.map_err(|rejection| ApiError::from_rejection(INVALID, rejection))?;
    let message = form.validate().map_err(|errors| ApiError::Validation {
        message: INVALID,
        errors,
    })?;

    let message = state
        .store
        .create_contact_message(message)
        .await
        .map_err(|e| ApiError::internal("Failed to send message", e))?;

    info!(
        "Contact message received: id={}, from={} <{}>, subject={}",
        message.id, message.name, message.email, message.subject
    );

    Ok((
        StatusCode::CREATED,
        Json(Created {
            message: "Message sent successfully",
            id: message.id,
        }),
    ))
}
