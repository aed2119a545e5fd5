//! API error envelope
//!
//! Every failure leaves the API as `{ "message": ... }`, plus an `errors`
//! list for validation failures. Store errors are logged here and replaced
//! by the route's generic message.

use astro_core::{AstroError, FieldError, ValidationErrors};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}: {errors}")]
    Validation {
        message: &'static str,
        errors: ValidationErrors,
    },

    #[error("{0}")]
    BadRequest(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Internal(&'static str),
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [FieldError]>,
}

impl ApiError {
    /// Log `source` and hide it behind `message`.
    pub fn internal(message: &'static str, source: AstroError) -> Self {
        tracing::error!("{}: {}", message, source);
        ApiError::Internal(message)
    }

    /// A body axum could not decode counts as a validation failure of the
    /// payload as a whole.
    pub fn from_rejection(message: &'static str, rejection: JsonRejection) -> Self {
        ApiError::Validation {
            message,
            errors: FieldError::body(rejection.body_text()).into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Validation { message, errors } => ErrorBody {
                message,
                errors: Some(errors.errors()),
            },
            ApiError::BadRequest(message)
            | ApiError::NotFound(message)
            | ApiError::Internal(message) => ErrorBody {
                message,
                errors: None,
            },
        };
        (status, Json(body)).into_response()
    }
}
