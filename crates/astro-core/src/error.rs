//! Error types for Astro Studios

use astro_types::ValidationErrors;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AstroError>;

#[derive(Error, Debug)]
pub enum AstroError {
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    #[error("{kind} already exists: {key}")]
    Conflict { kind: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl AstroError {
    pub fn not_found(kind: &'static str, key: impl ToString) -> Self {
        AstroError::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    pub fn conflict(kind: &'static str, key: impl ToString) -> Self {
        AstroError::Conflict {
            kind,
            key: key.to_string(),
        }
    }
}
