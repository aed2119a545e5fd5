//! Field-level validation for write payloads
//!
//! Form payloads arrive with every field optional. Validation collects every
//! violation instead of stopping at the first one, so a client can mark all
//! bad fields at once.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single violation, addressed by the path of the offending field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub path: Vec<String>,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            path: vec![field.to_string()],
            message: message.into(),
        }
    }

    /// An error about the payload as a whole rather than one field
    pub fn body(message: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            message: message.into(),
        }
    }

    pub fn field(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path.join("."), self.message)
        }
    }
}

/// All violations found in one payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", summarize(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.0
    }

    /// `Ok(value)` when nothing was recorded
    pub fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

/// Trim a required text field, recording an error when it is absent or blank.
pub(crate) fn required_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<String>,
) -> Option<String> {
    match value.map(|v| v.trim().to_string()) {
        None => {
            errors.push(FieldError::new(field, "Required"));
            None
        }
        Some(v) if v.is_empty() => {
            errors.push(FieldError::new(field, "Must not be empty"));
            None
        }
        Some(v) => Some(v),
    }
}

/// Required email field: present, non-blank and shaped like an address.
pub(crate) fn required_email(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<String>,
) -> Option<String> {
    let email = required_text(errors, field, value)?;
    if is_valid_email(&email) {
        Some(email)
    } else {
        errors.push(FieldError::new(field, "Invalid email address"));
        None
    }
}

/// Syntactic plausibility only: `local@domain.tld`, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return false;
    }
    domain.split('.').all(|label| !label.is_empty())
}
