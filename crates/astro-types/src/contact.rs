//! Contact form types

use crate::validation::{required_email, required_text, FieldError, ValidationErrors};
use crate::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What a contact message is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactSubject {
    General,
    Support,
    Business,
    Press,
}

impl ContactSubject {
    pub const ALL: [ContactSubject; 4] = [
        ContactSubject::General,
        ContactSubject::Support,
        ContactSubject::Business,
        ContactSubject::Press,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactSubject::General => "general",
            ContactSubject::Support => "support",
            ContactSubject::Business => "business",
            ContactSubject::Press => "press",
        }
    }
}

impl std::fmt::Display for ContactSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactSubject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContactSubject::ALL
            .into_iter()
            .find(|subject| subject.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "Expected one of: {}",
                    ContactSubject::ALL.map(|s| s.as_str()).join(", ")
                )
            })
    }
}

/// A message left through the contact form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub subject: ContactSubject,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Contact message insert payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: ContactSubject,
    pub message: String,
}

impl NewContactMessage {
    pub fn into_message(self, id: EntityId, created_at: DateTime<Utc>) -> ContactMessage {
        ContactMessage {
            id,
            name: self.name,
            email: self.email,
            subject: self.subject,
            message: self.message,
            created_at,
        }
    }
}

/// Contact form as submitted by a client
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl ContactForm {
    pub fn validate(self) -> Result<NewContactMessage, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = required_text(&mut errors, "name", self.name);
        let email = required_email(&mut errors, "email", self.email);
        let subject = required_text(&mut errors, "subject", self.subject).and_then(|s| {
            s.parse::<ContactSubject>()
                .map_err(|e| errors.push(FieldError::new("subject", e)))
                .ok()
        });
        let message = required_text(&mut errors, "message", self.message);

        match (name, email, subject, message) {
            (Some(name), Some(email), Some(subject), Some(message)) => {
                errors.finish(NewContactMessage {
                    name,
                    email,
                    subject,
                    message,
                })
            }
            _ => Err(errors),
        }
    }
}
