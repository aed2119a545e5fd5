//! Newsletter subscription types

use crate::validation::{required_email, ValidationErrors};
use crate::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A newsletter subscriber. Emails are unique across subscriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSubscription {
    pub id: EntityId,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Subscription insert payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNewsletterSubscription {
    pub email: String,
}

impl NewNewsletterSubscription {
    pub fn into_subscription(self, id: EntityId, created_at: DateTime<Utc>) -> NewsletterSubscription {
        NewsletterSubscription {
            id,
            email: self.email,
            created_at,
        }
    }
}

/// Newsletter form as submitted by a client
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsletterForm {
    pub email: Option<String>,
}

impl NewsletterForm {
    pub fn validate(self) -> Result<NewNewsletterSubscription, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        match required_email(&mut errors, "email", self.email) {
            Some(email) => errors.finish(NewNewsletterSubscription { email }),
            None => Err(errors),
        }
    }
}
