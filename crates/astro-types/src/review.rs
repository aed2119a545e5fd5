//! Review types

use crate::validation::{FieldError, ValidationErrors};
use crate::EntityId;
use serde::{Deserialize, Serialize};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// A player or press review.
///
/// Industry reviews carry `game_id: None` and `is_industry: true`; they are
/// about the studio rather than one title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: EntityId,
    pub reviewer_name: String,
    pub reviewer_title: String,
    pub rating: i32,
    pub content: String,
    pub game_id: Option<EntityId>,
    pub is_industry: bool,
}

/// Review insert payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub reviewer_name: String,
    pub reviewer_title: String,
    pub rating: i32,
    pub content: String,
    #[serde(default)]
    pub game_id: Option<EntityId>,
    #[serde(default)]
    pub is_industry: bool,
}

impl NewReview {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            errors.push(FieldError::new(
                "rating",
                format!("Must be between {} and {}", MIN_RATING, MAX_RATING),
            ));
        }
        if self.reviewer_name.trim().is_empty() {
            errors.push(FieldError::new("reviewerName", "Must not be empty"));
        }
        if self.content.trim().is_empty() {
            errors.push(FieldError::new("content", "Must not be empty"));
        }
        if self.is_industry && self.game_id.is_some() {
            errors.push(FieldError::new(
                "gameId",
                "Industry reviews cannot reference a game",
            ));
        }
        errors.finish(())
    }

    pub fn into_review(self, id: EntityId) -> Review {
        Review {
            id,
            reviewer_name: self.reviewer_name,
            reviewer_title: self.reviewer_title,
            rating: self.rating,
            content: self.content,
            game_id: self.game_id,
            is_industry: self.is_industry,
        }
    }
}
