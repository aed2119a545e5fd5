//! Game types

use crate::EntityId;
use serde::{Deserialize, Serialize};

/// A game in the studio catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub genres: Vec<String>,
    pub slug: String,
}

/// Game insert payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGame {
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub genres: Vec<String>,
    pub slug: String,
}

impl NewGame {
    pub fn into_game(self, id: EntityId) -> Game {
        Game {
            id,
            title: self.title,
            description: self.description,
            thumbnail_url: self.thumbnail_url,
            genres: self.genres,
            slug: self.slug,
        }
    }
}
