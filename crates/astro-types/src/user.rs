//! User types

use crate::EntityId;
use serde::{Deserialize, Serialize};

/// User account. Not exposed by any route; the password never leaves the
/// process in a response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// User insert payload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

impl NewUser {
    pub fn into_user(self, id: EntityId) -> User {
        User {
            id,
            username: self.username,
            password: self.password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_not_serialized() {
        let user = NewUser {
            username: "astro".to_string(),
            password: "hunter2".to_string(),
        }
        .into_user(1);
        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(json, r#"{"id":1,"username":"astro"}"#);
    }
}
