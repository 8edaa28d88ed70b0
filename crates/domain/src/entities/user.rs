use serde::{Deserialize, Serialize};

/// A user that can author comments. Read-only from the comment core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<i32>, // None before persistence
    pub username: String,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
        }
    }

    pub fn with_id(id: i32, username: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            username: username.into(),
        }
    }
}
