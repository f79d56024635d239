//! The user record and the `id` filter accepted by `/users`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl User {
    pub fn new(id: i64, username: impl Into<String>, email: impl Into<String>) -> Self {
        User {
            id,
            username: username.into(),
            email: email.into(),
        }
    }
}

/// A username/email pair inserted by the initializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedUser {
    pub username: &'static str,
    pub email: &'static str,
}

/// Rows written on every initialization, in insertion order.
pub const SEED_USERS: [SeedUser; 2] = [
    SeedUser {
        username: "alice",
        email: "alice@example.com",
    },
    SeedUser {
        username: "bob",
        email: "bob@example.com",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserIdError {
    #[error("user id must be an integer, got {0:?}")]
    InvalidInput(String),
}

/// Primary key of a user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl UserId {
    /// Parse a raw query-string value.
    ///
    /// Surrounding whitespace is not trimmed: `" 1"` is not an id.
    pub fn parse(raw: &str) -> Result<Self, UserIdError> {
        raw.parse::<i64>()
            .map(UserId)
            .map_err(|_| UserIdError::InvalidInput(raw.to_string()))
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which rows a `/users` request selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
    All,
    /// Raw `id` value exactly as the client sent it.
    ById(String),
}

impl UserFilter {
    /// An absent or empty `id` selects every row.
    pub fn from_param(id: Option<&str>) -> Self {
        match id {
            None | Some("") => UserFilter::All,
            Some(raw) => UserFilter::ById(raw.to_string()),
        }
    }
}
