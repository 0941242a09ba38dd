use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents a core user identity in the system
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct User {
    /// Database-assigned sequence number (primary key)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<i64>,
    /// Unique user identifier
    pub id: String,
    /// Email address, unique across users
    pub email: String,
    /// Display name
    pub name: String,
    /// Avatar image URL, if the provider supplied one
    pub avatar_url: Option<String>,
    /// When the user account was created
    pub created_at: DateTime<Utc>,
    /// When the user account was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(id: String, email: String, name: String, avatar_url: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            sequence_number: None,
            id,
            email,
            name,
            avatar_url,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Search field options for user lookup
#[derive(Debug)]
pub(crate) enum UserSearchField {
    /// Search by ID
    Id(String),
    /// Search by email address
    Email(String),
}
