use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ExternalId, UserId};

/// A player of the pairwise-choice game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_pic: Option<String>,
    /// Freeform profile blurb.
    pub about_me: Option<String>,
    /// Catalog ids the user never wants recommended (set, insertion order).
    pub excluded_ids: Vec<ExternalId>,
    /// Catalog ids the user wants to play (set, insertion order).
    pub wishlist_ids: Vec<ExternalId>,
    /// Number of votes cast. Drives the leaderboard.
    pub engagement_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub profile_pic: Option<String>,
}

impl CreateUserRequest {
    /// Minimum username length.
    pub const MIN_USERNAME_LEN: usize = 2;

    /// Check field shape: no blank fields, no surrounding whitespace, and a
    /// username of at least [`Self::MIN_USERNAME_LEN`] characters.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("username", &self.username),
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
        ];

        for (name, value) in fields {
            if value.is_empty() {
                return Err(format!("{name} is required"));
            }
            if value.trim() != value.as_str() {
                return Err(format!("{name} cannot start or end with whitespace"));
            }
        }

        if self.username.chars().count() < Self::MIN_USERNAME_LEN {
            return Err(format!(
                "username must be at least {} characters long",
                Self::MIN_USERNAME_LEN
            ));
        }

        Ok(())
    }
}
