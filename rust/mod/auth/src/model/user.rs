use serde::{Deserialize, Serialize};

/// Maximum username length in characters.
pub const MAX_USERNAME_CHARS: usize = 30;

/// A user account. Authenticates with username + password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (UUIDv4, no dashes).
    pub id: String,

    /// Login handle, also the public profile path (`/{username}`).
    pub username: String,

    /// Optional display name shown on the profile page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Argon2id password hash (PHC string).
    pub password_hash: String,

    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Input for creating a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub password: String,
}
