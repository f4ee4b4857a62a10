use serde::{Deserialize, Serialize};

use chirp_core::WebError;

/// Maximum tweet length in characters (not bytes).
pub const MAX_TWEET_CHARS: usize = 140;

/// A single tweet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    /// Monotonically increasing id, assigned by the store.
    pub id: i64,

    /// Id of the user who posted it.
    pub author_id: String,

    /// Body text, 1..=140 characters.
    pub content: String,

    /// RFC 3339 creation timestamp. Never updated.
    pub created_at: String,
}

/// Validate tweet content before it is stored.
///
/// Length is counted in characters, so a 140-emoji tweet passes even
/// though it is far more than 140 bytes.
pub fn validate_content(content: &str) -> Result<(), WebError> {
    if content.is_empty() {
        return Err(WebError::Validation("This field is required.".to_string()));
    }
    let count = content.chars().count();
    if count > MAX_TWEET_CHARS {
        return Err(WebError::Validation(format!(
            "Ensure this value has at most {} characters (it has {}).",
            MAX_TWEET_CHARS, count
        )));
    }
    Ok(())
}
