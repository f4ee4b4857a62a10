//! Access policy — pure decisions, no storage and no HTTP.
//!
//! Every guard takes the optional viewer and returns a tagged
//! [`Access`] so callers can tell "sign in first" apart from "signed
//! in but not yours".

use chirp_core::Viewer;

use crate::model::Tweet;

/// Outcome of an access check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Proceed.
    Allowed,
    /// Send the viewer to login, then back to `next`.
    RequiresAuthentication { next: String },
    /// Signed in, but this action belongs to someone else.
    Forbidden,
}

/// Profiles are public; anyone may view them.
pub fn can_view_profile(_viewer: Option<&Viewer>) -> Access {
    Access::Allowed
}

/// Posting requires a signed-in viewer, and only to their own feed.
///
/// `target` is the profile username being posted to; `None` means the
/// home timeline, which is always the viewer's own.
pub fn can_post(viewer: Option<&Viewer>, target: Option<&str>, next: &str) -> Access {
    let Some(viewer) = viewer else {
        return Access::RequiresAuthentication {
            next: next.to_string(),
        };
    };
    match target {
        Some(username) if username != viewer.username => Access::Forbidden,
        _ => Access::Allowed,
    }
}

/// Deleting requires a signed-in viewer who authored the tweet.
///
/// Ownership compares user ids, not usernames.
pub fn can_delete_tweet(viewer: Option<&Viewer>, tweet: &Tweet, next: &str) -> Access {
    let Some(viewer) = viewer else {
        return Access::RequiresAuthentication {
            next: next.to_string(),
        };
    };
    if tweet.author_id != viewer.user_id {
        return Access::Forbidden;
    }
    Access::Allowed
}
