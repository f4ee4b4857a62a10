//! Feed assembly — stored tweets to render-ready view models.

use serde::Serialize;

use chirp_core::{format_timestamp, Viewer, WebError};

use crate::store::TweetStore;

/// A tweet prepared for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TweetView {
    pub id: i64,
    pub content: String,
    pub created_at: String,
    /// Human-readable timestamp, e.g. "Aug 25, 2026, 14:03".
    pub created_display: String,
    /// Whether to render this tweet's delete control.
    pub show_delete: bool,
}

/// A profile feed plus its page-level affordances.
#[derive(Debug, Clone, Serialize)]
pub struct Feed {
    pub tweets: Vec<TweetView>,
    /// Whether to render the compose form above the feed.
    pub show_composer: bool,
}

/// Assemble the feed of `target_user_id`'s tweets as seen by `viewer`.
///
/// The composer and the delete controls appear only when the viewer is
/// the profile owner; both flags come from the same ownership check so
/// they can never disagree. Tweets come back newest first.
pub fn assemble_feed(
    store: &TweetStore,
    target_user_id: &str,
    viewer: Option<&Viewer>,
) -> Result<Feed, WebError> {
    let is_owner = viewer.map(|v| v.user_id == target_user_id).unwrap_or(false);

    let tweets = store
        .list_by_author(target_user_id)?
        .into_iter()
        .map(|t| {
            let created_display = format_timestamp(&t.created_at);
            TweetView {
                id: t.id,
                content: t.content,
                created_at: t.created_at,
                created_display,
                show_delete: is_owner,
            }
        })
        .collect();

    Ok(Feed {
        tweets,
        show_composer: is_owner,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use chirp_sql::SqliteStore;

    fn seeded_store() -> TweetStore {
        let db = Arc::new(SqliteStore::open_in_memory().unwrap());
        let store = TweetStore::new(db).unwrap();
        store.create("u-alice", "older tweet").unwrap();
        store.create("u-alice", "newer tweet").unwrap();
        store
    }

    fn viewer(user_id: &str, username: &str) -> Viewer {
        Viewer {
            user_id: user_id.to_string(),
            username: username.to_string(),
        }
    }

    #[test]
    fn owner_gets_composer_and_delete_controls() {
        let store = seeded_store();
        let alice = viewer("u-alice", "alice");

        let feed = assemble_feed(&store, "u-alice", Some(&alice)).unwrap();
        assert!(feed.show_composer);
        assert_eq!(feed.tweets.len(), 2);
        assert!(feed.tweets.iter().all(|t| t.show_delete));
    }

    #[test]
    fn visitor_gets_read_only_feed() {
        let store = seeded_store();
        let bob = viewer("u-bob", "bob");

        let feed = assemble_feed(&store, "u-alice", Some(&bob)).unwrap();
        assert!(!feed.show_composer);
        assert_eq!(feed.tweets.len(), 2);
        assert!(feed.tweets.iter().all(|t| !t.show_delete));
    }

    #[test]
    fn anonymous_gets_read_only_feed() {
        let store = seeded_store();

        let feed = assemble_feed(&store, "u-alice", None).unwrap();
        assert!(!feed.show_composer);
        assert!(feed.tweets.iter().all(|t| !t.show_delete));
    }

    #[test]
    fn feed_is_newest_first_with_display_times() {
        let store = seeded_store();

        let feed = assemble_feed(&store, "u-alice", None).unwrap();
        assert_eq!(feed.tweets[0].content, "newer tweet");
        assert_eq!(feed.tweets[1].content, "older tweet");
        assert!(!feed.tweets[0].created_display.is_empty());
    }

    #[test]
    fn empty_profile_yields_empty_feed() {
        let store = seeded_store();

        let feed = assemble_feed(&store, "u-nobody", None).unwrap();
        assert!(feed.tweets.is_empty());
        assert!(!feed.show_composer);
    }
}
