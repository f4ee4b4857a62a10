//! Timeline module — tweets, the access policy, and feed assembly.
//!
//! Three layers, each usable on its own:
//!
//! - [`store::TweetStore`] — persistence, no notion of who is asking
//! - [`policy`] — pure decisions about what a viewer may do
//! - [`feed`] — turns stored tweets into render-ready view models

pub mod feed;
pub mod model;
pub mod policy;
pub mod store;

pub use feed::{assemble_feed, Feed, TweetView};
pub use model::{validate_content, Tweet, MAX_TWEET_CHARS};
pub use policy::{can_delete_tweet, can_post, can_view_profile, Access};
pub use store::TweetStore;
