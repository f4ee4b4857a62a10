use std::sync::Arc;

use chirp_core::{now_rfc3339, WebError};
use chirp_sql::{Row, SQLStore, Value};

use crate::model::{validate_content, Tweet};

/// Persistent storage for tweets, backed by SQLStore (SQLite).
///
/// The store knows nothing about viewers or permissions; callers run
/// the policy checks first.
pub struct TweetStore {
    db: Arc<dyn SQLStore>,
}

impl TweetStore {
    /// Create a new TweetStore and initialise the schema.
    pub fn new(db: Arc<dyn SQLStore>) -> Result<Self, WebError> {
        let statements = [
            "CREATE TABLE IF NOT EXISTS tweets (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                author_id   TEXT NOT NULL,
                content     TEXT NOT NULL,
                created_at  TEXT NOT NULL
            )",
            "CREATE INDEX IF NOT EXISTS idx_tweets_author ON tweets(author_id)",
            "CREATE INDEX IF NOT EXISTS idx_tweets_created_at ON tweets(created_at)",
        ];
        for stmt in &statements {
            db.exec(stmt, &[])
                .map_err(|e| WebError::Storage(format!("tweet schema init: {e}")))?;
        }
        Ok(Self { db })
    }

    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    /// Validate and insert a new tweet, returning it with its assigned id.
    pub fn create(&self, author_id: &str, content: &str) -> Result<Tweet, WebError> {
        validate_content(content)?;

        let created_at = now_rfc3339();
        let id = self
            .db
            .insert(
                "INSERT INTO tweets (author_id, content, created_at) VALUES (?1, ?2, ?3)",
                &[
                    Value::Text(author_id.to_string()),
                    Value::Text(content.to_string()),
                    Value::Text(created_at.clone()),
                ],
            )
            .map_err(|e| WebError::Storage(e.to_string()))?;

        Ok(Tweet {
            id,
            author_id: author_id.to_string(),
            content: content.to_string(),
            created_at,
        })
    }

    /// Get a tweet by id.
    pub fn get(&self, id: i64) -> Result<Tweet, WebError> {
        let rows = self
            .db
            .query(
                "SELECT id, author_id, content, created_at FROM tweets WHERE id = ?1",
                &[Value::Integer(id)],
            )
            .map_err(|e| WebError::Storage(e.to_string()))?;

        let row = rows
            .first()
            .ok_or_else(|| WebError::NotFound(format!("tweet {id}")))?;

        row_to_tweet(row)
    }

    /// Delete a tweet by id.
    pub fn delete(&self, id: i64) -> Result<(), WebError> {
        let affected = self
            .db
            .exec("DELETE FROM tweets WHERE id = ?1", &[Value::Integer(id)])
            .map_err(|e| WebError::Storage(e.to_string()))?;

        if affected == 0 {
            return Err(WebError::NotFound(format!("tweet {id}")));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Feed queries
    // -----------------------------------------------------------------------

    /// List a user's tweets, newest first.
    ///
    /// Ties on created_at break toward the higher id, so two tweets
    /// posted in the same instant still order deterministically.
    pub fn list_by_author(&self, author_id: &str) -> Result<Vec<Tweet>, WebError> {
        let rows = self
            .db
            .query(
                "SELECT id, author_id, content, created_at FROM tweets \
                 WHERE author_id = ?1 ORDER BY created_at DESC, id DESC",
                &[Value::Text(author_id.to_string())],
            )
            .map_err(|e| WebError::Storage(e.to_string()))?;

        rows.iter().map(row_to_tweet).collect()
    }

    /// Count a user's tweets.
    pub fn count_by_author(&self, author_id: &str) -> Result<u64, WebError> {
        let rows = self
            .db
            .query(
                "SELECT COUNT(*) as cnt FROM tweets WHERE author_id = ?1",
                &[Value::Text(author_id.to_string())],
            )
            .map_err(|e| WebError::Storage(e.to_string()))?;

        Ok(rows.first().and_then(|r| r.get_i64("cnt")).unwrap_or(0) as u64)
    }
}

/// Read a Tweet out of a row with typed columns.
fn row_to_tweet(row: &Row) -> Result<Tweet, WebError> {
    let id = row
        .get_i64("id")
        .ok_or_else(|| WebError::Storage("missing id column".into()))?;
    let author_id = row
        .get_str("author_id")
        .ok_or_else(|| WebError::Storage("missing author_id column".into()))?
        .to_string();
    let content = row
        .get_str("content")
        .ok_or_else(|| WebError::Storage("missing content column".into()))?
        .to_string();
    let created_at = row
        .get_str("created_at")
        .ok_or_else(|| WebError::Storage("missing created_at column".into()))?
        .to_string();

    Ok(Tweet {
        id,
        author_id,
        content,
        created_at,
    })
}
