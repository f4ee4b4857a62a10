use chirp_core::{new_id, now_rfc3339};
use chirp_sql::Value;

use crate::model::{CreateUser, User, MAX_USERNAME_CHARS};
use crate::service::{password, AuthError, AuthService};

/// Path segments owned by routes; profiles cannot live there.
const RESERVED_USERNAMES: &[&str] = &[
    "login", "logout", "signup", "tweet", "healthz", "static", "version",
];

fn validate_username(username: &str) -> Result<(), AuthError> {
    if username.is_empty() {
        return Err(AuthError::Validation("This field is required.".to_string()));
    }
    let count = username.chars().count();
    if count > MAX_USERNAME_CHARS {
        return Err(AuthError::Validation(format!(
            "Ensure this value has at most {} characters (it has {}).",
            MAX_USERNAME_CHARS, count
        )));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(AuthError::Validation(
            "Enter a valid username. This value may contain only letters, numbers, and _ characters."
                .to_string(),
        ));
    }
    if RESERVED_USERNAMES.contains(&username) {
        return Err(AuthError::Validation("This username is reserved.".to_string()));
    }
    Ok(())
}

impl AuthService {
    /// Create a new user with a hashed password.
    pub fn create_user(&self, input: CreateUser) -> Result<User, AuthError> {
        let username = input.username.trim().to_string();
        validate_username(&username)?;
        if input.password.is_empty() {
            return Err(AuthError::Validation("This field is required.".to_string()));
        }

        let now = now_rfc3339();
        let user = User {
            id: new_id(),
            username,
            display_name: input.display_name.filter(|s| !s.trim().is_empty()),
            password_hash: password::hash_password(&input.password)?,
            created_at: now.clone(),
        };

        self.insert_record(
            "users",
            &user.id,
            &user,
            &[
                ("username", Value::Text(user.username.clone())),
                ("created_at", Value::Text(now)),
            ],
        )
        .map_err(|e| match e {
            AuthError::Conflict(_) => {
                AuthError::Conflict("A user with that username already exists.".to_string())
            }
            other => other,
        })?;

        Ok(user)
    }

    /// Get a user by id.
    pub fn get_user(&self, id: &str) -> Result<User, AuthError> {
        self.get_record("users", id)
    }

    /// Find a user by username. Lookup is case-sensitive.
    pub fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        let rows = self
            .sql
            .query(
                "SELECT data FROM users WHERE username = ?1",
                &[Value::Text(username.to_string())],
            )
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        match rows.first() {
            None => Ok(None),
            Some(row) => {
                let data = row
                    .get_str("data")
                    .ok_or_else(|| AuthError::Internal("missing data column".into()))?;
                let user =
                    serde_json::from_str(data).map_err(|e| AuthError::Internal(e.to_string()))?;
                Ok(Some(user))
            }
        }
    }

    /// Check a username/password pair.
    ///
    /// Returns `Ok(None)` both for an unknown username and a wrong
    /// password, so callers cannot distinguish the two.
    pub fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, AuthError> {
        let Some(user) = self.find_by_username(username)? else {
            return Ok(None);
        };
        if password::verify_password(password, &user.password_hash) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::AuthConfig;
    use chirp_sql::SqliteStore;
    use std::sync::Arc;

    fn test_service() -> Arc<AuthService> {
        let sql = Arc::new(SqliteStore::open_in_memory().unwrap());
        AuthService::new(sql, AuthConfig::default()).unwrap()
    }

    fn create(svc: &AuthService, username: &str, password: &str) -> Result<User, AuthError> {
        svc.create_user(CreateUser {
            username: username.to_string(),
            display_name: None,
            password: password.to_string(),
        })
    }

    #[test]
    fn test_create_and_find_user() {
        let svc = test_service();

        let user = svc
            .create_user(CreateUser {
                username: "alice".to_string(),
                display_name: Some("Alice W.".to_string()),
                password: "wonderland".to_string(),
            })
            .unwrap();
        assert_eq!(user.username, "alice");
        assert_ne!(user.password_hash, "wonderland");

        let fetched = svc.get_user(&user.id).unwrap();
        assert_eq!(fetched.display_name, Some("Alice W.".to_string()));

        let found = svc.find_by_username("alice").unwrap();
        assert_eq!(found.unwrap().id, user.id);

        assert!(svc.find_by_username("bob").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_username_conflicts() {
        let svc = test_service();
        create(&svc, "alice", "pw-one").unwrap();

        let err = create(&svc, "alice", "pw-two").unwrap_err();
        match err {
            AuthError::Conflict(msg) => {
                assert_eq!(msg, "A user with that username already exists.")
            }
            other => panic!("expected Conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_reserved_username_rejected() {
        let svc = test_service();
        for name in ["login", "logout", "signup", "tweet", "healthz"] {
            assert!(matches!(
                create(&svc, name, "pw").unwrap_err(),
                AuthError::Validation(_)
            ));
        }
        // Reserved names are exact matches, not prefixes.
        assert!(create(&svc, "login_fan", "pw").is_ok());
    }

    #[test]
    fn test_username_charset() {
        let svc = test_service();
        assert!(create(&svc, "ok_name_123", "pw").is_ok());

        for bad in ["has space", "dot.name", "slash/name", "", "emoji🐦"] {
            assert!(matches!(
                create(&svc, bad, "pw").unwrap_err(),
                AuthError::Validation(_)
            ));
        }
    }

    #[test]
    fn test_username_too_long() {
        let svc = test_service();
        let long = "a".repeat(31);
        let err = create(&svc, &long, "pw").unwrap_err();
        match err {
            AuthError::Validation(msg) => {
                assert_eq!(msg, "Ensure this value has at most 30 characters (it has 31).")
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_password_rejected() {
        let svc = test_service();
        let err = create(&svc, "alice", "").unwrap_err();
        match err {
            AuthError::Validation(msg) => assert_eq!(msg, "This field is required."),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_verify_credentials() {
        let svc = test_service();
        let user = create(&svc, "alice", "wonderland").unwrap();

        let ok = svc.verify_credentials("alice", "wonderland").unwrap();
        assert_eq!(ok.unwrap().id, user.id);

        assert!(svc.verify_credentials("alice", "wrong").unwrap().is_none());
        assert!(svc.verify_credentials("nobody", "wonderland").unwrap().is_none());
    }
}
