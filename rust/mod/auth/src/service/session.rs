use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use chirp_core::{new_id, Viewer};
use chirp_sql::Value;

use crate::model::{Claims, Session, User};
use crate::service::{AuthError, AuthService};

impl AuthService {
    /// Issue a signed JWT for a user and record the session.
    pub fn issue_session(&self, user: &User) -> Result<String, AuthError> {
        let session_id = new_id();
        let now = chrono::Utc::now();
        let expires = now + chrono::Duration::seconds(self.config.session_ttl);

        let claims = Claims {
            sub: user.id.clone(),
            name: user.username.clone(),
            sid: session_id.clone(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("JWT encode failed: {}", e)))?;

        let session = Session {
            id: session_id,
            user_id: user.id.clone(),
            issued_at: now.to_rfc3339(),
            expires_at: expires.to_rfc3339(),
            revoked: false,
        };

        self.insert_record(
            "sessions",
            &session.id,
            &session,
            &[
                ("user_id", Value::Text(session.user_id.clone())),
                ("revoked", Value::Integer(0)),
                ("issued_at", Value::Text(session.issued_at.clone())),
                ("expires_at", Value::Text(session.expires_at.clone())),
            ],
        )?;

        Ok(token)
    }

    /// Verify a session token and resolve the viewer behind it.
    ///
    /// Fails if the token is malformed, expired, signed with another
    /// secret, revoked, or if the user no longer exists.
    pub fn authenticate(&self, token: &str) -> Result<Viewer, AuthError> {
        let mut validation = Validation::default();
        validation.validate_exp = true;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| AuthError::Unauthorized(format!("invalid token: {}", e)))?;

        let claims = token_data.claims;

        // Check if the session was revoked by a logout.
        if let Ok(session) = self.get_record::<Session>("sessions", &claims.sid) {
            if session.revoked {
                return Err(AuthError::Unauthorized("session has been revoked".into()));
            }
        }

        let user: User = self
            .get_record("users", &claims.sub)
            .map_err(|_| AuthError::Unauthorized("user not found".into()))?;

        Ok(Viewer {
            user_id: user.id,
            username: user.username,
        })
    }

    /// Revoke a session by id (its token becomes invalid).
    pub fn revoke_session(&self, session_id: &str) -> Result<(), AuthError> {
        let mut session: Session = self.get_record("sessions", session_id)?;
        session.revoked = true;

        self.update_record(
            "sessions",
            session_id,
            &session,
            &[("revoked", Value::Integer(1))],
        )?;

        Ok(())
    }

    /// Revoke the session behind a raw token, e.g. on logout.
    ///
    /// Skips expiry validation so logging out of an already-expired
    /// session still clears the record.
    pub fn revoke_token(&self, token: &str) -> Result<(), AuthError> {
        let mut validation = Validation::default();
        validation.validate_exp = false;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| AuthError::Unauthorized(format!("invalid token: {}", e)))?;

        self.revoke_session(&token_data.claims.sid)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::model::CreateUser;
    use crate::service::{AuthConfig, AuthService};
    use chirp_sql::SqliteStore;

    fn service_with_config(config: AuthConfig) -> Arc<AuthService> {
        let sql = Arc::new(SqliteStore::open_in_memory().unwrap());
        AuthService::new(sql, config).unwrap()
    }

    fn test_service() -> Arc<AuthService> {
        service_with_config(AuthConfig::default())
    }

    fn alice(svc: &AuthService) -> crate::model::User {
        svc.create_user(CreateUser {
            username: "alice".to_string(),
            display_name: None,
            password: "wonderland".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_issue_and_authenticate() {
        let svc = test_service();
        let user = alice(&svc);

        let token = svc.issue_session(&user).unwrap();
        assert!(!token.is_empty());

        let viewer = svc.authenticate(&token).unwrap();
        assert_eq!(viewer.user_id, user.id);
        assert_eq!(viewer.username, "alice");
    }

    #[test]
    fn test_revoked_token_rejected() {
        let svc = test_service();
        let user = alice(&svc);

        let token = svc.issue_session(&user).unwrap();
        assert!(svc.authenticate(&token).is_ok());

        svc.revoke_token(&token).unwrap();
        assert!(svc.authenticate(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let svc = test_service();
        assert!(svc.authenticate("this.is.not.a.valid.jwt").is_err());
        assert!(svc.authenticate("").is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuing = service_with_config(AuthConfig {
            jwt_secret: "secret-a".to_string(),
            ..AuthConfig::default()
        });
        let verifying = service_with_config(AuthConfig {
            jwt_secret: "secret-b".to_string(),
            ..AuthConfig::default()
        });

        let user = alice(&issuing);
        let token = issuing.issue_session(&user).unwrap();
        assert!(verifying.authenticate(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // Past the default 60s decode leeway.
        let svc = service_with_config(AuthConfig {
            session_ttl: -120,
            ..AuthConfig::default()
        });
        let user = alice(&svc);

        let token = svc.issue_session(&user).unwrap();
        assert!(svc.authenticate(&token).is_err());

        // Logout of an expired session still works.
        assert!(svc.revoke_token(&token).is_ok());
    }
}
