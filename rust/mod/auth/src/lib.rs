//! Auth module — user accounts, password login, and revocable JWT sessions.
//!
//! # Resources
//!
//! - **User** — account with a unique username and an argon2id password hash
//! - **Session** — JWT issuance record, revocable on logout
//!
//! # Usage
//!
//! ```ignore
//! use chirp_auth::{AuthConfig, AuthService, CreateUser};
//!
//! let auth = AuthService::new(sql, AuthConfig::default())?;
//! let user = auth.create_user(CreateUser { .. })?;
//! let token = auth.issue_session(&user)?; // store in a cookie
//! let viewer = auth.authenticate(&token)?;
//! ```

pub mod model;
pub mod service;

pub use model::{Claims, CreateUser, Session, User, MAX_USERNAME_CHARS};
pub use service::{AuthConfig, AuthError, AuthService};
