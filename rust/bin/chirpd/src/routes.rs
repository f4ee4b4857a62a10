//! Route registration — page routes plus system endpoints.

use std::sync::Arc;

use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use minijinja::Environment;

use chirp_auth::AuthService;
use chirp_timeline::TweetStore;

use crate::config::ServerConfig;
use crate::{login, session, timeline_pages};

/// Application shared state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub auth: Arc<AuthService>,
    pub tweets: Arc<TweetStore>,
    pub templates: Arc<Environment<'static>>,
}

/// Build the complete router.
///
/// `/{username}` is registered last, but route order is not what keeps
/// `/login` out of its way: static segments always win over captures in
/// axum's matcher. The names under the static routes are reserved at
/// signup instead.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(timeline_pages::home_page).post(timeline_pages::compose_home),
        )
        .route("/login", get(login::login_page).post(login::login_submit))
        .route("/logout", post(login::logout))
        .route(
            "/signup",
            get(login::signup_page).post(login::signup_submit),
        )
        .route("/tweet/{id}/delete", post(timeline_pages::delete_tweet))
        .route("/healthz", get(healthz))
        .route("/version", get(version))
        .route(
            "/{username}",
            get(timeline_pages::profile_page).post(timeline_pages::compose_profile),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session::session_middleware,
        ))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "chirpd",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
