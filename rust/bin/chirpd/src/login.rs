//! Login, logout, and signup pages.
//!
//! Login failures and signup rejections re-render the form with the
//! message inline; only storage faults bubble up as error pages.

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Form;
use serde::Deserialize;

use chirp_auth::{AuthError, CreateUser};
use chirp_core::{encode_next, safe_next, WebError};

use crate::flash::take_flash;
use crate::pages::{redirect, render, with_cleared_flash, LoginPage, SignupPage};
use crate::routes::AppState;
use crate::session::{
    clear_session_cookie, cookie_value, session_cookie, CurrentViewer, SESSION_COOKIE,
};

/// Message shown when a login attempt fails, for any reason.
const LOGIN_FAILED: &str = "Your username and password didn't match. Please try again.";

/// Query string carrying the post-login destination.
#[derive(Debug, Deserialize)]
pub struct NextQuery {
    #[serde(default)]
    pub next: Option<String>,
}

/// Login form body.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Signup form body.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub password: String,
}

/// GET /login — show the login form.
pub async fn login_page(
    State(state): State<AppState>,
    CurrentViewer(viewer): CurrentViewer,
    Query(query): Query<NextQuery>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let next = query.next.as_deref().unwrap_or("/");
    if viewer.is_some() {
        return Ok(redirect(&safe_next(next)));
    }
    render_login(&state, &headers, next, "", None)
}

/// POST /login — verify credentials and set the session cookie.
pub async fn login_submit(
    State(state): State<AppState>,
    Query(query): Query<NextQuery>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Result<Response, WebError> {
    let next = query.next.as_deref().unwrap_or("/");

    match state.auth.verify_credentials(&form.username, &form.password)? {
        Some(user) => {
            let token = state.auth.issue_session(&user)?;
            tracing::info!(user = %user.username, "login");
            Ok((
                StatusCode::FOUND,
                [
                    (
                        header::SET_COOKIE,
                        session_cookie(&token, state.config.jwt.expire_secs),
                    ),
                    (header::LOCATION, safe_next(next)),
                ],
            )
                .into_response())
        }
        None => {
            tracing::info!(username = %form.username, "login failed");
            render_login(
                &state,
                &headers,
                next,
                &form.username,
                Some(LOGIN_FAILED.to_string()),
            )
        }
    }
}

/// POST /logout — revoke the session and clear the cookie.
///
/// Always lands on the public home redirect, even if the token was
/// already invalid.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = cookie_value(&headers, SESSION_COOKIE) {
        if let Err(e) = state.auth.revoke_token(token) {
            tracing::debug!("logout with unusable token: {}", e);
        }
    }

    (
        StatusCode::FOUND,
        [
            (header::SET_COOKIE, clear_session_cookie()),
            (header::LOCATION, "/".to_string()),
        ],
    )
        .into_response()
}

/// GET /signup — show the signup form.
pub async fn signup_page(
    State(state): State<AppState>,
    CurrentViewer(viewer): CurrentViewer,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    if viewer.is_some() {
        return Ok(redirect("/"));
    }
    render_signup(&state, &headers, "", "", None)
}

/// POST /signup — create the account and sign the new user in.
pub async fn signup_submit(
    State(state): State<AppState>,
    CurrentViewer(viewer): CurrentViewer,
    headers: HeaderMap,
    Form(form): Form<SignupForm>,
) -> Result<Response, WebError> {
    if viewer.is_some() {
        return Ok(redirect("/"));
    }

    let input = CreateUser {
        username: form.username.clone(),
        display_name: Some(form.display_name.clone()),
        password: form.password,
    };

    let user = match state.auth.create_user(input) {
        Ok(user) => user,
        Err(e @ (AuthError::Validation(_) | AuthError::Conflict(_))) => {
            tracing::info!(username = %form.username, "signup rejected: {}", e);
            return render_signup(
                &state,
                &headers,
                &form.username,
                &form.display_name,
                Some(e.to_string()),
            );
        }
        Err(other) => return Err(other.into()),
    };

    let token = state.auth.issue_session(&user)?;
    tracing::info!(user = %user.username, "account created");

    Ok((
        StatusCode::FOUND,
        [
            (
                header::SET_COOKIE,
                session_cookie(&token, state.config.jwt.expire_secs),
            ),
            (header::LOCATION, "/".to_string()),
        ],
    )
        .into_response())
}

fn render_login(
    state: &AppState,
    headers: &HeaderMap,
    next: &str,
    username: &str,
    error: Option<String>,
) -> Result<Response, WebError> {
    let flash = take_flash(headers);
    let consumed = flash.is_some();

    let page = LoginPage {
        site_name: state.config.site.name.clone(),
        username: username.to_string(),
        error,
        flash,
        viewer: None,
        next_param: encode_next(next),
    };

    let html = render(&state.templates, "login.html", &page)?;
    Ok(with_cleared_flash(html, consumed))
}

fn render_signup(
    state: &AppState,
    headers: &HeaderMap,
    username: &str,
    display_name: &str,
    error: Option<String>,
) -> Result<Response, WebError> {
    let flash = take_flash(headers);
    let consumed = flash.is_some();

    let page = SignupPage {
        site_name: state.config.site.name.clone(),
        username: username.to_string(),
        display_name: display_name.to_string(),
        error,
        flash,
        viewer: None,
    };

    let html = render(&state.templates, "signup.html", &page)?;
    Ok(with_cleared_flash(html, consumed))
}
