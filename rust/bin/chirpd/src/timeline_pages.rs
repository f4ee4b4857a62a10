//! Timeline pages — home feed, public profiles, compose, and delete.

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Form;
use serde::Deserialize;

use chirp_auth::User;
use chirp_core::{encode_next, safe_next, Viewer, WebError};
use chirp_timeline::{assemble_feed, can_delete_tweet, can_post, can_view_profile, Access};

use crate::flash::{flash_cookie, take_flash};
use crate::pages::{render, with_cleared_flash, TimelinePage, ViewerNav};
use crate::routes::AppState;
use crate::session::CurrentViewer;

/// Form body for composing a tweet.
#[derive(Debug, Deserialize)]
pub struct ComposeForm {
    #[serde(default)]
    pub content: String,
}

/// Query string for delete: where to go afterwards.
#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub next: Option<String>,
}

/// GET / — the signed-in viewer's own feed.
pub async fn home_page(
    State(state): State<AppState>,
    CurrentViewer(viewer): CurrentViewer,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    match can_post(viewer.as_ref(), None, "/") {
        Access::Allowed => {}
        Access::RequiresAuthentication { next } => {
            return Err(WebError::RequiresAuthentication { next })
        }
        Access::Forbidden => return Err(WebError::Forbidden("not your feed".to_string())),
    }
    let viewer = viewer.ok_or_else(|| WebError::Internal("viewer missing after guard".into()))?;
    let user = state.auth.get_user(&viewer.user_id)?;

    render_timeline_page(&state, &headers, &user, Some(&viewer), "/", "", None, None)
}

/// GET /{username} — a public profile feed. No login required.
pub async fn profile_page(
    State(state): State<AppState>,
    CurrentViewer(viewer): CurrentViewer,
    Path(username): Path<String>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    match can_view_profile(viewer.as_ref()) {
        Access::Allowed => {}
        Access::RequiresAuthentication { next } => {
            return Err(WebError::RequiresAuthentication { next })
        }
        Access::Forbidden => return Err(WebError::Forbidden("profile not visible".to_string())),
    }

    let user = state
        .auth
        .find_by_username(&username)?
        .ok_or_else(|| WebError::NotFound(format!("no user {}", username)))?;

    let next = format!("/{}", user.username);
    render_timeline_page(&state, &headers, &user, viewer.as_ref(), &next, "", None, None)
}

/// POST / — compose on the home timeline.
pub async fn compose_home(
    State(state): State<AppState>,
    CurrentViewer(viewer): CurrentViewer,
    headers: HeaderMap,
    Form(form): Form<ComposeForm>,
) -> Result<Response, WebError> {
    compose(state, viewer, headers, None, form).await
}

/// POST /{username} — compose from a profile page (own profile only).
pub async fn compose_profile(
    State(state): State<AppState>,
    CurrentViewer(viewer): CurrentViewer,
    Path(username): Path<String>,
    headers: HeaderMap,
    Form(form): Form<ComposeForm>,
) -> Result<Response, WebError> {
    compose(state, viewer, headers, Some(username), form).await
}

async fn compose(
    state: AppState,
    viewer: Option<Viewer>,
    headers: HeaderMap,
    target: Option<String>,
    form: ComposeForm,
) -> Result<Response, WebError> {
    let next = match &target {
        Some(username) => format!("/{}", username),
        None => "/".to_string(),
    };

    match can_post(viewer.as_ref(), target.as_deref(), &next) {
        Access::Allowed => {}
        Access::RequiresAuthentication { next } => {
            return Err(WebError::RequiresAuthentication { next })
        }
        Access::Forbidden => {
            return Err(WebError::Forbidden(
                "you can only tweet on your own feed".to_string(),
            ))
        }
    }
    let viewer = viewer.ok_or_else(|| WebError::Internal("viewer missing after guard".into()))?;
    let user = state.auth.get_user(&viewer.user_id)?;

    // Whitespace-only content counts as empty.
    let content = form.content.trim();

    match state.tweets.create(&user.id, content) {
        Ok(_) => {
            tracing::info!(user = %user.username, "tweet posted");
            render_timeline_page(
                &state,
                &headers,
                &user,
                Some(&viewer),
                &next,
                "",
                None,
                Some("Your tweet has been posted.".to_string()),
            )
        }
        // Re-render with the raw draft so nothing typed is lost.
        Err(WebError::Validation(message)) => render_timeline_page(
            &state,
            &headers,
            &user,
            Some(&viewer),
            &next,
            &form.content,
            Some(message),
            None,
        ),
        Err(other) => Err(other),
    }
}

/// POST /tweet/{id}/delete — delete one's own tweet, then redirect.
pub async fn delete_tweet(
    State(state): State<AppState>,
    CurrentViewer(viewer): CurrentViewer,
    Path(raw_id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> Result<Response, WebError> {
    let next = query.next.as_deref().unwrap_or("/");
    let own_url = format!("/tweet/{}/delete?next={}", raw_id, next);

    // Anonymous viewers go to login before the tweet lookup, so a
    // missing tweet still redirects rather than 404s.
    let Some(viewer) = viewer else {
        return Err(WebError::RequiresAuthentication { next: own_url });
    };

    let id: i64 = raw_id
        .parse()
        .map_err(|_| WebError::NotFound(format!("tweet {}", raw_id)))?;

    let tweet = state.tweets.get(id)?;

    match can_delete_tweet(Some(&viewer), &tweet, &own_url) {
        Access::Allowed => {}
        Access::RequiresAuthentication { next } => {
            return Err(WebError::RequiresAuthentication { next })
        }
        Access::Forbidden => {
            return Err(WebError::Forbidden(
                "you can only delete your own tweets".to_string(),
            ))
        }
    }

    state.tweets.delete(id)?;
    tracing::info!(user = %viewer.username, tweet = id, "tweet deleted");

    Ok((
        StatusCode::FOUND,
        [
            (
                header::SET_COOKIE,
                flash_cookie("Your tweet has been deleted."),
            ),
            (header::LOCATION, safe_next(next)),
        ],
    )
        .into_response())
}

/// Render the timeline for `user`'s profile as seen by `viewer`.
///
/// `flash_now` is an inline message for this response; a pending flash
/// cookie is consumed (and cleared) if no inline message beats it.
#[allow(clippy::too_many_arguments)]
fn render_timeline_page(
    state: &AppState,
    headers: &HeaderMap,
    user: &User,
    viewer: Option<&Viewer>,
    next_param: &str,
    draft: &str,
    content_error: Option<String>,
    flash_now: Option<String>,
) -> Result<Response, WebError> {
    let feed = assemble_feed(&state.tweets, &user.id, viewer)?;
    let tweet_count = state.tweets.count_by_author(&user.id)?;

    let cookie_flash = take_flash(headers);
    let consumed = cookie_flash.is_some();
    let flash = flash_now.or(cookie_flash);

    let page = TimelinePage {
        site_name: state.config.site.name.clone(),
        username: user.username.clone(),
        heading: user
            .display_name
            .clone()
            .unwrap_or_else(|| user.username.clone()),
        tweet_count,
        tweets: feed.tweets,
        show_composer: feed.show_composer,
        draft: draft.to_string(),
        content_error,
        flash,
        viewer: viewer.map(|v| ViewerNav {
            username: v.username.clone(),
        }),
        next_param: encode_next(next_param),
    };

    let html = render(&state.templates, "timeline.html", &page)?;
    Ok(with_cleared_flash(html, consumed))
}
