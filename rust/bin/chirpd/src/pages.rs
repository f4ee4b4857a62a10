//! Page rendering — minijinja templates embedded in the binary.

use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use minijinja::Environment;
use serde::Serialize;

use chirp_core::WebError;
use chirp_timeline::TweetView;

use crate::flash::clear_flash_cookie;

/// Build the template environment with all pages registered.
///
/// Templates are compiled into the binary; a parse failure is caught at
/// startup, not on the first request.
pub fn build_env() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("base.html", include_str!("web/base.html"))?;
    env.add_template("timeline.html", include_str!("web/timeline.html"))?;
    env.add_template("login.html", include_str!("web/login.html"))?;
    env.add_template("signup.html", include_str!("web/signup.html"))?;
    Ok(env)
}

/// Render a named template with a serializable context.
pub fn render<C: Serialize>(
    env: &Environment<'static>,
    name: &str,
    ctx: &C,
) -> Result<Html<String>, WebError> {
    let template = env
        .get_template(name)
        .map_err(|e| WebError::Internal(format!("missing template {}: {}", name, e)))?;
    let body = template
        .render(ctx)
        .map_err(|e| WebError::Internal(format!("render {}: {}", name, e)))?;
    Ok(Html(body))
}

/// A plain 302 redirect.
pub fn redirect(location: &str) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, location.to_string())],
    )
        .into_response()
}

/// Turn rendered HTML into a response, clearing the flash cookie when a
/// render consumed one.
pub fn with_cleared_flash(html: Html<String>, consumed: bool) -> Response {
    if consumed {
        ([(header::SET_COOKIE, clear_flash_cookie())], html).into_response()
    } else {
        html.into_response()
    }
}

/// Viewer info for the nav bar.
#[derive(Debug, Clone, Serialize)]
pub struct ViewerNav {
    pub username: String,
}

/// Context for the timeline page (home and profiles).
#[derive(Debug, Clone, Serialize)]
pub struct TimelinePage {
    pub site_name: String,
    /// Profile owner's handle.
    pub username: String,
    /// Display name if set, else the username.
    pub heading: String,
    pub tweet_count: u64,
    pub tweets: Vec<TweetView>,
    pub show_composer: bool,
    /// Composer prefill, kept when validation fails.
    pub draft: String,
    pub content_error: Option<String>,
    pub flash: Option<String>,
    pub viewer: Option<ViewerNav>,
    /// Return path for the page's delete forms, percent-encoded.
    pub next_param: String,
}

/// Context for the login page.
#[derive(Debug, Clone, Serialize)]
pub struct LoginPage {
    pub site_name: String,
    pub username: String,
    pub error: Option<String>,
    pub flash: Option<String>,
    pub viewer: Option<ViewerNav>,
    /// Post-login destination, percent-encoded for the form action.
    pub next_param: String,
}

/// Context for the signup page.
#[derive(Debug, Clone, Serialize)]
pub struct SignupPage {
    pub site_name: String,
    pub username: String,
    pub display_name: String,
    pub error: Option<String>,
    pub flash: Option<String>,
    pub viewer: Option<ViewerNav>,
}
