use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::urls::login_redirect_target;

// ── WebError ────────────────────────────────────────────────────────

/// Unified web-facing error type used across all modules.
///
/// Each variant maps to the HTTP outcome the site contract requires:
/// an authentication failure is a redirect to the login page (never a
/// bare 401, since the consumer is a browser), everything else renders
/// a minimal HTML error page with the matching status code.
#[derive(Error, Debug)]
pub enum WebError {
    /// Viewer must log in first. Redirects 302 to `/login?next=...`,
    /// preserving the originally requested path.
    #[error("authentication required")]
    RequiresAuthentication { next: String },

    /// Authenticated but not allowed to act on this resource. HTTP 403.
    #[error("{0}")]
    Forbidden(String),

    /// Resource does not exist. HTTP 404.
    #[error("{0}")]
    NotFound(String),

    /// Input data is invalid. HTTP 400 when it escapes a handler;
    /// form handlers normally intercept this and re-render instead.
    #[error("{0}")]
    Validation(String),

    /// Storage backend failure. HTTP 500.
    #[error("{0}")]
    Storage(String),

    /// Unexpected internal error. HTTP 500.
    #[error("{0}")]
    Internal(String),
}

impl WebError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebError::RequiresAuthentication { .. } => StatusCode::FOUND,
            WebError::Forbidden(_) => StatusCode::FORBIDDEN,
            WebError::NotFound(_) => StatusCode::NOT_FOUND,
            WebError::Validation(_) => StatusCode::BAD_REQUEST,
            WebError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WebError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::RequiresAuthentication { next } => (
                StatusCode::FOUND,
                [(header::LOCATION, login_redirect_target(&next))],
            )
                .into_response(),
            other => {
                let status = other.status_code();
                (status, Html(error_page(status, &other.to_string()))).into_response()
            }
        }
    }
}

/// Render a minimal error page. The message may carry request-supplied
/// strings (usernames from the path), so it is escaped.
fn error_page(status: StatusCode, message: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    format!(
        "<!doctype html>\n<html>\n<head><title>{code} {reason}</title></head>\n\
         <body>\n<h1>{code} {reason}</h1>\n<p>{message}</p>\n</body>\n</html>\n",
        code = status.as_u16(),
        reason = reason,
        message = escape_html(message),
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_mapping() {
        let auth = WebError::RequiresAuthentication { next: "/".into() };
        assert_eq!(auth.status_code(), StatusCode::FOUND);
        assert_eq!(WebError::Forbidden("x".into()).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(WebError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(WebError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(WebError::Storage("x".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(WebError::Internal("x".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn requires_authentication_redirects_to_login() {
        let err = WebError::RequiresAuthentication { next: "/".into() };
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/login?next=/"
        );
    }

    #[test]
    fn redirect_encodes_next_query() {
        let err = WebError::RequiresAuthentication {
            next: "/tweet/7/delete?next=/".into(),
        };
        let resp = err.into_response();
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/login?next=/tweet/7/delete%3Fnext%3D/"
        );
    }

    #[test]
    fn error_display_is_just_message() {
        assert_eq!(WebError::NotFound("no user 'zork'".into()).to_string(), "no user 'zork'");
        assert_eq!(WebError::Forbidden("not yours".into()).to_string(), "not yours");
        assert_eq!(WebError::Validation("too long".into()).to_string(), "too long");
    }

    #[test]
    fn error_page_escapes_message() {
        let page = error_page(StatusCode::NOT_FOUND, "no user '<script>'");
        assert!(page.contains("404 Not Found"));
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>"));
    }
}
