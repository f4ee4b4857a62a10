//! Cookie sessions — resolve the signed-in viewer from the session cookie.
//!
//! The middleware only resolves identity; it never rejects a request.
//! Pages that need a signed-in viewer enforce that through the access
//! policy instead.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use chirp_core::Viewer;

use crate::routes::AppState;

/// Name of the session cookie holding the JWT.
pub const SESSION_COOKIE: &str = "chirp_session";

/// Find a cookie's value in the request headers.
pub fn cookie_value<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    for header in headers.get_all(COOKIE) {
        let Ok(raw) = header.to_str() else { continue };
        for pair in raw.split(';') {
            if let Some((k, v)) = pair.trim().split_once('=') {
                if k == name {
                    return Some(v);
                }
            }
        }
    }
    None
}

/// Build the Set-Cookie value that signs a viewer in.
pub fn session_cookie(token: &str, max_age_secs: u64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, max_age_secs
    )
}

/// Build the Set-Cookie value that signs a viewer out.
pub fn clear_session_cookie() -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    )
}

/// Middleware that resolves the session cookie to a [`Viewer`].
///
/// A missing, expired, revoked, or tampered cookie just leaves the
/// request anonymous.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = cookie_value(request.headers(), SESSION_COOKIE).map(str::to_string);

    if let Some(token) = token {
        match state.auth.authenticate(&token) {
            Ok(viewer) => {
                request.extensions_mut().insert(viewer);
            }
            Err(e) => {
                tracing::debug!("session cookie rejected: {}", e);
            }
        }
    }

    next.run(request).await
}

/// Extractor for the resolved viewer. `None` means anonymous.
#[derive(Debug, Clone)]
pub struct CurrentViewer(pub Option<Viewer>);

impl<S> FromRequestParts<S> for CurrentViewer
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentViewer(parts.extensions.get::<Viewer>().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_cookie_value() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("a=1; chirp_session=tok; b=2"),
        );
        assert_eq!(cookie_value(&headers, "chirp_session"), Some("tok"));
        assert_eq!(cookie_value(&headers, "a"), Some("1"));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn test_cookie_value_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("a=1"));
        headers.append(COOKIE, HeaderValue::from_static("chirp_session=tok"));
        assert_eq!(cookie_value(&headers, "chirp_session"), Some("tok"));
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok", 3600);
        assert!(cookie.starts_with("chirp_session=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=3600"));

        let cleared = clear_session_cookie();
        assert!(cleared.starts_with("chirp_session=;"));
        assert!(cleared.contains("Max-Age=0"));
    }
}
