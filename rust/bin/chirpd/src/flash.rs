//! One-shot flash messages, carried in a short-lived cookie.
//!
//! A redirect cannot carry page content, so "Your tweet has been
//! deleted." travels in a cookie that the next page render consumes
//! and clears.

use axum::http::HeaderMap;

use chirp_core::{encode_next, percent_decode};

use crate::session::cookie_value;

/// Name of the flash cookie.
pub const FLASH_COOKIE: &str = "chirp_flash";

/// Build the Set-Cookie value carrying a flash message.
///
/// The message is percent-encoded; cookie values cannot hold spaces or
/// semicolons raw.
pub fn flash_cookie(message: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age=60",
        FLASH_COOKIE,
        encode_next(message)
    )
}

/// Build the Set-Cookie value that clears the flash cookie.
pub fn clear_flash_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", FLASH_COOKIE)
}

/// Read and decode the pending flash message, if any.
///
/// Callers that display it must also send [`clear_flash_cookie`].
pub fn take_flash(headers: &HeaderMap) -> Option<String> {
    cookie_value(headers, FLASH_COOKIE)
        .map(percent_decode)
        .filter(|m| !m.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;
    use axum::http::HeaderValue;

    #[test]
    fn test_flash_roundtrip() {
        let cookie = flash_cookie("Your tweet has been deleted.");
        assert!(cookie.contains("Your%20tweet"));

        let value = cookie
            .split(';')
            .next()
            .and_then(|kv| kv.split_once('='))
            .map(|(_, v)| v)
            .unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("{}={}", FLASH_COOKIE, value)).unwrap(),
        );
        assert_eq!(
            take_flash(&headers),
            Some("Your tweet has been deleted.".to_string())
        );
    }

    #[test]
    fn test_no_flash() {
        let headers = HeaderMap::new();
        assert_eq!(take_flash(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("chirp_flash="));
        assert_eq!(take_flash(&headers), None);
    }
}
