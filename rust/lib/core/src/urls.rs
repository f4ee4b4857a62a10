use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left alone when encoding a `next` path for a query string.
/// Unreserved characters plus `/`, so paths stay readable in the URL.
const NEXT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'-')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Percent-encode a path for use as a `next` query parameter.
pub fn encode_next(path: &str) -> String {
    utf8_percent_encode(path, NEXT_ENCODE_SET).to_string()
}

/// Build the login redirect target for an unauthenticated request.
pub fn login_redirect_target(next: &str) -> String {
    format!("/login?next={}", encode_next(next))
}

/// Decode a percent-encoded string, replacing invalid UTF-8 lossily.
pub fn percent_decode(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

/// Clamp a `next` value to a local path so redirects never leave the site.
///
/// Anything that is not a plain absolute path (scheme-relative `//host`
/// URLs, control characters, empty strings) collapses to `/`.
pub fn safe_next(next: &str) -> String {
    let ok = next.starts_with('/')
        && !next.starts_with("//")
        && !next.chars().any(|c| c.is_control());
    if ok {
        next.to_string()
    } else {
        "/".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_next_keeps_slashes() {
        assert_eq!(
            encode_next("/tweet/7/delete?next=/"),
            "/tweet/7/delete%3Fnext%3D/"
        );
    }

    #[test]
    fn test_encode_next_escapes_spaces() {
        assert_eq!(encode_next("/a b"), "/a%20b");
    }

    #[test]
    fn test_login_redirect_target() {
        assert_eq!(login_redirect_target("/"), "/login?next=/");
        assert_eq!(login_redirect_target("/alice"), "/login?next=/alice");
    }

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode("/tweet/7/delete%3Fnext%3D/"), "/tweet/7/delete?next=/");
    }

    #[test]
    fn test_safe_next_accepts_local_paths() {
        assert_eq!(safe_next("/alice"), "/alice");
        assert_eq!(safe_next("/tweet/7/delete?next=/"), "/tweet/7/delete?next=/");
    }

    #[test]
    fn test_safe_next_rejects_offsite() {
        assert_eq!(safe_next("https://evil.example"), "/");
        assert_eq!(safe_next("//evil.example"), "/");
        assert_eq!(safe_next(""), "/");
        assert_eq!(safe_next("/a\r\nSet-Cookie: x"), "/");
    }
}
