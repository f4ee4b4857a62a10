/// Generate a new random ID (UUIDv4, no dashes).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string().replace('-', "")
}

/// Get the current time as an RFC 3339 string.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Format an RFC 3339 timestamp for display, e.g. "Aug 25, 2026, 14:03".
///
/// Falls back to the raw string if it does not parse, so a malformed
/// stored timestamp degrades to ugly output rather than an error.
pub fn format_timestamp(rfc3339: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(rfc3339) {
        Ok(dt) => dt.format("%b %-d, %Y, %H:%M").to_string(),
        Err(_) => rfc3339.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id() {
        let id = new_id();
        assert_eq!(id.len(), 32);
        assert!(!id.contains('-'));
    }

    #[test]
    fn test_now_rfc3339() {
        let ts = now_rfc3339();
        assert!(ts.contains('T'));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp("2026-08-25T14:03:00+00:00"),
            "Aug 25, 2026, 14:03"
        );
    }

    #[test]
    fn test_format_timestamp_passthrough_on_garbage() {
        assert_eq!(format_timestamp("not-a-date"), "not-a-date");
    }
}
