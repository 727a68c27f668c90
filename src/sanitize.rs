use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Inputs longer than this are silently truncated; the bound is policy, not an error
pub const MAX_INPUT_CHARS: usize = 512;

static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*:").unwrap());

static BARE_DOMAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.-]+\.[A-Za-z]{2,}").unwrap());

/// Canonicalize raw request text for all recognizers.
///
/// Trims surrounding whitespace and truncates to [`MAX_INPUT_CHARS`] on a char
/// boundary. Pure and total; blank input comes back as an empty string.
pub fn sanitize(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.char_indices().nth(MAX_INPUT_CHARS) {
        Some((cut, _)) => trimmed[..cut].to_string(),
        None => trimmed.to_string(),
    }
}

/// Best-effort URL interpretation of sanitized input.
///
/// Text without a scheme prefix that looks like a bare domain (a dot followed
/// by a ≥2-letter label) gets `https://` prepended before parsing. Structural
/// failures return `None` so recognizers can fall through to token heuristics
/// without per-platform error handling.
pub fn try_parse_url(text: &str) -> Option<Url> {
    if !SCHEME.is_match(text) && BARE_DOMAIN.is_match(text) {
        return Url::parse(&format!("https://{}", text)).ok();
    }
    Url::parse(text).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_trims_whitespace() {
        assert_eq!(sanitize("  dQw4w9WgXcQ \n"), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_sanitize_empty_input() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("   \t  "), "");
    }

    #[test]
    fn test_sanitize_truncates_at_bound() {
        let long = "a".repeat(MAX_INPUT_CHARS + 100);
        assert_eq!(sanitize(&long).chars().count(), MAX_INPUT_CHARS);
    }

    #[test]
    fn test_sanitize_truncates_on_char_boundary() {
        let long = "é".repeat(MAX_INPUT_CHARS + 1);
        let out = sanitize(&long);
        assert_eq!(out.chars().count(), MAX_INPUT_CHARS);
        assert!(out.is_char_boundary(out.len()));
    }

    #[test]
    fn test_parse_full_url() {
        let url = try_parse_url("https://www.youtube.com/watch?v=abc").unwrap();
        assert_eq!(url.host_str(), Some("www.youtube.com"));
        assert_eq!(url.path(), "/watch");
    }

    #[test]
    fn test_parse_bare_domain_gets_https() {
        let url = try_parse_url("twitter.com/jack/status/20").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("twitter.com"));
    }

    #[test]
    fn test_parse_scheme_not_prepended() {
        let url = try_parse_url("ftp://example.com/file").unwrap();
        assert_eq!(url.scheme(), "ftp");
    }

    #[test]
    fn test_parse_garbage_returns_none() {
        assert!(try_parse_url("not a url at all").is_none());
        assert!(try_parse_url("in/someone").is_none());
        assert!(try_parse_url("").is_none());
    }
}
