use url::form_urlencoded;

/// Fallback timeout applied when `delay` is absent or non-numeric
pub const DEFAULT_FALLBACK_DELAY_MS: u64 = 350;
/// Lower clamp bound for the `delay` override
pub const MIN_FALLBACK_DELAY_MS: u64 = 150;
/// Upper clamp bound for the `delay` override
pub const MAX_FALLBACK_DELAY_MS: u64 = 2000;

/// Ordered key/value request parameters, the only configuration channel.
///
/// Read-only once constructed; the first occurrence of a key wins.
#[derive(Debug, Clone, Default)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    /// Parse an `application/x-www-form-urlencoded` query string; a leading
    /// `?` is tolerated
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            pairs: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// First value for a key, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k.as_str() == key)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Redirect behavior switches carried alongside the platform parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedirectOptions {
    /// `debug=1`: suppress navigation, expose the descriptor instead
    pub debug: bool,
    /// `intent=web`: navigate directly to the canonical web URL
    pub intent_web: bool,
    /// Clamped fallback timeout in milliseconds
    pub fallback_delay_ms: u64,
}

impl RedirectOptions {
    pub fn from_params(params: &Params) -> Self {
        let fallback_delay_ms = params
            .get("delay")
            .and_then(|v| v.parse::<i64>().ok())
            .map(|ms| ms.clamp(MIN_FALLBACK_DELAY_MS as i64, MAX_FALLBACK_DELAY_MS as i64) as u64)
            .unwrap_or(DEFAULT_FALLBACK_DELAY_MS);

        Self {
            debug: params.get("debug") == Some("1"),
            intent_web: params.get("intent") == Some("web"),
            fallback_delay_ms,
        }
    }
}

impl Default for RedirectOptions {
    fn default() -> Self {
        Self {
            debug: false,
            intent_web: false,
            fallback_delay_ms: DEFAULT_FALLBACK_DELAY_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_from_query() {
        let params = Params::from_query("youtube=abc&delay=500");
        assert_eq!(params.get("youtube"), Some("abc"));
        assert_eq!(params.get("delay"), Some("500"));
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn test_params_leading_question_mark() {
        let params = Params::from_query("?tw=jack");
        assert_eq!(params.get("tw"), Some("jack"));
    }

    #[test]
    fn test_params_percent_decoding() {
        let params = Params::from_query("q=hello%20world&ig=user%2Fname");
        assert_eq!(params.get("q"), Some("hello world"));
        assert_eq!(params.get("ig"), Some("user/name"));
    }

    #[test]
    fn test_params_first_occurrence_wins() {
        let params = Params::from_query("yt=first&yt=second");
        assert_eq!(params.get("yt"), Some("first"));
    }

    #[test]
    fn test_delay_default_when_absent() {
        let options = RedirectOptions::from_params(&Params::from_query("youtube=x"));
        assert_eq!(options.fallback_delay_ms, DEFAULT_FALLBACK_DELAY_MS);
    }

    #[test]
    fn test_delay_default_when_non_numeric() {
        let options = RedirectOptions::from_params(&Params::from_query("delay=soon"));
        assert_eq!(options.fallback_delay_ms, DEFAULT_FALLBACK_DELAY_MS);
    }

    #[test]
    fn test_delay_clamped_low() {
        let options = RedirectOptions::from_params(&Params::from_query("delay=10"));
        assert_eq!(options.fallback_delay_ms, MIN_FALLBACK_DELAY_MS);
    }

    #[test]
    fn test_delay_clamped_high() {
        let options = RedirectOptions::from_params(&Params::from_query("delay=99999"));
        assert_eq!(options.fallback_delay_ms, MAX_FALLBACK_DELAY_MS);
    }

    #[test]
    fn test_delay_negative_clamped_low() {
        let options = RedirectOptions::from_params(&Params::from_query("delay=-5"));
        assert_eq!(options.fallback_delay_ms, MIN_FALLBACK_DELAY_MS);
    }

    #[test]
    fn test_delay_in_range_passes_through() {
        let options = RedirectOptions::from_params(&Params::from_query("delay=500"));
        assert_eq!(options.fallback_delay_ms, 500);
    }

    #[test]
    fn test_mode_flags() {
        let options = RedirectOptions::from_params(&Params::from_query("debug=1&intent=web"));
        assert!(options.debug);
        assert!(options.intent_web);

        let options = RedirectOptions::from_params(&Params::from_query("debug=0&intent=app"));
        assert!(!options.debug);
        assert!(!options.intent_web);
    }
}
