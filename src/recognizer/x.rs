use regex::Regex;

use super::{
    apply_rules, encode, ContentKind, Descriptor, ParseTag, PathRule, Platform, Recognizer,
};
use crate::sanitize::{sanitize, try_parse_url};

/// Recognizer for the micro-blogging platform.
///
/// Emits: Tweet, List, Profile, Search, Unknown-on-empty only; everything
/// unmatched falls back to Search.
pub struct XRecognizer {
    rules: Vec<PathRule>,
    at_handle: Regex,
    tweet_id: Regex,
    handle_token: Regex,
}

impl XRecognizer {
    pub fn new() -> Self {
        let rules = vec![
            PathRule::new(
                r"/([A-Za-z0-9_]{1,15})/status/(\d+)",
                ContentKind::Tweet,
                &["handle", "tweetId"],
            ),
            PathRule::new(r"/i/lists/(\d+)", ContentKind::List, &["listId"]),
            PathRule::new(r"^/([A-Za-z0-9_]{1,15})$", ContentKind::Profile, &["handle"]),
        ];
        Self {
            rules,
            at_handle: Regex::new(r"^@([A-Za-z0-9_]{1,15})$").unwrap(),
            // Snowflake-era tweet ids: numeric, 5 to 25 digits
            tweet_id: Regex::new(r"^[0-9]{5,25}$").unwrap(),
            handle_token: Regex::new(r"^[A-Za-z0-9_]{1,15}$").unwrap(),
        }
    }

    fn match_token(&self, input: &str, descriptor: &mut Descriptor) {
        if let Some(caps) = self.at_handle.captures(input) {
            descriptor.kind = ContentKind::Profile;
            descriptor.meta.insert("handle", caps[1].to_string());
        } else if let Some(query) = input.strip_prefix("search:") {
            descriptor.kind = ContentKind::Search;
            descriptor.meta.insert("query", query.to_string());
        } else if self.tweet_id.is_match(input) {
            descriptor.kind = ContentKind::Tweet;
            descriptor.meta.insert("tweetId", input.to_string());
        } else if self.handle_token.is_match(input) {
            descriptor.kind = ContentKind::Profile;
            descriptor.meta.insert("handle", input.to_string());
        } else {
            descriptor.kind = ContentKind::Search;
            descriptor.meta.insert("query", input.to_string());
        }
    }

    fn build_urls(&self, descriptor: &mut Descriptor) {
        let base = descriptor.platform.web_root();
        match descriptor.kind {
            ContentKind::Profile => {
                let handle = encode(descriptor.field("handle"));
                descriptor.canonical_web_url = format!("{}/{}", base, handle);
                descriptor
                    .app_url_candidates
                    .push(format!("twitter://user?screen_name={}", handle));
            }
            ContentKind::Tweet => {
                let id = encode(descriptor.field("tweetId"));
                let handle = encode(descriptor.field("handle"));
                descriptor.canonical_web_url = if handle.is_empty() {
                    // Author unknown; the interstitial status path still resolves
                    format!("{}/i/status/{}", base, id)
                } else {
                    format!("{}/{}/status/{}", base, handle, id)
                };
                descriptor
                    .app_url_candidates
                    .push(format!("twitter://status?id={}", id));
            }
            ContentKind::List => {
                descriptor.canonical_web_url =
                    format!("{}/i/lists/{}", base, encode(descriptor.field("listId")));
            }
            ContentKind::Search => {
                let q = encode(descriptor.field("query"));
                descriptor.canonical_web_url = format!("{}/search?q={}", base, q);
                descriptor
                    .app_url_candidates
                    .push(format!("twitter://search?query={}", q));
            }
            _ => {}
        }
    }
}

impl Default for XRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for XRecognizer {
    fn platform(&self) -> Platform {
        Platform::X
    }

    fn parse(&self, raw: &str) -> Descriptor {
        let input = sanitize(raw);
        let mut descriptor = Descriptor::new(Platform::X, input.clone());
        if input.is_empty() {
            descriptor.errors.push(ParseTag::Empty);
            return descriptor;
        }

        let lower = input.to_lowercase();
        if lower.contains("twitter.com") || lower.contains("x.com") || input.contains('/') {
            if let Some(url) = try_parse_url(&input) {
                let path = url.path().trim_end_matches('/');
                apply_rules(&self.rules, path, &mut descriptor);
            }
        }
        if descriptor.kind == ContentKind::Unknown {
            self.match_token(&input, &mut descriptor);
        }
        self.build_urls(&mut descriptor);
        descriptor
    }

    fn parse_query(&self, raw: &str) -> Descriptor {
        let input = sanitize(raw);
        let mut descriptor = Descriptor::new(Platform::X, input.clone());
        if input.is_empty() {
            descriptor.errors.push(ParseTag::Empty);
            return descriptor;
        }
        descriptor.kind = ContentKind::Search;
        descriptor.meta.insert("query", input);
        self.build_urls(&mut descriptor);
        descriptor
    }
}
