mod descriptor;
mod facebook;
mod instagram;
mod linkedin;
mod registry;
mod tiktok;
mod x;
mod youtube;


pub use descriptor::{ContentKind, Descriptor, ParseTag, Platform};
pub use facebook::FacebookRecognizer;
pub use instagram::InstagramRecognizer;
pub use linkedin::LinkedinRecognizer;
pub use registry::{PlatformRegistry, ResolveError, Route, GENERIC_QUERY_KEY};
pub use tiktok::TiktokRecognizer;
pub use x::XRecognizer;
pub use youtube::YoutubeRecognizer;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use url::Url;

/// Core trait every platform recognizer implements.
///
/// Resolution runs in three tiers, first match wins:
/// 1. URL-shaped patterns, gated on a cheap platform marker check
/// 2. bare-token heuristics over the raw text
/// 3. the platform's designated fallback kind
///
/// `parse` is total: malformed input degrades tier by tier, never errors.
pub trait Recognizer: Send + Sync {
    /// The platform this recognizer owns
    fn platform(&self) -> Platform;

    /// Parse raw text into a descriptor
    fn parse(&self, raw: &str) -> Descriptor;

    /// Classify the input directly as the platform's search/fallback kind,
    /// bypassing recognition. Used for the registry's generic query route.
    fn parse_query(&self, raw: &str) -> Descriptor;
}

/// URL component encoding: unreserved marks stay literal, everything else is
/// percent-encoded. Applied to each interpolated value individually so
/// intentional URL structure is never escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub(crate) fn encode(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// First occurrence of a query parameter; empty values count as absent
pub(crate) fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k.as_ref() == key)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

/// One URL-tier match rule: a path pattern, the kind it resolves to, and the
/// meta keys its capture groups fill, in group order.
///
/// Rules are evaluated first-to-last; precedence lives entirely in the order
/// of the rule table, not in the patterns.
pub(crate) struct PathRule {
    pattern: Regex,
    kind: ContentKind,
    keys: &'static [&'static str],
}

impl PathRule {
    pub(crate) fn new(pattern: &str, kind: ContentKind, keys: &'static [&'static str]) -> Self {
        Self {
            // Rule patterns are fixed literals
            pattern: Regex::new(pattern).unwrap(),
            kind,
            keys,
        }
    }

    /// Apply this rule to a URL path, filling `kind` and meta on a match
    pub(crate) fn apply(&self, path: &str, descriptor: &mut Descriptor) -> bool {
        let Some(caps) = self.pattern.captures(path) else {
            return false;
        };
        descriptor.kind = self.kind;
        for (i, key) in self.keys.iter().enumerate() {
            if let Some(m) = caps.get(i + 1) {
                descriptor.meta.insert(*key, m.as_str().to_string());
            }
        }
        true
    }
}

/// First matching rule wins; later rules are not attempted
pub(crate) fn apply_rules(rules: &[PathRule], path: &str, descriptor: &mut Descriptor) -> bool {
    rules.iter().any(|rule| rule.apply(path, descriptor))
}
