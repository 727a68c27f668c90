use regex::Regex;
use url::Url;

use super::{encode, ContentKind, Descriptor, ParseTag, Platform, Recognizer};
use crate::sanitize::{sanitize, try_parse_url};

/// Recognizer for the photo/video-social platform.
///
/// Emits: Reel, Post, Highlight, Profile, Unknown. There is no search
/// fallback; unmatched input resolves to the platform root.
pub struct InstagramRecognizer {
    handle: Regex,
    shortcode_token: Regex,
}

impl InstagramRecognizer {
    pub fn new() -> Self {
        Self {
            handle: Regex::new(r"^[A-Za-z0-9._]{1,30}$").unwrap(),
            // Bare post shortcodes sit in a narrower length band than handles
            shortcode_token: Regex::new(r"^[A-Za-z0-9_-]{5,15}$").unwrap(),
        }
    }

    /// Segment-count patterns over the trimmed path, literal first segment
    /// disambiguates; single-segment paths read as profiles.
    fn match_url(&self, url: &Url, descriptor: &mut Descriptor) {
        let path = url.path().trim_end_matches('/');
        let segs: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segs.as_slice() {
            ["reel", id, ..] => {
                descriptor.kind = ContentKind::Reel;
                descriptor.meta.insert("reelId", id.to_string());
            }
            ["p", code, ..] => {
                descriptor.kind = ContentKind::Post;
                descriptor.meta.insert("shortcode", code.to_string());
            }
            ["stories", "highlights", id, ..] => {
                descriptor.kind = ContentKind::Highlight;
                descriptor.meta.insert("highlightId", id.to_string());
            }
            [single] if self.handle.is_match(single) => {
                descriptor.kind = ContentKind::Profile;
                descriptor.meta.insert("handle", single.to_string());
            }
            _ => {}
        }
    }

    fn match_token(&self, input: &str, descriptor: &mut Descriptor) {
        let stripped = input.replacen('@', "", 1);
        if input.contains('@') && self.handle.is_match(&stripped) {
            descriptor.kind = ContentKind::Profile;
            descriptor.meta.insert("handle", stripped);
        } else if self.shortcode_token.is_match(input) {
            descriptor.kind = ContentKind::Post;
            descriptor.meta.insert("shortcode", input.to_string());
        } else if self.handle.is_match(input) {
            descriptor.kind = ContentKind::Profile;
            descriptor.meta.insert("handle", input.to_string());
        }
    }

    fn build_urls(&self, descriptor: &mut Descriptor) {
        let base = descriptor.platform.web_root();
        match descriptor.kind {
            ContentKind::Profile => {
                let handle = encode(descriptor.field("handle"));
                descriptor.canonical_web_url = format!("{}/{}/", base, handle);
                descriptor
                    .app_url_candidates
                    .push(format!("instagram://user?username={}", handle));
            }
            ContentKind::Post => {
                let code = encode(descriptor.field("shortcode"));
                descriptor.canonical_web_url = format!("{}/p/{}/", base, code);
                descriptor
                    .app_url_candidates
                    .push(format!("instagram://media?id={}", code));
            }
            ContentKind::Reel => {
                let id = encode(descriptor.field("reelId"));
                descriptor.canonical_web_url = format!("{}/reel/{}/", base, id);
                descriptor
                    .app_url_candidates
                    .push(format!("instagram://reel?id={}", id));
            }
            ContentKind::Highlight => {
                let id = encode(descriptor.field("highlightId"));
                descriptor.canonical_web_url = format!("{}/stories/highlights/{}/", base, id);
            }
            _ => {}
        }
    }
}

impl Default for InstagramRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for InstagramRecognizer {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    fn parse(&self, raw: &str) -> Descriptor {
        let input = sanitize(raw);
        let mut descriptor = Descriptor::new(Platform::Instagram, input.clone());
        if input.is_empty() {
            descriptor.errors.push(ParseTag::Empty);
            return descriptor;
        }

        if input.to_lowercase().contains("instagram.com") || input.contains('/') {
            if let Some(url) = try_parse_url(&input) {
                self.match_url(&url, &mut descriptor);
            }
        }
        if descriptor.kind == ContentKind::Unknown {
            self.match_token(&input, &mut descriptor);
        }
        self.build_urls(&mut descriptor);
        descriptor
    }

    fn parse_query(&self, raw: &str) -> Descriptor {
        // No search surface on this platform; the fallback is the root URL
        let input = sanitize(raw);
        let mut descriptor = Descriptor::new(Platform::Instagram, input);
        if descriptor.raw.is_empty() {
            descriptor.errors.push(ParseTag::Empty);
        }
        descriptor
    }
}
