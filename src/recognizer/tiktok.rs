use regex::Regex;

use super::{
    apply_rules, encode, ContentKind, Descriptor, ParseTag, PathRule, Platform, Recognizer,
};
use crate::sanitize::{sanitize, try_parse_url};

/// Recognizer for the short-video platform.
///
/// Emits: Video, Profile, Search, Unknown. No implicit search fallback;
/// only the `search:` shorthand produces Search.
pub struct TiktokRecognizer {
    rules: Vec<PathRule>,
    at_handle: Regex,
    video_id: Regex,
    handle_token: Regex,
}

impl TiktokRecognizer {
    pub fn new() -> Self {
        let rules = vec![
            PathRule::new(
                r"/@([A-Za-z0-9._]+)/video/(\d+)",
                ContentKind::Video,
                &["handle", "videoId"],
            ),
            PathRule::new(r"/video/(\d+)", ContentKind::Video, &["videoId"]),
            PathRule::new(r"/@([A-Za-z0-9._]+)", ContentKind::Profile, &["handle"]),
        ];
        Self {
            rules,
            at_handle: Regex::new(r"^@([A-Za-z0-9._]+)$").unwrap(),
            // Video ids are long numerics; five digits is the floor that
            // keeps short numeric handles out
            video_id: Regex::new(r"^\d{5,}$").unwrap(),
            handle_token: Regex::new(r"^[A-Za-z0-9._]{2,}$").unwrap(),
        }
    }

    fn match_token(&self, input: &str, descriptor: &mut Descriptor) {
        if let Some(caps) = self.at_handle.captures(input) {
            descriptor.kind = ContentKind::Profile;
            descriptor.meta.insert("handle", caps[1].to_string());
        } else if let Some(query) = input.strip_prefix("search:") {
            descriptor.kind = ContentKind::Search;
            descriptor.meta.insert("query", query.to_string());
        } else if self.video_id.is_match(input) {
            descriptor.kind = ContentKind::Video;
            descriptor.meta.insert("videoId", input.to_string());
        } else if self.handle_token.is_match(input) {
            descriptor.kind = ContentKind::Profile;
            descriptor.meta.insert("handle", input.to_string());
        }
    }

    fn build_urls(&self, descriptor: &mut Descriptor) {
        let base = descriptor.platform.web_root();
        match descriptor.kind {
            ContentKind::Video => {
                let id = encode(descriptor.field("videoId"));
                let handle = encode(descriptor.field("handle"));
                descriptor.canonical_web_url = if handle.is_empty() {
                    format!("{}/video/{}", base, id)
                } else {
                    format!("{}/@{}/video/{}", base, handle, id)
                };
                descriptor
                    .app_url_candidates
                    .push(format!("snssdk1128://aweme/detail/{}", id));
            }
            ContentKind::Profile => {
                let handle = encode(descriptor.field("handle"));
                descriptor.canonical_web_url = format!("{}/@{}", base, handle);
                descriptor
                    .app_url_candidates
                    .push(format!("snssdk1128://user/profile/@{}", handle));
            }
            ContentKind::Search => {
                descriptor.canonical_web_url =
                    format!("{}/search?q={}", base, encode(descriptor.field("query")));
            }
            _ => {}
        }
    }
}

impl Default for TiktokRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for TiktokRecognizer {
    fn platform(&self) -> Platform {
        Platform::Tiktok
    }

    fn parse(&self, raw: &str) -> Descriptor {
        let input = sanitize(raw);
        let mut descriptor = Descriptor::new(Platform::Tiktok, input.clone());
        if input.is_empty() {
            descriptor.errors.push(ParseTag::Empty);
            return descriptor;
        }

        if input.to_lowercase().contains("tiktok.com") || input.contains('/') {
            if let Some(url) = try_parse_url(&input) {
                apply_rules(&self.rules, url.path(), &mut descriptor);
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
        let mut descriptor = Descriptor::new(Platform::Tiktok, input.clone());
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
