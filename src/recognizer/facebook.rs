use regex::Regex;
use url::Url;

use super::{
    apply_rules, encode, query_param, ContentKind, Descriptor, ParseTag, PathRule, Platform,
    Recognizer,
};
use crate::sanitize::{sanitize, try_parse_url};

/// Recognizer for the social-graph platform.
///
/// Emits: Post, Video, Photo, Group, Page, Unknown. No search fallback.
pub struct FacebookRecognizer {
    rules: Vec<PathRule>,
    numeric: Regex,
    vanity: Regex,
}

impl FacebookRecognizer {
    pub fn new() -> Self {
        let rules = vec![
            PathRule::new(r"/posts/(\d+)", ContentKind::Post, &["contentId"]),
            PathRule::new(r"/videos/(\d+)", ContentKind::Video, &["contentId"]),
            PathRule::new(r"/photos/(\d+)", ContentKind::Photo, &["contentId"]),
            PathRule::new(r"/groups/(\d+)", ContentKind::Group, &["groupId"]),
            PathRule::new(r"/page/(\d+)", ContentKind::Page, &["pageId"]),
            PathRule::new(r"^/([A-Za-z0-9_.\-]{3,})$", ContentKind::Page, &["vanity"]),
        ];
        Self {
            rules,
            numeric: Regex::new(r"^\d+$").unwrap(),
            vanity: Regex::new(r"^[A-Za-z0-9_.\-]{3,}$").unwrap(),
        }
    }

    /// The story-fbid query pair wins over every path rule, independent of path
    fn match_url(&self, url: &Url, descriptor: &mut Descriptor) {
        let story = query_param(url, "story_fbid");
        let owner = query_param(url, "id");
        if let (Some(story), Some(owner)) = (story, owner) {
            descriptor.kind = ContentKind::Post;
            descriptor.meta.insert("storyId", story);
            descriptor.meta.insert("ownerId", owner);
            return;
        }
        apply_rules(&self.rules, url.path(), descriptor);
    }

    fn match_token(&self, input: &str, descriptor: &mut Descriptor) {
        if self.numeric.is_match(input) {
            descriptor.kind = ContentKind::Page;
            descriptor.meta.insert("pageId", input.to_string());
        } else if self.vanity.is_match(input) {
            descriptor.kind = ContentKind::Page;
            descriptor.meta.insert("vanity", input.to_string());
        }
    }

    fn build_urls(&self, descriptor: &mut Descriptor) {
        let base = descriptor.platform.web_root();
        match descriptor.kind {
            ContentKind::Post => {
                let owner = if descriptor.meta.contains_key("ownerId") {
                    descriptor.field("ownerId")
                } else {
                    descriptor.field("vanity")
                };
                let owner = encode(owner);
                let story = if descriptor.meta.contains_key("storyId") {
                    descriptor.field("storyId")
                } else {
                    descriptor.field("contentId")
                };
                let story = encode(story);
                if !owner.is_empty() && !story.is_empty() {
                    descriptor.canonical_web_url =
                        format!("{}/{}/posts/{}", base, owner, story);
                }
                descriptor
                    .app_url_candidates
                    .push(format!("fb://post/{}", story));
            }
            ContentKind::Video => {
                let id = encode(descriptor.field("contentId"));
                descriptor.canonical_web_url = format!("{}/video.php?v={}", base, id);
                descriptor
                    .app_url_candidates
                    .push(format!("fb://video/{}", id));
            }
            ContentKind::Photo => {
                let id = encode(descriptor.field("contentId"));
                descriptor.canonical_web_url = format!("{}/photo?fbid={}", base, id);
                descriptor
                    .app_url_candidates
                    .push(format!("fb://photo/{}", id));
            }
            ContentKind::Group => {
                let id = encode(descriptor.field("groupId"));
                descriptor.canonical_web_url = format!("{}/groups/{}", base, id);
                descriptor
                    .app_url_candidates
                    .push(format!("fb://group/{}", id));
            }
            ContentKind::Page => {
                let id = if descriptor.meta.contains_key("pageId") {
                    encode(descriptor.field("pageId"))
                } else {
                    encode(descriptor.field("vanity"))
                };
                descriptor.canonical_web_url = format!("{}/{}", base, id);
                descriptor
                    .app_url_candidates
                    .push(format!("fb://page/{}", id));
            }
            _ => {}
        }
    }
}

impl Default for FacebookRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for FacebookRecognizer {
    fn platform(&self) -> Platform {
        Platform::Facebook
    }

    fn parse(&self, raw: &str) -> Descriptor {
        let input = sanitize(raw);
        let mut descriptor = Descriptor::new(Platform::Facebook, input.clone());
        if input.is_empty() {
            descriptor.errors.push(ParseTag::Empty);
            return descriptor;
        }

        if input.to_lowercase().contains("facebook.com") || input.contains('/') {
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
        let input = sanitize(raw);
        let mut descriptor = Descriptor::new(Platform::Facebook, input);
        if descriptor.raw.is_empty() {
            descriptor.errors.push(ParseTag::Empty);
        }
        descriptor
    }
}
