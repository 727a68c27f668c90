use regex::Regex;
use url::Url;

use super::{encode, query_param, ContentKind, Descriptor, ParseTag, Platform, Recognizer};
use crate::sanitize::{sanitize, try_parse_url};

/// Recognizer for the video-sharing platform.
///
/// Emits: Video, Shorts, Playlist, Channel, Post, Search, Unknown.
pub struct YoutubeRecognizer {
    video_id: Regex,
    shorts_path: Regex,
    channel_path: Regex,
    handle_path: Regex,
    legacy_path: Regex,
    post_path: Regex,
    handle_token: Regex,
    shorts_token: Regex,
}

impl YoutubeRecognizer {
    pub fn new() -> Self {
        Self {
            // Canonical video ids are exactly 11 chars
            video_id: Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap(),
            shorts_path: Regex::new(r"/shorts/([A-Za-z0-9_-]{11})").unwrap(),
            channel_path: Regex::new(r"^/channel/([^/]+)").unwrap(),
            handle_path: Regex::new(r"^/@([^/]+)").unwrap(),
            legacy_path: Regex::new(r"^/(?:c|user)/([^/]+)").unwrap(),
            post_path: Regex::new(r"^/post/([^/]+)").unwrap(),
            handle_token: Regex::new(r"^@?[A-Za-z0-9_-]+$").unwrap(),
            shorts_token: Regex::new(r"shorts:([A-Za-z0-9_-]{11})").unwrap(),
        }
    }

    /// URL-tier cascade, most specific first; the first branch taken ends
    /// resolution even when its inner id check fails.
    fn match_url(&self, url: &Url, descriptor: &mut Descriptor) {
        let path = url.path();
        let host = url.host_str().unwrap_or("");

        if let Some(caps) = self.shorts_path.captures(path) {
            descriptor.kind = ContentKind::Shorts;
            descriptor.meta.insert("videoId", caps[1].to_string());
        } else if host.contains("youtu.be") {
            let vid = path.strip_prefix('/').unwrap_or(path);
            if self.video_id.is_match(vid) {
                descriptor.kind = ContentKind::Video;
                descriptor.meta.insert("videoId", vid.to_string());
            }
        } else if path == "/watch" {
            if let Some(v) = query_param(url, "v") {
                if self.video_id.is_match(&v) {
                    descriptor.kind = ContentKind::Video;
                    descriptor.meta.insert("videoId", v);
                }
            }
        } else if path == "/playlist" {
            if let Some(list) = query_param(url, "list") {
                descriptor.kind = ContentKind::Playlist;
                descriptor.meta.insert("playlistId", list);
            }
        } else if let Some(caps) = self.channel_path.captures(path) {
            descriptor.kind = ContentKind::Channel;
            descriptor.meta.insert("channelId", caps[1].to_string());
        } else if let Some(caps) = self.handle_path.captures(path) {
            descriptor.kind = ContentKind::Channel;
            descriptor.meta.insert("handle", caps[1].to_string());
        } else if let Some(caps) = self.legacy_path.captures(path) {
            descriptor.kind = ContentKind::Channel;
            descriptor.meta.insert("channelName", caps[1].to_string());
        } else if let Some(caps) = self.post_path.captures(path) {
            descriptor.kind = ContentKind::Post;
            descriptor.meta.insert("postId", caps[1].to_string());
        }

        // Playback context carries over for video-shaped results
        if matches!(descriptor.kind, ContentKind::Video | ContentKind::Shorts) {
            if let Some(t) = query_param(url, "t") {
                descriptor.meta.insert("timestamp", t);
            }
            if let Some(list) = query_param(url, "list") {
                descriptor.meta.insert("playlist", list);
            }
        }
    }

    /// Token-tier heuristics: exact id shape, handle shape, shorthand prefix,
    /// then the search fallback.
    fn match_token(&self, input: &str, descriptor: &mut Descriptor) {
        if self.video_id.is_match(input) {
            descriptor.kind = ContentKind::Video;
            descriptor.meta.insert("videoId", input.to_string());
        } else if self.handle_token.is_match(input) {
            descriptor.kind = ContentKind::Channel;
            let handle = input.strip_prefix('@').unwrap_or(input);
            descriptor.meta.insert("handle", handle.to_string());
        } else if let Some(caps) = self.shorts_token.captures(input) {
            descriptor.kind = ContentKind::Shorts;
            descriptor.meta.insert("videoId", caps[1].to_string());
        } else {
            descriptor.kind = ContentKind::Search;
            descriptor.meta.insert("query", input.to_string());
        }
    }

    fn build_urls(&self, descriptor: &mut Descriptor) {
        let base = descriptor.platform.web_root();
        match descriptor.kind {
            ContentKind::Video => {
                let id = encode(descriptor.field("videoId"));
                let mut web = format!("{}/watch?v={}", base, id);
                let mut app = format!("vnd.youtube://watch?v={}", id);
                if let Some(t) = descriptor.meta.get("timestamp") {
                    let t = encode(t);
                    web.push_str(&format!("&t={}", t));
                    app.push_str(&format!("&t={}", t));
                }
                if let Some(list) = descriptor.meta.get("playlist") {
                    let list = encode(list);
                    web.push_str(&format!("&list={}", list));
                    app.push_str(&format!("&list={}", list));
                }
                descriptor.canonical_web_url = web;
                descriptor.app_url_candidates.push(app);
                descriptor
                    .app_url_candidates
                    .push(format!("youtube://www.youtube.com/watch?v={}", id));
            }
            ContentKind::Shorts => {
                let id = encode(descriptor.field("videoId"));
                descriptor.canonical_web_url = format!("{}/shorts/{}", base, id);
                descriptor
                    .app_url_candidates
                    .push(format!("vnd.youtube://shorts/{}", id));
            }
            ContentKind::Playlist => {
                let id = encode(descriptor.field("playlistId"));
                descriptor.canonical_web_url = format!("{}/playlist?list={}", base, id);
                descriptor
                    .app_url_candidates
                    .push(format!("vnd.youtube://playlist?list={}", id));
            }
            ContentKind::Channel => {
                descriptor.canonical_web_url = if descriptor.meta.contains_key("channelId") {
                    format!("{}/channel/{}", base, encode(descriptor.field("channelId")))
                } else if descriptor.meta.contains_key("handle") {
                    format!("{}/@{}", base, encode(descriptor.field("handle")))
                } else if descriptor.meta.contains_key("channelName") {
                    format!("{}/c/{}", base, encode(descriptor.field("channelName")))
                } else {
                    base.to_string()
                };
                let best = [
                    descriptor.field("channelId"),
                    descriptor.field("handle"),
                    descriptor.field("channelName"),
                ]
                .into_iter()
                .find(|v| !v.is_empty())
                .unwrap_or("");
                let app = format!("vnd.youtube://channel/{}", encode(best));
                descriptor.app_url_candidates.push(app);
            }
            ContentKind::Post => {
                let id = encode(descriptor.field("postId"));
                descriptor.canonical_web_url = format!("{}/post/{}", base, id);
                descriptor
                    .app_url_candidates
                    .push(format!("vnd.youtube://post/{}", id));
            }
            ContentKind::Search => {
                let q = encode(descriptor.field("query"));
                descriptor.canonical_web_url =
                    format!("{}/results?search_query={}", base, q);
                descriptor
                    .app_url_candidates
                    .push(format!("vnd.youtube://search?q={}", q));
            }
            _ => {}
        }
    }
}

impl Default for YoutubeRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for YoutubeRecognizer {
    fn platform(&self) -> Platform {
        Platform::Youtube
    }

    fn parse(&self, raw: &str) -> Descriptor {
        let input = sanitize(raw);
        let mut descriptor = Descriptor::new(Platform::Youtube, input.clone());
        if input.is_empty() {
            descriptor.errors.push(ParseTag::Empty);
            return descriptor;
        }

        let lower = input.to_lowercase();
        if lower.contains("youtube") || lower.contains("youtu.be") || input.contains('/') {
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
        let mut descriptor = Descriptor::new(Platform::Youtube, input.clone());
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
