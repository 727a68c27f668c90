use serde::Serialize;
use std::collections::BTreeMap;

/// Platform owning a parsed reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Youtube,
    Instagram,
    Linkedin,
    X,
    Facebook,
    Tiktok,
}

impl Platform {
    /// Fixed registry priority order; when several platform keys are present
    /// in one request, the earlier platform here wins.
    pub const PRIORITY: [Platform; 6] = [
        Platform::Youtube,
        Platform::Instagram,
        Platform::Linkedin,
        Platform::X,
        Platform::Facebook,
        Platform::Tiktok,
    ];

    /// The platform's fixed web root; every canonical URL starts with this
    pub fn web_root(&self) -> &'static str {
        match self {
            Platform::Youtube => "https://www.youtube.com",
            Platform::Instagram => "https://www.instagram.com",
            Platform::Linkedin => "https://www.linkedin.com",
            Platform::X => "https://x.com",
            Platform::Facebook => "https://www.facebook.com",
            Platform::Tiktok => "https://www.tiktok.com",
        }
    }

    /// Query-parameter keys that select this platform, in declared order
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Platform::Youtube => &["youtube", "yt"],
            Platform::Instagram => &["instagram", "ig"],
            Platform::Linkedin => &["linkedin", "li"],
            Platform::X => &["x", "twitter", "tw"],
            Platform::Facebook => &["facebook", "fb"],
            Platform::Tiktok => &["tiktok", "tt"],
        }
    }

    /// Lowercase wire name
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Instagram => "instagram",
            Platform::Linkedin => "linkedin",
            Platform::X => "x",
            Platform::Facebook => "facebook",
            Platform::Tiktok => "tiktok",
        }
    }
}

/// Content classification shared across all recognizers.
///
/// Each recognizer only ever emits its own declared subset; the valid set per
/// platform is documented on the recognizer itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Unclassified input (blank input, or a platform without a search fallback)
    Unknown,
    Video,
    Shorts,
    Playlist,
    Channel,
    Post,
    Photo,
    Reel,
    Highlight,
    Profile,
    Company,
    Article,
    Job,
    Tweet,
    List,
    Group,
    Page,
    /// Low-confidence catch-all carrying the raw text as a query
    Search,
}

/// Descriptor-level error tag; recognition itself never fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseTag {
    /// Input was blank after sanitization
    Empty,
}

/// Structured result of parsing one raw reference.
///
/// Created fresh per parse call and immutable once returned. `canonical_web_url`
/// is always populated, falling back to the platform root when nothing better
/// is derivable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    pub platform: Platform,
    /// Sanitized original input
    pub raw: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    /// Only fields relevant to `kind`; unused fields are absent, not empty
    pub meta: BTreeMap<&'static str, String>,
    pub canonical_web_url: String,
    /// Custom-scheme URIs, most specific first; may be empty
    pub app_url_candidates: Vec<String>,
    pub errors: Vec<ParseTag>,
}

impl Descriptor {
    /// Fresh descriptor with `Unknown` kind and the platform root as the
    /// canonical URL, so the URL invariant holds from construction on.
    pub(crate) fn new(platform: Platform, raw: String) -> Self {
        Self {
            platform,
            raw,
            kind: ContentKind::Unknown,
            meta: BTreeMap::new(),
            canonical_web_url: platform.web_root().to_string(),
            app_url_candidates: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Meta field lookup with an empty-string default, for URL templating
    pub(crate) fn field(&self, key: &str) -> &str {
        self.meta.get(key).map(String::as_str).unwrap_or("")
    }
}
