use super::{
    apply_rules, encode, ContentKind, Descriptor, ParseTag, PathRule, Platform, Recognizer,
};
use crate::sanitize::{sanitize, try_parse_url};

/// Recognizer for the professional-network platform.
///
/// Emits: Profile, Company, Post, Article, Job, Unknown. No search fallback.
pub struct LinkedinRecognizer {
    rules: Vec<PathRule>,
}

impl LinkedinRecognizer {
    pub fn new() -> Self {
        // Ordered: literal prefixes disambiguate, numeric suffixes split
        // articles and jobs from slug-only paths
        let rules = vec![
            PathRule::new(r"/in/([A-Za-z0-9\-_%]+)", ContentKind::Profile, &["handle"]),
            PathRule::new(
                r"/company/([A-Za-z0-9\-_%]+)",
                ContentKind::Company,
                &["company"],
            ),
            PathRule::new(
                r"/feed/update/urn:li:activity:(\d+)",
                ContentKind::Post,
                &["activityId"],
            ),
            PathRule::new(r"/posts/([A-Za-z0-9\-_%]+)", ContentKind::Post, &["postId"]),
            PathRule::new(
                r"/pulse/([^/]+)-(\d+)",
                ContentKind::Article,
                &["slug", "articleId"],
            ),
            PathRule::new(r"/jobs/view/(\d+)", ContentKind::Job, &["jobId"]),
        ];
        Self { rules }
    }

    fn match_token(&self, input: &str, descriptor: &mut Descriptor) {
        if let Some(rest) = input.strip_prefix("in/") {
            descriptor.kind = ContentKind::Profile;
            let handle = rest.split('/').next().unwrap_or(rest);
            descriptor.meta.insert("handle", handle.to_string());
        } else if let Some(rest) = input.strip_prefix("company/") {
            descriptor.kind = ContentKind::Company;
            let company = rest.split('/').next().unwrap_or(rest);
            descriptor.meta.insert("company", company.to_string());
        }
    }

    fn build_urls(&self, descriptor: &mut Descriptor) {
        let base = descriptor.platform.web_root();
        match descriptor.kind {
            ContentKind::Profile => {
                let handle = encode(descriptor.field("handle"));
                descriptor.canonical_web_url = format!("{}/in/{}/", base, handle);
                descriptor
                    .app_url_candidates
                    .push(format!("linkedin://in/{}", handle));
            }
            ContentKind::Company => {
                let company = encode(descriptor.field("company"));
                descriptor.canonical_web_url = format!("{}/company/{}/", base, company);
                descriptor
                    .app_url_candidates
                    .push(format!("linkedin://company/{}", company));
            }
            ContentKind::Post => {
                // Both path shapes resolve to the activity URN form
                let id = if descriptor.meta.contains_key("activityId") {
                    encode(descriptor.field("activityId"))
                } else {
                    encode(descriptor.field("postId"))
                };
                if !id.is_empty() {
                    descriptor.canonical_web_url =
                        format!("{}/feed/update/urn:li:activity:{}", base, id);
                }
            }
            ContentKind::Article => {
                descriptor.canonical_web_url = format!(
                    "{}/pulse/{}-{}",
                    base,
                    encode(descriptor.field("slug")),
                    encode(descriptor.field("articleId"))
                );
            }
            ContentKind::Job => {
                descriptor.canonical_web_url =
                    format!("{}/jobs/view/{}", base, encode(descriptor.field("jobId")));
            }
            _ => {}
        }
    }
}

impl Default for LinkedinRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for LinkedinRecognizer {
    fn platform(&self) -> Platform {
        Platform::Linkedin
    }

    fn parse(&self, raw: &str) -> Descriptor {
        let input = sanitize(raw);
        let mut descriptor = Descriptor::new(Platform::Linkedin, input.clone());
        if input.is_empty() {
            descriptor.errors.push(ParseTag::Empty);
            return descriptor;
        }

        if input.to_lowercase().contains("linkedin.com") || input.contains('/') {
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
        let mut descriptor = Descriptor::new(Platform::Linkedin, input);
        if descriptor.raw.is_empty() {
            descriptor.errors.push(ParseTag::Empty);
        }
        descriptor
    }
}
