use thiserror::Error;

use super::{
    Descriptor, FacebookRecognizer, InstagramRecognizer, LinkedinRecognizer, Platform, Recognizer,
    TiktokRecognizer, XRecognizer, YoutubeRecognizer,
};
use crate::request::Params;

/// Fallback parameter key routed to the video-sharing recognizer as a search
pub const GENERIC_QUERY_KEY: &str = "q";

/// Registry-level resolution failure; raised before any recognizer runs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no platform parameter found")]
    NoPlatformParam,
}

/// A resolved route: the owning recognizer plus the raw value to parse
pub struct Route<'a> {
    pub recognizer: &'a dyn Recognizer,
    pub value: String,
    /// Set when the generic query key matched; the value is then classified
    /// as a search instead of running full recognition
    pub generic_query: bool,
}

impl std::fmt::Debug for Route<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("recognizer", &self.recognizer.platform())
            .field("value", &self.value)
            .field("generic_query", &self.generic_query)
            .finish()
    }
}

impl Route<'_> {
    pub fn parse(&self) -> Descriptor {
        if self.generic_query {
            self.recognizer.parse_query(&self.value)
        } else {
            self.recognizer.parse(&self.value)
        }
    }
}

/// Priority-ordered dispatch table for platform recognizers.
///
/// Resolution walks platforms in declared priority order and each platform's
/// alias keys in declared order; the first alias present in the parameter set
/// wins, independent of parameter insertion order.
pub struct PlatformRegistry {
    recognizers: Vec<Box<dyn Recognizer>>,
}

impl PlatformRegistry {
    /// Create a registry with all six recognizers in priority order
    pub fn new() -> Self {
        Self {
            recognizers: vec![
                Box::new(YoutubeRecognizer::new()),
                Box::new(InstagramRecognizer::new()),
                Box::new(LinkedinRecognizer::new()),
                Box::new(XRecognizer::new()),
                Box::new(FacebookRecognizer::new()),
                Box::new(TiktokRecognizer::new()),
            ],
        }
    }

    /// Select the recognizer and input value for a request
    pub fn resolve(&self, params: &Params) -> Result<Route<'_>, ResolveError> {
        for recognizer in &self.recognizers {
            for alias in recognizer.platform().aliases() {
                if let Some(value) = params.get(alias) {
                    return Ok(Route {
                        recognizer: recognizer.as_ref(),
                        value: value.to_string(),
                        generic_query: false,
                    });
                }
            }
        }

        if let Some(value) = params.get(GENERIC_QUERY_KEY) {
            if let Some(recognizer) = self.recognizer(Platform::Youtube) {
                return Ok(Route {
                    recognizer,
                    value: value.to_string(),
                    generic_query: true,
                });
            }
        }

        Err(ResolveError::NoPlatformParam)
    }

    /// Look up a recognizer by platform
    pub fn recognizer(&self, platform: Platform) -> Option<&dyn Recognizer> {
        self.recognizers
            .iter()
            .find(|r| r.platform() == platform)
            .map(|r| r.as_ref())
    }

    /// Registered platforms in priority order
    pub fn platforms(&self) -> Vec<Platform> {
        self.recognizers.iter().map(|r| r.platform()).collect()
    }

    /// Get the number of registered recognizers
    pub fn recognizer_count(&self) -> usize {
        self.recognizers.len()
    }
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::new()
    }
}
