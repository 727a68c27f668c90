// Public API exports
pub mod recognizer;
pub mod request;
pub mod sanitize;
pub mod sequencer;

// Re-export main types for convenience
pub use recognizer::{
    ContentKind, Descriptor, FacebookRecognizer, InstagramRecognizer, LinkedinRecognizer,
    ParseTag, Platform, PlatformRegistry, Recognizer, ResolveError, Route, TiktokRecognizer,
    XRecognizer, YoutubeRecognizer, GENERIC_QUERY_KEY,
};

pub use request::{
    Params, RedirectOptions, DEFAULT_FALLBACK_DELAY_MS, MAX_FALLBACK_DELAY_MS,
    MIN_FALLBACK_DELAY_MS,
};

pub use sanitize::{sanitize, try_parse_url, MAX_INPUT_CHARS};

pub use sequencer::{
    drive, ConsoleNavigator, Navigator, Sequencer, SequencerState, TimerEvent, TimerHandle,
    ATTEMPT_STAGGER_MS,
};
