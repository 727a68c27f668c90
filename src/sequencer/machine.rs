use super::navigator::{Navigator, TimerEvent, TimerHandle};
use crate::recognizer::Descriptor;
use crate::request::RedirectOptions;

/// Fixed interval between successive deep-link attempt schedulings
pub const ATTEMPT_STAGGER_MS: u64 = 150;

/// Sequencer lifecycle. `Navigated` and `FallenBack` are the two terminal
/// flavors of settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    Idle,
    Attempting,
    /// A candidate is presumed to have succeeded (focus-loss heuristic)
    Navigated,
    /// The fallback deadline elapsed; the web URL was navigated
    FallenBack,
}

/// Deep-link attempt/fallback state machine.
///
/// Consumes one descriptor and drives a [`Navigator`]: every candidate URI is
/// attempted on a stagger, and a single fallback navigation to the canonical
/// web URL fires unless an external focus-loss signal settles the sequence
/// first. Once settled, late timers and signals are no-ops; at most one web
/// navigation is ever issued.
pub struct Sequencer {
    candidates: Vec<String>,
    web_url: String,
    fallback_delay_ms: u64,
    state: SequencerState,
    attempt_timers: Vec<TimerHandle>,
    fallback_timer: Option<TimerHandle>,
}

impl Sequencer {
    pub fn new(descriptor: &Descriptor, options: &RedirectOptions) -> Self {
        Self {
            candidates: descriptor.app_url_candidates.clone(),
            web_url: descriptor.canonical_web_url.clone(),
            fallback_delay_ms: options.fallback_delay_ms,
            state: SequencerState::Idle,
            attempt_timers: Vec::new(),
            fallback_timer: None,
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn settled(&self) -> bool {
        matches!(
            self.state,
            SequencerState::Navigated | SequencerState::FallenBack
        )
    }

    /// Schedule one attempt per candidate at `i * stagger` plus the single
    /// fallback timer, and enter `Attempting`. Idempotent: a second call is
    /// a no-op.
    pub fn start(&mut self, navigator: &mut dyn Navigator) {
        if self.state != SequencerState::Idle {
            return;
        }
        self.state = SequencerState::Attempting;

        for i in 0..self.candidates.len() {
            let handle =
                navigator.schedule_after(i as u64 * ATTEMPT_STAGGER_MS, TimerEvent::Attempt(i));
            self.attempt_timers.push(handle);
        }
        self.fallback_timer =
            Some(navigator.schedule_after(self.fallback_delay_ms, TimerEvent::Fallback));
    }

    /// Handle a due timer. Stale timers arriving after settlement do nothing.
    pub fn on_timer(&mut self, event: TimerEvent, navigator: &mut dyn Navigator) {
        if self.settled() {
            return;
        }
        match event {
            TimerEvent::Attempt(i) => {
                if let Some(uri) = self.candidates.get(i) {
                    navigator.attempt(uri);
                }
            }
            TimerEvent::Fallback => {
                // Terminal: nothing left pending to cancel
                self.state = SequencerState::FallenBack;
                log::debug!("fallback deadline elapsed, navigating to web url");
                navigator.navigate(&self.web_url);
            }
        }
    }

    /// External visibility-loss signal: the heuristic proxy for "an app took
    /// focus". Cancels every pending timer and settles as `Navigated`.
    pub fn on_focus_loss(&mut self, navigator: &mut dyn Navigator) {
        if self.settled() {
            return;
        }
        for handle in self.attempt_timers.drain(..) {
            navigator.cancel(handle);
        }
        if let Some(handle) = self.fallback_timer.take() {
            navigator.cancel(handle);
        }
        self.state = SequencerState::Navigated;
        log::debug!("focus loss observed, sequence settled as navigated");
    }
}
