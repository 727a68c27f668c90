use super::machine::ATTEMPT_STAGGER_MS;
use super::navigator::{Navigator, TimerEvent, TimerHandle};
use super::{ConsoleNavigator, Sequencer, SequencerState};
use crate::recognizer::{Platform, Recognizer, YoutubeRecognizer};
use crate::request::{Params, RedirectOptions};

/// Test double recording every capability call
#[derive(Default)]
struct FakeNavigator {
    next_handle: TimerHandle,
    scheduled: Vec<(TimerHandle, u64, TimerEvent)>,
    cancelled: Vec<TimerHandle>,
    attempts: Vec<String>,
    navigations: Vec<String>,
}

impl FakeNavigator {
    fn new() -> Self {
        Self::default()
    }

    fn scheduled_event(&self, handle: TimerHandle) -> Option<(u64, TimerEvent)> {
        self.scheduled
            .iter()
            .find(|(h, _, _)| *h == handle)
            .map(|(_, due, event)| (*due, *event))
    }

    /// Pending events in due order, skipping cancelled handles
    fn pending(&self) -> Vec<(u64, TimerEvent)> {
        let mut live: Vec<_> = self
            .scheduled
            .iter()
            .filter(|(h, _, _)| !self.cancelled.contains(h))
            .map(|(h, due, event)| (*due, *h, *event))
            .collect();
        live.sort_by_key(|(due, h, _)| (*due, *h));
        live.into_iter().map(|(due, _, event)| (due, event)).collect()
    }
}

impl Navigator for FakeNavigator {
    fn attempt(&mut self, uri: &str) {
        self.attempts.push(uri.to_string());
    }

    fn navigate(&mut self, url: &str) {
        self.navigations.push(url.to_string());
    }

    fn schedule_after(&mut self, delay_ms: u64, event: TimerEvent) -> TimerHandle {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.scheduled.push((handle, delay_ms, event));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.cancelled.push(handle);
    }
}

fn video_descriptor() -> crate::recognizer::Descriptor {
    YoutubeRecognizer::new().parse("dQw4w9WgXcQ")
}

fn options_with_delay(ms: u64) -> RedirectOptions {
    RedirectOptions {
        fallback_delay_ms: ms,
        ..RedirectOptions::default()
    }
}

// ============================================================================
// Scheduling
// ============================================================================

#[test]
fn test_start_schedules_staggered_attempts_and_fallback() {
    let descriptor = video_descriptor();
    assert_eq!(descriptor.app_url_candidates.len(), 2);

    let mut nav = FakeNavigator::new();
    let mut seq = Sequencer::new(&descriptor, &options_with_delay(350));
    seq.start(&mut nav);

    assert_eq!(seq.state(), SequencerState::Attempting);
    let pending = nav.pending();
    assert_eq!(pending.len(), 3);
    assert_eq!(pending[0], (0, TimerEvent::Attempt(0)));
    assert_eq!(pending[1], (ATTEMPT_STAGGER_MS, TimerEvent::Attempt(1)));
    assert_eq!(pending[2], (350, TimerEvent::Fallback));
}

#[test]
fn test_start_is_idempotent() {
    let descriptor = video_descriptor();
    let mut nav = FakeNavigator::new();
    let mut seq = Sequencer::new(&descriptor, &RedirectOptions::default());
    seq.start(&mut nav);
    let scheduled = nav.scheduled.len();
    seq.start(&mut nav);
    assert_eq!(nav.scheduled.len(), scheduled);
}

#[test]
fn test_no_candidates_still_schedules_fallback() {
    let descriptor = YoutubeRecognizer::new().parse("");
    assert!(descriptor.app_url_candidates.is_empty());

    let mut nav = FakeNavigator::new();
    let mut seq = Sequencer::new(&descriptor, &options_with_delay(500));
    seq.start(&mut nav);

    assert_eq!(nav.pending(), vec![(500, TimerEvent::Fallback)]);
}

// ============================================================================
// Fallback path
// ============================================================================

#[test]
fn test_fallback_navigates_web_url_once() {
    let descriptor = video_descriptor();
    let mut nav = FakeNavigator::new();
    let mut seq = Sequencer::new(&descriptor, &RedirectOptions::default());
    seq.start(&mut nav);

    seq.on_timer(TimerEvent::Attempt(0), &mut nav);
    seq.on_timer(TimerEvent::Attempt(1), &mut nav);
    seq.on_timer(TimerEvent::Fallback, &mut nav);

    assert_eq!(seq.state(), SequencerState::FallenBack);
    assert_eq!(nav.attempts, descriptor.app_url_candidates);
    assert_eq!(nav.navigations, vec![descriptor.canonical_web_url.clone()]);
}

#[test]
fn test_attempts_after_fallback_are_ignored() {
    let descriptor = video_descriptor();
    let mut nav = FakeNavigator::new();
    let mut seq = Sequencer::new(&descriptor, &RedirectOptions::default());
    seq.start(&mut nav);

    seq.on_timer(TimerEvent::Fallback, &mut nav);
    seq.on_timer(TimerEvent::Attempt(0), &mut nav);

    assert!(nav.attempts.is_empty());
    assert_eq!(nav.navigations.len(), 1);
}

#[test]
fn test_double_fallback_navigates_once() {
    let descriptor = video_descriptor();
    let mut nav = FakeNavigator::new();
    let mut seq = Sequencer::new(&descriptor, &RedirectOptions::default());
    seq.start(&mut nav);

    seq.on_timer(TimerEvent::Fallback, &mut nav);
    seq.on_timer(TimerEvent::Fallback, &mut nav);

    assert_eq!(nav.navigations.len(), 1);
}

// ============================================================================
// Focus-loss path
// ============================================================================

#[test]
fn test_focus_loss_cancels_all_pending_timers() {
    let descriptor = video_descriptor();
    let mut nav = FakeNavigator::new();
    let mut seq = Sequencer::new(&descriptor, &RedirectOptions::default());
    seq.start(&mut nav);

    seq.on_focus_loss(&mut nav);

    assert_eq!(seq.state(), SequencerState::Navigated);
    // Two attempt timers plus the fallback timer
    assert_eq!(nav.cancelled.len(), 3);
    assert!(nav.pending().is_empty());
}

#[test]
fn test_no_web_navigation_after_focus_loss() {
    let descriptor = video_descriptor();
    let mut nav = FakeNavigator::new();
    let mut seq = Sequencer::new(&descriptor, &RedirectOptions::default());
    seq.start(&mut nav);

    seq.on_focus_loss(&mut nav);
    // A stale fallback firing late must not navigate
    seq.on_timer(TimerEvent::Fallback, &mut nav);

    assert_eq!(seq.state(), SequencerState::Navigated);
    assert!(nav.navigations.is_empty());
}

#[test]
fn test_focus_loss_after_fallback_keeps_fallen_back() {
    let descriptor = video_descriptor();
    let mut nav = FakeNavigator::new();
    let mut seq = Sequencer::new(&descriptor, &RedirectOptions::default());
    seq.start(&mut nav);

    seq.on_timer(TimerEvent::Fallback, &mut nav);
    seq.on_focus_loss(&mut nav);

    assert_eq!(seq.state(), SequencerState::FallenBack);
    assert_eq!(nav.navigations.len(), 1);
}

#[test]
fn test_focus_loss_mid_sequence_stops_later_attempts() {
    let descriptor = video_descriptor();
    let mut nav = FakeNavigator::new();
    let mut seq = Sequencer::new(&descriptor, &RedirectOptions::default());
    seq.start(&mut nav);

    seq.on_timer(TimerEvent::Attempt(0), &mut nav);
    seq.on_focus_loss(&mut nav);
    seq.on_timer(TimerEvent::Attempt(1), &mut nav);

    assert_eq!(nav.attempts.len(), 1);
    assert!(nav.navigations.is_empty());
}

// ============================================================================
// Timer bookkeeping
// ============================================================================

#[test]
fn test_scheduled_events_carry_candidate_indices() {
    let descriptor = video_descriptor();
    let mut nav = FakeNavigator::new();
    let mut seq = Sequencer::new(&descriptor, &RedirectOptions::default());
    seq.start(&mut nav);

    assert_eq!(nav.scheduled_event(0), Some((0, TimerEvent::Attempt(0))));
    assert_eq!(
        nav.scheduled_event(1),
        Some((ATTEMPT_STAGGER_MS, TimerEvent::Attempt(1)))
    );
}

#[test]
fn test_console_navigator_pops_in_due_order() {
    let mut nav = ConsoleNavigator::new();
    nav.schedule_after(300, TimerEvent::Fallback);
    nav.schedule_after(0, TimerEvent::Attempt(0));
    nav.schedule_after(150, TimerEvent::Attempt(1));

    assert_eq!(nav.next_due(), Some((0, TimerEvent::Attempt(0))));
    assert_eq!(nav.next_due(), Some((150, TimerEvent::Attempt(1))));
    assert_eq!(nav.next_due(), Some((150, TimerEvent::Fallback)));
    assert_eq!(nav.next_due(), None);
}

#[test]
fn test_console_navigator_cancel_removes_pending() {
    let mut nav = ConsoleNavigator::new();
    let h = nav.schedule_after(100, TimerEvent::Attempt(0));
    nav.schedule_after(200, TimerEvent::Fallback);
    nav.cancel(h);

    assert_eq!(nav.pending_count(), 1);
    assert_eq!(nav.next_due(), Some((200, TimerEvent::Fallback)));
}

// ============================================================================
// End-to-end against the registry
// ============================================================================

#[test]
fn test_full_flow_fallback_settles_on_web_url() {
    let registry = crate::recognizer::PlatformRegistry::new();
    let params = Params::from_query("youtube=dQw4w9WgXcQ&delay=200");
    let options = RedirectOptions::from_params(&params);
    let route = registry.resolve(&params).unwrap();
    let descriptor = route.parse();
    assert_eq!(descriptor.platform, Platform::Youtube);

    let mut nav = FakeNavigator::new();
    let mut seq = Sequencer::new(&descriptor, &options);
    seq.start(&mut nav);
    let events: Vec<_> = nav.pending();
    for (_, event) in events {
        seq.on_timer(event, &mut nav);
    }

    assert!(seq.settled());
    assert_eq!(
        nav.navigations,
        vec!["https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string()]
    );
}
