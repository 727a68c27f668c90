use std::thread;
use std::time::Duration;

/// Opaque handle for a scheduled timer
pub type TimerHandle = u64;

/// Timer payloads the sequencer schedules against the navigator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Deep-link attempt for candidate `i`
    Attempt(usize),
    /// Fallback deadline
    Fallback,
}

/// Browsing-environment capability the sequencer drives.
///
/// All operations are fire-and-forget; `attempt` in particular is
/// best-effort and must swallow failures (an unsupported scheme never aborts
/// the sequence). Implementations own the timer store; the sequencer only
/// holds handles.
pub trait Navigator {
    /// Issue a best-effort navigation to a custom-scheme URI
    fn attempt(&mut self, uri: &str);

    /// Issue a committed navigation to a web URL
    fn navigate(&mut self, url: &str);

    /// Schedule a timer `delay_ms` from now
    fn schedule_after(&mut self, delay_ms: u64, event: TimerEvent) -> TimerHandle;

    /// Cancel a pending timer; unknown handles are ignored
    fn cancel(&mut self, handle: TimerHandle);
}

/// Terminal-bound navigator with a single-threaded timer queue.
///
/// Navigation "instructions" are printed rather than executed; there is no
/// focus-loss signal source in a terminal, so a drive loop over this adapter
/// always ends in the fallback.
pub struct ConsoleNavigator {
    next_handle: TimerHandle,
    /// Pending timers: (handle, due offset ms, event)
    pending: Vec<(TimerHandle, u64, TimerEvent)>,
    clock_ms: u64,
}

impl ConsoleNavigator {
    pub fn new() -> Self {
        Self {
            next_handle: 0,
            pending: Vec::new(),
            clock_ms: 0,
        }
    }

    /// Remove and return the next pending timer in due order, ties broken by
    /// scheduling order. Advances the internal clock to its due time.
    pub fn next_due(&mut self) -> Option<(u64, TimerEvent)> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .min_by_key(|(_, (handle, due, _))| (*due, *handle))
            .map(|(idx, _)| idx)?;
        let (_, due, event) = self.pending.remove(idx);
        let wait = due.saturating_sub(self.clock_ms);
        self.clock_ms = due;
        Some((wait, event))
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Default for ConsoleNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for ConsoleNavigator {
    fn attempt(&mut self, uri: &str) {
        log::info!("deep-link attempt: {}", uri);
        println!("  trying app link: {}", uri);
    }

    fn navigate(&mut self, url: &str) {
        log::info!("navigating to web url: {}", url);
        println!("  opening: {}", url);
    }

    fn schedule_after(&mut self, delay_ms: u64, event: TimerEvent) -> TimerHandle {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.pending.push((handle, self.clock_ms + delay_ms, event));
        log::debug!("scheduled {:?} in {} ms (handle {})", event, delay_ms, handle);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|(h, _, _)| *h != handle);
        log::debug!("cancelled timer handle {}", handle);
    }
}

/// Drive a sequencer to settlement against a console navigator, sleeping out
/// the real delays between timers.
pub fn drive(sequencer: &mut super::Sequencer, navigator: &mut ConsoleNavigator) {
    sequencer.start(navigator);
    while !sequencer.settled() {
        let Some((wait_ms, event)) = navigator.next_due() else {
            break;
        };
        if wait_ms > 0 {
            thread::sleep(Duration::from_millis(wait_ms));
        }
        sequencer.on_timer(event, navigator);
    }
}
