mod machine;
mod navigator;

#[cfg(test)]
mod tests;

pub use machine::{Sequencer, SequencerState, ATTEMPT_STAGGER_MS};
pub use navigator::{drive, ConsoleNavigator, Navigator, TimerEvent, TimerHandle};
