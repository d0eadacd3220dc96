//! Typewriter text rotation.
//!
//! Types a phrase one character at a time, holds it, deletes it with an
//! accelerating cadence, then moves on to the next phrase. Loops forever.
//!
//! Each tick arms exactly one timer using the delay the tick just computed,
//! so a delay change takes effect on the very next tick.

use log::{debug, trace};

use crate::clock::{millis_f64, Clock, TimerDriven, TimerId, TimerSet};
use crate::error::{MotionError, Result};

// ============================================================================
// TYPES
// ============================================================================

/// Non-empty, ordered list of phrases cycled without end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseSet {
    phrases: Vec<String>,
}

impl PhraseSet {
    /// # Errors
    /// Returns [`MotionError::EmptyPhraseSet`] when `phrases` is empty.
    pub fn new(phrases: Vec<String>) -> Result<Self> {
        if phrases.is_empty() {
            return Err(MotionError::EmptyPhraseSet);
        }
        Ok(Self { phrases })
    }

    pub fn from_strs(phrases: &[&str]) -> Result<Self> {
        Self::new(phrases.iter().map(|s| s.to_string()).collect())
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Phrase at `index`, wrapping around the set.
    pub fn get(&self, index: usize) -> &str {
        &self.phrases[index % self.phrases.len()]
    }
}

/// Snapshot of the engine for rendering or inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct TypingState {
    pub current_index: usize,
    pub displayed_text: String,
    pub is_deleting: bool,
    pub tick_delay_ms: f64,
}

/// Cadence of the effect, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypewriterTimings {
    /// How long a fully typed phrase stays on screen.
    pub period_ms: f64,
    /// Delay between typed characters.
    pub typing_delay_ms: f64,
    /// Lower bound for the halving delete delay. Zero disables the floor.
    pub min_delete_delay_ms: f64,
}

impl Default for TypewriterTimings {
    fn default() -> Self {
        Self {
            period_ms: 2000.0,
            typing_delay_ms: 150.0,
            min_delete_delay_ms: 30.0,
        }
    }
}

// ============================================================================
// ENGINE
// ============================================================================

#[derive(Debug)]
pub struct TypewriterEngine {
    phrases: PhraseSet,
    timings: TypewriterTimings,
    index: usize,
    /// Displayed prefix length, in chars.
    shown: usize,
    deleting: bool,
    delay_ms: f64,
    cycles: u64,
    timers: TimerSet,
    started: bool,
    torn_down: bool,
}

impl TypewriterEngine {
    pub fn new(phrases: PhraseSet, timings: TypewriterTimings) -> Self {
        Self {
            phrases,
            timings,
            index: 0,
            shown: 0,
            deleting: false,
            delay_ms: timings.typing_delay_ms,
            cycles: 0,
            timers: TimerSet::new(),
            started: false,
            torn_down: false,
        }
    }

    /// Arm the first tick. Calling it again is a no-op.
    pub fn start(&mut self, clock: &mut dyn Clock) {
        if self.started || self.torn_down {
            return;
        }
        self.started = true;
        self.arm(clock);
    }

    /// The text to render right now. Always a prefix of the current phrase.
    pub fn displayed_text(&self) -> &str {
        let phrase = self.current_phrase();
        match phrase.char_indices().nth(self.shown) {
            Some((byte, _)) => &phrase[..byte],
            None => phrase,
        }
    }

    pub fn current_phrase(&self) -> &str {
        self.phrases.get(self.index)
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Delay the next tick is (or will be) armed with.
    pub fn tick_delay_ms(&self) -> f64 {
        self.delay_ms
    }

    /// Number of phrases fully typed and deleted so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn state(&self) -> TypingState {
        TypingState {
            current_index: self.index,
            displayed_text: self.displayed_text().to_string(),
            is_deleting: self.deleting,
            tick_delay_ms: self.delay_ms,
        }
    }

    /// Advance the effect by one step. Pure: touches no clock.
    pub fn tick(&mut self) {
        let full_len = self.current_phrase().chars().count();

        if self.deleting {
            self.shown = self.shown.saturating_sub(1);
            self.delay_ms = (self.delay_ms / 2.0).max(self.timings.min_delete_delay_ms);
        } else {
            self.shown = (self.shown + 1).min(full_len);
        }

        if !self.deleting && self.shown == full_len {
            self.deleting = true;
            self.delay_ms = self.timings.period_ms;
        } else if self.deleting && self.shown == 0 {
            self.deleting = false;
            self.index = (self.index + 1) % self.phrases.len();
            self.cycles += 1;
            self.delay_ms = self.timings.typing_delay_ms;
            debug!("typewriter: next phrase #{} {:?}", self.index, self.current_phrase());
        }
    }

    fn arm(&mut self, clock: &mut dyn Clock) {
        self.timers.arm(clock, millis_f64(self.delay_ms));
    }
}

impl TimerDriven for TypewriterEngine {
    fn on_timer(&mut self, id: TimerId, clock: &mut dyn Clock) -> bool {
        if self.torn_down || !self.timers.settle(id) {
            return false;
        }
        self.tick();
        self.arm(clock);
        true
    }

    fn teardown(&mut self, clock: &mut dyn Clock) {
        trace!("typewriter: teardown, {} timer(s) released", self.timers.len());
        self.timers.release_all(clock);
        self.torn_down = true;
    }
}

// ============================================================================
// TESTS
// ============================================================================
