//! Secret key sequence and the short celebration it triggers.
//!
//! [`KeySequence`] watches a rolling window of the most recent keys; once
//! the window matches its pattern it reports a hit. [`Celebration`] is the
//! one-shot effect that follows, ended by a single clock timer.

use std::collections::VecDeque;
use std::time::Duration;

use log::{debug, trace};

use crate::clock::{Clock, TimerDriven, TimerId, TimerSet};

/// Keys the secret sequence is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Char(char),
}

/// Matches the last `pattern.len()` keys against a fixed pattern.
#[derive(Debug, Clone)]
pub struct KeySequence<K> {
    pattern: Vec<K>,
    recent: VecDeque<K>,
}

impl<K: PartialEq + Clone> KeySequence<K> {
    pub fn new(pattern: Vec<K>) -> Self {
        let recent = VecDeque::with_capacity(pattern.len());
        Self { pattern, recent }
    }

    /// Record a key. True when it completes the pattern.
    pub fn push(&mut self, key: K) -> bool {
        if self.pattern.is_empty() {
            return false;
        }
        if self.recent.len() == self.pattern.len() {
            self.recent.pop_front();
        }
        self.recent.push_back(key);
        self.recent.iter().eq(self.pattern.iter())
    }

    pub fn clear(&mut self) {
        self.recent.clear();
    }
}

impl KeySequence<Key> {
    /// Up Up Down Down Left Right Left Right B A.
    pub fn konami() -> Self {
        use Key::*;
        Self::new(vec![
            Up,
            Up,
            Down,
            Down,
            Left,
            Right,
            Left,
            Right,
            Char('b'),
            Char('a'),
        ])
    }
}

/// A timed effect that is either running or not.
#[derive(Debug)]
pub struct Celebration {
    duration: Duration,
    pending: Option<TimerId>,
    timers: TimerSet,
    torn_down: bool,
}

impl Celebration {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            pending: None,
            timers: TimerSet::new(),
            torn_down: false,
        }
    }

    /// Start the effect, or restart its window if already running.
    pub fn trigger(&mut self, clock: &mut dyn Clock) {
        if self.torn_down {
            return;
        }
        if let Some(old) = self.pending.take() {
            self.timers.cancel(clock, old);
        }
        debug!("celebration: started for {:?}", self.duration);
        self.pending = Some(self.timers.arm(clock, self.duration));
    }

    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }
}

impl TimerDriven for Celebration {
    fn on_timer(&mut self, id: TimerId, _clock: &mut dyn Clock) -> bool {
        if self.torn_down || self.pending != Some(id) || !self.timers.settle(id) {
            return false;
        }
        self.pending = None;
        true
    }

    fn teardown(&mut self, clock: &mut dyn Clock) {
        trace!("celebration: teardown");
        self.timers.release_all(clock);
        self.pending = None;
        self.torn_down = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn konami_keys() -> Vec<Key> {
        use Key::*;
        vec![Up, Up, Down, Down, Left, Right, Left, Right, Char('b'), Char('a')]
    }

    #[test]
    fn full_sequence_hits_on_last_key() {
        let mut seq = KeySequence::konami();
        let keys = konami_keys();
        let hits: Vec<bool> = keys.into_iter().map(|k| seq.push(k)).collect();
        assert_eq!(hits.iter().filter(|h| **h).count(), 1);
        assert!(hits[9]);
    }

    #[test]
    fn noise_before_the_sequence_is_tolerated() {
        let mut seq = KeySequence::konami();
        for k in [Key::Char('x'), Key::Up, Key::Char('q')] {
            assert!(!seq.push(k));
        }
        let last = konami_keys().into_iter().map(|k| seq.push(k)).last();
        assert_eq!(last, Some(true));
    }

    #[test]
    fn broken_sequence_does_not_hit() {
        let mut seq = KeySequence::konami();
        let mut keys = konami_keys();
        keys[4] = Key::Right;
        assert!(!keys.into_iter().any(|k| seq.push(k)));
    }

    #[test]
    fn empty_pattern_never_hits() {
        let mut seq: KeySequence<char> = KeySequence::new(vec![]);
        assert!(!seq.push('a'));
    }

    #[test]
    fn celebration_ends_after_duration() {
        let mut clock = ManualClock::new();
        let mut party = Celebration::new(Duration::from_millis(1000));
        party.trigger(&mut clock);
        assert!(party.is_active());

        clock.advance(Duration::from_millis(999), |c, id| {
            party.on_timer(id, c);
        });
        assert!(party.is_active());
        clock.advance(Duration::from_millis(1), |c, id| {
            party.on_timer(id, c);
        });
        assert!(!party.is_active());
    }

    #[test]
    fn retrigger_extends_without_second_timer() {
        let mut clock = ManualClock::new();
        let mut party = Celebration::new(Duration::from_millis(1000));
        party.trigger(&mut clock);
        clock.advance(Duration::from_millis(600), |_, _| {});
        party.trigger(&mut clock);
        assert_eq!(clock.pending(), 1);
        assert_eq!(clock.next_due(), Some(Duration::from_millis(1600)));
    }

    #[test]
    fn teardown_cancels_celebration() {
        let mut clock = ManualClock::new();
        let mut party = Celebration::new(Duration::from_millis(1000));
        party.trigger(&mut clock);
        party.teardown(&mut clock);
        assert_eq!(clock.pending(), 0);
        party.trigger(&mut clock);
        assert!(!party.is_active());
    }
}
