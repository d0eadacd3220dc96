//! Slide carousel with circular navigation and pausable autoplay.

use std::time::Duration;

use log::{debug, trace};

use crate::clock::{Clock, TimerDriven, TimerId, TimerSet};
use crate::error::{MotionError, Result};

/// Observable carousel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    pub active_index: usize,
    pub is_auto_playing: bool,
    pub timer_pending: bool,
}

#[derive(Debug)]
pub struct CarouselController {
    len: usize,
    active: usize,
    autoplay: bool,
    interval: Duration,
    /// At most one autoplay timer is ever armed.
    pending: Option<TimerId>,
    timers: TimerSet,
    torn_down: bool,
}

impl CarouselController {
    /// Carousel over `len` slides, starting at slide 0 with autoplay on.
    ///
    /// Nothing is armed until [`start`](Self::start).
    ///
    /// # Errors
    /// [`MotionError::EmptyCarousel`] if `len` is zero,
    /// [`MotionError::InvalidDuration`] if `interval` is zero.
    pub fn new(len: usize, interval: Duration) -> Result<Self> {
        if len == 0 {
            return Err(MotionError::EmptyCarousel);
        }
        if interval.is_zero() {
            return Err(MotionError::InvalidDuration {
                field: "carousel.interval_ms",
            });
        }
        Ok(Self {
            len,
            active: 0,
            autoplay: true,
            interval,
            pending: None,
            timers: TimerSet::new(),
            torn_down: false,
        })
    }

    pub fn start(&mut self, clock: &mut dyn Clock) {
        if self.pending.is_none() {
            self.rearm(clock);
        }
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_auto_playing(&self) -> bool {
        self.autoplay
    }

    pub fn state(&self) -> CarouselState {
        CarouselState {
            active_index: self.active,
            is_auto_playing: self.autoplay,
            timer_pending: self.pending.is_some(),
        }
    }

    pub fn next(&mut self, clock: &mut dyn Clock) {
        self.set_active((self.active + 1) % self.len, clock);
    }

    pub fn previous(&mut self, clock: &mut dyn Clock) {
        self.set_active((self.active + self.len - 1) % self.len, clock);
    }

    /// # Errors
    /// [`MotionError::IndexOutOfRange`] if `index >= len`; state is untouched.
    pub fn go_to(&mut self, index: usize, clock: &mut dyn Clock) -> Result<()> {
        if index >= self.len {
            return Err(MotionError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        self.set_active(index, clock);
        Ok(())
    }

    /// Pause (pointer over the carousel) or resume autoplay.
    ///
    /// Pausing keeps the active slide. Resuming starts a fresh interval.
    pub fn set_autoplay(&mut self, enabled: bool, clock: &mut dyn Clock) {
        if self.torn_down || enabled == self.autoplay {
            return;
        }
        self.autoplay = enabled;
        debug!("carousel: autoplay {}", if enabled { "resumed" } else { "paused" });
        self.rearm(clock);
    }

    fn set_active(&mut self, index: usize, clock: &mut dyn Clock) {
        if self.torn_down {
            return;
        }
        self.active = index;
        self.rearm(clock);
    }

    /// Cancel whatever is armed, then arm a fresh window if autoplaying.
    fn rearm(&mut self, clock: &mut dyn Clock) {
        if self.torn_down {
            return;
        }
        if let Some(old) = self.pending.take() {
            self.timers.cancel(clock, old);
        }
        if self.autoplay {
            self.pending = Some(self.timers.arm(clock, self.interval));
        }
    }
}

impl TimerDriven for CarouselController {
    fn on_timer(&mut self, id: TimerId, clock: &mut dyn Clock) -> bool {
        if self.torn_down || self.pending != Some(id) || !self.timers.settle(id) {
            return false;
        }
        self.pending = None;
        self.next(clock);
        trace!("carousel: autoplay advanced to {}", self.active);
        true
    }

    fn teardown(&mut self, clock: &mut dyn Clock) {
        trace!("carousel: teardown");
        self.timers.release_all(clock);
        self.pending = None;
        self.torn_down = true;
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    const INTERVAL: Duration = Duration::from_millis(5000);

    fn carousel(len: usize) -> (CarouselController, ManualClock) {
        let mut clock = ManualClock::new();
        let mut c = CarouselController::new(len, INTERVAL).unwrap();
        c.start(&mut clock);
        (c, clock)
    }

    fn advance(c: &mut CarouselController, clock: &mut ManualClock, ms: u64) {
        clock.advance(Duration::from_millis(ms), |clk, id| {
            c.on_timer(id, clk);
        });
    }

    #[test]
    fn empty_carousel_is_rejected() {
        assert!(matches!(
            CarouselController::new(0, INTERVAL),
            Err(MotionError::EmptyCarousel)
        ));
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(matches!(
            CarouselController::new(3, Duration::ZERO),
            Err(MotionError::InvalidDuration { .. })
        ));
    }

    #[test]
    fn wraps_in_both_directions() {
        let (mut c, mut clock) = carousel(4);
        c.previous(&mut clock);
        assert_eq!(c.active_index(), 3);
        c.next(&mut clock);
        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn n_nexts_return_to_start() {
        for start in 0..4 {
            let (mut c, mut clock) = carousel(4);
            c.go_to(start, &mut clock).unwrap();
            for _ in 0..4 {
                c.next(&mut clock);
            }
            assert_eq!(c.active_index(), start);
        }
    }

    #[test]
    fn previous_then_next_is_identity() {
        for start in 0..5 {
            let (mut c, mut clock) = carousel(5);
            c.go_to(start, &mut clock).unwrap();
            c.previous(&mut clock);
            c.next(&mut clock);
            assert_eq!(c.active_index(), start);
        }
    }

    #[test]
    fn single_slide_navigation_is_noop() {
        let (mut c, mut clock) = carousel(1);
        c.next(&mut clock);
        c.previous(&mut clock);
        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn single_slide_autoplay_keeps_running() {
        let (mut c, mut clock) = carousel(1);
        advance(&mut c, &mut clock, 16_000);
        assert_eq!(c.active_index(), 0);
        assert_eq!(clock.pending(), 1);
    }

    #[test]
    fn go_to_out_of_range_leaves_state() {
        let (mut c, mut clock) = carousel(4);
        c.go_to(2, &mut clock).unwrap();
        let err = c.go_to(4, &mut clock).unwrap_err();
        assert!(matches!(err, MotionError::IndexOutOfRange { index: 4, len: 4 }));
        assert_eq!(c.active_index(), 2);
    }

    #[test]
    fn autoplay_advances_every_interval() {
        let (mut c, mut clock) = carousel(4);
        advance(&mut c, &mut clock, 4999);
        assert_eq!(c.active_index(), 0);
        advance(&mut c, &mut clock, 1);
        assert_eq!(c.active_index(), 1);
        advance(&mut c, &mut clock, 15_000);
        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn manual_navigation_restarts_the_window() {
        let (mut c, mut clock) = carousel(4);
        advance(&mut c, &mut clock, 4000);
        c.go_to(2, &mut clock).unwrap();
        advance(&mut c, &mut clock, 4000);
        assert_eq!(c.active_index(), 2);
        advance(&mut c, &mut clock, 1000);
        assert_eq!(c.active_index(), 3);
    }

    #[test]
    fn only_one_timer_outstanding() {
        let (mut c, mut clock) = carousel(4);
        for _ in 0..10 {
            c.next(&mut clock);
        }
        assert_eq!(clock.pending(), 1);
    }

    #[test]
    fn pause_cancels_and_keeps_index() {
        let (mut c, mut clock) = carousel(4);
        c.go_to(3, &mut clock).unwrap();
        c.set_autoplay(false, &mut clock);
        assert_eq!(clock.pending(), 0);

        advance(&mut c, &mut clock, 60_000);
        assert_eq!(c.active_index(), 3);
        assert!(!c.state().timer_pending);
    }

    #[test]
    fn resume_starts_a_fresh_window() {
        let (mut c, mut clock) = carousel(4);
        advance(&mut c, &mut clock, 4500);
        c.set_autoplay(false, &mut clock);
        c.set_autoplay(true, &mut clock);

        advance(&mut c, &mut clock, 4999);
        assert_eq!(c.active_index(), 0);
        advance(&mut c, &mut clock, 1);
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn navigation_while_paused_arms_nothing() {
        let (mut c, mut clock) = carousel(4);
        c.set_autoplay(false, &mut clock);
        c.next(&mut clock);
        assert_eq!(c.active_index(), 1);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn stale_timer_cannot_advance() {
        let (mut c, mut clock) = carousel(4);
        let first = clock.fire_next().unwrap();
        // Pretend the first fire got lost; a manual move re-arms.
        c.next(&mut clock);
        assert!(!c.on_timer(first, &mut clock));
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn teardown_stops_autoplay() {
        let (mut c, mut clock) = carousel(4);
        c.teardown(&mut clock);
        assert_eq!(clock.pending(), 0);

        c.next(&mut clock);
        c.set_autoplay(false, &mut clock);
        advance(&mut c, &mut clock, 20_000);
        assert_eq!(c.active_index(), 0);
        assert_eq!(clock.pending(), 0);
    }
}
