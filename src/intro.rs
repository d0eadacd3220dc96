//! Splash-screen sequencer.
//!
//! Runs `Init → ScaledUp → ScalingDown → FadedOut → Done` once, one one-shot
//! timer per arrow, then invokes its completion callback. Visuals per phase
//! (scale, opacity) are up to the consumer.

use std::fmt;
use std::time::Duration;

use log::{debug, trace};

use crate::clock::{Clock, TimerDriven, TimerId, TimerSet};
use crate::error::{MotionError, Result};

/// Splash phases, in the only order they are ever visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntroPhase {
    Init,
    ScaledUp,
    ScalingDown,
    FadedOut,
    Done,
}

impl IntroPhase {
    /// The phase after this one, None for `Done`.
    pub fn successor(self) -> Option<IntroPhase> {
        match self {
            IntroPhase::Init => Some(IntroPhase::ScaledUp),
            IntroPhase::ScaledUp => Some(IntroPhase::ScalingDown),
            IntroPhase::ScalingDown => Some(IntroPhase::FadedOut),
            IntroPhase::FadedOut => Some(IntroPhase::Done),
            IntroPhase::Done => None,
        }
    }
}

impl fmt::Display for IntroPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IntroPhase::Init => "init",
            IntroPhase::ScaledUp => "scaled up",
            IntroPhase::ScalingDown => "scaling down",
            IntroPhase::FadedOut => "faded out",
            IntroPhase::Done => "done",
        };
        f.write_str(name)
    }
}

/// How long each phase lasts before the next one is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntroTimings {
    /// Init → ScaledUp.
    pub start_delay: Duration,
    /// ScaledUp → ScalingDown.
    pub hold: Duration,
    /// ScalingDown → FadedOut.
    pub shrink: Duration,
    /// FadedOut → Done.
    pub fade: Duration,
}

impl Default for IntroTimings {
    fn default() -> Self {
        Self {
            start_delay: Duration::from_millis(300),
            hold: Duration::from_millis(1200),
            shrink: Duration::from_millis(400),
            fade: Duration::from_millis(400),
        }
    }
}

impl IntroTimings {
    /// Time spent in `phase` before advancing. `Done` never advances.
    pub fn dwell(&self, phase: IntroPhase) -> Option<Duration> {
        match phase {
            IntroPhase::Init => Some(self.start_delay),
            IntroPhase::ScaledUp => Some(self.hold),
            IntroPhase::ScalingDown => Some(self.shrink),
            IntroPhase::FadedOut => Some(self.fade),
            IntroPhase::Done => None,
        }
    }

    pub fn total(&self) -> Duration {
        self.start_delay + self.hold + self.shrink + self.fade
    }
}

type Completion = Box<dyn FnOnce()>;

pub struct IntroSequencer {
    phase: IntroPhase,
    timings: IntroTimings,
    on_complete: Option<Completion>,
    pending: Option<TimerId>,
    timers: TimerSet,
    started: bool,
    torn_down: bool,
}

impl fmt::Debug for IntroSequencer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntroSequencer")
            .field("phase", &self.phase)
            .field("timings", &self.timings)
            .field("pending", &self.pending)
            .field("has_completion", &self.on_complete.is_some())
            .field("torn_down", &self.torn_down)
            .finish()
    }
}

impl IntroSequencer {
    /// # Errors
    /// [`MotionError::InvalidDuration`] if any duration is zero.
    pub fn new(timings: IntroTimings) -> Result<Self> {
        let fields = [
            (timings.start_delay, "intro.start_delay_ms"),
            (timings.hold, "intro.hold_ms"),
            (timings.shrink, "intro.shrink_ms"),
            (timings.fade, "intro.fade_ms"),
        ];
        if let Some(&(_, field)) = fields.iter().find(|(d, _)| d.is_zero()) {
            return Err(MotionError::InvalidDuration { field });
        }
        Ok(Self {
            phase: IntroPhase::Init,
            timings,
            on_complete: None,
            pending: None,
            timers: TimerSet::new(),
            started: false,
            torn_down: false,
        })
    }

    /// Callback run once, when `Done` is entered.
    pub fn on_complete(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Arm the first transition. Only the first call has any effect.
    pub fn start(&mut self, clock: &mut dyn Clock) {
        if self.started || self.torn_down {
            return;
        }
        self.started = true;
        self.arm_next(clock);
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    pub fn timings(&self) -> &IntroTimings {
        &self.timings
    }

    pub fn is_done(&self) -> bool {
        self.phase == IntroPhase::Done
    }

    /// True once torn down or finished: nothing more will happen.
    pub fn is_settled(&self) -> bool {
        self.torn_down || self.is_done()
    }

    fn arm_next(&mut self, clock: &mut dyn Clock) {
        if let Some(delay) = self.timings.dwell(self.phase) {
            self.pending = Some(self.timers.arm(clock, delay));
        }
    }
}

impl TimerDriven for IntroSequencer {
    fn on_timer(&mut self, id: TimerId, clock: &mut dyn Clock) -> bool {
        if self.torn_down || self.pending != Some(id) || !self.timers.settle(id) {
            return false;
        }
        self.pending = None;

        let Some(next) = self.phase.successor() else {
            return false;
        };
        self.phase = next;
        debug!("intro: entered {}", next);

        if next == IntroPhase::Done {
            if let Some(done) = self.on_complete.take() {
                done();
            }
        } else {
            self.arm_next(clock);
        }
        true
    }

    fn teardown(&mut self, clock: &mut dyn Clock) {
        trace!("intro: teardown in phase {}", self.phase);
        self.timers.release_all(clock);
        self.pending = None;
        self.on_complete = None;
        self.torn_down = true;
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::clock::ManualClock;

    fn counting() -> (IntroSequencer, Rc<Cell<u32>>) {
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        let seq = IntroSequencer::new(IntroTimings::default())
            .unwrap()
            .on_complete(move || c.set(c.get() + 1));
        (seq, calls)
    }

    fn advance(seq: &mut IntroSequencer, clock: &mut ManualClock, ms: u64) {
        clock.advance(Duration::from_millis(ms), |clk, id| {
            seq.on_timer(id, clk);
        });
    }

    #[test]
    fn zero_duration_is_rejected() {
        let timings = IntroTimings {
            hold: Duration::ZERO,
            ..Default::default()
        };
        match IntroSequencer::new(timings) {
            Err(MotionError::InvalidDuration { field }) => assert_eq!(field, "intro.hold_ms"),
            other => panic!("Expected InvalidDuration, got {:?}", other),
        }
    }

    #[test]
    fn nothing_happens_before_start() {
        let (mut seq, calls) = counting();
        let mut clock = ManualClock::new();
        advance(&mut seq, &mut clock, 10_000);
        assert_eq!(seq.phase(), IntroPhase::Init);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn visits_every_phase_in_order_once() {
        let (mut seq, calls) = counting();
        let mut clock = ManualClock::new();
        seq.start(&mut clock);

        let mut seen = vec![seq.phase()];
        while let Some(id) = clock.fire_next() {
            assert!(seq.on_timer(id, &mut clock));
            seen.push(seq.phase());
        }

        assert_eq!(
            seen,
            vec![
                IntroPhase::Init,
                IntroPhase::ScaledUp,
                IntroPhase::ScalingDown,
                IntroPhase::FadedOut,
                IntroPhase::Done,
            ]
        );
        assert_eq!(calls.get(), 1);
        assert_eq!(clock.now(), IntroTimings::default().total());
    }

    #[test]
    fn phases_follow_the_schedule() {
        let (mut seq, calls) = counting();
        let mut clock = ManualClock::new();
        seq.start(&mut clock);

        advance(&mut seq, &mut clock, 299);
        assert_eq!(seq.phase(), IntroPhase::Init);
        advance(&mut seq, &mut clock, 1);
        assert_eq!(seq.phase(), IntroPhase::ScaledUp);
        advance(&mut seq, &mut clock, 1200);
        assert_eq!(seq.phase(), IntroPhase::ScalingDown);
        advance(&mut seq, &mut clock, 400);
        assert_eq!(seq.phase(), IntroPhase::FadedOut);
        assert_eq!(calls.get(), 0);
        advance(&mut seq, &mut clock, 400);
        assert!(seq.is_done());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn completion_fires_once_even_with_more_time() {
        let (mut seq, calls) = counting();
        let mut clock = ManualClock::new();
        seq.start(&mut clock);
        seq.start(&mut clock);
        advance(&mut seq, &mut clock, 60_000);
        assert_eq!(calls.get(), 1);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn teardown_mid_sequence_freezes_everything() {
        let (mut seq, calls) = counting();
        let mut clock = ManualClock::new();
        seq.start(&mut clock);
        advance(&mut seq, &mut clock, 700);
        assert_eq!(seq.phase(), IntroPhase::ScaledUp);

        seq.teardown(&mut clock);
        assert_eq!(clock.pending(), 0);

        advance(&mut seq, &mut clock, 60_000);
        assert_eq!(seq.phase(), IntroPhase::ScaledUp);
        assert_eq!(calls.get(), 0);
        assert!(seq.is_settled());
    }

    #[test]
    fn start_after_teardown_is_inert() {
        let (mut seq, calls) = counting();
        let mut clock = ManualClock::new();
        seq.teardown(&mut clock);
        seq.start(&mut clock);
        assert_eq!(clock.pending(), 0);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn successor_chain_ends_at_done() {
        let mut phase = IntroPhase::Init;
        let mut steps = 0;
        while let Some(next) = phase.successor() {
            assert!(next > phase);
            phase = next;
            steps += 1;
        }
        assert_eq!(phase, IntroPhase::Done);
        assert_eq!(steps, 4);
    }
}
