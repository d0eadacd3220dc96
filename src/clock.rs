//! Timer capability injected into every engine.
//!
//! Engines never read wall-clock time or spawn timers themselves. They ask a
//! [`Clock`] to schedule one-shot timers and get back a [`TimerId`]; the
//! driver later routes fired ids back through [`TimerDriven::on_timer`].
//! Everything runs on one logical thread, so no locking is involved.

use std::time::Duration;

// ============================================================================
// CAPABILITY
// ============================================================================

/// Handle for one scheduled timer. Unique per clock, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Schedule/cancel capability.
pub trait Clock {
    /// Time elapsed since the clock was created.
    fn now(&self) -> Duration;

    /// Arm a one-shot timer that fires `delay` from now.
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Disarm a timer. Unknown or already-fired ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

/// Implemented by every engine that owns timers.
pub trait TimerDriven {
    /// Handle a fired timer. Returns true if `id` belonged to this engine
    /// and caused a transition.
    fn on_timer(&mut self, id: TimerId, clock: &mut dyn Clock) -> bool;

    /// Cancel everything this engine armed. After this, `on_timer` is inert.
    fn teardown(&mut self, clock: &mut dyn Clock);
}

// ============================================================================
// OWNED HANDLES
// ============================================================================

/// The handles an engine has armed and not yet seen fire.
///
/// Released together on the engine's single teardown path.
#[derive(Debug, Default)]
pub struct TimerSet {
    armed: Vec<TimerId>,
}

impl TimerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule through `clock` and remember the handle.
    pub fn arm(&mut self, clock: &mut dyn Clock, delay: Duration) -> TimerId {
        let id = clock.schedule(delay);
        self.armed.push(id);
        id
    }

    /// Forget a handle that has fired. Returns false if it was not ours.
    pub fn settle(&mut self, id: TimerId) -> bool {
        match self.armed.iter().position(|&a| a == id) {
            Some(pos) => {
                self.armed.swap_remove(pos);
                true
            }
            None => false,
        }
    }

    /// Cancel one handle early.
    pub fn cancel(&mut self, clock: &mut dyn Clock, id: TimerId) {
        if self.settle(id) {
            clock.cancel(id);
        }
    }

    /// Cancel every outstanding handle.
    pub fn release_all(&mut self, clock: &mut dyn Clock) {
        for id in self.armed.drain(..) {
            clock.cancel(id);
        }
    }

    pub fn contains(&self, id: TimerId) -> bool {
        self.armed.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.armed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }
}

// ============================================================================
// DETERMINISTIC CLOCK
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct Pending {
    id: TimerId,
    due: Duration,
}

/// A clock whose time moves only when told to.
///
/// Tests use it to fire timers on demand. The terminal showcase uses it too,
/// advancing it by the real time elapsed between frames.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of armed timers.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Whether `id` is still armed.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    /// When the earliest armed timer is due, if any.
    pub fn next_due(&self) -> Option<Duration> {
        self.earliest().map(|i| self.pending[i].due)
    }

    /// Move time forward by `by`, firing every timer that falls due in order.
    ///
    /// `on_fire` may schedule new timers; those due within the window fire
    /// in this same call.
    pub fn advance<F>(&mut self, by: Duration, mut on_fire: F)
    where
        F: FnMut(&mut ManualClock, TimerId),
    {
        let target = self.now.saturating_add(by);
        while let Some(i) = self.earliest() {
            if self.pending[i].due > target {
                break;
            }
            let Pending { id, due } = self.pending.remove(i);
            self.now = due;
            on_fire(self, id);
        }
        self.now = target;
    }

    /// Jump to the earliest armed timer and fire it. None if nothing is armed.
    pub fn fire_next(&mut self) -> Option<TimerId> {
        let i = self.earliest()?;
        let Pending { id, due } = self.pending.remove(i);
        self.now = self.now.max(due);
        Some(id)
    }

    // Ties break on id, i.e. scheduling order.
    fn earliest(&self) -> Option<usize> {
        self.pending
            .iter()
            .enumerate()
            .min_by_key(|(_, p)| (p.due, p.id))
            .map(|(i, _)| i)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            due: self.now.saturating_add(delay),
        });
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.pending.retain(|p| p.id != id);
    }
}

/// Convert a fractional millisecond delay into a `Duration`.
///
/// Negative and NaN inputs clamp to zero, values too large for a
/// `Duration` saturate.
pub fn millis_f64(ms: f64) -> Duration {
    if ms > 0.0 {
        Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}

// ============================================================================
// TESTS
// ============================================================================
