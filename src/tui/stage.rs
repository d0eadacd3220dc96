//! Engine host for the showcase.
//!
//! Owns the clock, the visibility watcher and every engine, routes fired
//! timers and intersection events to their owners, and carries out the
//! effects the pure transition layer asks for. Dropping the stage tears
//! every engine down.

use std::collections::HashMap;
use std::time::Duration;

use log::{info, trace, warn};

use crate::carousel::CarouselController;
use crate::clock::{Clock, ManualClock, TimerDriven};
use crate::config::MotionConfig;
use crate::content::{TESTIMONIALS, TIMELINE};
use crate::error::Result;
use crate::intro::IntroSequencer;
use crate::reveal::RevealScheduler;
use crate::sequence::{Celebration, Key, KeySequence};
use crate::typewriter::TypewriterEngine;
use crate::visibility::{EntityId, ObserveOptions, ScrollRoot, ViewportWatcher};

use super::layout::{entry_top, ENTRY_HEIGHT, HERO_HEIGHT};
use super::state::{Effect, EntryView, IntroView, PageView, Reveal, StageView};

/// Length of one entry's fade/slide-in.
pub const REVEAL_ANIMATION: Duration = Duration::from_millis(600);
/// How long the secret celebration lasts.
pub const CELEBRATION: Duration = Duration::from_millis(1000);

const SPIN_FRAME: Duration = Duration::from_millis(120);
const HERO_ID: &str = "hero";

pub struct Stage {
    clock: ManualClock,
    watcher: ViewportWatcher,
    intro: IntroSequencer,
    typewriter: TypewriterEngine,
    hero: RevealScheduler,
    timeline: RevealScheduler,
    carousel: CarouselController,
    celebration: Celebration,
    secret: KeySequence<Key>,
    /// When each revealed timeline entry starts animating.
    reveal_starts: HashMap<EntityId, Duration>,
    stagger: Duration,
    collapsed: usize,
    expanded: bool,
    page_started: bool,
    torn_down: bool,
}

impl Stage {
    /// Build every engine and start the splash.
    ///
    /// `on_intro_complete` runs once, when the splash finishes on its own.
    ///
    /// # Errors
    /// Any engine precondition the config violates.
    pub fn new(
        config: &MotionConfig,
        viewport: u16,
        on_intro_complete: impl FnOnce() + 'static,
    ) -> Result<Self> {
        config.validate()?;

        let mut clock = ManualClock::new();
        let mut intro = IntroSequencer::new(config.intro_timings())?.on_complete(on_intro_complete);
        intro.start(&mut clock);

        let options = |threshold| ObserveOptions {
            threshold,
            root: ScrollRoot::Viewport,
        };

        Ok(Self {
            clock,
            watcher: ViewportWatcher::new(ScrollRoot::Viewport, f64::from(viewport)),
            intro,
            typewriter: TypewriterEngine::new(config.phrase_set()?, config.typewriter_timings()),
            hero: RevealScheduler::new(options(config.reveal.hero_threshold))?,
            timeline: RevealScheduler::new(options(config.reveal.timeline_threshold))?,
            carousel: CarouselController::new(TESTIMONIALS.len(), config.carousel_interval())?,
            celebration: Celebration::new(CELEBRATION),
            secret: KeySequence::konami(),
            reveal_starts: HashMap::new(),
            stagger: config.stagger(),
            collapsed: config.reveal.collapsed_count,
            expanded: false,
            page_started: false,
            torn_down: false,
        })
    }

    /// Begin the page: hero and timeline observation, carousel autoplay.
    ///
    /// Tears the splash down first if it is still running.
    pub fn start_page(&mut self) {
        if self.page_started || self.torn_down {
            return;
        }
        self.page_started = true;
        if !self.intro.is_settled() {
            info!("intro skipped in phase {}", self.intro.phase());
            self.intro.teardown(&mut self.clock);
        }

        self.layout();
        let hero = [EntityId::from(HERO_ID)];
        self.hero.register(&hero, &mut self.watcher);
        let shown = self.shown_ids();
        self.timeline.register(&shown, &mut self.watcher);
        self.carousel.start(&mut self.clock);
        self.pump_visibility();
    }

    /// Carry out an effect requested by `update`.
    pub fn apply(&mut self, effect: Effect) {
        if self.torn_down {
            return;
        }
        match effect {
            Effect::SkipIntro => self.start_page(),
            Effect::PreviousSlide => self.carousel.previous(&mut self.clock),
            Effect::NextSlide => self.carousel.next(&mut self.clock),
            Effect::GoToSlide(index) => {
                if let Err(e) = self.carousel.go_to(index, &mut self.clock) {
                    warn!("ignoring slide jump: {}", e);
                }
            }
            Effect::SetAutoplay(enabled) => self.carousel.set_autoplay(enabled, &mut self.clock),
            Effect::ShowTimeline { expanded } => self.show_timeline(expanded),
        }
        self.pump_visibility();
    }

    /// Feed a raw key to the secret sequence detector.
    pub fn on_key(&mut self, key: Key) {
        if self.torn_down {
            return;
        }
        if self.secret.push(key) {
            info!("secret sequence entered");
            self.secret.clear();
            self.celebration.trigger(&mut self.clock);
        }
    }

    /// Sync the watcher with the page's scroll position.
    pub fn scroll_to(&mut self, scroll: u16, viewport: u16) {
        if self.torn_down {
            return;
        }
        self.watcher.scroll_to(f64::from(scroll), f64::from(viewport));
        self.pump_visibility();
    }

    /// Move time forward, firing every timer that falls due in order.
    pub fn advance(&mut self, elapsed: Duration) {
        if self.torn_down {
            return;
        }
        let Stage {
            clock,
            intro,
            typewriter,
            carousel,
            celebration,
            ..
        } = self;
        clock.advance(elapsed, |clk, id| {
            let owned = intro.on_timer(id, clk)
                || typewriter.on_timer(id, clk)
                || carousel.on_timer(id, clk)
                || celebration.on_timer(id, clk);
            if !owned {
                trace!("stage: timer {:?} had no owner", id);
            }
        });
        self.pump_visibility();
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> StageView {
        let now = self.clock.now();
        let spin = (now.as_millis() / SPIN_FRAME.as_millis()) as usize;

        let entries = TIMELINE[..self.shown_count()]
            .iter()
            .map(|entry| EntryView {
                entry,
                reveal: self.reveal_of(&EntityId::from(entry.id), now),
            })
            .collect();

        StageView {
            intro: IntroView {
                phase: self.intro.phase(),
                spin,
            },
            page: PageView {
                typed: self.typewriter.displayed_text().to_string(),
                deleting: self.typewriter.is_deleting(),
                hero_revealed: self.hero.is_revealed(&EntityId::from(HERO_ID)),
                entries,
                slide: self.carousel.active_index(),
                autoplay: self.carousel.is_auto_playing(),
            },
            celebrating: self.celebration.is_active(),
        }
    }

    /// Cancel every timer and observation. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        let clock = &mut self.clock;
        self.intro.teardown(clock);
        self.typewriter.teardown(clock);
        self.carousel.teardown(clock);
        self.celebration.teardown(clock);
        self.hero.teardown(&mut self.watcher);
        self.timeline.teardown(&mut self.watcher);
        self.torn_down = true;
        info!("stage torn down, {} timer(s) left armed", self.clock.pending());
    }

    // ------------------------------------------------------------------------

    fn show_timeline(&mut self, expanded: bool) {
        self.expanded = expanded;
        if !self.page_started {
            return;
        }
        self.layout();
        self.reveal_starts.clear();
        let shown = self.shown_ids();
        self.timeline.reset(&shown, &mut self.watcher);
    }

    fn shown_count(&self) -> usize {
        if self.expanded {
            TIMELINE.len()
        } else {
            self.collapsed.min(TIMELINE.len())
        }
    }

    fn shown_ids(&self) -> Vec<EntityId> {
        TIMELINE[..self.shown_count()]
            .iter()
            .map(|e| EntityId::from(e.id))
            .collect()
    }

    fn layout(&mut self) {
        self.watcher.clear_layout();
        self.watcher
            .place(&EntityId::from(HERO_ID), 0.0, f64::from(HERO_HEIGHT));
        for (i, id) in self.shown_ids().iter().enumerate() {
            // The gap row below each entry is not part of it.
            self.watcher
                .place(id, f64::from(entry_top(i)), f64::from(ENTRY_HEIGHT - 1));
        }
    }

    /// Route queued intersections to their scheduler.
    fn pump_visibility(&mut self) {
        let now = self.clock.now();
        let mut first = None;
        for event in self.watcher.drain() {
            if self.hero.on_intersection(&event, &mut self.watcher).is_some() {
                self.typewriter.start(&mut self.clock);
            } else if let Some(entered) = self.timeline.on_intersection(&event, &mut self.watcher) {
                // Entries revealed together appear one after another.
                let base = *first.get_or_insert(entered.sequence);
                let step = u32::try_from(entered.sequence - base).unwrap_or(u32::MAX);
                self.reveal_starts
                    .insert(entered.id, now.saturating_add(self.stagger.saturating_mul(step)));
            }
        }
    }

    fn reveal_of(&self, id: &EntityId, now: Duration) -> Reveal {
        match self.reveal_starts.get(id) {
            None => Reveal::Hidden,
            Some(&start) if now < start => Reveal::Hidden,
            Some(&start) => {
                let t = (now - start).as_secs_f64() / REVEAL_ANIMATION.as_secs_f64();
                if t >= 1.0 {
                    Reveal::Shown
                } else {
                    Reveal::Animating(t)
                }
            }
        }
    }
}

impl Drop for Stage {
    fn drop(&mut self) {
        self.teardown();
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
    use crate::intro::IntroPhase;

    fn stage() -> (Stage, Rc<Cell<u32>>) {
        let done = Rc::new(Cell::new(0));
        let d = Rc::clone(&done);
        let stage = Stage::new(&MotionConfig::default(), 20, move || d.set(d.get() + 1)).unwrap();
        (stage, done)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn intro_runs_to_completion_once() {
        let (mut stage, done) = stage();
        stage.advance(ms(2300));
        assert_eq!(stage.view().intro.phase, IntroPhase::Done);
        stage.advance(ms(10_000));
        assert_eq!(done.get(), 1);
    }

    #[test]
    fn skipping_intro_suppresses_completion() {
        let (mut stage, done) = stage();
        stage.advance(ms(500));
        stage.apply(Effect::SkipIntro);
        stage.advance(ms(10_000));
        assert_eq!(done.get(), 0);
        assert_eq!(stage.view().intro.phase, IntroPhase::ScaledUp);
    }

    #[test]
    fn page_start_reveals_hero_and_types() {
        let (mut stage, _) = stage();
        stage.start_page();
        let view = stage.view();
        assert!(view.page.hero_revealed);
        assert_eq!(view.page.typed, "");

        stage.advance(ms(150));
        assert_eq!(stage.view().page.typed, "S");
    }

    #[test]
    fn visible_entries_animate_in_with_stagger() {
        let (mut stage, _) = stage();
        stage.start_page();

        // Viewport of 20 rows: entries 0..=3 start at rows 9, 12, 15, 18.
        let view = stage.view();
        assert_eq!(view.page.entries.len(), 4);
        assert_eq!(view.page.entries[0].reveal, Reveal::Animating(0.0));
        assert_eq!(view.page.entries[1].reveal, Reveal::Hidden);

        stage.advance(ms(2000));
        let view = stage.view();
        assert_eq!(view.page.entries[0].reveal, Reveal::Shown);
        assert_eq!(view.page.entries[2].reveal, Reveal::Shown);
    }

    #[test]
    fn scrolling_reveals_late_entries() {
        let (mut stage, _) = stage();
        stage.start_page();
        stage.apply(Effect::ShowTimeline { expanded: true });
        assert_eq!(stage.view().page.entries[10].reveal, Reveal::Hidden);

        stage.scroll_to(30, 20);
        stage.advance(ms(5000));
        assert_eq!(stage.view().page.entries[10].reveal, Reveal::Shown);
    }

    #[test]
    fn late_batch_staggers_from_its_own_start() {
        let (mut stage, _) = stage();
        stage.start_page();
        stage.apply(Effect::ShowTimeline { expanded: true });
        stage.advance(ms(2000));

        // Rows 30..50 hold entries 7..=12, revealed after the first four.
        stage.scroll_to(30, 20);
        let view = stage.view();
        assert_eq!(view.page.entries[7].reveal, Reveal::Animating(0.0));
        assert_eq!(view.page.entries[8].reveal, Reveal::Hidden);

        stage.advance(Duration::from_millis(120));
        assert_eq!(stage.view().page.entries[8].reveal, Reveal::Animating(0.0));
    }

    #[test]
    fn toggling_the_timeline_restarts_reveals() {
        let (mut stage, _) = stage();
        stage.start_page();
        stage.advance(ms(2000));
        assert_eq!(stage.view().page.entries[0].reveal, Reveal::Shown);

        stage.apply(Effect::ShowTimeline { expanded: true });
        assert_eq!(stage.view().page.entries.len(), TIMELINE.len());
        assert_eq!(stage.view().page.entries[0].reveal, Reveal::Animating(0.0));
    }

    #[test]
    fn carousel_autoplays_and_pauses() {
        let (mut stage, _) = stage();
        stage.start_page();
        stage.advance(ms(5000));
        assert_eq!(stage.view().page.slide, 1);

        stage.apply(Effect::SetAutoplay(false));
        stage.advance(ms(20_000));
        assert_eq!(stage.view().page.slide, 1);
        assert!(!stage.view().page.autoplay);

        stage.apply(Effect::GoToSlide(3));
        stage.apply(Effect::NextSlide);
        assert_eq!(stage.view().page.slide, 0);
    }

    #[test]
    fn secret_sequence_celebrates_briefly() {
        let (mut stage, _) = stage();
        for key in [
            Key::Up,
            Key::Up,
            Key::Down,
            Key::Down,
            Key::Left,
            Key::Right,
            Key::Left,
            Key::Right,
            Key::Char('b'),
            Key::Char('a'),
        ] {
            stage.on_key(key);
        }
        assert!(stage.view().celebrating);
        stage.advance(CELEBRATION);
        assert!(!stage.view().celebrating);
    }

    #[test]
    fn teardown_leaves_nothing_armed() {
        let (mut stage, done) = stage();
        stage.start_page();
        stage.advance(ms(100));
        stage.teardown();
        assert_eq!(stage.clock.pending(), 0);
        assert_eq!(stage.watcher.observed_count(), 0);

        stage.advance(ms(60_000));
        assert_eq!(done.get(), 0);
    }
}
