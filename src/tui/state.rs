//! TUI state algebra: pure types, zero effects.
//!
//! The screen state machine and the actions that drive it. Engine state
//! (typed text, revealed entries, active slide) lives in the stage; the
//! screen carries only what the user navigates: scroll position, whether
//! the timeline is expanded, and whether the pointer is holding the
//! carousel.

use crossterm::event::KeyEvent;

use crate::content::TimelineEntry;
use crate::intro::IntroPhase;
use crate::tui::layout::PageMetrics;

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
///
/// Producers: the key reader thread, and the intro's completion callback.
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event from the crossterm reader thread.
    Key(KeyEvent),
    /// Terminal resized; the page viewport must be re-measured.
    Resize { width: u16, height: u16 },
    /// The splash sequence reached its last phase.
    IntroComplete,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    pub screen: Screen,
    /// Page geometry, refreshed on resize.
    pub metrics: PageMetrics,
    /// Set to true when the app should exit on the next frame.
    pub should_quit: bool,
}

// ============================================================================
// SCREENS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Splash animation. The page is not shown until it completes.
    Intro,

    /// The portfolio page: hero, timeline, testimonials.
    Page {
        /// First page row shown at the top of the viewport.
        scroll: u16,
        /// All timeline entries shown, or only the collapsed subset.
        expanded: bool,
        /// Pointer resting on the carousel: autoplay paused.
        holding: bool,
    },
}

impl Default for Screen {
    fn default() -> Self {
        Screen::Intro
    }
}

impl Screen {
    /// Freshly entered page, scrolled to the top.
    pub fn page() -> Self {
        Screen::Page {
            scroll: 0,
            expanded: false,
            holding: false,
        }
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PreviousSlide,
    NextSlide,
    /// Jump to a slide by its 1-based number.
    Slide(u8),
    /// Pointer enters/leaves the carousel.
    ToggleHold,
    /// "Read more" / "Show less" on the timeline.
    ToggleTimeline,
    /// Cut the splash short.
    Skip,
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Render this screen (may be the same or a different screen).
    Screen(Screen),
    /// Quit the application.
    Quit,
    /// Move to `screen` and have the stage carry out `effect`.
    Effect { screen: Screen, effect: Effect },
}

/// Engine command requested by a pure transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Tear the splash down early and start the page.
    SkipIntro,
    PreviousSlide,
    NextSlide,
    /// 0-based slide index, already range-checked.
    GoToSlide(usize),
    SetAutoplay(bool),
    /// Swap the presented timeline subset; reveals start over.
    ShowTimeline { expanded: bool },
}

// ============================================================================
// VIEW MODEL
// ============================================================================

/// Read-only snapshot of the engines, taken once per frame for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct StageView {
    pub intro: IntroView,
    pub page: PageView,
    /// Secret sequence entered recently.
    pub celebrating: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntroView {
    pub phase: IntroPhase,
    /// Frame counter for the spinning logo.
    pub spin: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    /// Typewriter output.
    pub typed: String,
    pub deleting: bool,
    /// Hero text becomes visible once the hero section is revealed.
    pub hero_revealed: bool,
    /// Timeline entries currently listed.
    pub entries: Vec<EntryView>,
    pub slide: usize,
    pub autoplay: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryView {
    pub entry: &'static TimelineEntry,
    pub reveal: Reveal,
}

/// Where an entry is in its one-shot appearance animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reveal {
    Hidden,
    /// Fraction of the fade/slide-in done, `0.0..1.0`.
    Animating(f64),
    Shown,
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl App {
    /// App on the splash screen.
    pub fn new(metrics: PageMetrics) -> Self {
        App {
            screen: Screen::Intro,
            metrics,
            should_quit: false,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
