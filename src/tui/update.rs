//! Pure state transitions: (Screen, Action) → Transition.
//!
//! Fully testable without a terminal. Unhandled actions return the current
//! screen unchanged (no-op). Engine commands come back as effects for the
//! stage to carry out.

use super::layout::PageMetrics;
use super::state::{Action, App, AppEvent, Effect, Screen, Transition};

/// Pure state transition function.
pub fn update(screen: Screen, action: &Action, metrics: &PageMetrics) -> Transition {
    match screen {
        Screen::Intro => update_intro(action),
        Screen::Page {
            scroll,
            expanded,
            holding,
        } => update_page(scroll, expanded, holding, action, metrics),
    }
}

/// Non-key events that change the model directly.
pub fn handle_background_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::IntroComplete => {
            if app.screen == Screen::Intro {
                app.screen = Screen::page();
            }
        }
        AppEvent::Resize { height, .. } => {
            app.metrics.viewport = PageMetrics::viewport_for(height);
            if let Screen::Page { scroll, expanded, .. } = &mut app.screen {
                *scroll = (*scroll).min(app.metrics.max_scroll(*expanded));
            }
        }
        // Keys go through map_key → update.
        AppEvent::Key(_) => {}
    }
}

// ============================================================================
// PER-SCREEN HANDLERS
// ============================================================================

/// Intro: anything but quitting skips the splash.
fn update_intro(action: &Action) -> Transition {
    match action {
        Action::Quit => Transition::Quit,
        _ => Transition::Effect {
            screen: Screen::page(),
            effect: Effect::SkipIntro,
        },
    }
}

fn update_page(
    scroll: u16,
    expanded: bool,
    holding: bool,
    action: &Action,
    metrics: &PageMetrics,
) -> Transition {
    let page = |scroll, expanded, holding| Screen::Page {
        scroll,
        expanded,
        holding,
    };
    let same = page(scroll, expanded, holding);
    let with = |effect| Transition::Effect {
        screen: same,
        effect,
    };

    match action {
        Action::ScrollUp => Transition::Screen(page(scroll.saturating_sub(1), expanded, holding)),
        Action::ScrollDown => {
            let next = (scroll + 1).min(metrics.max_scroll(expanded));
            Transition::Screen(page(next, expanded, holding))
        }
        Action::PreviousSlide => with(Effect::PreviousSlide),
        Action::NextSlide => with(Effect::NextSlide),
        Action::Slide(n) => {
            let n = usize::from(*n);
            if n >= 1 && n <= metrics.slides {
                with(Effect::GoToSlide(n - 1))
            } else {
                Transition::Screen(same)
            }
        }
        Action::ToggleHold => Transition::Effect {
            screen: page(scroll, expanded, !holding),
            // Holding pauses autoplay; releasing resumes it.
            effect: Effect::SetAutoplay(holding),
        },
        Action::ToggleTimeline => {
            let expanded = !expanded;
            let scroll = scroll.min(metrics.max_scroll(expanded));
            Transition::Effect {
                screen: page(scroll, expanded, holding),
                effect: Effect::ShowTimeline { expanded },
            }
        }
        Action::Quit => Transition::Quit,
        Action::Skip => Transition::Screen(same),
    }
}

// ============================================================================
// TESTS
// ============================================================================
