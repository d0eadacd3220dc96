//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module that touches the terminal or real time. It
//! wires the pure layers (state, update, view) and the engine stage to
//! crossterm and ratatui.
//!
//! Architecture: two producers feed a single mpsc channel.
//! - Key reader thread: forwards key presses and resizes
//! - Intro completion callback: fires from inside `Stage::advance`
//! The loop wakes at least once per frame to advance the stage clock by
//! the wall time that passed.

use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    self as term, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::{debug, info};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::config::MotionConfig;
use crate::content::{TESTIMONIALS, TIMELINE};
use crate::error::Result;
use crate::sequence::Key;

use super::layout::PageMetrics;
use super::stage::Stage;
use super::state::{Action, App, AppEvent, Screen, Transition};
use super::update::{handle_background_event, update};
use super::view::render;

/// Longest the loop sleeps between redraws.
pub const FRAME: Duration = Duration::from_millis(33);

type Term = Terminal<CrosstermBackend<io::Stdout>>;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        // Page
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),
        KeyCode::Char('e') => Some(Action::ToggleTimeline),

        // Carousel
        KeyCode::Left | KeyCode::Char('h') => Some(Action::PreviousSlide),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::NextSlide),
        KeyCode::Char(' ') => Some(Action::ToggleHold),
        KeyCode::Char(c @ '1'..='9') => Some(Action::Slide(c as u8 - b'0')),

        // Intro
        KeyCode::Enter | KeyCode::Esc => Some(Action::Skip),

        KeyCode::Char('q') => Some(Action::Quit),

        _ => None,
    }
}

/// The key as the secret sequence detector sees it.
pub fn sequence_key(key: KeyEvent) -> Option<Key> {
    match key.code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Char(c) => Some(Key::Char(c.to_ascii_lowercase())),
        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Term> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that forwards key presses and resizes to the channel.
fn spawn_key_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            let event = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Ok(Event::Resize(width, height)) => AppEvent::Resize { width, height },
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx.send(event).is_err() {
                break; // receiver dropped, TUI is shutting down
            }
        }
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the showcase until the user quits.
///
/// # Errors
/// Config values the engines reject, or terminal I/O failure.
pub fn run(config: &MotionConfig) -> Result<()> {
    let (tx, rx) = mpsc::channel::<AppEvent>();

    let (_, height) = term::size()?;
    let metrics = PageMetrics::new(
        PageMetrics::viewport_for(height),
        config.reveal.collapsed_count,
        TIMELINE.len(),
        TESTIMONIALS.len(),
    );

    let intro_tx = tx.clone();
    let mut stage = Stage::new(config, metrics.viewport, move || {
        let _ = intro_tx.send(AppEvent::IntroComplete);
    })?;

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let mut app = App::new(metrics);
    spawn_key_reader(tx);
    info!("showcase started, viewport {} rows", metrics.viewport);

    let result = event_loop(&mut terminal, &mut app, &mut stage, &rx);

    // No timer may fire once the terminal is handed back.
    stage.teardown();
    restore_terminal()?;
    result
}

fn event_loop(
    terminal: &mut Term,
    app: &mut App,
    stage: &mut Stage,
    rx: &mpsc::Receiver<AppEvent>,
) -> Result<()> {
    let mut last = Instant::now();

    loop {
        let now = Instant::now();
        stage.advance(now.duration_since(last));
        last = now;
        sync_scroll(app, stage);

        let view = stage.view();
        terminal.draw(|frame| render(app, &view, frame))?;

        if app.should_quit {
            break;
        }

        let event = match rx.recv_timeout(FRAME) {
            Ok(e) => e,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break, // all senders dropped
        };

        match event {
            AppEvent::Key(key) => {
                if let Some(k) = sequence_key(key) {
                    stage.on_key(k);
                }
                // Unbound keys still cut the splash short.
                let fallback = (app.screen == Screen::Intro).then_some(Action::Skip);
                if let Some(action) = map_key(key).or(fallback) {
                    let transition = update(app.screen, &action, &app.metrics);
                    apply_transition(transition, app, stage);
                }
            }
            AppEvent::IntroComplete => {
                handle_background_event(app, AppEvent::IntroComplete);
                stage.start_page();
            }
            background_event => {
                handle_background_event(app, background_event);
            }
        }
    }

    Ok(())
}

// ============================================================================
// EFFECT HANDLING
// ============================================================================

fn apply_transition(transition: Transition, app: &mut App, stage: &mut Stage) {
    match transition {
        Transition::Screen(screen) => app.screen = screen,
        Transition::Quit => app.should_quit = true,
        Transition::Effect { screen, effect } => {
            debug!("effect {:?}", effect);
            app.screen = screen;
            sync_scroll(app, stage);
            stage.apply(effect);
        }
    }
}

/// Tell the watcher where the page is scrolled to.
fn sync_scroll(app: &App, stage: &mut Stage) {
    if let Screen::Page { scroll, .. } = app.screen {
        stage.scroll_to(scroll, app.metrics.viewport);
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn ctrl_c_maps_to_quit() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key), Some(Action::Quit));
    }

    #[test]
    fn vim_keys_scroll() {
        assert_eq!(map_key(press(KeyCode::Char('j'))), Some(Action::ScrollDown));
        assert_eq!(map_key(press(KeyCode::Char('k'))), Some(Action::ScrollUp));
    }

    #[test]
    fn arrow_keys_scroll_and_slide() {
        assert_eq!(map_key(press(KeyCode::Up)), Some(Action::ScrollUp));
        assert_eq!(map_key(press(KeyCode::Down)), Some(Action::ScrollDown));
        assert_eq!(map_key(press(KeyCode::Left)), Some(Action::PreviousSlide));
        assert_eq!(map_key(press(KeyCode::Right)), Some(Action::NextSlide));
    }

    #[test]
    fn space_holds_the_carousel() {
        assert_eq!(map_key(press(KeyCode::Char(' '))), Some(Action::ToggleHold));
    }

    #[test]
    fn number_keys_jump_to_slides() {
        for n in 1..=9u8 {
            let key = press(KeyCode::Char((b'0' + n) as char));
            assert_eq!(map_key(key), Some(Action::Slide(n)));
        }
    }

    #[test]
    fn enter_and_esc_skip() {
        assert_eq!(map_key(press(KeyCode::Enter)), Some(Action::Skip));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(Action::Skip));
    }

    #[test]
    fn unmapped_key_returns_none() {
        assert_eq!(map_key(press(KeyCode::Char('z'))), None);
        assert_eq!(map_key(press(KeyCode::Char('0'))), None);
    }

    #[test]
    fn sequence_keys_fold_case() {
        assert_eq!(sequence_key(press(KeyCode::Char('B'))), Some(Key::Char('b')));
        assert_eq!(sequence_key(press(KeyCode::Up)), Some(Key::Up));
        assert_eq!(sequence_key(press(KeyCode::Enter)), None);
    }

    #[test]
    fn skip_effect_starts_the_page() {
        let metrics = PageMetrics::new(20, 4, TIMELINE.len(), TESTIMONIALS.len());
        let mut app = App::new(metrics);
        let mut stage = Stage::new(&MotionConfig::default(), metrics.viewport, || {}).unwrap();

        let transition = update(app.screen, &Action::Skip, &app.metrics);
        apply_transition(transition, &mut app, &mut stage);

        assert_eq!(app.screen, Screen::page());
        assert!(stage.view().page.hero_revealed);
    }
}
