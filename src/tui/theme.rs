//! TUI color semantics and style constants.
//!
//! Color semantics:
//! - Orange: brand accent (logo, typed title, active slide)
//! - Pink: secondary accent (timeline markers, quotes)
//! - Blue: interactive elements (keybinding hints)
//! - Dim: de-emphasized (summaries, animating entries, faded splash)
//! - Bold: important (names, headings)

use ratatui::style::{Color, Modifier, Style};

const ORANGE: Color = Color::Rgb(0xF9, 0x73, 0x16);
const PINK: Color = Color::Rgb(0xEC, 0x48, 0x99);
const BLUE: Color = Color::Rgb(0x3B, 0x82, 0xF6);

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

/// Brand accent.
pub const STYLE_BRAND: Style = Style::new().fg(ORANGE).add_modifier(Modifier::BOLD);

pub const STYLE_ACCENT: Style = Style::new().fg(PINK);

/// Interactive element / keybinding hint.
pub const STYLE_INTERACTIVE: Style = Style::new().fg(BLUE);

/// De-emphasized text.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

pub const STYLE_IMPORTANT: Style = Style::new().add_modifier(Modifier::BOLD);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Title bar / header.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Typewriter caret.
pub const STYLE_CURSOR: Style = Style::new()
    .fg(ORANGE)
    .add_modifier(Modifier::SLOW_BLINK);

/// Celebration banner.
pub const STYLE_PARTY: Style = Style::new()
    .fg(Color::Black)
    .bg(PINK)
    .add_modifier(Modifier::BOLD);

/// Slide indicator dot for the active slide.
pub const STYLE_DOT_ACTIVE: Style = Style::new().fg(ORANGE);

pub const STYLE_DOT: Style = Style::new().fg(Color::DarkGray);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// TESTS
// ============================================================================
