//! Pure rendering: map App state and a stage snapshot to ratatui widget trees.
//!
//! The scrolling page is built as one list of lines whose row positions
//! match `layout`, so what the watcher measures is what the user sees.
//! Widget-building functions are pure (state in, widgets out); the only
//! effect is Frame::render_widget() which writes to the terminal buffer.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::content::TESTIMONIALS;
use crate::intro::IntroPhase;

use super::layout::CAROUSEL_HEIGHT;
use super::state::{App, EntryView, IntroView, PageView, Reveal, Screen, StageView};
use super::theme;

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Columns an entry starts offset by when its slide-in begins.
const SLIDE_IN: f64 = 6.0;

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the current screen to the terminal frame.
pub fn render(app: &App, view: &StageView, frame: &mut Frame) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // content
        Constraint::Length(1), // help
    ])
    .split(area);

    frame.render_widget(render_title(view.celebrating), chunks[0]);
    frame.render_widget(render_help(&app.screen), chunks[2]);

    match app.screen {
        Screen::Intro => render_intro(view.intro, frame, chunks[1]),
        Screen::Page {
            scroll,
            expanded,
            holding,
        } => {
            let panes = Layout::vertical([
                Constraint::Min(0),
                Constraint::Length(CAROUSEL_HEIGHT),
            ])
            .split(chunks[1]);

            let page = Paragraph::new(page_lines(&view.page, expanded)).scroll((scroll, 0));
            frame.render_widget(page, panes[0]);
            frame.render_widget(render_carousel(&view.page, holding), panes[1]);
        }
    }
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

fn render_title(celebrating: bool) -> Paragraph<'static> {
    let mut spans = vec![Span::styled("codecrushed", theme::STYLE_TITLE)];
    if celebrating {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(" ↑↑↓↓←→←→BA  unlocked! ", theme::STYLE_PARTY));
    }
    Paragraph::new(Line::from(spans))
}

/// Help line showing available keybindings for the current screen.
fn render_help(screen: &Screen) -> Paragraph<'static> {
    let help_text = match screen {
        Screen::Intro => "[Enter] skip  [q] quit",
        Screen::Page { .. } => {
            "[j/k] scroll  [h/l] slides  [1-4] jump  [Space] hold  [e] timeline  [q] quit"
        }
    };

    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

// ============================================================================
// SCREEN: INTRO
// ============================================================================

fn render_intro(intro: IntroView, frame: &mut Frame, area: Rect) {
    let spinner = SPINNER[intro.spin % SPINNER.len()];

    let logo: Vec<Line> = match intro.phase {
        IntroPhase::Init | IntroPhase::Done => Vec::new(),
        IntroPhase::ScaledUp => vec![
            Line::from(Span::styled("┌───────────────────────────┐", theme::STYLE_BRAND)),
            Line::from(vec![
                Span::styled("│ ", theme::STYLE_BRAND),
                Span::styled(spinner, theme::STYLE_ACCENT),
                Span::styled(" C O D E C R U S H E D ", theme::STYLE_BRAND),
                Span::styled("│", theme::STYLE_BRAND),
            ]),
            Line::from(Span::styled("└───────────────────────────┘", theme::STYLE_BRAND)),
        ],
        IntroPhase::ScalingDown => vec![Line::from(vec![
            Span::styled(spinner, theme::STYLE_ACCENT),
            Span::styled(" codecrushed", theme::STYLE_BRAND),
        ])],
        IntroPhase::FadedOut => vec![Line::from(Span::styled("codecrushed", theme::STYLE_DIM))],
    };

    let pad = area.height.saturating_sub(logo.len() as u16) / 2;
    let mut lines = vec![Line::from(""); usize::from(pad)];
    lines.extend(logo);

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

// ============================================================================
// SCREEN: PAGE
// ============================================================================

/// Every row of the scrolling page, top to bottom.
fn page_lines(page: &PageView, expanded: bool) -> Vec<Line<'static>> {
    let mut lines = hero_lines(page);

    // Gap row, then the timeline header.
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  My Journey", theme::STYLE_TITLE)));
    lines.push(Line::from(Span::styled("  ──────────", theme::STYLE_DIM)));

    for entry in &page.entries {
        lines.extend(entry_lines(entry));
    }

    let toggle = if expanded { "Show less" } else { "Read more" };
    lines.push(Line::from(vec![
        Span::styled("  [e] ", theme::STYLE_INTERACTIVE),
        Span::raw(toggle),
    ]));
    lines
}

/// Six rows: blank, name, typed title, blank, tagline, blank.
fn hero_lines(page: &PageView) -> Vec<Line<'static>> {
    if !page.hero_revealed {
        return vec![Line::from(""); 6];
    }

    let caret = if page.deleting { "▏" } else { "▌" };
    vec![
        Line::from(""),
        Line::from(Span::styled("  Hi, I'm Faisal Adams", theme::STYLE_IMPORTANT)),
        Line::from(vec![
            Span::styled("  > ", theme::STYLE_DIM),
            Span::styled(page.typed.clone(), theme::STYLE_BRAND),
            Span::styled(caret, theme::STYLE_CURSOR),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  I build fast, accessible products for the web.",
            theme::STYLE_DIM,
        )),
        Line::from(""),
    ]
}

/// Three rows: title, summary, gap.
fn entry_lines(view: &EntryView) -> [Line<'static>; 3] {
    let entry = view.entry;
    match view.reveal {
        Reveal::Hidden => [Line::from(""), Line::from(""), Line::from("")],
        Reveal::Animating(t) => {
            let indent = " ".repeat(2 + ((1.0 - t) * SLIDE_IN).round() as usize);
            [
                Line::from(Span::styled(
                    format!("{}○ {}", indent, entry.title),
                    theme::STYLE_DIM,
                )),
                Line::from(Span::styled(
                    format!("{}  {}", indent, entry.summary),
                    theme::STYLE_DIM,
                )),
                Line::from(""),
            ]
        }
        Reveal::Shown => [
            Line::from(vec![
                Span::styled("  ● ", theme::STYLE_ACCENT),
                Span::styled(entry.title, theme::STYLE_IMPORTANT),
            ]),
            Line::from(Span::styled(format!("    {}", entry.summary), theme::STYLE_DIM)),
            Line::from(""),
        ],
    }
}

// ============================================================================
// CAROUSEL PANE
// ============================================================================

fn render_carousel(page: &PageView, holding: bool) -> Paragraph<'static> {
    let title = if holding || !page.autoplay {
        " Testimonials (paused) "
    } else {
        " Testimonials "
    };
    let block = Block::default()
        .borders(Borders::TOP)
        .title(Span::styled(title, theme::STYLE_TITLE));

    let Some(testimonial) = TESTIMONIALS.get(page.slide) else {
        return Paragraph::new("").block(block);
    };

    let dots: Vec<Span> = (0..TESTIMONIALS.len())
        .map(|i| {
            let style = if i == page.slide {
                theme::STYLE_DOT_ACTIVE
            } else {
                theme::STYLE_DOT
            };
            Span::styled(if i == page.slide { "● " } else { "○ " }, style)
        })
        .collect();

    let lines = vec![
        Line::from(Span::styled(
            format!("  \"{}\"", testimonial.quote),
            theme::STYLE_ACCENT,
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("  [{}] ", testimonial.initials()), theme::STYLE_BRAND),
            Span::styled(testimonial.name, theme::STYLE_IMPORTANT),
            Span::styled(
                format!(", {} at {}", testimonial.role, testimonial.company),
                theme::STYLE_DIM,
            ),
        ]),
        Line::from([vec![Span::raw("  ")], dots].concat()),
    ];

    Paragraph::new(lines).block(block).wrap(Wrap { trim: false })
}

// ============================================================================
// TESTS
// ============================================================================
