//! Page geometry shared by the renderer and the visibility watcher.
//!
//! The scrolling page is one vertical strip of rows: hero block, a blank
//! row, the timeline header, then fixed-height timeline entries and the
//! read-more toggle. The testimonial carousel sits in its own pane below.

/// Rows taken by the hero block.
pub const HERO_HEIGHT: u16 = 6;
/// Timeline header rows (title + rule).
pub const TIMELINE_HEADER: u16 = 2;
/// Rows per timeline entry (title, summary, gap).
pub const ENTRY_HEIGHT: u16 = 3;
/// Fixed pane for the testimonials.
pub const CAROUSEL_HEIGHT: u16 = 7;
/// Title bar plus help line.
pub const CHROME_HEIGHT: u16 = 2;

/// First row of the timeline section.
pub const TIMELINE_TOP: u16 = HERO_HEIGHT + 1;

/// First row of timeline entry `index`.
pub fn entry_top(index: usize) -> u16 {
    TIMELINE_TOP + TIMELINE_HEADER + (index as u16) * ENTRY_HEIGHT
}

/// Total page rows when `shown` entries are listed.
pub fn page_rows(shown: usize) -> u16 {
    entry_top(shown) + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMetrics {
    /// Rows of the scrolling page visible at once.
    pub viewport: u16,
    /// Timeline entries shown while collapsed.
    pub collapsed: usize,
    /// All timeline entries.
    pub total: usize,
    /// Testimonial slides.
    pub slides: usize,
}

impl PageMetrics {
    pub fn new(viewport: u16, collapsed: usize, total: usize, slides: usize) -> Self {
        Self {
            viewport,
            collapsed,
            total,
            slides,
        }
    }

    /// Page viewport for a terminal of `height` rows.
    pub fn viewport_for(height: u16) -> u16 {
        height.saturating_sub(CHROME_HEIGHT + CAROUSEL_HEIGHT)
    }

    /// Entries listed in the given timeline mode.
    pub fn shown(&self, expanded: bool) -> usize {
        if expanded {
            self.total
        } else {
            self.collapsed.min(self.total)
        }
    }

    pub fn max_scroll(&self, expanded: bool) -> u16 {
        page_rows(self.shown(expanded)).saturating_sub(self.viewport)
    }
}
