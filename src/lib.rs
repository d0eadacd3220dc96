//! codecrushed-motion: timer-driven presentation engines for a portfolio
//! page, and a terminal showcase that drives them.

pub mod carousel;
pub mod clock;
pub mod config;
pub mod content;
pub mod error;
pub mod intro;
pub mod reveal;
pub mod sequence;
pub mod tui;
pub mod typewriter;
pub mod visibility;
