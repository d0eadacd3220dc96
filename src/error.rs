//! Error type shared by the engines and the config loader.
//!
//! Precondition violations are programmer errors: constructors reject them
//! up front so a running engine never has to recover from them.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Everything that can go wrong before an engine starts ticking.
#[derive(Debug)]
pub enum MotionError {
    /// A typewriter needs at least one phrase to cycle through.
    EmptyPhraseSet,

    /// A carousel needs at least one slide.
    EmptyCarousel,

    /// `go_to` was asked for a slide that does not exist.
    IndexOutOfRange { index: usize, len: usize },

    /// Visibility threshold outside `0.0..=1.0`.
    InvalidThreshold { value: f64 },

    /// A duration that must be positive was zero or not finite.
    InvalidDuration { field: &'static str },

    /// Config file could not be read.
    ConfigIo { path: PathBuf, source: io::Error },

    /// Config file is not valid JSON for [`crate::config::MotionConfig`].
    ConfigParse { path: PathBuf, message: String },

    /// The terminal could not be set up, drawn to, or restored.
    Terminal(io::Error),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, MotionError>;

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::EmptyPhraseSet => write!(f, "Phrase set must contain at least one phrase"),
            MotionError::EmptyCarousel => write!(f, "Carousel must contain at least one slide"),
            MotionError::IndexOutOfRange { index, len } => {
                write!(f, "Slide index {} out of range (carousel has {} slides)", index, len)
            }
            MotionError::InvalidThreshold { value } => {
                write!(f, "Visibility threshold {} is outside 0.0..=1.0", value)
            }
            MotionError::InvalidDuration { field } => {
                write!(f, "Duration '{}' must be greater than zero", field)
            }
            MotionError::ConfigIo { path, source } => {
                write!(f, "Cannot read config {}: {}", path.display(), source)
            }
            MotionError::ConfigParse { path, message } => {
                write!(f, "Invalid config {}: {}", path.display(), message)
            }
            MotionError::Terminal(e) => write!(f, "Terminal I/O failed: {}", e),
        }
    }
}

impl std::error::Error for MotionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MotionError::ConfigIo { source, .. } => Some(source),
            MotionError::Terminal(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MotionError {
    fn from(e: io::Error) -> Self {
        MotionError::Terminal(e)
    }
}
