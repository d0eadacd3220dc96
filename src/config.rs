//! Tunable timings, loaded from a JSON file.
//!
//! Every field has a default, so a file only needs the keys it overrides.
//! Lookup order: explicit `--config` path, then
//! `<config dir>/codecrushed/motion.json`, then built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::content;
use crate::error::{MotionError, Result};
use crate::intro::IntroTimings;
use crate::typewriter::{PhraseSet, TypewriterTimings};

const APP_DIR: &str = "codecrushed";
const CONFIG_FILE: &str = "motion.json";

// ============================================================================
// SECTIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    pub phrases: Vec<String>,
    pub period_ms: f64,
    pub typing_delay_ms: f64,
    pub min_delete_delay_ms: f64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        let timings = TypewriterTimings::default();
        Self {
            phrases: content::HERO_PHRASES.iter().map(|s| s.to_string()).collect(),
            period_ms: timings.period_ms,
            typing_delay_ms: timings.typing_delay_ms,
            min_delete_delay_ms: timings.min_delete_delay_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Visible fraction that reveals a timeline entry.
    pub timeline_threshold: f64,
    /// Visible fraction that starts the hero text.
    pub hero_threshold: f64,
    /// Timeline entries shown while collapsed.
    pub collapsed_count: usize,
    /// Delay between consecutive reveals in one generation.
    pub stagger_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            timeline_threshold: 0.3,
            hero_threshold: 0.1,
            collapsed_count: 4,
            stagger_ms: 120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub interval_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self { interval_ms: 5000 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    pub start_delay_ms: u64,
    pub hold_ms: u64,
    pub shrink_ms: u64,
    pub fade_ms: u64,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: 300,
            hold_ms: 1200,
            shrink_ms: 400,
            fade_ms: 400,
        }
    }
}

// ============================================================================
// TOP LEVEL
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub typewriter: TypewriterConfig,
    pub reveal: RevealConfig,
    pub carousel: CarouselConfig,
    pub intro: IntroConfig,
}

impl MotionConfig {
    /// `<config dir>/codecrushed/motion.json`, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Parse and validate a config file.
    ///
    /// # Errors
    /// I/O failure, malformed JSON, or values rejected by [`validate`](Self::validate).
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| MotionError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config: MotionConfig =
            serde_json::from_str(&text).map_err(|e| MotionError::ConfigParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        config.validate()?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `explicit` if given, else the default path if it exists, else defaults.
    ///
    /// # Errors
    /// Only when a file is found and cannot be loaded.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// # Errors
    /// The first value that would break an engine's preconditions.
    pub fn validate(&self) -> Result<()> {
        let tw = &self.typewriter;
        if tw.phrases.is_empty() {
            return Err(MotionError::EmptyPhraseSet);
        }
        positive(tw.period_ms, "typewriter.period_ms")?;
        positive(tw.typing_delay_ms, "typewriter.typing_delay_ms")?;
        if !(0.0..=MAX_DELAY_MS).contains(&tw.min_delete_delay_ms) {
            return Err(MotionError::InvalidDuration {
                field: "typewriter.min_delete_delay_ms",
            });
        }

        threshold(self.reveal.timeline_threshold)?;
        threshold(self.reveal.hero_threshold)?;

        positive(self.carousel.interval_ms as f64, "carousel.interval_ms")?;

        let intro = &self.intro;
        positive(intro.start_delay_ms as f64, "intro.start_delay_ms")?;
        positive(intro.hold_ms as f64, "intro.hold_ms")?;
        positive(intro.shrink_ms as f64, "intro.shrink_ms")?;
        positive(intro.fade_ms as f64, "intro.fade_ms")?;
        Ok(())
    }

    pub fn phrase_set(&self) -> Result<PhraseSet> {
        PhraseSet::new(self.typewriter.phrases.clone())
    }

    pub fn typewriter_timings(&self) -> TypewriterTimings {
        TypewriterTimings {
            period_ms: self.typewriter.period_ms,
            typing_delay_ms: self.typewriter.typing_delay_ms,
            min_delete_delay_ms: self.typewriter.min_delete_delay_ms,
        }
    }

    pub fn intro_timings(&self) -> IntroTimings {
        IntroTimings {
            start_delay: Duration::from_millis(self.intro.start_delay_ms),
            hold: Duration::from_millis(self.intro.hold_ms),
            shrink: Duration::from_millis(self.intro.shrink_ms),
            fade: Duration::from_millis(self.intro.fade_ms),
        }
    }

    pub fn carousel_interval(&self) -> Duration {
        Duration::from_millis(self.carousel.interval_ms)
    }

    pub fn stagger(&self) -> Duration {
        Duration::from_millis(self.reveal.stagger_ms)
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys: serialization cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Longest delay any engine accepts: one day.
pub const MAX_DELAY_MS: f64 = 86_400_000.0;

fn positive(value: f64, field: &'static str) -> Result<()> {
    if value > 0.0 && value <= MAX_DELAY_MS {
        Ok(())
    } else {
        Err(MotionError::InvalidDuration { field })
    }
}

fn threshold(value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(MotionError::InvalidThreshold { value })
    }
}

// ============================================================================
// TESTS
// ============================================================================
