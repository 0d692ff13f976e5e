#![forbid(unsafe_code)]

//! Monkey run configuration.
//!
//! # Loading
//!
//! ```toml
//! [run]
//! lifetime_ms = 300000
//! delay_ms = 100
//! loop_window = 12
//! seed = 42
//!
//! [finder]
//! timeout_ms = 2000
//!
//! [gestures]
//! drag_speed = 900.0
//!
//! [screenshots]
//! directory = "target/monkey-shots"
//! prefix = "smoke"
//! ```
//!
//! ```rust,ignore
//! let config = MonkeyConfig::from_toml_file("monkey.toml")?;
//! let config = MonkeyConfig::from_json_str(json)?;
//! ```
//!
//! Missing sections and fields fall back to [`Default`].

#[cfg(feature = "config")]
use std::path::Path;
use std::path::PathBuf;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
use uimonkey_core::backoff::Backoff;
use uimonkey_core::cancellation::CancellationToken;
use uimonkey_core::capability::{CharacterKind, TextConstraint};
use uimonkey_core::clock::Clock;
use uimonkey_core::driver::Driver;
use uimonkey_gesture::{
    ClickAndHoldOperator, ClickOperator, DoubleClickOperator, DragAndDropOperator, Operator,
    ScrollWheelOperator, SwipeOperator, TextInputOperator, ToggleOperator,
};
use web_time::Duration;

use crate::finder::ObjectFinder;

// ---------------------------------------------------------------------------
// Top level
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct MonkeyConfig {
    pub run: RunConfig,
    pub finder: FinderConfig,
    pub gestures: GestureConfig,
    /// Screenshots are off when absent.
    pub screenshots: Option<ScreenshotConfig>,
}

impl MonkeyConfig {
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(vec![e.to_string()]))
    }

    /// Human-readable problems; empty when valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.finder.backoff_min_ms == 0 {
            errors.push("finder.backoff_min_ms must be > 0".into());
        }
        if self.finder.backoff_max_ms < self.finder.backoff_min_ms {
            errors.push(format!(
                "finder.backoff_max_ms ({}) must be >= finder.backoff_min_ms ({})",
                self.finder.backoff_max_ms, self.finder.backoff_min_ms
            ));
        }
        for (name, value) in [
            ("gestures.drag_speed", self.gestures.drag_speed),
            ("gestures.swipe_speed", self.gestures.swipe_speed),
            ("gestures.scroll_speed", self.gestures.scroll_speed),
            ("gestures.swipe_distance", self.gestures.swipe_distance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                errors.push(format!("{name} must be a positive number, got {value}"));
            }
        }
        if self.gestures.text_min_length > self.gestures.text_max_length {
            errors.push(format!(
                "gestures.text_min_length ({}) must be <= gestures.text_max_length ({})",
                self.gestures.text_min_length, self.gestures.text_max_length
            ));
        }
        if let Some(shots) = &self.screenshots
            && shots.prefix.is_empty()
        {
            errors.push("screenshots.prefix must not be empty".into());
        }
        errors
    }

    /// `self` if [`validate`](Self::validate) finds nothing.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// `[run]`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct RunConfig {
    /// Total run time (default: 60 s).
    pub lifetime_ms: u64,
    /// Pause after each step (default: 200 ms).
    pub delay_ms: u64,
    /// Fail after this long with nothing to operate; 0 disables (default: 5 s).
    pub no_interactive_grace_ms: u64,
    /// Selection history length for loop detection; 0 disables (default: 10).
    pub loop_window: usize,
    /// Random seed; drawn from the OS when absent.
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            lifetime_ms: 60_000,
            delay_ms: 200,
            no_interactive_grace_ms: 5_000,
            loop_window: 10,
            seed: None,
        }
    }
}

impl RunConfig {
    pub fn lifetime(&self) -> Duration {
        Duration::from_millis(self.lifetime_ms)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn no_interactive_grace(&self) -> Duration {
        Duration::from_millis(self.no_interactive_grace_ms)
    }

    /// A driver seeded from [`seed`](Self::seed) when set.
    pub fn driver(&self, clock: Box<dyn Clock>, cancel: CancellationToken) -> Driver {
        let driver = Driver::new(clock, cancel);
        match self.seed {
            Some(seed) => driver.with_seed(seed),
            None => driver,
        }
    }
}

/// `[finder]`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct FinderConfig {
    /// Search deadline (default: 1 s).
    pub timeout_ms: u64,
    /// First retry wait (default: 100 ms).
    pub backoff_min_ms: u64,
    /// Retry wait cap (default: 1 s).
    pub backoff_max_ms: u64,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 1_000,
            backoff_min_ms: 100,
            backoff_max_ms: 1_000,
        }
    }
}

impl FinderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn backoff(&self) -> Backoff {
        Backoff::new(
            Duration::from_millis(self.backoff_min_ms),
            Duration::from_millis(self.backoff_max_ms),
        )
    }

    pub fn build(&self) -> ObjectFinder {
        ObjectFinder::new(self.timeout()).with_backoff(self.backoff())
    }
}

/// `[gestures]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct GestureConfig {
    pub double_click_interval_ms: u64,
    pub hold_ms: u64,
    /// Units per second.
    pub drag_speed: f32,
    pub swipe_distance: f32,
    /// Units per second.
    pub swipe_speed: f32,
    /// Scroll units per second.
    pub scroll_speed: f32,
    pub text_min_length: usize,
    pub text_max_length: usize,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            double_click_interval_ms: 100,
            hold_ms: 1_000,
            drag_speed: 1_200.0,
            swipe_distance: 200.0,
            swipe_speed: 2_000.0,
            scroll_speed: 1_000.0,
            text_min_length: 5,
            text_max_length: 10,
        }
    }
}

impl GestureConfig {
    /// The full operator set tuned by this section.
    pub fn operators(&self) -> Vec<Box<dyn Operator>> {
        vec![
            Box::new(ClickOperator),
            Box::new(DoubleClickOperator {
                interval: Duration::from_millis(self.double_click_interval_ms),
            }),
            Box::new(ClickAndHoldOperator {
                hold: Duration::from_millis(self.hold_ms),
            }),
            Box::new(DragAndDropOperator {
                speed: self.drag_speed,
                destination: None,
            }),
            Box::new(SwipeOperator {
                direction: None,
                distance: self.swipe_distance,
                speed: self.swipe_speed,
            }),
            Box::new(ScrollWheelOperator {
                speed: self.scroll_speed,
                destination: None,
            }),
            Box::new(ToggleOperator::default()),
            Box::new(TextInputOperator {
                text: None,
                fallback: TextConstraint {
                    kind: CharacterKind::Alphanumeric,
                    min_length: self.text_min_length,
                    max_length: self.text_max_length,
                },
            }),
        ]
    }
}

/// `[screenshots]`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ScreenshotConfig {
    pub directory: PathBuf,
    pub prefix: String,
}

impl Default for ScreenshotConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("screenshots"),
            prefix: "monkey".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    Invalid(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Invalid(errors) => write!(f, "invalid configuration: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}
