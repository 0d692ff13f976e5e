#![forbid(unsafe_code)]

//! Unified error for applications driving uimonkey.
//!
//! Each subsystem keeps its own typed error; [`Error`] wraps them so callers
//! can use one `?` chain and still match on what matters.

use std::fmt;

use uimonkey_core::Cancelled;
use uimonkey_gesture::GestureError;
use uimonkey_runtime::{ConfigError, FinderError, MonkeyError};

/// Top-level error type.
#[derive(Debug)]
pub enum Error {
    /// Node search failed.
    Finder(FinderError),
    /// The monkey run failed.
    Monkey(MonkeyError),
    /// A gesture was misused.
    Gesture(GestureError),
    /// Configuration could not be loaded or is invalid.
    Config(ConfigError),
    /// The run's cancellation token was tripped.
    Cancelled,
    /// The global log subscriber could not be installed.
    Logging(String),
    Io(std::io::Error),
}

/// Standard result type for uimonkey APIs.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Error type label for logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Finder(_) => "finder",
            Self::Monkey(_) => "monkey",
            Self::Gesture(_) => "gesture",
            Self::Config(_) => "config",
            Self::Cancelled => "cancelled",
            Self::Logging(_) => "logging",
            Self::Io(_) => "io",
        }
    }

    /// Whether this is a cancellation, at any level of wrapping.
    pub fn is_cancellation(&self) -> bool {
        match self {
            Self::Cancelled => true,
            Self::Finder(FinderError::Cancelled) => true,
            Self::Monkey(err) => err.is_cancelled(),
            Self::Gesture(err) => err.is_cancelled(),
            _ => false,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finder(err) => write!(f, "{err}"),
            Self::Monkey(err) => write!(f, "{err}"),
            Self::Gesture(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Cancelled => f.write_str("operation was cancelled"),
            Self::Logging(msg) => write!(f, "logging setup: {msg}"),
            Self::Io(err) => write!(f, "I/O: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Finder(err) => Some(err),
            Self::Monkey(err) => Some(err),
            Self::Gesture(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Cancelled | Self::Logging(_) => None,
        }
    }
}

// ── From conversions ────────────────────────────────────────────────────

impl From<FinderError> for Error {
    fn from(err: FinderError) -> Self {
        match err {
            FinderError::Cancelled => Self::Cancelled,
            other => Self::Finder(other),
        }
    }
}

impl From<MonkeyError> for Error {
    fn from(err: MonkeyError) -> Self {
        if err.is_cancelled() {
            Self::Cancelled
        } else {
            Self::Monkey(err)
        }
    }
}

impl From<GestureError> for Error {
    fn from(err: GestureError) -> Self {
        if err.is_cancelled() {
            Self::Cancelled
        } else {
            Self::Gesture(err)
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<Cancelled> for Error {
    fn from(_: Cancelled) -> Self {
        Self::Cancelled
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
