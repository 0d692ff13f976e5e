#![forbid(unsafe_code)]

//! Global `tracing` subscriber setup.
//!
//! Filtering honors `RUST_LOG`; without it, `uimonkey=info` is used. Output
//! format comes from the caller or from `UIMONKEY_LOG_FORMAT` (`text` or
//! `json`).
//!
//! ```rust,no_run
//! uimonkey::init_logging(uimonkey::LogFormat::Json)?;
//! tracing::info!(target: "uimonkey.monkey", "ready");
//! # Ok::<(), uimonkey::Error>(())
//! ```

use std::str::FromStr;

use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "uimonkey=info";

/// Environment variable read by [`LogFormat::from_env`].
pub const LOG_FORMAT_ENV: &str = "UIMONKEY_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single-line records.
    #[default]
    Text,
    /// One JSON object per record.
    Json,
}

impl LogFormat {
    /// Format from [`LOG_FORMAT_ENV`], [`LogFormat::Text`] when unset or unknown.
    pub fn from_env() -> Self {
        std::env::var(LOG_FORMAT_ENV)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Fails if one is already set.
pub fn init_logging(format: LogFormat) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(true);
    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| Error::Logging(e.to_string()))?;
    tracing::debug!(target: "uimonkey.logging", format = ?format, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_formats() {
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!(" JSON ".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("text".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert_eq!("pretty".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::default(), LogFormat::Text);
    }

    #[test]
    fn second_install_is_reported() {
        // Whichever call wins, the other must fail instead of panicking.
        let first = init_logging(LogFormat::Text);
        let second = init_logging(LogFormat::Json);
        assert!(first.is_err() || second.is_err());
        if let Err(err) = second {
            assert_eq!(err.error_type(), "logging");
        }
    }
}
