#![forbid(unsafe_code)]

//! Failures raised by node search and the monkey loop.

use std::fmt;

use thiserror::Error;
use uimonkey_core::Cancelled;
use uimonkey_gesture::GestureError;
use web_time::Duration;

/// Why the last search attempt did not produce exactly one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    /// Nothing matched.
    NotFound,
    /// Matches exist but every one is occluded or off screen.
    NotReachable,
    /// Matches are reachable but none can be operated.
    NotInteractable,
    /// More than one node survived every filter.
    MultipleMatching,
}

impl Reason {
    /// Whether `self` says more about the failure than `other`.
    ///
    /// `NotFound` is the least informative reason and yields to the rest.
    pub fn outranks(self, other: Reason) -> bool {
        other == Reason::NotFound || self != Reason::NotFound
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotFound => "no node matched",
            Self::NotReachable => "matched but not reachable",
            Self::NotInteractable => "matched but not interactable",
            Self::MultipleMatching => "multiple nodes matched",
        })
    }
}

pub type FinderResult<T> = std::result::Result<T, FinderError>;

#[derive(Debug, Error)]
pub enum FinderError {
    #[error("timed out after {elapsed:?} looking for {query}: {reason}")]
    TimedOut {
        query: String,
        reason: Reason,
        elapsed: Duration,
    },

    #[error("{count} nodes match {query}")]
    MultipleMatching { query: String, count: usize },

    #[error("operation was cancelled")]
    Cancelled,
}

impl FinderError {
    /// The failure reason, when the search ran to completion.
    #[must_use]
    pub fn reason(&self) -> Option<Reason> {
        match self {
            Self::TimedOut { reason, .. } => Some(*reason),
            Self::MultipleMatching { .. } => Some(Reason::MultipleMatching),
            Self::Cancelled => None,
        }
    }
}

impl From<Cancelled> for FinderError {
    fn from(_: Cancelled) -> Self {
        Self::Cancelled
    }
}

#[derive(Debug, Error)]
pub enum MonkeyError {
    /// The selection history repeats with some period.
    #[error("infinite loop detected in selection history {window:?}")]
    InfiniteLoop { window: Vec<usize> },

    #[error("no interactive component found for {elapsed:?}")]
    NoInteractiveComponent { elapsed: Duration },

    #[error("screenshot failed: {0}")]
    Screenshot(#[source] std::io::Error),

    #[error("gesture failed: {0}")]
    Gesture(#[source] GestureError),

    #[error("operation was cancelled")]
    Cancelled,
}

impl MonkeyError {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<Cancelled> for MonkeyError {
    fn from(_: Cancelled) -> Self {
        Self::Cancelled
    }
}

impl From<GestureError> for MonkeyError {
    fn from(err: GestureError) -> Self {
        if err.is_cancelled() {
            Self::Cancelled
        } else {
            Self::Gesture(err)
        }
    }
}
