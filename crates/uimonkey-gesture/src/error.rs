#![forbid(unsafe_code)]

//! Gesture failures.
//!
//! A target disappearing mid-gesture is not an error; simulators log it and
//! unwind. What remains is API misuse of the drag state machine and
//! cancellation.

use std::fmt;

use uimonkey_core::Cancelled;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureError {
    /// `begin_drag` on a simulator that is already dragging.
    AlreadyDragging,
    /// `drag` or `end_drag` without a preceding `begin_drag`.
    NotDragging,
    /// The run was cancelled at a suspension point.
    Cancelled,
}

impl GestureError {
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl fmt::Display for GestureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyDragging => write!(f, "drag already in progress"),
            Self::NotDragging => write!(f, "no drag in progress"),
            Self::Cancelled => write!(f, "operation was cancelled"),
        }
    }
}

impl std::error::Error for GestureError {}

impl From<Cancelled> for GestureError {
    fn from(_: Cancelled) -> Self {
        Self::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_converts() {
        let err: GestureError = Cancelled.into();
        assert!(err.is_cancelled());
        assert_eq!(err.to_string(), "operation was cancelled");
    }

    #[test]
    fn misuse_messages() {
        assert_eq!(GestureError::AlreadyDragging.to_string(), "drag already in progress");
        assert!(!GestureError::NotDragging.is_cancelled());
    }
}
