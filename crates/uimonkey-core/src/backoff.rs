// SPDX-License-Identifier: Apache-2.0
//! Capped exponential backoff for polling searches.
//!
//! Delays use a fixed formula (no jitter) so that runs driven by a
//! [`ManualClock`](crate::clock::ManualClock) reproduce exact timing.
//!
//! # Example
//!
//! ```
//! use uimonkey_core::backoff::Backoff;
//! use std::time::Duration;
//!
//! let backoff = Backoff::new(Duration::from_millis(100), Duration::from_millis(500));
//! assert_eq!(backoff.delay(0), Duration::from_millis(100));
//! assert_eq!(backoff.delay(1), Duration::from_millis(200));
//! assert_eq!(backoff.delay(2), Duration::from_millis(400));
//! assert_eq!(backoff.delay(3), Duration::from_millis(500));
//! ```

#![forbid(unsafe_code)]

use web_time::Duration;

/// `min * 2^attempt`, clamped to `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    pub min: Duration,
    pub max: Duration,
}

impl Backoff {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            min,
            max: max.max(min),
        }
    }

    /// Delay before retry number `attempt` (0-indexed).
    pub fn delay(&self, attempt: u32) -> Duration {
        let multiplier = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.min
            .checked_mul(multiplier)
            .unwrap_or(self.max)
            .min(self.max)
    }

    /// Sum of the first `attempts` delays.
    pub fn total_delay(&self, attempts: u32) -> Duration {
        (0..attempts).map(|i| self.delay(i)).sum()
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(Duration::from_millis(100), Duration::from_secs(1))
    }
}
