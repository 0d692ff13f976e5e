// SPDX-License-Identifier: Apache-2.0
//! Cooperative cancellation for monkey runs, searches and gestures.
//!
//! [`CancellationSource`] is held by whoever may stop a run; every
//! [`CancellationToken`] derived from it is polled at each suspension point.
//! A tripped token surfaces as [`Cancelled`], which callers propagate with `?`
//! so that in-flight gestures unwind and release their pointer ids.
//!
//! # Example
//!
//! ```
//! use uimonkey_core::cancellation::CancellationSource;
//! use std::time::Duration;
//!
//! let source = CancellationSource::new();
//! let token = source.token();
//! assert!(token.check().is_ok());
//!
//! source.cancel();
//! assert!(token.check().is_err());
//! assert!(token.wait_timeout(Duration::from_secs(10)));
//! ```

#![forbid(unsafe_code)]

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use web_time::Duration;

/// The operation was cancelled through its [`CancellationToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operation was cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// A cloneable view of a cancellation request.
#[derive(Clone)]
pub struct CancellationToken {
    inner: Arc<CancellationInner>,
}

/// The control handle that triggers cancellation.
///
/// Dropping the source does **not** cancel the token.
pub struct CancellationSource {
    inner: Arc<CancellationInner>,
}

struct CancellationInner {
    cancelled: AtomicBool,
    notify: (Mutex<()>, Condvar),
}

impl CancellationInner {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            cancelled: AtomicBool::new(false),
            notify: (Mutex::new(()), Condvar::new()),
        })
    }
}

impl CancellationSource {
    pub fn new() -> Self {
        Self {
            inner: CancellationInner::new(),
        }
    }

    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Signal cancellation and wake any pending [`CancellationToken::wait_timeout`].
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
        let (lock, cvar) = &self.inner.notify;
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        cvar.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }
}

impl Default for CancellationSource {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancellationToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

impl CancellationToken {
    /// A token with no source; it never trips.
    pub fn never() -> Self {
        Self {
            inner: CancellationInner::new(),
        }
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// `Err(Cancelled)` once cancellation has been requested.
    #[inline]
    pub fn check(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }

    /// Block until either cancellation is requested or the timeout elapses.
    ///
    /// Returns `true` if cancelled, `false` if timed out.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        if self.is_cancelled() {
            return true;
        }
        let (lock, cvar) = &self.inner.notify;
        let mut guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        let start = web_time::Instant::now();
        let mut remaining = duration;
        loop {
            if self.is_cancelled() {
                return true;
            }
            let (new_guard, result) = cvar
                .wait_timeout(guard, remaining)
                .unwrap_or_else(|e| e.into_inner());
            guard = new_guard;
            if self.is_cancelled() {
                return true;
            }
            if result.timed_out() {
                return false;
            }
            let elapsed = start.elapsed();
            if elapsed >= duration {
                return false;
            }
            remaining = duration - elapsed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn token_starts_uncancelled() {
        let source = CancellationSource::new();
        let token = source.token();
        assert!(!token.is_cancelled());
        assert_eq!(token.check(), Ok(()));
    }

    #[test]
    fn cancel_propagates_to_all_clones() {
        let source = CancellationSource::new();
        let t1 = source.token();
        let t2 = t1.clone();
        source.cancel();
        assert_eq!(t1.check(), Err(Cancelled));
        assert!(t2.is_cancelled());
        assert!(source.is_cancelled());
    }

    #[test]
    fn drop_source_does_not_cancel() {
        let source = CancellationSource::new();
        let token = source.token();
        drop(source);
        assert!(!token.is_cancelled());
    }

    #[test]
    fn never_token_never_trips() {
        let token = CancellationToken::never();
        assert!(!token.wait_timeout(Duration::from_millis(5)));
    }

    #[test]
    fn wait_timeout_wakes_on_cancel() {
        let source = CancellationSource::new();
        let token = source.token();
        let handle = thread::spawn(move || token.wait_timeout(Duration::from_secs(10)));
        thread::sleep(Duration::from_millis(20));
        source.cancel();
        assert!(handle.join().unwrap());
    }

    #[test]
    fn cancelled_displays_stable_message() {
        assert_eq!(Cancelled.to_string(), "operation was cancelled");
    }
}
