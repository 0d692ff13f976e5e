#![forbid(unsafe_code)]

//! Frame clocks backing the cooperative scheduler.
//!
//! A [`Clock`] reports logical time and advances by one frame on request.
//! [`ManualClock`] is fully deterministic; [`SystemClock`] paces frames on the
//! wall clock and wakes early when the run is cancelled.

use web_time::{Duration, Instant};

use crate::cancellation::CancellationToken;

/// 60 frames per second.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_nanos(16_666_667);

/// Time source for one run.
pub trait Clock {
    /// Time elapsed since the clock started.
    fn now(&self) -> Duration;

    /// Length of the most recent frame.
    fn frame_delta(&self) -> Duration;

    /// Advance to the next frame, returning its delta.
    ///
    /// Implementations that wait must return promptly once `cancel` trips.
    fn advance_frame(&mut self, cancel: &CancellationToken) -> Duration;
}

/// Logical clock advancing a fixed delta per frame.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Duration,
    frame: Duration,
}

impl ManualClock {
    pub fn new(frame: Duration) -> Self {
        Self {
            now: Duration::ZERO,
            frame,
        }
    }

    /// Jump forward without producing frames.
    pub fn skip(&mut self, by: Duration) {
        self.now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn frame_delta(&self) -> Duration {
        self.frame
    }

    fn advance_frame(&mut self, _cancel: &CancellationToken) -> Duration {
        self.now += self.frame;
        self.frame
    }
}

/// Wall-clock pacing at a target frame interval.
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
    last_frame: Duration,
    interval: Duration,
    delta: Duration,
}

impl SystemClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            start: Instant::now(),
            last_frame: Duration::ZERO,
            interval,
            delta: interval,
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn frame_delta(&self) -> Duration {
        self.delta
    }

    fn advance_frame(&mut self, cancel: &CancellationToken) -> Duration {
        let target = self.last_frame + self.interval;
        let now = self.now();
        if target > now {
            cancel.wait_timeout(target - now);
        }
        let now = self.now();
        self.delta = now.saturating_sub(self.last_frame);
        self.last_frame = now;
        self.delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancellation::CancellationSource;

    #[test]
    fn manual_clock_advances_by_fixed_frames() {
        let mut clock = ManualClock::new(Duration::from_millis(10));
        let token = CancellationToken::never();
        assert_eq!(clock.now(), Duration::ZERO);
        clock.advance_frame(&token);
        clock.advance_frame(&token);
        assert_eq!(clock.now(), Duration::from_millis(20));
        clock.skip(Duration::from_millis(5));
        assert_eq!(clock.now(), Duration::from_millis(25));
    }

    #[test]
    fn system_clock_paces_frames() {
        let mut clock = SystemClock::new(Duration::from_millis(5));
        let token = CancellationToken::never();
        let before = clock.now();
        clock.advance_frame(&token);
        clock.advance_frame(&token);
        assert!(clock.now() - before >= Duration::from_millis(9));
    }

    #[test]
    fn system_clock_returns_early_when_cancelled() {
        let mut clock = SystemClock::new(Duration::from_secs(30));
        let source = CancellationSource::new();
        source.cancel();
        let start = Instant::now();
        clock.advance_frame(&source.token());
        assert!(start.elapsed() < Duration::from_secs(5));
    }
}
