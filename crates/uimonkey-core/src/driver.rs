#![forbid(unsafe_code)]

//! The run context: clock, cancellation, pointer ids and randomness.
//!
//! Everything the monkey does runs on one logical thread. Control is yielded
//! only through [`Driver::next_frame`] and [`Driver::sleep`]; those are the
//! suspension points where cancellation is observed, the clock advances and
//! the host scene gets its frame update. Callers must re-check node liveness
//! after every suspension point, since the scene may have changed.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use web_time::Duration;

use crate::cancellation::{Cancelled, CancellationToken};
use crate::clock::{Clock, ManualClock};
use crate::pointer::PointerIdPool;
use crate::scene::Scene;

/// Owner of the per-run scheduling resources.
pub struct Driver {
    clock: Box<dyn Clock>,
    cancel: CancellationToken,
    pointers: PointerIdPool,
    rng: SmallRng,
    frames: u64,
}

impl Driver {
    pub fn new(clock: Box<dyn Clock>, cancel: CancellationToken) -> Self {
        Self {
            clock,
            cancel,
            pointers: PointerIdPool::new(),
            rng: SmallRng::from_os_rng(),
            frames: 0,
        }
    }

    /// Deterministic driver on a [`ManualClock`] with a fixed seed.
    pub fn manual(seed: u64) -> Self {
        Self::new(Box::new(ManualClock::default()), CancellationToken::never()).with_seed(seed)
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn with_pointer_pool(mut self, pool: PointerIdPool) -> Self {
        self.pointers = pool;
        self
    }

    #[inline]
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    #[inline]
    pub fn frame_delta(&self) -> Duration {
        self.clock.frame_delta()
    }

    /// Frames yielded so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    #[inline]
    pub fn check_cancelled(&self) -> Result<(), Cancelled> {
        self.cancel.check()
    }

    pub fn pointers(&self) -> &PointerIdPool {
        &self.pointers
    }

    pub fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }

    /// Yield for one frame.
    pub fn next_frame(&mut self, scene: &mut dyn Scene) -> Result<(), Cancelled> {
        self.cancel.check()?;
        let delta = self.clock.advance_frame(&self.cancel);
        self.frames += 1;
        scene.on_frame(self.clock.now(), delta);
        self.cancel.check()
    }

    /// Yield frames until at least `duration` has passed; always yields once.
    pub fn sleep(&mut self, scene: &mut dyn Scene, duration: Duration) -> Result<(), Cancelled> {
        let until = self.now() + duration;
        loop {
            self.next_frame(scene)?;
            if self.now() >= until {
                return Ok(());
            }
        }
    }
}

impl std::fmt::Debug for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver")
            .field("now", &self.now())
            .field("frames", &self.frames)
            .field("pointers", &self.pointers)
            .finish()
    }
}

/// A scene together with the driver that schedules work against it.
///
/// Simulators and operators take an `Env` by value; use
/// [`reborrow`](Env::reborrow) to hand a shorter-lived copy down.
pub struct Env<'a> {
    pub scene: &'a mut dyn Scene,
    pub driver: &'a mut Driver,
}

impl<'a> Env<'a> {
    pub fn new(scene: &'a mut dyn Scene, driver: &'a mut Driver) -> Self {
        Self { scene, driver }
    }

    pub fn reborrow(&mut self) -> Env<'_> {
        Env {
            scene: &mut *self.scene,
            driver: &mut *self.driver,
        }
    }

    #[inline]
    pub fn now(&self) -> Duration {
        self.driver.now()
    }

    pub fn next_frame(&mut self) -> Result<(), Cancelled> {
        self.driver.next_frame(&mut *self.scene)
    }

    pub fn sleep(&mut self, duration: Duration) -> Result<(), Cancelled> {
        self.driver.sleep(&mut *self.scene, duration)
    }
}
