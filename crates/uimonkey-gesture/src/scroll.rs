#![forbid(unsafe_code)]

//! Scroll wheel simulation.
//!
//! ```text
//! Enter, { Scroll(step), <frame> }*, Exit
//! ```
//!
//! The destination is a total scroll delta. Each frame sends a delta of at
//! most `speed * frame_delta` along it and decrements the remaining distance
//! by the full per-frame allowance, so the last frame may be shorter.

use rand::Rng;
use uimonkey_core::driver::Env;
use uimonkey_core::event::EventKind;
use uimonkey_core::geometry::Vec2;
use uimonkey_core::scene::{HitResult, NodeId, Scene};

use crate::error::GestureError;
use crate::session::PointerSession;

/// Extent used for random destinations when the target has no bounds.
pub const FALLBACK_SCROLL_EXTENT: f32 = 200.0;

/// Scroll-wheel simulator bound to one target and one pointer id.
pub struct PointerScrollSimulator<'a> {
    session: PointerSession<'a>,
}

impl<'a> PointerScrollSimulator<'a> {
    pub fn new(env: Env<'a>, target: NodeId, hit: Option<&HitResult>) -> Self {
        Self {
            session: PointerSession::new(env, target, hit),
        }
    }

    pub fn pointer_id(&self) -> u32 {
        self.session.pointer_id()
    }

    /// Scroll by `destination` in total at `speed` units per second.
    ///
    /// Returns the total delta actually sent.
    pub fn scroll(&mut self, destination: Vec2, speed: f32) -> Result<Vec2, GestureError> {
        let s = &mut self.session;
        s.env.driver.check_cancelled()?;
        tracing::debug!(
            target: "uimonkey.gesture",
            node = %s.describe_target(),
            pointer_id = s.pointer_id(),
            dx = destination.x,
            dy = destination.y,
            speed,
            "scroll"
        );
        let direction = destination.normalized();
        let mut remaining = destination.length();
        let mut sent = Vec2::ZERO;

        s.data.pointer_enter = Some(s.target);
        s.send(EventKind::PointerEnter);
        while remaining > 0.0 {
            if !s.target_alive() {
                s.warn_gone("scroll");
                return Ok(sent);
            }
            let allowance = speed * s.env.driver.frame_delta().as_secs_f32();
            let step = if allowance > 0.0 { allowance.min(remaining) } else { remaining };
            s.data.scroll_delta = direction * step;
            s.send(EventKind::Scroll);
            sent += s.data.scroll_delta;
            remaining -= if allowance > 0.0 { allowance } else { remaining };
            s.env.next_frame()?;
        }
        s.data.scroll_delta = Vec2::ZERO;
        if !s.target_alive() {
            s.warn_gone("exit");
            return Ok(sent);
        }
        s.send(EventKind::PointerExit);
        s.data.pointer_enter = None;
        Ok(sent)
    }
}

/// A scroll delta drawn uniformly within the target's extent on each axis.
pub fn random_scroll_destination<R: Rng + ?Sized>(
    scene: &dyn Scene,
    target: NodeId,
    rng: &mut R,
) -> Vec2 {
    let (w, h) = scene
        .bounds(target)
        .filter(|b| !b.is_empty())
        .map_or((FALLBACK_SCROLL_EXTENT, FALLBACK_SCROLL_EXTENT), |b| {
            (b.width, b.height)
        });
    Vec2::new(rng.random_range(-w..=w), rng.random_range(-h..=h))
}

/// One-shot scroll: construct, run, release.
pub fn scroll_wheel(
    env: Env<'_>,
    target: NodeId,
    hit: Option<&HitResult>,
    destination: Vec2,
    speed: f32,
) -> Result<Vec2, GestureError> {
    PointerScrollSimulator::new(env, target, hit).scroll(destination, speed)
}
