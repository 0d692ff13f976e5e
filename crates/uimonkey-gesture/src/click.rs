#![forbid(unsafe_code)]

//! Pointer click simulation.
//!
//! # Event order
//!
//! ```text
//! Enter, [Select],
//!   { Down, InitializePotentialDrag, <hold | one frame>, Up, Click, [<interval>] } x click_count
//! Exit
//! ```
//!
//! # Invariants
//!
//! 1. Exactly one `PointerEnter` precedes and one `PointerExit` follows the
//!    presses, whatever `click_count` is.
//! 2. No drag-phase event (`BeginDrag`, `Drag`, `EndDrag`, `Drop`) is ever sent.
//! 3. A zero hold still yields one frame between `Down` and `Up`.
//! 4. The pointer id is released on every exit path, including cancellation.

use web_time::Duration;

use uimonkey_core::driver::Env;
use uimonkey_core::event::EventKind;
use uimonkey_core::scene::{HitResult, NodeId};

use crate::error::GestureError;
use crate::session::PointerSession;

/// Shape of one click gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickParams {
    pub click_count: u32,
    /// Time between `Down` and `Up`. Zero waits one frame.
    pub hold: Duration,
    /// Pause between consecutive presses.
    pub interval: Duration,
}

impl ClickParams {
    pub const fn single() -> Self {
        Self {
            click_count: 1,
            hold: Duration::ZERO,
            interval: Duration::ZERO,
        }
    }

    pub const fn double(interval: Duration) -> Self {
        Self {
            click_count: 2,
            hold: Duration::ZERO,
            interval,
        }
    }

    pub const fn hold(hold: Duration) -> Self {
        Self {
            click_count: 1,
            hold,
            interval: Duration::ZERO,
        }
    }
}

impl Default for ClickParams {
    fn default() -> Self {
        Self::single()
    }
}

/// Click simulator bound to one target and one pointer id.
pub struct PointerClickSimulator<'a> {
    session: PointerSession<'a>,
}

impl<'a> PointerClickSimulator<'a> {
    pub fn new(env: Env<'a>, target: NodeId, hit: Option<&HitResult>) -> Self {
        Self {
            session: PointerSession::new(env, target, hit),
        }
    }

    pub fn pointer_id(&self) -> u32 {
        self.session.pointer_id()
    }

    /// Run the full click sequence.
    ///
    /// Returns `Ok` early when the target disappears between frames.
    pub fn click(&mut self, params: ClickParams) -> Result<(), GestureError> {
        let s = &mut self.session;
        tracing::debug!(
            target: "uimonkey.gesture",
            node = %s.describe_target(),
            pointer_id = s.pointer_id(),
            click_count = params.click_count,
            hold_ms = params.hold.as_millis() as u64,
            "click"
        );
        s.env.driver.check_cancelled()?;

        s.data.pointer_enter = Some(s.target);
        s.send(EventKind::PointerEnter);
        s.send(EventKind::Select);

        for i in 0..params.click_count {
            if !s.target_alive() {
                s.warn_gone("press");
                return Ok(());
            }
            s.data.press_position = s.data.position;
            s.data.pointer_press = Some(s.target);
            s.send(EventKind::PointerDown);
            s.send(EventKind::InitializePotentialDrag);

            if params.hold.is_zero() {
                s.env.next_frame()?;
            } else {
                s.env.sleep(params.hold)?;
            }
            if !s.target_alive() {
                s.warn_gone("release");
                return Ok(());
            }

            s.data.click_count = i + 1;
            s.send(EventKind::PointerUp);
            s.send(EventKind::PointerClick);
            s.data.pointer_press = None;

            if i + 1 < params.click_count {
                s.env.sleep(params.interval)?;
            }
        }

        if !s.target_alive() {
            s.warn_gone("exit");
            return Ok(());
        }
        s.send(EventKind::PointerExit);
        s.data.pointer_enter = None;
        Ok(())
    }
}

/// One-shot click: construct, run, release.
pub fn pointer_click(
    env: Env<'_>,
    target: NodeId,
    hit: Option<&HitResult>,
    params: ClickParams,
) -> Result<(), GestureError> {
    PointerClickSimulator::new(env, target, hit).click(params)
}
