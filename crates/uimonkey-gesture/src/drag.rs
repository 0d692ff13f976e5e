#![forbid(unsafe_code)]

//! Two-phase pointer drag simulation.
//!
//! ```text
//! begin_drag: Enter, [Select], Down, InitializePotentialDrag, BeginDrag
//! drag:       { move one step, Exit/Enter on hover change, Drag, <frame> }*
//! end_drag:   Up, [Drop on whatever is hit], EndDrag, Exit (last entered)
//! ```
//!
//! # Invariants
//!
//! 1. `begin_drag` twice without `end_drag` is [`GestureError::AlreadyDragging`].
//! 2. Each `drag` frame moves at most `speed * frame_delta` toward the
//!    destination; the final frame lands on it exactly.
//! 3. `Drop` is sent at most once per drag, to the handler that owns the node
//!    hit at the release point. Nothing hit means no `Drop`, but `EndDrag`
//!    is still sent.
//! 4. Dropping a simulator that is still dragging logs a warning and runs
//!    `end_drag` before the pointer id is released.

use uimonkey_core::driver::Env;
use uimonkey_core::event::EventKind;
use uimonkey_core::geometry::Vec2;
use uimonkey_core::scene::{HitResult, NodeId, Scene, event_handler, is_self_or_descendant};

use crate::error::GestureError;
use crate::session::PointerSession;

/// Drag simulator bound to one target and one pointer id.
pub struct PointerDragSimulator<'a> {
    session: PointerSession<'a>,
    dragging: bool,
}

impl<'a> PointerDragSimulator<'a> {
    pub fn new(env: Env<'a>, target: NodeId, hit: Option<&HitResult>) -> Self {
        Self {
            session: PointerSession::new(env, target, hit),
            dragging: false,
        }
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn pointer_id(&self) -> u32 {
        self.session.pointer_id()
    }

    /// Current pointer position.
    pub fn position(&self) -> Vec2 {
        self.session.data.position
    }

    pub fn begin_drag(&mut self) -> Result<(), GestureError> {
        if self.dragging {
            return Err(GestureError::AlreadyDragging);
        }
        let s = &mut self.session;
        s.env.driver.check_cancelled()?;
        tracing::debug!(
            target: "uimonkey.gesture",
            node = %s.describe_target(),
            pointer_id = s.pointer_id(),
            x = s.data.position.x,
            y = s.data.position.y,
            "begin drag"
        );
        let hovered = s
            .data
            .current_hit
            .map(|h| h.node)
            .filter(|&node| is_self_or_descendant(&*s.env.scene, node, s.target));
        s.data.pointer_enter = Some(hovered.unwrap_or(s.target));
        s.send(EventKind::PointerEnter);
        s.send(EventKind::Select);
        s.data.press_position = s.data.position;
        s.data.pointer_press = Some(s.target);
        s.send(EventKind::PointerDown);
        s.send(EventKind::InitializePotentialDrag);
        s.data.dragging = true;
        s.data.pointer_drag = Some(s.target);
        s.send(EventKind::BeginDrag);
        self.dragging = true;
        Ok(())
    }

    /// Move toward `destination` at `speed` units per second, one step per frame.
    ///
    /// A non-positive speed jumps straight to the destination. Returns `Ok`
    /// early, still dragging, when the target disappears between frames.
    pub fn drag(&mut self, destination: Vec2, speed: f32) -> Result<(), GestureError> {
        if !self.dragging {
            return Err(GestureError::NotDragging);
        }
        let s = &mut self.session;
        loop {
            let step = speed * s.env.driver.frame_delta().as_secs_f32();
            let next = if step > 0.0 {
                s.data.position.move_towards(destination, step)
            } else {
                destination
            };
            s.data.delta = next - s.data.position;
            s.data.position = next;
            update_hover(s);
            s.send(EventKind::Drag);
            if next == destination {
                return Ok(());
            }
            s.env.next_frame()?;
            if !s.target_alive() {
                s.warn_gone("drag");
                return Ok(());
            }
        }
    }

    /// Release the pointer and deliver `Drop` to whatever is under it.
    ///
    /// Returns the node that received `Drop`, if any.
    pub fn end_drag(&mut self) -> Result<Option<NodeId>, GestureError> {
        if !self.dragging {
            return Err(GestureError::NotDragging);
        }
        self.dragging = false;
        let s = &mut self.session;
        s.send(EventKind::PointerUp);
        let hit = s.top_hit();
        s.data.current_hit = hit;
        let dropped = hit.and_then(|h| s.bubble(h.node, EventKind::Drop));
        s.send(EventKind::EndDrag);
        s.data.dragging = false;
        s.data.pointer_drag = None;
        s.data.pointer_press = None;
        if let Some(entered) = s.data.pointer_enter.take() {
            s.bubble(entered, EventKind::PointerExit);
        }
        tracing::debug!(
            target: "uimonkey.gesture",
            pointer_id = s.pointer_id(),
            x = s.data.position.x,
            y = s.data.position.y,
            dropped_on = ?dropped,
            "end drag"
        );
        Ok(dropped)
    }
}

/// The node that answers hover events for `node`: its nearest `Enter`
/// handler, or the node itself when nothing up the chain handles them.
fn hover_receiver(scene: &dyn Scene, node: Option<NodeId>) -> Option<NodeId> {
    node.map(|n| event_handler(scene, n, EventKind::PointerEnter).unwrap_or(n))
}

/// Send `Exit`/`Enter` when the hover receiver under the pointer changes.
///
/// Moving between a handler and its own children is not a transition.
fn update_hover(s: &mut PointerSession<'_>) {
    let hit = s.top_hit();
    s.data.current_hit = hit;
    let now_over = hit.map(|h| h.node);
    let scene = &*s.env.scene;
    if hover_receiver(scene, now_over) == hover_receiver(scene, s.data.pointer_enter) {
        s.data.pointer_enter = now_over.or(s.data.pointer_enter);
        return;
    }
    if let Some(previous) = s.data.pointer_enter {
        s.bubble(previous, EventKind::PointerExit);
    }
    s.data.pointer_enter = now_over;
    if let Some(node) = now_over {
        s.bubble(node, EventKind::PointerEnter);
    }
}

impl Drop for PointerDragSimulator<'_> {
    fn drop(&mut self) {
        if self.dragging {
            tracing::warn!(
                target: "uimonkey.gesture",
                pointer_id = self.session.pointer_id(),
                "drag simulator dropped mid-drag; forcing end_drag"
            );
            if let Err(err) = self.end_drag() {
                tracing::warn!(
                    target: "uimonkey.gesture",
                    pointer_id = self.session.pointer_id(),
                    error = %err,
                    "forced end_drag failed"
                );
            }
        }
    }
}

/// Full drag from the target to `destination`.
///
/// Returns the node that received `Drop`, if any.
pub fn drag_and_drop(
    env: Env<'_>,
    target: NodeId,
    hit: Option<&HitResult>,
    destination: Vec2,
    speed: f32,
) -> Result<Option<NodeId>, GestureError> {
    let mut sim = PointerDragSimulator::new(env, target, hit);
    sim.begin_drag()?;
    sim.drag(destination, speed)?;
    sim.end_drag()
}
