#![forbid(unsafe_code)]

//! State shared by every pointer simulator: the environment, the target, the
//! pointer record threaded through the gesture, and the pointer-id lease.

use uimonkey_core::driver::Env;
use uimonkey_core::event::{EventKind, PointerEventData};
use uimonkey_core::geometry::Vec2;
use uimonkey_core::pointer::PointerLease;
use uimonkey_core::scene::{
    HitResult, NodeId, Scene, describe_node, execute, execute_hierarchy, is_active_in_hierarchy,
};

/// Where a gesture on `target` starts: the hit position if one was resolved,
/// else the node's own screen point.
pub fn start_position(scene: &dyn Scene, target: NodeId, hit: Option<&HitResult>) -> Vec2 {
    hit.map(|h| h.screen_position)
        .or_else(|| scene.screen_point(target))
        .unwrap_or_default()
}

pub(crate) struct PointerSession<'a> {
    pub(crate) env: Env<'a>,
    pub(crate) target: NodeId,
    pub(crate) data: PointerEventData,
    lease: PointerLease,
}

impl<'a> PointerSession<'a> {
    pub(crate) fn new(env: Env<'a>, target: NodeId, hit: Option<&HitResult>) -> Self {
        let lease = env.driver.pointers().acquire();
        let position = start_position(&*env.scene, target, hit);
        let mut data = PointerEventData::new(lease.id(), position);
        data.current_hit = hit.copied();
        Self {
            env,
            target,
            data,
            lease,
        }
    }

    #[inline]
    pub(crate) fn pointer_id(&self) -> u32 {
        self.lease.id()
    }

    /// Deliver `kind` to the target if it handles it.
    pub(crate) fn send(&mut self, kind: EventKind) -> bool {
        self.send_to(self.target, kind)
    }

    pub(crate) fn send_to(&mut self, node: NodeId, kind: EventKind) -> bool {
        let delivered = execute(&mut *self.env.scene, node, kind, &self.data);
        if delivered {
            tracing::trace!(
                target: "uimonkey.gesture",
                pointer_id = self.data.pointer_id,
                node = %node,
                kind = kind.name(),
                "dispatch"
            );
        }
        delivered
    }

    /// Deliver `kind` to `node` or its nearest ancestor that handles it.
    pub(crate) fn bubble(&mut self, node: NodeId, kind: EventKind) -> Option<NodeId> {
        let receiver = execute_hierarchy(&mut *self.env.scene, node, kind, &self.data);
        if let Some(r) = receiver {
            tracing::trace!(
                target: "uimonkey.gesture",
                pointer_id = self.data.pointer_id,
                node = %r,
                kind = kind.name(),
                "dispatch"
            );
        }
        receiver
    }

    pub(crate) fn target_alive(&self) -> bool {
        is_active_in_hierarchy(&*self.env.scene, self.target)
    }

    /// Log that the target vanished during `phase`.
    pub(crate) fn warn_gone(&self, phase: &'static str) {
        tracing::warn!(
            target: "uimonkey.gesture",
            node = %self.target,
            pointer_id = self.data.pointer_id,
            phase,
            "target destroyed or deactivated mid-gesture"
        );
    }

    /// Topmost hit at the current pointer position.
    pub(crate) fn top_hit(&self) -> Option<HitResult> {
        let mut hits = Vec::new();
        self.env.scene.hit_test(self.data.position, &mut hits);
        hits.first().copied()
    }

    pub(crate) fn describe_target(&self) -> String {
        describe_node(&*self.env.scene, self.target)
    }
}
