#![forbid(unsafe_code)]

//! Whether a node is the topmost thing under its own screen point.
//!
//! A node is reachable when the nearest hit at its resolved screen point is
//! the node itself or one of its descendants. The raw top hit is returned
//! either way so callers can report what occludes an unreachable node.

use uimonkey_core::geometry::Vec2;
use uimonkey_core::scene::{HitResult, NodeId, Scene, is_self_or_descendant};

/// Resolves the screen point used for a reachability hit test.
pub type ScreenPointResolver = Box<dyn Fn(&dyn Scene, NodeId) -> Option<Vec2>>;

/// Outcome of one reachability check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reachability {
    pub reachable: bool,
    /// Topmost hit at the node's screen point, reachable or not.
    pub hit: Option<HitResult>,
}

impl Reachability {
    pub const UNREACHABLE: Reachability = Reachability {
        reachable: false,
        hit: None,
    };
}

pub trait ReachabilityStrategy {
    fn is_reachable(&mut self, scene: &dyn Scene, node: NodeId) -> Reachability;
}

/// Topmost-hit reachability over a reused hit buffer.
pub struct TopmostHit {
    resolver: ScreenPointResolver,
    hits: Vec<HitResult>,
}

impl TopmostHit {
    pub fn new() -> Self {
        Self::with_resolver(Box::new(|scene: &dyn Scene, node| scene.screen_point(node)))
    }

    pub fn with_resolver(resolver: ScreenPointResolver) -> Self {
        Self {
            resolver,
            hits: Vec::with_capacity(16),
        }
    }
}

impl Default for TopmostHit {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TopmostHit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopmostHit")
            .field("hit_buffer_capacity", &self.hits.capacity())
            .finish()
    }
}

impl ReachabilityStrategy for TopmostHit {
    fn is_reachable(&mut self, scene: &dyn Scene, node: NodeId) -> Reachability {
        let Some(point) = (self.resolver)(scene, node) else {
            return Reachability::UNREACHABLE;
        };
        scene.hit_test(point, &mut self.hits);
        let hit = self.hits.first().copied();
        let reachable = hit.is_some_and(|h| is_self_or_descendant(scene, h.node, node));
        Reachability { reachable, hit }
    }
}

/// Every node is reachable; the hit is synthesized at its screen point.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysReachable;

impl ReachabilityStrategy for AlwaysReachable {
    fn is_reachable(&mut self, scene: &dyn Scene, node: NodeId) -> Reachability {
        Reachability {
            reachable: true,
            hit: scene.screen_point(node).map(|p| HitResult {
                node,
                screen_position: p,
                depth: 0,
            }),
        }
    }
}
