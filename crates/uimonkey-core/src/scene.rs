#![forbid(unsafe_code)]

//! The scene-graph boundary.
//!
//! The host engine owns the tree, rendering and hit testing. [`Scene`] is the
//! narrow surface the monkey calls into; everything else in this module is a
//! helper expressed purely in terms of that trait.
//!
//! # Invariants
//!
//! - A [`NodeId`] is never reused for a different node. After destruction
//!   [`Scene::is_alive`] reports `false` forever, and every query on the id
//!   returns an empty answer rather than panicking.
//! - [`Scene::hit_test`] fills hits nearest-to-viewer first.

use std::fmt;
use std::time::Duration;

use crate::capability::{Annotation, Capability, Control, Facet, ScrollAxes};
use crate::event::{EventKind, PointerEventData};
use crate::geometry::{Rect, Vec2};

/// Stable identity of a node in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One entry of a hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    pub node: NodeId,
    pub screen_position: Vec2,
    /// Rendering depth; larger is nearer to the viewer.
    pub depth: i32,
}

/// Host scene graph as seen by the monkey.
pub trait Scene {
    /// Roots of every loaded sub-tree, including the persistent cross-scene root.
    fn roots(&self) -> Vec<NodeId>;

    fn is_alive(&self, node: NodeId) -> bool;

    fn name(&self, node: NodeId) -> Option<&str>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// The node's own active flag, ignoring ancestors.
    fn is_active_self(&self, node: NodeId) -> bool;

    fn capabilities(&self, node: NodeId) -> &[Capability];

    /// Resolved screen point of the node, usually the center of its bounds.
    fn screen_point(&self, node: NodeId) -> Option<Vec2>;

    fn bounds(&self, node: NodeId) -> Option<Rect>;

    fn screen_size(&self) -> Vec2;

    /// Hit test at `point`, appending results nearest-first into `hits`.
    ///
    /// `hits` is cleared by the implementation before filling.
    fn hit_test(&self, point: Vec2, hits: &mut Vec<HitResult>);

    /// Deliver `kind` to exactly `node`. Returns whether a handler ran.
    fn dispatch(&mut self, node: NodeId, kind: EventKind, data: &PointerEventData) -> bool;

    fn toggle_state(&self, _node: NodeId) -> Option<bool> {
        None
    }

    fn set_toggle_state(&mut self, _node: NodeId, _on: bool) {}

    fn text(&self, _node: NodeId) -> Option<&str> {
        None
    }

    fn set_text(&mut self, _node: NodeId, _text: &str) {}

    /// Normalized scroll position of a scroll container (0 = start, 1 = end).
    fn scroll_position(&self, _node: NodeId) -> Option<Vec2> {
        None
    }

    fn set_scroll_position(&mut self, _node: NodeId, _position: Vec2) {}

    /// Host frame update, called once per scheduling tick.
    fn on_frame(&mut self, _now: Duration, _delta: Duration) {}
}

/// Whether the node and every ancestor are active.
pub fn is_active_in_hierarchy(scene: &dyn Scene, node: NodeId) -> bool {
    if !scene.is_alive(node) {
        return false;
    }
    let mut current = Some(node);
    while let Some(id) = current {
        if !scene.is_active_self(id) {
            return false;
        }
        current = scene.parent(id);
    }
    true
}

/// `/`-separated path from the root, e.g. `/Canvas/Panel/Button`.
pub fn hierarchy_path(scene: &dyn Scene, node: NodeId) -> String {
    let mut names = Vec::new();
    let mut current = Some(node);
    while let Some(id) = current {
        names.push(scene.name(id).unwrap_or_default());
        current = scene.parent(id);
    }
    let mut path = String::new();
    for name in names.iter().rev() {
        path.push('/');
        path.push_str(name);
    }
    path
}

/// Depth-first walk over every active node of every root.
///
/// An inactive node is skipped together with its whole subtree. Children are
/// read lazily when their parent is visited, so a walk interleaved with scene
/// mutation never sees a node detached before it was reached.
pub fn active_nodes(scene: &dyn Scene) -> ActiveNodes<'_> {
    let mut stack = scene.roots();
    stack.reverse();
    ActiveNodes { scene, stack }
}

/// Iterator returned by [`active_nodes`].
pub struct ActiveNodes<'s> {
    scene: &'s dyn Scene,
    stack: Vec<NodeId>,
}

impl Iterator for ActiveNodes<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while let Some(node) = self.stack.pop() {
            if !self.scene.is_alive(node) || !self.scene.is_active_self(node) {
                continue;
            }
            let mut children = self.scene.children(node);
            children.reverse();
            self.stack.extend(children);
            return Some(node);
        }
        None
    }
}

/// Whether `candidate` is `ancestor` itself or lies beneath it.
pub fn is_self_or_descendant(scene: &dyn Scene, candidate: NodeId, ancestor: NodeId) -> bool {
    let mut current = Some(candidate);
    while let Some(id) = current {
        if id == ancestor {
            return true;
        }
        current = scene.parent(id);
    }
    false
}

/// Whether any enabled capability on the node answers to `kind`.
pub fn handles(scene: &dyn Scene, node: NodeId, kind: EventKind) -> bool {
    scene.capabilities(node).iter().any(|c| c.handles(kind))
}

/// First node from `node` up through its ancestors that handles `kind`.
pub fn event_handler(scene: &dyn Scene, node: NodeId, kind: EventKind) -> Option<NodeId> {
    let mut current = Some(node);
    while let Some(id) = current {
        if handles(scene, id, kind) {
            return Some(id);
        }
        current = scene.parent(id);
    }
    None
}

/// Bubble `kind` from `node` to the first ancestor that handles it.
///
/// Returns the node that received the event.
pub fn execute_hierarchy(
    scene: &mut dyn Scene,
    node: NodeId,
    kind: EventKind,
    data: &PointerEventData,
) -> Option<NodeId> {
    let handler = event_handler(&*scene, node, kind)?;
    scene.dispatch(handler, kind, data);
    Some(handler)
}

/// Deliver `kind` to `node` only if it handles it.
pub fn execute(
    scene: &mut dyn Scene,
    node: NodeId,
    kind: EventKind,
    data: &PointerEventData,
) -> bool {
    if handles(&*scene, node, kind) {
        scene.dispatch(node, kind, data)
    } else {
        false
    }
}

/// The first enabled selectable control on the node.
pub fn control_of(scene: &dyn Scene, node: NodeId) -> Option<Control> {
    scene
        .capabilities(node)
        .iter()
        .filter(|c| c.enabled)
        .find_map(Capability::control)
}

/// Scroll axes of the first enabled scroll container on the node.
pub fn scroll_axes_of(scene: &dyn Scene, node: NodeId) -> Option<ScrollAxes> {
    scene
        .capabilities(node)
        .iter()
        .filter(|c| c.enabled)
        .find_map(|c| match c.facet {
            Facet::ScrollView(axes) => Some(axes),
            _ => None,
        })
}

/// Enabled annotations declared on the node.
pub fn annotations_of(scene: &dyn Scene, node: NodeId) -> impl Iterator<Item = &Annotation> {
    scene
        .capabilities(node)
        .iter()
        .filter(|c| c.enabled)
        .filter_map(Capability::annotation_data)
}

/// Display label for logs: name plus id.
pub fn describe_node(scene: &dyn Scene, node: NodeId) -> String {
    match scene.name(node) {
        Some(name) => format!("{name}({node})"),
        None => format!("<destroyed>({node})"),
    }
}
