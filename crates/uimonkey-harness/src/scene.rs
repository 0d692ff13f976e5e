#![forbid(unsafe_code)]

//! [`TestScene`]: an in-memory, mutable scene graph.
//!
//! Nodes carry a rectangle, a depth for hit ordering (later nodes render on
//! top unless given an explicit depth), an active flag and capability records.
//! Every dispatched event is recorded. Scripted [`Reaction`]s mutate the tree
//! from inside event handlers, and [`ScheduledAction`]s mutate it at a point
//! in logical time, which is how tests reproduce nodes appearing, moving and
//! being destroyed while the monkey is mid-operation.

use std::time::Duration;

use ahash::AHashMap;
use uimonkey_core::capability::{Capability, Control};
use uimonkey_core::event::{EventKind, PointerEventData};
use uimonkey_core::geometry::{Rect, Vec2};
use uimonkey_core::scene::{HitResult, NodeId, Scene, is_active_in_hierarchy};

/// Declarative description of a node to insert.
#[derive(Debug, Clone)]
pub struct NodeSpec {
    name: String,
    rect: Option<Rect>,
    active: bool,
    raycast_target: Option<bool>,
    depth: Option<i32>,
    capabilities: Vec<Capability>,
    toggle: Option<bool>,
    text: Option<String>,
    scroll: Option<Vec2>,
}

impl NodeSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rect: None,
            active: true,
            raycast_target: None,
            depth: None,
            capabilities: Vec::new(),
            toggle: None,
            text: None,
            scroll: None,
        }
    }

    #[must_use]
    pub fn rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }

    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Whether hit tests can land on this node. Defaults to "has a rect".
    #[must_use]
    pub fn raycast_target(mut self, on: bool) -> Self {
        self.raycast_target = Some(on);
        self
    }

    #[must_use]
    pub fn depth(mut self, depth: i32) -> Self {
        self.depth = Some(depth);
        self
    }

    #[must_use]
    pub fn capability(mut self, capability: Capability) -> Self {
        if capability.control() == Some(Control::Toggle) && self.toggle.is_none() {
            self.toggle = Some(false);
        }
        if capability.control() == Some(Control::InputField) && self.text.is_none() {
            self.text = Some(String::new());
        }
        self.capabilities.push(capability);
        self
    }

    #[must_use]
    pub fn toggle(mut self, on: bool) -> Self {
        self.toggle = Some(on);
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn scroll(mut self, position: Vec2) -> Self {
        self.scroll = Some(position);
        self
    }
}

#[derive(Debug, Clone)]
struct NodeRecord {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    active: bool,
    rect: Option<Rect>,
    raycast_target: bool,
    depth: i32,
    capabilities: Vec<Capability>,
    toggle: Option<bool>,
    text: Option<String>,
    scroll: Option<Vec2>,
}

/// One event delivered through [`Scene::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvent {
    pub node: NodeId,
    pub kind: EventKind,
    pub position: Vec2,
    pub scroll_delta: Vec2,
    pub pointer_id: u32,
    pub click_count: u32,
    pub frame: u64,
}

/// Mutation run from inside an event handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Reaction {
    DestroySelf,
    Destroy(NodeId),
    SetActive(NodeId, bool),
}

/// Mutation run once logical time reaches a deadline.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduledAction {
    SetActive(NodeId, bool),
    Destroy(NodeId),
    Move(NodeId, Rect),
}

/// Activates `target` once the container's vertical scroll reaches `threshold`.
#[derive(Debug, Clone, Copy)]
struct ScrollReveal {
    container: NodeId,
    threshold: f32,
    target: NodeId,
}

/// In-memory scene graph used by the test suites.
#[derive(Debug, Clone)]
pub struct TestScene {
    nodes: AHashMap<NodeId, NodeRecord>,
    roots: Vec<NodeId>,
    persistent_roots: Vec<NodeId>,
    next_id: u64,
    next_depth: i32,
    screen: Vec2,
    events: Vec<RecordedEvent>,
    reactions: Vec<(NodeId, EventKind, Reaction)>,
    schedule: Vec<(Duration, ScheduledAction)>,
    reveals: Vec<ScrollReveal>,
    now: Duration,
    frames: u64,
}

impl Default for TestScene {
    fn default() -> Self {
        Self::new()
    }
}

impl TestScene {
    /// Empty scene on a 1920x1080 screen.
    pub fn new() -> Self {
        Self {
            nodes: AHashMap::new(),
            roots: Vec::new(),
            persistent_roots: Vec::new(),
            next_id: 1,
            next_depth: 0,
            screen: Vec2::new(1920.0, 1080.0),
            events: Vec::new(),
            reactions: Vec::new(),
            schedule: Vec::new(),
            reveals: Vec::new(),
            now: Duration::ZERO,
            frames: 0,
        }
    }

    #[must_use]
    pub fn with_screen(mut self, width: f32, height: f32) -> Self {
        self.screen = Vec2::new(width, height);
        self
    }

    fn insert(&mut self, parent: Option<NodeId>, spec: NodeSpec) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        let depth = spec.depth.unwrap_or(self.next_depth);
        self.next_depth += 1;
        let record = NodeRecord {
            name: spec.name,
            parent,
            children: Vec::new(),
            active: spec.active,
            raycast_target: spec.raycast_target.unwrap_or(spec.rect.is_some()),
            rect: spec.rect,
            depth,
            capabilities: spec.capabilities,
            toggle: spec.toggle,
            text: spec.text,
            scroll: spec.scroll,
        };
        self.nodes.insert(id, record);
        if let Some(p) = parent
            && let Some(parent) = self.nodes.get_mut(&p)
        {
            parent.children.push(id);
        }
        id
    }

    pub fn add_root(&mut self, spec: NodeSpec) -> NodeId {
        let id = self.insert(None, spec);
        self.roots.push(id);
        id
    }

    /// Root of the cross-scene tree, reported after ordinary roots.
    pub fn add_persistent_root(&mut self, spec: NodeSpec) -> NodeId {
        let id = self.insert(None, spec);
        self.persistent_roots.push(id);
        id
    }

    pub fn add_child(&mut self, parent: NodeId, spec: NodeSpec) -> NodeId {
        self.insert(Some(parent), spec)
    }

    /// Remove the node and its whole subtree.
    pub fn destroy(&mut self, node: NodeId) {
        let Some(record) = self.nodes.remove(&node) else {
            return;
        };
        tracing::trace!(node = %node, name = %record.name, "test scene destroy");
        if let Some(p) = record.parent
            && let Some(parent) = self.nodes.get_mut(&p)
        {
            parent.children.retain(|c| *c != node);
        }
        self.roots.retain(|r| *r != node);
        self.persistent_roots.retain(|r| *r != node);
        for child in record.children {
            self.destroy(child);
        }
    }

    pub fn set_active(&mut self, node: NodeId, active: bool) {
        if let Some(record) = self.nodes.get_mut(&node) {
            record.active = active;
        }
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(record) = self.nodes.get_mut(&node) {
            record.rect = Some(rect);
        }
    }

    /// Mutable access to a node's capability list.
    pub fn capabilities_mut(&mut self, node: NodeId) -> Option<&mut Vec<Capability>> {
        self.nodes.get_mut(&node).map(|r| &mut r.capabilities)
    }

    /// Run `reaction` whenever `node` receives `kind`.
    pub fn react(&mut self, node: NodeId, kind: EventKind, reaction: Reaction) {
        self.reactions.push((node, kind, reaction));
    }

    /// Run `action` on the first frame at or after `at`.
    pub fn schedule(&mut self, at: Duration, action: ScheduledAction) {
        self.schedule.push((at, action));
    }

    /// Activate `target` once `container`'s vertical scroll position reaches `threshold`.
    pub fn reveal_on_scroll(&mut self, container: NodeId, threshold: f32, target: NodeId) {
        self.reveals.push(ScrollReveal {
            container,
            threshold,
            target,
        });
    }

    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Kinds delivered to `node`, in order.
    pub fn kinds_for(&self, node: NodeId) -> Vec<EventKind> {
        self.events
            .iter()
            .filter(|e| e.node == node)
            .map(|e| e.kind)
            .collect()
    }

    /// Number of times `node` received `kind`.
    pub fn count(&self, node: NodeId, kind: EventKind) -> usize {
        self.events
            .iter()
            .filter(|e| e.node == node && e.kind == kind)
            .count()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn run_reaction(&mut self, source: NodeId, reaction: Reaction) {
        match reaction {
            Reaction::DestroySelf => self.destroy(source),
            Reaction::Destroy(target) => self.destroy(target),
            Reaction::SetActive(target, on) => self.set_active(target, on),
        }
    }

    fn apply_reveals(&mut self, container: NodeId) {
        let Some(position) = self.scroll_position(container) else {
            return;
        };
        let targets: Vec<NodeId> = self
            .reveals
            .iter()
            .filter(|r| r.container == container && position.y >= r.threshold)
            .map(|r| r.target)
            .collect();
        for target in targets {
            self.set_active(target, true);
        }
    }
}

impl Scene for TestScene {
    fn roots(&self) -> Vec<NodeId> {
        self.roots
            .iter()
            .chain(self.persistent_roots.iter())
            .copied()
            .collect()
    }

    fn is_alive(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    fn name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(&node).map(|r| r.name.as_str())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|r| r.parent)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(&node)
            .map(|r| r.children.clone())
            .unwrap_or_default()
    }

    fn is_active_self(&self, node: NodeId) -> bool {
        self.nodes.get(&node).is_some_and(|r| r.active)
    }

    fn capabilities(&self, node: NodeId) -> &[Capability] {
        self.nodes
            .get(&node)
            .map(|r| r.capabilities.as_slice())
            .unwrap_or(&[])
    }

    fn screen_point(&self, node: NodeId) -> Option<Vec2> {
        self.bounds(node).map(|r| r.center())
    }

    fn bounds(&self, node: NodeId) -> Option<Rect> {
        self.nodes.get(&node).and_then(|r| r.rect)
    }

    fn screen_size(&self) -> Vec2 {
        self.screen
    }

    fn hit_test(&self, point: Vec2, hits: &mut Vec<HitResult>) {
        hits.clear();
        for (id, record) in &self.nodes {
            let Some(rect) = record.rect else { continue };
            if !record.raycast_target || !rect.contains(point) {
                continue;
            }
            if !is_active_in_hierarchy(self, *id) {
                continue;
            }
            hits.push(HitResult {
                node: *id,
                screen_position: point,
                depth: record.depth,
            });
        }
        hits.sort_by(|a, b| b.depth.cmp(&a.depth).then(b.node.cmp(&a.node)));
    }

    fn dispatch(&mut self, node: NodeId, kind: EventKind, data: &PointerEventData) -> bool {
        let Some(record) = self.nodes.get_mut(&node) else {
            return false;
        };
        let handled = record.capabilities.iter().any(|c| c.handles(kind));
        let is_toggle = record
            .capabilities
            .iter()
            .any(|c| c.enabled && c.control() == Some(Control::Toggle));
        if kind == EventKind::PointerClick
            && is_toggle
            && let Some(on) = record.toggle.as_mut()
        {
            *on = !*on;
        }
        self.events.push(RecordedEvent {
            node,
            kind,
            position: data.position,
            scroll_delta: data.scroll_delta,
            pointer_id: data.pointer_id,
            click_count: data.click_count,
            frame: self.frames,
        });
        let triggered: Vec<Reaction> = self
            .reactions
            .iter()
            .filter(|(n, k, _)| *n == node && *k == kind)
            .map(|(_, _, r)| r.clone())
            .collect();
        for reaction in triggered {
            self.run_reaction(node, reaction);
        }
        handled
    }

    fn toggle_state(&self, node: NodeId) -> Option<bool> {
        self.nodes.get(&node).and_then(|r| r.toggle)
    }

    fn set_toggle_state(&mut self, node: NodeId, on: bool) {
        if let Some(record) = self.nodes.get_mut(&node) {
            record.toggle = Some(on);
        }
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(&node).and_then(|r| r.text.as_deref())
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(record) = self.nodes.get_mut(&node) {
            record.text = Some(text.to_string());
        }
    }

    fn scroll_position(&self, node: NodeId) -> Option<Vec2> {
        self.nodes.get(&node).and_then(|r| r.scroll)
    }

    fn set_scroll_position(&mut self, node: NodeId, position: Vec2) {
        if let Some(record) = self.nodes.get_mut(&node) {
            record.scroll = Some(Vec2::new(
                position.x.clamp(0.0, 1.0),
                position.y.clamp(0.0, 1.0),
            ));
        }
        self.apply_reveals(node);
    }

    fn on_frame(&mut self, now: Duration, _delta: Duration) {
        self.now = now;
        self.frames += 1;
        let (due, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.schedule).into_iter().partition(|(at, _)| *at <= now);
        self.schedule = pending;
        for (_, action) in due {
            match action {
                ScheduledAction::SetActive(node, on) => self.set_active(node, on),
                ScheduledAction::Destroy(node) => self.destroy(node),
                ScheduledAction::Move(node, rect) => self.set_rect(node, rect),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uimonkey_core::event::EventKinds;
    use uimonkey_core::scene::hierarchy_path;

    fn button(name: &str, rect: Rect) -> NodeSpec {
        NodeSpec::new(name)
            .rect(rect)
            .capability(Capability::selectable(Control::Button))
    }

    #[test]
    fn hit_test_orders_topmost_first() {
        let mut scene = TestScene::new();
        let root = scene.add_root(NodeSpec::new("Canvas"));
        let below = scene.add_child(root, button("Below", Rect::new(0.0, 0.0, 100.0, 100.0)));
        let above = scene.add_child(root, button("Above", Rect::new(0.0, 0.0, 50.0, 50.0)));
        let mut hits = Vec::new();
        scene.hit_test(Vec2::new(10.0, 10.0), &mut hits);
        let order: Vec<NodeId> = hits.iter().map(|h| h.node).collect();
        assert_eq!(order, vec![above, below]);
    }

    #[test]
    fn inactive_ancestor_hides_from_hit_test() {
        let mut scene = TestScene::new();
        let root = scene.add_root(NodeSpec::new("Canvas").inactive());
        scene.add_child(root, button("B", Rect::new(0.0, 0.0, 10.0, 10.0)));
        let mut hits = Vec::new();
        scene.hit_test(Vec2::new(5.0, 5.0), &mut hits);
        assert!(hits.is_empty());
    }

    #[test]
    fn destroy_removes_subtree() {
        let mut scene = TestScene::new();
        let root = scene.add_root(NodeSpec::new("Canvas"));
        let panel = scene.add_child(root, NodeSpec::new("Panel"));
        let leaf = scene.add_child(panel, NodeSpec::new("Leaf"));
        scene.destroy(panel);
        assert!(!scene.is_alive(panel));
        assert!(!scene.is_alive(leaf));
        assert!(scene.children(root).is_empty());
        assert!(scene.capabilities(leaf).is_empty());
    }

    #[test]
    fn reactions_run_inside_dispatch() {
        let mut scene = TestScene::new();
        let root = scene.add_root(NodeSpec::new("Canvas"));
        let b = scene.add_child(root, button("B", Rect::new(0.0, 0.0, 10.0, 10.0)));
        scene.react(b, EventKind::PointerClick, Reaction::DestroySelf);
        let handled = scene.dispatch(b, EventKind::PointerClick, &PointerEventData::default());
        assert!(handled);
        assert!(!scene.is_alive(b));
        assert_eq!(scene.events().len(), 1);
    }

    #[test]
    fn scheduled_actions_fire_on_frame() {
        let mut scene = TestScene::new();
        let root = scene.add_root(NodeSpec::new("Canvas"));
        let late = scene.add_child(root, NodeSpec::new("Late").inactive());
        scene.schedule(Duration::from_millis(50), ScheduledAction::SetActive(late, true));
        scene.on_frame(Duration::from_millis(40), Duration::from_millis(16));
        assert!(!scene.is_active_self(late));
        scene.on_frame(Duration::from_millis(56), Duration::from_millis(16));
        assert!(scene.is_active_self(late));
    }

    #[test]
    fn toggle_flips_on_click() {
        let mut scene = TestScene::new();
        let t = scene.add_root(
            NodeSpec::new("Toggle")
                .rect(Rect::new(0.0, 0.0, 10.0, 10.0))
                .capability(Capability::selectable(Control::Toggle)),
        );
        assert_eq!(scene.toggle_state(t), Some(false));
        scene.dispatch(t, EventKind::PointerClick, &PointerEventData::default());
        assert_eq!(scene.toggle_state(t), Some(true));
    }

    #[test]
    fn persistent_roots_come_last() {
        let mut scene = TestScene::new();
        let persistent = scene.add_persistent_root(NodeSpec::new("DontDestroyOnLoad"));
        let root = scene.add_root(NodeSpec::new("Canvas"));
        assert_eq!(scene.roots(), vec![root, persistent]);
        let child = scene.add_child(
            persistent,
            NodeSpec::new("Trigger").capability(Capability::event_trigger(EventKinds::SCROLL)),
        );
        assert_eq!(hierarchy_path(&scene, child), "/DontDestroyOnLoad/Trigger");
    }

    #[test]
    fn scroll_reveal_activates_target() {
        let mut scene = TestScene::new();
        let list = scene.add_root(NodeSpec::new("List").scroll(Vec2::ZERO));
        let item = scene.add_child(list, NodeSpec::new("Item9").inactive());
        scene.reveal_on_scroll(list, 0.5, item);
        scene.set_scroll_position(list, Vec2::new(0.0, 0.4));
        assert!(!scene.is_active_self(item));
        scene.set_scroll_position(list, Vec2::new(0.0, 0.6));
        assert!(scene.is_active_self(item));
    }
}
