#![forbid(unsafe_code)]

use rand::Rng;
use rand::seq::IndexedRandom;
use uimonkey_core::capability::{Annotation, ScrollAxes};
use uimonkey_core::driver::Env;
use uimonkey_core::event::EventKind;
use uimonkey_core::geometry::Vec2;
use uimonkey_core::scene::{
    HitResult, NodeId, Scene, active_nodes, annotations_of, handles, is_active_in_hierarchy,
    is_self_or_descendant, scroll_axes_of,
};

use super::Operator;
use crate::drag::drag_and_drop;
use crate::error::GestureError;
use crate::session::start_position;

/// Drag the node onto a drop target.
#[derive(Debug, Clone)]
pub struct DragAndDropOperator {
    /// Pointer speed in units per second.
    pub speed: f32,
    /// Fixed destination; chosen per operation when `None`.
    pub destination: Option<Vec2>,
}

impl Default for DragAndDropOperator {
    fn default() -> Self {
        Self {
            speed: 1200.0,
            destination: None,
        }
    }
}

impl Operator for DragAndDropOperator {
    fn name(&self) -> &'static str {
        "drag_and_drop"
    }

    fn can_operate(&self, scene: &dyn Scene, node: NodeId) -> bool {
        handles(scene, node, EventKind::Drag)
    }

    fn operate(
        &self,
        env: Env<'_>,
        node: NodeId,
        hit: Option<&HitResult>,
    ) -> Result<(), GestureError> {
        let destination = match self.destination {
            Some(d) => d,
            None => choose_drop_destination(&*env.scene, node, env.driver.rng()),
        };
        drag_and_drop(env, node, hit, destination, self.speed).map(|_| ())
    }
}

/// Where to drop a drag started on `target`.
///
/// Declared drop targets come first, then any live node that handles `Drop`
/// outside the dragged subtree, then a random point on screen.
pub fn choose_drop_destination<R: Rng + ?Sized>(
    scene: &dyn Scene,
    target: NodeId,
    rng: &mut R,
) -> Vec2 {
    let declared: Vec<Vec2> = annotations_of(scene, target)
        .filter_map(|a| match a {
            Annotation::DropTargets(nodes) => Some(nodes),
            _ => None,
        })
        .flatten()
        .filter(|n| is_active_in_hierarchy(scene, **n))
        .filter_map(|n| scene.screen_point(*n))
        .collect();
    if let Some(point) = declared.choose(rng) {
        return *point;
    }

    let droppable: Vec<Vec2> = active_nodes(scene)
        .filter(|n| !is_self_or_descendant(scene, *n, target))
        .filter(|n| handles(scene, *n, EventKind::Drop))
        .filter_map(|n| scene.screen_point(n))
        .collect();
    if let Some(point) = droppable.choose(rng) {
        return *point;
    }

    let screen = scene.screen_size();
    Vec2::new(
        rng.random_range(0.0..=screen.x.max(0.0)),
        rng.random_range(0.0..=screen.y.max(0.0)),
    )
}

/// Directional drag, typically across a scroll container.
#[derive(Debug, Clone)]
pub struct SwipeOperator {
    /// Fixed direction; inferred from the scroll axes when `None`.
    pub direction: Option<Vec2>,
    pub distance: f32,
    /// Pointer speed in units per second.
    pub speed: f32,
}

impl Default for SwipeOperator {
    fn default() -> Self {
        Self {
            direction: None,
            distance: 200.0,
            speed: 2000.0,
        }
    }
}

impl Operator for SwipeOperator {
    fn name(&self) -> &'static str {
        "swipe"
    }

    fn can_operate(&self, scene: &dyn Scene, node: NodeId) -> bool {
        handles(scene, node, EventKind::Drag)
    }

    fn operate(
        &self,
        env: Env<'_>,
        node: NodeId,
        hit: Option<&HitResult>,
    ) -> Result<(), GestureError> {
        let direction = match self.direction {
            Some(d) if d.length() > f32::EPSILON => d.normalized(),
            _ => {
                let axes = scroll_axes_of(&*env.scene, node).unwrap_or_default();
                swipe_direction(axes, env.driver.rng())
            }
        };
        let start = start_position(&*env.scene, node, hit);
        let destination = start + direction * self.distance;
        drag_and_drop(env, node, hit, destination, self.speed).map(|_| ())
    }
}

/// A unit swipe direction along an axis the container scrolls on.
///
/// Both axes pick one at random; neither falls back to horizontal. The sign
/// is random.
pub fn swipe_direction<R: Rng + ?Sized>(axes: ScrollAxes, rng: &mut R) -> Vec2 {
    let axis = match (axes.horizontal, axes.vertical) {
        (false, true) => Vec2::UP,
        (true, true) if rng.random_bool(0.5) => Vec2::UP,
        _ => Vec2::RIGHT,
    };
    if rng.random_bool(0.5) { axis } else { -axis }
}
