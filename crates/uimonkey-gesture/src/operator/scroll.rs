#![forbid(unsafe_code)]

use uimonkey_core::driver::Env;
use uimonkey_core::event::EventKind;
use uimonkey_core::geometry::Vec2;
use uimonkey_core::scene::{HitResult, NodeId, Scene, handles};

use super::Operator;
use crate::error::GestureError;
use crate::scroll::{random_scroll_destination, scroll_wheel};

/// Mouse-wheel scroll over the node.
#[derive(Debug, Clone)]
pub struct ScrollWheelOperator {
    /// Scroll units per second.
    pub speed: f32,
    /// Fixed total delta; random within the node's extent when `None`.
    pub destination: Option<Vec2>,
}

impl Default for ScrollWheelOperator {
    fn default() -> Self {
        Self {
            speed: 1000.0,
            destination: None,
        }
    }
}

impl Operator for ScrollWheelOperator {
    fn name(&self) -> &'static str {
        "scroll_wheel"
    }

    fn can_operate(&self, scene: &dyn Scene, node: NodeId) -> bool {
        handles(scene, node, EventKind::Scroll)
    }

    fn operate(
        &self,
        env: Env<'_>,
        node: NodeId,
        hit: Option<&HitResult>,
    ) -> Result<(), GestureError> {
        let destination = match self.destination {
            Some(d) => d,
            None => random_scroll_destination(&*env.scene, node, env.driver.rng()),
        };
        scroll_wheel(env, node, hit, destination, self.speed).map(|_| ())
    }
}
