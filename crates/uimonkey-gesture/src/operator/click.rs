#![forbid(unsafe_code)]

use web_time::Duration;

use uimonkey_core::driver::Env;
use uimonkey_core::event::EventKind;
use uimonkey_core::scene::{HitResult, NodeId, Scene, handles};

use super::Operator;
use crate::click::{ClickParams, pointer_click};
use crate::error::GestureError;

/// Single click.
#[derive(Debug, Clone, Default)]
pub struct ClickOperator;

impl Operator for ClickOperator {
    fn name(&self) -> &'static str {
        "click"
    }

    fn can_operate(&self, scene: &dyn Scene, node: NodeId) -> bool {
        handles(scene, node, EventKind::PointerClick)
    }

    fn operate(
        &self,
        env: Env<'_>,
        node: NodeId,
        hit: Option<&HitResult>,
    ) -> Result<(), GestureError> {
        pointer_click(env, node, hit, ClickParams::single())
    }
}

/// Two clicks separated by `interval`.
#[derive(Debug, Clone)]
pub struct DoubleClickOperator {
    pub interval: Duration,
}

impl Default for DoubleClickOperator {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
        }
    }
}

impl Operator for DoubleClickOperator {
    fn name(&self) -> &'static str {
        "double_click"
    }

    fn can_operate(&self, scene: &dyn Scene, node: NodeId) -> bool {
        handles(scene, node, EventKind::PointerClick)
    }

    fn operate(
        &self,
        env: Env<'_>,
        node: NodeId,
        hit: Option<&HitResult>,
    ) -> Result<(), GestureError> {
        let interval = if self.interval.is_zero() {
            Duration::from_millis(1)
        } else {
            self.interval
        };
        pointer_click(env, node, hit, ClickParams::double(interval))
    }
}

/// Press, hold for `hold`, release.
#[derive(Debug, Clone)]
pub struct ClickAndHoldOperator {
    pub hold: Duration,
}

impl Default for ClickAndHoldOperator {
    fn default() -> Self {
        Self {
            hold: Duration::from_millis(1000),
        }
    }
}

impl Operator for ClickAndHoldOperator {
    fn name(&self) -> &'static str {
        "click_and_hold"
    }

    fn can_operate(&self, scene: &dyn Scene, node: NodeId) -> bool {
        handles(scene, node, EventKind::PointerDown)
    }

    fn operate(
        &self,
        env: Env<'_>,
        node: NodeId,
        hit: Option<&HitResult>,
    ) -> Result<(), GestureError> {
        let hold = if self.hold.is_zero() {
            Duration::from_millis(1)
        } else {
            self.hold
        };
        pointer_click(env, node, hit, ClickParams::hold(hold))
    }
}
