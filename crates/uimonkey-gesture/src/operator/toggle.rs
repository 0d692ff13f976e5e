#![forbid(unsafe_code)]

use uimonkey_core::capability::Control;
use uimonkey_core::driver::Env;
use uimonkey_core::scene::{HitResult, NodeId, Scene, control_of};

use super::Operator;
use crate::click::{ClickParams, pointer_click};
use crate::error::GestureError;

/// Click a toggle control.
///
/// With `target_state` set, the toggle is clicked only when its state
/// differs; otherwise every operation flips it.
#[derive(Debug, Clone, Default)]
pub struct ToggleOperator {
    pub target_state: Option<bool>,
}

impl Operator for ToggleOperator {
    fn name(&self) -> &'static str {
        "toggle"
    }

    fn can_operate(&self, scene: &dyn Scene, node: NodeId) -> bool {
        control_of(scene, node) == Some(Control::Toggle)
    }

    fn operate(
        &self,
        env: Env<'_>,
        node: NodeId,
        hit: Option<&HitResult>,
    ) -> Result<(), GestureError> {
        if let Some(want) = self.target_state
            && env.scene.toggle_state(node) == Some(want)
        {
            tracing::debug!(target: "uimonkey.gesture", node = %node, state = want, "toggle already in state");
            return Ok(());
        }
        pointer_click(env, node, hit, ClickParams::single())
    }
}
