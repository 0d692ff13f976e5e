#![forbid(unsafe_code)]

use uimonkey_core::capability::{Annotation, Control, TextConstraint};
use uimonkey_core::driver::Env;
use uimonkey_core::event::{EventKind, PointerEventData};
use uimonkey_core::scene::{HitResult, NodeId, Scene, annotations_of, control_of, execute};

use super::Operator;
use crate::error::GestureError;
use crate::text::random_text;

/// Type text into an input field: `Select`, set the text, `Submit`.
///
/// The text is `text` when set, else random text following the field's
/// `TextInput` annotation, else random text following `fallback`.
#[derive(Debug, Clone, Default)]
pub struct TextInputOperator {
    pub text: Option<String>,
    pub fallback: TextConstraint,
}

impl TextInputOperator {
    fn constraint(&self, scene: &dyn Scene, node: NodeId) -> TextConstraint {
        annotations_of(scene, node)
            .find_map(|a| match a {
                Annotation::TextInput(c) => Some(*c),
                _ => None,
            })
            .unwrap_or(self.fallback)
    }
}

impl Operator for TextInputOperator {
    fn name(&self) -> &'static str {
        "text_input"
    }

    fn can_operate(&self, scene: &dyn Scene, node: NodeId) -> bool {
        control_of(scene, node) == Some(Control::InputField)
    }

    fn operate(
        &self,
        env: Env<'_>,
        node: NodeId,
        hit: Option<&HitResult>,
    ) -> Result<(), GestureError> {
        env.driver.check_cancelled()?;
        let text = match &self.text {
            Some(t) => t.clone(),
            None => {
                let constraint = self.constraint(&*env.scene, node);
                random_text(env.driver.rng(), &constraint)
            }
        };
        let data = PointerEventData {
            current_hit: hit.copied(),
            ..PointerEventData::default()
        };
        tracing::debug!(target: "uimonkey.gesture", node = %node, text = %text, "text input");
        execute(&mut *env.scene, node, EventKind::Select, &data);
        env.scene.set_text(node, &text);
        execute(&mut *env.scene, node, EventKind::Submit, &data);
        Ok(())
    }
}
