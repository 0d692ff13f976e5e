#![forbid(unsafe_code)]

//! Gesture operators: stateless strategies pairing an applicability test
//! with a synthesized event sequence.
//!
//! Operators hold only tuning parameters. All run state (scene, clock,
//! pointer ids, randomness) comes in through the [`Env`].

use std::fmt;

use uimonkey_core::driver::Env;
use uimonkey_core::scene::{HitResult, NodeId, Scene};

use crate::error::GestureError;

mod click;
mod drag;
mod scroll;
mod text_input;
mod toggle;

pub use click::{ClickAndHoldOperator, ClickOperator, DoubleClickOperator};
pub use drag::{DragAndDropOperator, SwipeOperator, choose_drop_destination, swipe_direction};
pub use scroll::ScrollWheelOperator;
pub use text_input::TextInputOperator;
pub use toggle::ToggleOperator;

/// A gesture that can be performed on a node.
pub trait Operator: fmt::Debug {
    /// Short stable name used in logs and run summaries.
    fn name(&self) -> &'static str;

    /// Whether this operator applies to `node` as it is now.
    fn can_operate(&self, scene: &dyn Scene, node: NodeId) -> bool;

    /// Perform the gesture. `hit` is the reachability hit for `node`, when known.
    fn operate(
        &self,
        env: Env<'_>,
        node: NodeId,
        hit: Option<&HitResult>,
    ) -> Result<(), GestureError>;
}

/// One of each operator with default tuning.
pub fn default_operators() -> Vec<Box<dyn Operator>> {
    vec![
        Box::new(ClickOperator::default()),
        Box::new(DoubleClickOperator::default()),
        Box::new(ClickAndHoldOperator::default()),
        Box::new(DragAndDropOperator::default()),
        Box::new(SwipeOperator::default()),
        Box::new(ScrollWheelOperator::default()),
        Box::new(ToggleOperator::default()),
        Box::new(TextInputOperator::default()),
    ]
}
