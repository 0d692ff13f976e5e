#![forbid(unsafe_code)]

//! Pointer gesture simulation for uimonkey.
//!
//! # Role in uimonkey
//! Given a target node, the simulators here reproduce the exact event
//! sequence a human pointer produces: click (with hold and repetition),
//! two-phase drag and drop, and scroll wheel. Operators wrap them into
//! stateless strategies the monkey draws at random.
//!
//! Every simulator leases a pointer id from the run's pool for its lifetime
//! and yields to the scene through the [`Env`](uimonkey_core::Env) between
//! sub-events. A target that disappears between frames ends the gesture with
//! a warning rather than an error.

pub mod click;
pub mod drag;
pub mod error;
pub mod operator;
pub mod scroll;
mod session;
pub mod text;

pub use click::{ClickParams, PointerClickSimulator, pointer_click};
pub use drag::{PointerDragSimulator, drag_and_drop};
pub use error::GestureError;
pub use operator::{
    ClickAndHoldOperator, ClickOperator, DoubleClickOperator, DragAndDropOperator, Operator,
    ScrollWheelOperator, SwipeOperator, TextInputOperator, ToggleOperator, default_operators,
};
pub use scroll::{PointerScrollSimulator, scroll_wheel};
pub use session::start_position;
pub use text::random_text;
