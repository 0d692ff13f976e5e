#![forbid(unsafe_code)]

//! Core: scene boundary, matchers, cooperative scheduling and pointer ids.
//!
//! # Role in uimonkey
//! `uimonkey-core` is the vocabulary every other crate speaks. It defines the
//! [`Scene`](scene::Scene) trait the host engine implements, the capability
//! and event model queried on nodes, and the [`Driver`](driver::Driver) that
//! paces all work frame by frame.
//!
//! # Primary responsibilities
//! - **Scene**: tree traversal, hit testing and event dispatch as a trait.
//! - **Capabilities/events**: closed tagged sets queried per event kind.
//! - **Matchers**: name, path-glob and capability-type predicates.
//! - **Scheduling**: frame clocks, cooperative cancellation, backoff.
//! - **Pointer ids**: the smallest-free multi-touch id pool.

pub mod backoff;
pub mod cancellation;
pub mod capability;
pub mod clock;
pub mod driver;
pub mod event;
pub mod geometry;
pub mod matcher;
pub mod pointer;
pub mod scene;

pub use cancellation::{Cancelled, CancellationSource, CancellationToken};
pub use capability::{Annotation, Capability, CharacterKind, Control, Facet, ScrollAxes, TextConstraint};
pub use driver::{Driver, Env};
pub use event::{EventKind, EventKinds, PointerEventData};
pub use geometry::{Rect, Vec2};
pub use matcher::{CapabilityMatcher, Matcher, NameMatcher, PathMatcher};
pub use scene::{HitResult, NodeId, Scene, active_nodes};
