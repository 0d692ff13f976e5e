#![forbid(unsafe_code)]

//! Capability records attached to scene nodes.
//!
//! A node carries zero or more [`Capability`] records. Each record names the
//! host-side type it stands for (used by capability matchers), has its own
//! enabled flag, and exposes one [`Facet`] describing what it does.

use std::borrow::Cow;

use crate::event::{EventKind, EventKinds};
use crate::scene::NodeId;

/// Built-in selectable controls and the handler kinds each one implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Button,
    Toggle,
    InputField,
    Slider,
    Scrollbar,
    Dropdown,
    /// A selectable with no control-specific behavior.
    Other,
}

impl Control {
    /// Handler kinds shared by every selectable.
    const BASE: EventKinds = EventKinds::POINTER_ENTER
        .union(EventKinds::POINTER_EXIT)
        .union(EventKinds::POINTER_DOWN)
        .union(EventKinds::POINTER_UP)
        .union(EventKinds::SELECT)
        .union(EventKinds::DESELECT)
        .union(EventKinds::MOVE);

    pub const fn handled_kinds(self) -> EventKinds {
        let extra = match self {
            Self::Button | Self::Toggle => EventKinds::POINTER_CLICK.union(EventKinds::SUBMIT),
            Self::InputField => EventKinds::POINTER_CLICK
                .union(EventKinds::BEGIN_DRAG)
                .union(EventKinds::DRAG)
                .union(EventKinds::END_DRAG)
                .union(EventKinds::UPDATE_SELECTED)
                .union(EventKinds::SUBMIT),
            Self::Slider => EventKinds::INITIALIZE_POTENTIAL_DRAG.union(EventKinds::DRAG),
            Self::Scrollbar => EventKinds::INITIALIZE_POTENTIAL_DRAG
                .union(EventKinds::BEGIN_DRAG)
                .union(EventKinds::DRAG),
            Self::Dropdown => EventKinds::POINTER_CLICK
                .union(EventKinds::SUBMIT)
                .union(EventKinds::CANCEL),
            Self::Other => EventKinds::empty(),
        };
        Self::BASE.union(extra)
    }
}

/// Which axes a scroll container moves along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollAxes {
    pub horizontal: bool,
    pub vertical: bool,
}

impl ScrollAxes {
    pub const HORIZONTAL: ScrollAxes = ScrollAxes {
        horizontal: true,
        vertical: false,
    };
    pub const VERTICAL: ScrollAxes = ScrollAxes {
        horizontal: false,
        vertical: true,
    };
    pub const BOTH: ScrollAxes = ScrollAxes {
        horizontal: true,
        vertical: true,
    };
}

/// Character classes for generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharacterKind {
    Digits,
    Alphabet,
    #[default]
    Alphanumeric,
    /// Printable ASCII, space through tilde.
    Printable,
}

/// Input-generation constraint declared on a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextConstraint {
    pub kind: CharacterKind,
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for TextConstraint {
    fn default() -> Self {
        Self {
            kind: CharacterKind::Alphanumeric,
            min_length: 5,
            max_length: 10,
        }
    }
}

/// Data declared by annotation components owned by the host application.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    /// Exclude the node from monkey selection.
    Ignore,
    /// Preferred destinations for drag-and-drop started on this node.
    DropTargets(Vec<NodeId>),
    /// Constraint for generated text on this node.
    TextInput(TextConstraint),
}

/// What a capability does.
#[derive(Debug, Clone, PartialEq)]
pub enum Facet {
    /// A component implementing handler interfaces for the given kinds.
    Handler(EventKinds),
    /// A multi-event trigger registered for a configurable subset of kinds.
    EventTrigger(EventKinds),
    /// A selectable control with its own interactable flag.
    Selectable { control: Control, interactable: bool },
    /// A scroll container.
    ScrollView(ScrollAxes),
    /// Annotation data; never handles events.
    Annotation(Annotation),
}

impl Facet {
    /// The event kinds this facet answers to.
    pub fn handled_kinds(&self) -> EventKinds {
        match self {
            Self::Handler(kinds) | Self::EventTrigger(kinds) => *kinds,
            Self::Selectable { control, .. } => control.handled_kinds(),
            Self::ScrollView(_) => {
                EventKinds::INITIALIZE_POTENTIAL_DRAG
                    | EventKinds::BEGIN_DRAG
                    | EventKinds::DRAG
                    | EventKinds::END_DRAG
                    | EventKinds::SCROLL
            }
            Self::Annotation(_) => EventKinds::empty(),
        }
    }
}

/// A typed facet attached to a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Capability {
    /// Host-side type name, e.g. `"Button"` or `"EventTrigger"`.
    pub type_name: Cow<'static, str>,
    pub enabled: bool,
    pub facet: Facet,
}

impl Capability {
    pub fn new(type_name: impl Into<Cow<'static, str>>, facet: Facet) -> Self {
        Self {
            type_name: type_name.into(),
            enabled: true,
            facet,
        }
    }

    pub fn handler(type_name: impl Into<Cow<'static, str>>, kinds: EventKinds) -> Self {
        Self::new(type_name, Facet::Handler(kinds))
    }

    pub fn event_trigger(kinds: EventKinds) -> Self {
        Self::new("EventTrigger", Facet::EventTrigger(kinds))
    }

    pub fn selectable(control: Control) -> Self {
        let name = match control {
            Control::Button => "Button",
            Control::Toggle => "Toggle",
            Control::InputField => "InputField",
            Control::Slider => "Slider",
            Control::Scrollbar => "Scrollbar",
            Control::Dropdown => "Dropdown",
            Control::Other => "Selectable",
        };
        Self::new(
            name,
            Facet::Selectable {
                control,
                interactable: true,
            },
        )
    }

    pub fn scroll_view(axes: ScrollAxes) -> Self {
        Self::new("ScrollRect", Facet::ScrollView(axes))
    }

    pub fn annotation(annotation: Annotation) -> Self {
        let name = match annotation {
            Annotation::Ignore => "IgnoreAnnotation",
            Annotation::DropTargets(_) => "DropAnnotation",
            Annotation::TextInput(_) => "InputFieldAnnotation",
        };
        Self::new(name, Facet::Annotation(annotation))
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Mark a selectable as not interactable. No effect on other facets.
    #[must_use]
    pub fn non_interactable(mut self) -> Self {
        if let Facet::Selectable { interactable, .. } = &mut self.facet {
            *interactable = false;
        }
        self
    }

    /// Whether this enabled capability answers to `kind`.
    pub fn handles(&self, kind: EventKind) -> bool {
        self.enabled && self.facet.handled_kinds().has(kind)
    }

    pub fn control(&self) -> Option<Control> {
        match self.facet {
            Facet::Selectable { control, .. } => Some(control),
            _ => None,
        }
    }

    pub fn annotation_data(&self) -> Option<&Annotation> {
        match &self.facet {
            Facet::Annotation(a) => Some(a),
            _ => None,
        }
    }
}
