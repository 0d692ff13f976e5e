#![forbid(unsafe_code)]

//! Canonical pointer/selection event kinds and the payload dispatched with them.
//!
//! Event handling capabilities are described as a closed set of kinds
//! ([`EventKind`]) plus a bitset of kinds a capability answers to
//! ([`EventKinds`]). A capability is queried per kind; there is no notion of a
//! capability that "handles events" in general.

use bitflags::bitflags;

use crate::geometry::Vec2;
use crate::scene::{HitResult, NodeId};

/// One low-level UI event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerEnter,
    PointerExit,
    PointerDown,
    PointerUp,
    PointerClick,
    InitializePotentialDrag,
    BeginDrag,
    Drag,
    EndDrag,
    Drop,
    Scroll,
    Select,
    Deselect,
    UpdateSelected,
    Move,
    Submit,
    Cancel,
}

impl EventKind {
    /// Every kind, in canonical order.
    pub const ALL: [EventKind; 17] = [
        EventKind::PointerEnter,
        EventKind::PointerExit,
        EventKind::PointerDown,
        EventKind::PointerUp,
        EventKind::PointerClick,
        EventKind::InitializePotentialDrag,
        EventKind::BeginDrag,
        EventKind::Drag,
        EventKind::EndDrag,
        EventKind::Drop,
        EventKind::Scroll,
        EventKind::Select,
        EventKind::Deselect,
        EventKind::UpdateSelected,
        EventKind::Move,
        EventKind::Submit,
        EventKind::Cancel,
    ];

    /// The single-bit set for this kind.
    pub const fn flag(self) -> EventKinds {
        match self {
            Self::PointerEnter => EventKinds::POINTER_ENTER,
            Self::PointerExit => EventKinds::POINTER_EXIT,
            Self::PointerDown => EventKinds::POINTER_DOWN,
            Self::PointerUp => EventKinds::POINTER_UP,
            Self::PointerClick => EventKinds::POINTER_CLICK,
            Self::InitializePotentialDrag => EventKinds::INITIALIZE_POTENTIAL_DRAG,
            Self::BeginDrag => EventKinds::BEGIN_DRAG,
            Self::Drag => EventKinds::DRAG,
            Self::EndDrag => EventKinds::END_DRAG,
            Self::Drop => EventKinds::DROP,
            Self::Scroll => EventKinds::SCROLL,
            Self::Select => EventKinds::SELECT,
            Self::Deselect => EventKinds::DESELECT,
            Self::UpdateSelected => EventKinds::UPDATE_SELECTED,
            Self::Move => EventKinds::MOVE,
            Self::Submit => EventKinds::SUBMIT,
            Self::Cancel => EventKinds::CANCEL,
        }
    }

    /// Passive kinds never originate a user action on their own, so a
    /// capability answering only to them is not considered operable.
    pub const fn is_passive(self) -> bool {
        matches!(self, Self::Drop | Self::Deselect | Self::UpdateSelected)
    }

    /// Stable lowercase name for logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::PointerEnter => "pointer_enter",
            Self::PointerExit => "pointer_exit",
            Self::PointerDown => "pointer_down",
            Self::PointerUp => "pointer_up",
            Self::PointerClick => "pointer_click",
            Self::InitializePotentialDrag => "initialize_potential_drag",
            Self::BeginDrag => "begin_drag",
            Self::Drag => "drag",
            Self::EndDrag => "end_drag",
            Self::Drop => "drop",
            Self::Scroll => "scroll",
            Self::Select => "select",
            Self::Deselect => "deselect",
            Self::UpdateSelected => "update_selected",
            Self::Move => "move",
            Self::Submit => "submit",
            Self::Cancel => "cancel",
        }
    }
}

bitflags! {
    /// A set of [`EventKind`]s.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EventKinds: u32 {
        const POINTER_ENTER = 1 << 0;
        const POINTER_EXIT = 1 << 1;
        const POINTER_DOWN = 1 << 2;
        const POINTER_UP = 1 << 3;
        const POINTER_CLICK = 1 << 4;
        const INITIALIZE_POTENTIAL_DRAG = 1 << 5;
        const BEGIN_DRAG = 1 << 6;
        const DRAG = 1 << 7;
        const END_DRAG = 1 << 8;
        const DROP = 1 << 9;
        const SCROLL = 1 << 10;
        const SELECT = 1 << 11;
        const DESELECT = 1 << 12;
        const UPDATE_SELECTED = 1 << 13;
        const MOVE = 1 << 14;
        const SUBMIT = 1 << 15;
        const CANCEL = 1 << 16;

        const PASSIVE = Self::DROP.bits() | Self::DESELECT.bits() | Self::UPDATE_SELECTED.bits();
    }
}

impl EventKinds {
    #[inline]
    pub fn has(self, kind: EventKind) -> bool {
        self.contains(kind.flag())
    }

    /// Whether at least one non-passive kind is present.
    #[inline]
    pub fn has_active_kind(self) -> bool {
        !self.difference(EventKinds::PASSIVE).is_empty()
    }

    /// Iterate the contained kinds in canonical order.
    pub fn kinds(self) -> impl Iterator<Item = EventKind> {
        EventKind::ALL.into_iter().filter(move |k| self.has(*k))
    }
}

impl From<EventKind> for EventKinds {
    fn from(kind: EventKind) -> Self {
        kind.flag()
    }
}

/// Payload dispatched alongside every pointer event.
///
/// One instance lives for the duration of one gesture and is updated in place
/// as the gesture progresses, the way a host input module threads a single
/// pointer record through enter/down/drag/up.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointerEventData {
    pub pointer_id: u32,
    pub position: Vec2,
    pub delta: Vec2,
    pub press_position: Vec2,
    pub scroll_delta: Vec2,
    pub click_count: u32,
    pub dragging: bool,
    /// Node the pointer most recently entered.
    pub pointer_enter: Option<NodeId>,
    /// Node that received the press.
    pub pointer_press: Option<NodeId>,
    /// Node that received `BeginDrag`.
    pub pointer_drag: Option<NodeId>,
    pub current_hit: Option<HitResult>,
}

impl PointerEventData {
    pub fn new(pointer_id: u32, position: Vec2) -> Self {
        Self {
            pointer_id,
            position,
            press_position: position,
            ..Self::default()
        }
    }
}
