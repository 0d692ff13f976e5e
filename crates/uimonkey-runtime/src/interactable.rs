#![forbid(unsafe_code)]

//! Discovery of operable capabilities across the whole loaded scene.
//!
//! # Default predicate
//!
//! A capability is interactable when its node is active in hierarchy, the
//! capability is enabled, and one of:
//!
//! - it is a selectable control whose own interactable flag is set;
//! - it is an event trigger or handler registered for at least one
//!   non-passive event kind;
//! - it is a scroll container.
//!
//! Passive kinds (`Drop`, `Deselect`, `UpdateSelected`) never make a
//! capability interactable on their own. Annotations never do.

use uimonkey_core::capability::{Capability, Facet};
use uimonkey_core::scene::{NodeId, Scene, active_nodes, is_active_in_hierarchy};
use uimonkey_gesture::Operator;

/// Decides whether one capability on one node can be operated.
pub type InteractablePredicate = Box<dyn Fn(&dyn Scene, NodeId, &Capability) -> bool>;

pub fn is_interactable(scene: &dyn Scene, node: NodeId, capability: &Capability) -> bool {
    if !capability.enabled || !is_active_in_hierarchy(scene, node) {
        return false;
    }
    match &capability.facet {
        Facet::Selectable { interactable, .. } => *interactable,
        Facet::Handler(kinds) | Facet::EventTrigger(kinds) => kinds.has_active_kind(),
        Facet::ScrollView(_) => true,
        Facet::Annotation(_) => false,
    }
}

/// One (node, operator) pair eligible for the lottery.
#[derive(Debug, Clone, Copy)]
pub struct SelectionEntry<'o> {
    pub node: NodeId,
    pub operator: &'o dyn Operator,
    /// Position of `operator` in the operator set.
    pub operator_index: usize,
}

pub struct InteractableComponentsFinder {
    predicate: InteractablePredicate,
}

impl InteractableComponentsFinder {
    pub fn new() -> Self {
        Self::with_predicate(Box::new(is_interactable))
    }

    pub fn with_predicate(predicate: InteractablePredicate) -> Self {
        Self { predicate }
    }

    /// Whether any capability on `node` passes the predicate.
    pub fn is_node_interactable(&self, scene: &dyn Scene, node: NodeId) -> bool {
        scene
            .capabilities(node)
            .iter()
            .any(|c| (self.predicate)(scene, node, c))
    }

    /// Lazily walk the active tree, yielding each interactable capability.
    pub fn find_components<'s>(
        &'s self,
        scene: &'s dyn Scene,
    ) -> impl Iterator<Item = (NodeId, &'s Capability)> + 's {
        active_nodes(scene).flat_map(move |node| {
            scene
                .capabilities(node)
                .iter()
                .filter(move |c| (self.predicate)(scene, node, *c))
                .map(move |c| (node, c))
        })
    }

    /// Cross-join interactable capabilities with `operators`.
    ///
    /// A node contributes one entry per (interactable capability, applicable
    /// operator), so nodes with more operable capabilities are drawn more often.
    pub fn find_components_and_operators<'s, 'o>(
        &'s self,
        scene: &'s dyn Scene,
        operators: &'o [Box<dyn Operator>],
    ) -> impl Iterator<Item = SelectionEntry<'o>> + 's
    where
        'o: 's,
    {
        self.find_components(scene).flat_map(move |(node, _)| {
            operators
                .iter()
                .enumerate()
                .filter(move |(_, op)| op.can_operate(scene, node))
                .map(move |(operator_index, op)| SelectionEntry {
                    node,
                    operator: op.as_ref(),
                    operator_index,
                })
        })
    }
}

impl Default for InteractableComponentsFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InteractableComponentsFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractableComponentsFinder").finish_non_exhaustive()
    }
}
