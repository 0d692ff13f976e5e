#![forbid(unsafe_code)]

//! Weighted random choice of one (node, operator) entry.
//!
//! Draws are uniform over the remaining pool. A draw whose node is ignored or
//! unreachable is removed from the pool and the draw is repeated, so one
//! selection never retries the same rejected entry and always terminates.
//! Accepted entries are not removed; the next selection starts from the full
//! list again.

use rand::Rng;
use uimonkey_core::scene::{HitResult, Scene, describe_node};
use uimonkey_gesture::Operator;

use crate::ignore::IgnoreStrategy;
use crate::interactable::{InteractableComponentsFinder, SelectionEntry};
use crate::reachability::ReachabilityStrategy;

/// The entry chosen by [`lottery_operator`].
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'o> {
    pub entry: SelectionEntry<'o>,
    /// Index of `entry` in the list it was drawn from.
    pub index: usize,
    /// Reachability hit at the node's screen point.
    pub hit: Option<HitResult>,
}

/// Every (interactable node, applicable operator) pair in the scene.
pub fn get_lottery_entries<'o>(
    finder: &InteractableComponentsFinder,
    scene: &dyn Scene,
    operators: &'o [Box<dyn Operator>],
) -> Vec<SelectionEntry<'o>> {
    finder.find_components_and_operators(scene, operators).collect()
}

/// Draw one ignored-or-unreachable-free entry, or `None` once the pool is empty.
pub fn lottery_operator<'o, R: Rng + ?Sized>(
    entries: &[SelectionEntry<'o>],
    rng: &mut R,
    scene: &dyn Scene,
    ignore: &dyn IgnoreStrategy,
    reachability: &mut dyn ReachabilityStrategy,
) -> Option<Candidate<'o>> {
    let mut pool: Vec<usize> = (0..entries.len()).collect();
    while !pool.is_empty() {
        let slot = rng.random_range(0..pool.len());
        let index = pool[slot];
        let entry = entries[index];

        if ignore.is_ignored(scene, entry.node) {
            tracing::debug!(
                target: "uimonkey.lottery",
                node = %describe_node(scene, entry.node),
                operator = entry.operator.name(),
                "ignored"
            );
            pool.swap_remove(slot);
            continue;
        }

        let reach = reachability.is_reachable(scene, entry.node);
        if !reach.reachable {
            tracing::debug!(
                target: "uimonkey.lottery",
                node = %describe_node(scene, entry.node),
                operator = entry.operator.name(),
                blocked_by = %reach
                    .hit
                    .map_or_else(|| "nothing".to_string(), |h| describe_node(scene, h.node)),
                "not reachable"
            );
            pool.swap_remove(slot);
            continue;
        }

        return Some(Candidate {
            entry,
            index,
            hit: reach.hit,
        });
    }
    None
}
