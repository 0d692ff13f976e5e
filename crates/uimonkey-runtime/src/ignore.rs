#![forbid(unsafe_code)]

//! Nodes the monkey must never operate.

use uimonkey_core::capability::Annotation;
use uimonkey_core::scene::{NodeId, Scene, annotations_of};

pub trait IgnoreStrategy {
    fn is_ignored(&self, scene: &dyn Scene, node: NodeId) -> bool;
}

/// Ignores nodes carrying an enabled [`Annotation::Ignore`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreAnnotation;

impl IgnoreStrategy for IgnoreAnnotation {
    fn is_ignored(&self, scene: &dyn Scene, node: NodeId) -> bool {
        annotations_of(scene, node).any(|a| matches!(a, Annotation::Ignore))
    }
}

impl<F> IgnoreStrategy for F
where
    F: Fn(&dyn Scene, NodeId) -> bool,
{
    fn is_ignored(&self, scene: &dyn Scene, node: NodeId) -> bool {
        self(scene, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uimonkey_harness::demo_canvas;

    #[test]
    fn annotation_marks_node_ignored() {
        let (scene, ids) = demo_canvas();
        assert!(IgnoreAnnotation.is_ignored(&scene, ids.debug));
        assert!(!IgnoreAnnotation.is_ignored(&scene, ids.play));
    }

    #[test]
    fn closures_act_as_strategies() {
        let (scene, ids) = demo_canvas();
        let play = ids.play;
        let only_play: Box<dyn Fn(&dyn Scene, NodeId) -> bool> = Box::new(move |_, node| node == play);
        assert!(only_play.is_ignored(&scene, ids.play));
        assert!(!only_play.is_ignored(&scene, ids.debug));
    }
}
