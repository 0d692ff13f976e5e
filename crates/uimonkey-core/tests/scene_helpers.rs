//! Tree helpers expressed over the `Scene` trait.

use uimonkey_core::capability::{Annotation, Capability, Control, ScrollAxes};
use uimonkey_core::event::{EventKind, EventKinds, PointerEventData};
use uimonkey_core::geometry::{Rect, Vec2};
use uimonkey_core::matcher::{CapabilityMatcher, Matcher, NameMatcher, PathMatcher};
use uimonkey_core::scene::{
    annotations_of, control_of, describe_node, event_handler, execute, execute_hierarchy,
    hierarchy_path, is_active_in_hierarchy, is_self_or_descendant, scroll_axes_of, Scene,
};
use uimonkey_harness::{NodeSpec, TestScene};

fn menu() -> (TestScene, [uimonkey_core::NodeId; 4]) {
    let mut scene = TestScene::new();
    let canvas = scene.add_root(NodeSpec::new("Canvas"));
    let panel = scene.add_child(
        canvas,
        NodeSpec::new("Panel")
            .rect(Rect::new(0.0, 0.0, 500.0, 500.0))
            .capability(Capability::handler("DropZone", EventKinds::DROP))
            .capability(Capability::scroll_view(ScrollAxes::BOTH)),
    );
    let label = scene.add_child(panel, NodeSpec::new("Label").rect(Rect::new(0.0, 0.0, 50.0, 20.0)));
    let ok = scene.add_child(
        panel,
        NodeSpec::new("Ok")
            .rect(Rect::new(100.0, 100.0, 50.0, 20.0))
            .capability(Capability::selectable(Control::Button))
            .capability(Capability::annotation(Annotation::Ignore)),
    );
    (scene, [canvas, panel, label, ok])
}

#[test]
fn paths_and_ancestry() {
    let (scene, [canvas, panel, label, ok]) = menu();
    assert_eq!(hierarchy_path(&scene, ok), "/Canvas/Panel/Ok");
    assert!(is_self_or_descendant(&scene, label, canvas));
    assert!(is_self_or_descendant(&scene, panel, panel));
    assert!(!is_self_or_descendant(&scene, canvas, panel));
    assert_eq!(describe_node(&scene, ok), "Ok(#4)");
}

#[test]
fn active_in_hierarchy_follows_ancestors() {
    let (mut scene, [canvas, _, label, _]) = menu();
    assert!(is_active_in_hierarchy(&scene, label));
    scene.set_active(canvas, false);
    assert!(!is_active_in_hierarchy(&scene, label));
    assert!(scene.is_active_self(label));
}

#[test]
fn drop_bubbles_to_handling_ancestor() {
    let (mut scene, [_, panel, label, _]) = menu();
    assert_eq!(event_handler(&scene, label, EventKind::Drop), Some(panel));
    let data = PointerEventData::new(0, Vec2::new(10.0, 10.0));
    let receiver = execute_hierarchy(&mut scene, label, EventKind::Drop, &data);
    assert_eq!(receiver, Some(panel));
    assert_eq!(scene.count(panel, EventKind::Drop), 1);
    assert_eq!(scene.count(label, EventKind::Drop), 0);
}

#[test]
fn execute_skips_nodes_without_handler() {
    let (mut scene, [_, _, label, ok]) = menu();
    let data = PointerEventData::default();
    assert!(!execute(&mut scene, label, EventKind::PointerClick, &data));
    assert!(scene.events().is_empty());
    assert!(execute(&mut scene, ok, EventKind::PointerClick, &data));
    assert_eq!(scene.kinds_for(ok), vec![EventKind::PointerClick]);
}

#[test]
fn capability_queries() {
    let (scene, [_, panel, label, ok]) = menu();
    assert_eq!(control_of(&scene, ok), Some(Control::Button));
    assert_eq!(control_of(&scene, label), None);
    assert_eq!(scroll_axes_of(&scene, panel), Some(ScrollAxes::BOTH));
    assert_eq!(annotations_of(&scene, ok).count(), 1);
}

#[test]
fn destroyed_nodes_answer_empty() {
    let (mut scene, [_, panel, _, ok]) = menu();
    scene.destroy(panel);
    assert!(!scene.is_alive(ok));
    assert!(scene.capabilities(ok).is_empty());
    assert_eq!(scene.name(ok), None);
    assert_eq!(describe_node(&scene, ok), "<destroyed>(#4)");
    assert!(!scene.dispatch(ok, EventKind::PointerClick, &PointerEventData::default()));
}

#[test]
fn matchers_against_scene() {
    let (scene, [_, panel, _, ok]) = menu();
    assert!(NameMatcher::new("Ok").is_match(&scene, ok));
    assert!(PathMatcher::new("/**/Ok").is_match(&scene, ok));
    assert!(!PathMatcher::new("/Canvas/Ok").is_match(&scene, ok));
    assert!(CapabilityMatcher::new("ScrollRect").is_match(&scene, panel));
    assert!(
        CapabilityMatcher::new("Button")
            .with_path("/Canvas/*/O?")
            .is_match(&scene, ok)
    );
    assert!(!CapabilityMatcher::new("Button").with_name("Cancel").is_match(&scene, ok));
}

#[test]
fn active_walk_is_preorder_and_prunes_inactive() {
    let (mut scene, [canvas, panel, label, ok]) = menu();
    let order: Vec<_> = uimonkey_core::active_nodes(&scene).collect();
    assert_eq!(order, vec![canvas, panel, label, ok]);
    scene.set_active(panel, false);
    let order: Vec<_> = uimonkey_core::active_nodes(&scene).collect();
    assert_eq!(order, vec![canvas]);
}
