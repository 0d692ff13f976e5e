#![forbid(unsafe_code)]

//! Ready-made scenes shared by several test suites.

use uimonkey_core::capability::{
    Annotation, Capability, CharacterKind, Control, ScrollAxes, TextConstraint,
};
use uimonkey_core::event::EventKinds;
use uimonkey_core::geometry::{Rect, Vec2};
use uimonkey_core::scene::NodeId;

use crate::scene::{NodeSpec, TestScene};

/// Node ids of [`demo_canvas`].
#[derive(Debug, Clone, Copy)]
pub struct DemoIds {
    pub canvas: NodeId,
    pub play: NodeId,
    pub settings: NodeId,
    pub mute: NodeId,
    pub name_field: NodeId,
    pub list: NodeId,
    pub card: NodeId,
    pub bin: NodeId,
    pub debug: NodeId,
}

/// A small menu: two buttons, a toggle, a text field, a vertical list, a
/// draggable card with a drop target, and an ignored debug button.
pub fn demo_canvas() -> (TestScene, DemoIds) {
    let mut scene = TestScene::new();
    let canvas = scene.add_root(NodeSpec::new("Canvas").rect(Rect::new(0.0, 0.0, 1920.0, 1080.0)).raycast_target(false));
    let play = scene.add_child(
        canvas,
        NodeSpec::new("Play")
            .rect(Rect::new(100.0, 100.0, 200.0, 80.0))
            .capability(Capability::selectable(Control::Button)),
    );
    let settings = scene.add_child(
        canvas,
        NodeSpec::new("Settings")
            .rect(Rect::new(100.0, 200.0, 200.0, 80.0))
            .capability(Capability::selectable(Control::Button)),
    );
    let mute = scene.add_child(
        canvas,
        NodeSpec::new("Mute")
            .rect(Rect::new(100.0, 300.0, 80.0, 80.0))
            .capability(Capability::selectable(Control::Toggle)),
    );
    let name_field = scene.add_child(
        canvas,
        NodeSpec::new("Name")
            .rect(Rect::new(400.0, 100.0, 300.0, 60.0))
            .capability(Capability::selectable(Control::InputField))
            .capability(Capability::annotation(Annotation::TextInput(TextConstraint {
                kind: CharacterKind::Digits,
                min_length: 3,
                max_length: 6,
            }))),
    );
    let list = scene.add_child(
        canvas,
        NodeSpec::new("List")
            .rect(Rect::new(800.0, 100.0, 300.0, 600.0))
            .scroll(Vec2::ZERO)
            .capability(Capability::scroll_view(ScrollAxes::VERTICAL)),
    );
    let bin = scene.add_child(
        canvas,
        NodeSpec::new("Bin")
            .rect(Rect::new(1500.0, 800.0, 200.0, 200.0))
            .capability(Capability::handler("DropZone", EventKinds::DROP)),
    );
    let card = scene.add_child(
        canvas,
        NodeSpec::new("Card")
            .rect(Rect::new(1200.0, 100.0, 150.0, 200.0))
            .capability(Capability::handler(
                "Draggable",
                EventKinds::BEGIN_DRAG | EventKinds::DRAG | EventKinds::END_DRAG,
            ))
            .capability(Capability::annotation(Annotation::DropTargets(vec![bin]))),
    );
    let debug = scene.add_child(
        canvas,
        NodeSpec::new("Debug")
            .rect(Rect::new(1800.0, 0.0, 100.0, 50.0))
            .capability(Capability::selectable(Control::Button))
            .capability(Capability::annotation(Annotation::Ignore)),
    );
    let ids = DemoIds {
        canvas,
        play,
        settings,
        mute,
        name_field,
        list,
        card,
        bin,
        debug,
    };
    (scene, ids)
}

/// A single button centered in the screen.
pub fn single_button(name: &str) -> (TestScene, NodeId) {
    let mut scene = TestScene::new();
    let canvas = scene.add_root(NodeSpec::new("Canvas"));
    let button = scene.add_child(
        canvas,
        NodeSpec::new(name)
            .rect(Rect::new(860.0, 490.0, 200.0, 100.0))
            .capability(Capability::selectable(Control::Button)),
    );
    (scene, button)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uimonkey_core::scene::{Scene, hierarchy_path};

    #[test]
    fn demo_canvas_layout_is_hit_testable() {
        let (scene, ids) = demo_canvas();
        let mut hits = Vec::new();
        let play_point = scene.screen_point(ids.play).unwrap_or_default();
        scene.hit_test(play_point, &mut hits);
        assert_eq!(hits.first().map(|h| h.node), Some(ids.play));
        assert_eq!(hierarchy_path(&scene, ids.card), "/Canvas/Card");
        assert_eq!(scene.children(ids.canvas).len(), 8);
    }
}
