//! Click simulator ordering, timing and robustness.

use std::time::Duration;

use uimonkey_core::capability::{Capability, Control};
use uimonkey_core::driver::{Driver, Env};
use uimonkey_core::event::{EventKind, EventKinds};
use uimonkey_core::geometry::Rect;
use uimonkey_core::scene::NodeId;
use uimonkey_core::cancellation::CancellationSource;
use uimonkey_core::clock::ManualClock;
use uimonkey_gesture::{ClickParams, GestureError, PointerClickSimulator, pointer_click};
use uimonkey_harness::{NodeSpec, Reaction, ScheduledAction, TestScene, capture_logs};

use EventKind::*;

/// A button that also accepts drag-phase events.
fn clickable_and_draggable() -> (TestScene, NodeId) {
    let mut scene = TestScene::new();
    let canvas = scene.add_root(NodeSpec::new("Canvas"));
    let node = scene.add_child(
        canvas,
        NodeSpec::new("Handle")
            .rect(Rect::new(100.0, 100.0, 100.0, 50.0))
            .capability(Capability::selectable(Control::Button))
            .capability(Capability::handler(
                "Draggable",
                EventKinds::INITIALIZE_POTENTIAL_DRAG
                    | EventKinds::BEGIN_DRAG
                    | EventKinds::DRAG
                    | EventKinds::END_DRAG
                    | EventKinds::DROP,
            )),
    );
    (scene, node)
}

fn is_drag_phase(kind: EventKind) -> bool {
    matches!(kind, BeginDrag | Drag | EndDrag | Drop)
}

#[test]
fn single_click_sequence() {
    let (mut scene, node) = clickable_and_draggable();
    let mut driver = Driver::manual(1);
    pointer_click(Env::new(&mut scene, &mut driver), node, None, ClickParams::single()).unwrap();
    assert_eq!(
        scene.kinds_for(node),
        vec![PointerEnter, Select, PointerDown, InitializePotentialDrag, PointerUp, PointerClick, PointerExit]
    );
    assert!(driver.pointers().is_empty());
}

#[test]
fn repeated_clicks_share_one_enter_and_exit() {
    for count in 1..=4u32 {
        let (mut scene, node) = clickable_and_draggable();
        let mut driver = Driver::manual(1);
        let params = ClickParams {
            click_count: count,
            hold: Duration::ZERO,
            interval: Duration::from_millis(30),
        };
        pointer_click(Env::new(&mut scene, &mut driver), node, None, params).unwrap();

        let kinds = scene.kinds_for(node);
        assert_eq!(kinds.first(), Some(&PointerEnter));
        assert_eq!(kinds.last(), Some(&PointerExit));
        assert_eq!(scene.count(node, PointerEnter), 1);
        assert_eq!(scene.count(node, PointerExit), 1);
        assert_eq!(scene.count(node, PointerClick), count as usize);
        assert!(!kinds.iter().copied().any(is_drag_phase));

        let click_counts: Vec<u32> = scene
            .events()
            .iter()
            .filter(|e| e.kind == PointerClick)
            .map(|e| e.click_count)
            .collect();
        assert_eq!(click_counts, (1..=count).collect::<Vec<_>>());
    }
}

#[test]
fn zero_hold_yields_exactly_one_frame() {
    let (mut scene, node) = clickable_and_draggable();
    let mut driver = Driver::manual(1);
    pointer_click(Env::new(&mut scene, &mut driver), node, None, ClickParams::single()).unwrap();
    assert_eq!(driver.frames(), 1);
}

#[test]
fn hold_spans_requested_time() {
    let (mut scene, node) = clickable_and_draggable();
    let mut driver = Driver::manual(1);
    let hold = Duration::from_millis(100);
    pointer_click(Env::new(&mut scene, &mut driver), node, None, ClickParams::hold(hold)).unwrap();
    assert!(driver.now() >= hold);
    let down = scene.events().iter().find(|e| e.kind == PointerDown).map(|e| e.frame);
    let up = scene.events().iter().find(|e| e.kind == PointerUp).map(|e| e.frame);
    assert_eq!(down, Some(0));
    assert!(up.unwrap_or(0) >= 6);
}

#[test]
fn click_destroying_its_target_ends_quietly() {
    let (mut scene, node) = clickable_and_draggable();
    scene.react(node, PointerClick, Reaction::DestroySelf);
    let mut driver = Driver::manual(1);
    let (result, logs) = capture_logs(|| {
        pointer_click(
            Env::new(&mut scene, &mut driver),
            node,
            None,
            ClickParams::double(Duration::from_millis(50)),
        )
    });
    assert!(result.is_ok());
    assert_eq!(scene.count(node, PointerClick), 1);
    assert_eq!(scene.count(node, PointerExit), 0);
    assert!(logs.with_target("uimonkey.gesture").any(|e| e.level == tracing::Level::WARN));
    assert!(driver.pointers().is_empty());
}

#[test]
fn target_destroyed_during_hold_skips_release() {
    let (mut scene, node) = clickable_and_draggable();
    scene.schedule(Duration::from_millis(50), ScheduledAction::Destroy(node));
    let mut driver = Driver::manual(1);
    pointer_click(
        Env::new(&mut scene, &mut driver),
        node,
        None,
        ClickParams::hold(Duration::from_millis(200)),
    )
    .unwrap();
    assert_eq!(
        scene.kinds_for(node),
        vec![PointerEnter, Select, PointerDown, InitializePotentialDrag]
    );
}

#[test]
fn cancellation_stops_click_and_releases_pointer() {
    let (mut scene, node) = clickable_and_draggable();
    let source = CancellationSource::new();
    let mut driver = Driver::new(Box::new(ManualClock::default()), source.token());
    source.cancel();
    let err = pointer_click(Env::new(&mut scene, &mut driver), node, None, ClickParams::single())
        .unwrap_err();
    assert_eq!(err, GestureError::Cancelled);
    assert!(scene.events().is_empty());
    assert!(driver.pointers().is_empty());
}

#[test]
fn nested_gestures_get_distinct_pointer_ids() {
    let (mut scene, node) = clickable_and_draggable();
    let mut driver = Driver::manual(1);
    let outer = driver.pointers().acquire();
    {
        let mut sim = PointerClickSimulator::new(Env::new(&mut scene, &mut driver), node, None);
        assert_eq!(sim.pointer_id(), 1);
        sim.click(ClickParams::single()).unwrap();
    }
    assert!(scene.events().iter().all(|e| e.pointer_id == 1));
    assert_eq!(outer.id(), 0);
    assert_eq!(driver.pointers().in_use(), vec![0]);
}
