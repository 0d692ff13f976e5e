//! The facade entry points and unified error.

use std::time::Duration;

use uimonkey::prelude::*;
use uimonkey::{Error, FinderError, Reason};
use uimonkey_harness::single_button;

fn quick_config() -> MonkeyConfig {
    let mut config = MonkeyConfig::default();
    config.run.lifetime_ms = 100;
    config.run.delay_ms = 1;
    config.run.loop_window = 0;
    config.run.seed = Some(9);
    config.gestures.hold_ms = 20;
    config.gestures.double_click_interval_ms = 20;
    config
}

#[test]
fn run_with_manual_driver() {
    let (mut scene, _) = single_button("Play");
    let mut driver = Driver::manual(3);
    let mut config = quick_config();
    config.run.lifetime_ms = 200;

    let summary = uimonkey::run_with_driver(&mut scene, &mut driver, config).unwrap();

    assert!(summary.steps >= 1);
    assert!(summary.elapsed >= Duration::from_millis(200));
}

#[test]
fn run_in_wall_clock_time() {
    let (mut scene, button) = single_button("Play");
    let source = CancellationSource::new();

    let summary = uimonkey::run(&mut scene, quick_config(), source.token()).unwrap();

    assert!(summary.actions >= 1);
    assert_eq!(summary.last_selection.map(|s| s.node), Some(button));
}

#[test]
fn invalid_config_is_rejected_before_running() {
    let (mut scene, _) = single_button("Play");
    let mut config = quick_config();
    config.gestures.drag_speed = -1.0;

    let err = uimonkey::run(&mut scene, config, CancellationToken::never()).unwrap_err();

    assert_eq!(err.error_type(), "config");
    assert!(err.to_string().contains("drag_speed"));
    assert!(scene.events().is_empty());
}

#[test]
fn cancelled_run_is_a_cancellation() {
    let (mut scene, _) = single_button("Play");
    let source = CancellationSource::new();
    source.cancel();

    let err = uimonkey::run(&mut scene, quick_config(), source.token()).unwrap_err();

    assert!(matches!(err, Error::Cancelled));
    assert!(err.is_cancellation());
}

fn find_play(scene: &mut dyn Scene, driver: &mut Driver, name: &str) -> uimonkey::Result<NodeId> {
    let mut finder = ObjectFinder::new(Duration::from_millis(100));
    let found = finder.find_by_name(Env::new(scene, driver), name, FindOptions::OPERABLE, None)?;
    Ok(found.node)
}

#[test]
fn finder_errors_flow_through_question_mark() {
    let (mut scene, button) = single_button("Play");
    let mut driver = Driver::manual(1);

    assert_eq!(find_play(&mut scene, &mut driver, "Play").unwrap(), button);

    let err = find_play(&mut scene, &mut driver, "Pause").unwrap_err();
    match err {
        Error::Finder(FinderError::TimedOut { reason, .. }) => assert_eq!(reason, Reason::NotFound),
        other => panic!("expected finder timeout, got {other:?}"),
    }
}
