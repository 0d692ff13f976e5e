//! Suspension-point behavior of the driver: frame pacing, sleep, cancellation.

use std::time::Duration;

use uimonkey_core::cancellation::CancellationSource;
use uimonkey_core::clock::ManualClock;
use uimonkey_core::driver::{Driver, Env};
use uimonkey_core::scene::Scene;
use uimonkey_harness::{NodeSpec, ScheduledAction, TestScene};

const FRAME: Duration = Duration::from_millis(10);

fn driver(cancel: &CancellationSource) -> Driver {
    Driver::new(Box::new(ManualClock::new(FRAME)), cancel.token()).with_seed(7)
}

#[test]
fn next_frame_advances_clock_and_scene() {
    let source = CancellationSource::new();
    let mut driver = driver(&source);
    let mut scene = TestScene::new();
    driver.next_frame(&mut scene).unwrap();
    driver.next_frame(&mut scene).unwrap();
    assert_eq!(driver.now(), Duration::from_millis(20));
    assert_eq!(driver.frames(), 2);
    assert_eq!(scene.frames(), 2);
}

#[test]
fn sleep_zero_still_yields_one_frame() {
    let source = CancellationSource::new();
    let mut driver = driver(&source);
    let mut scene = TestScene::new();
    driver.sleep(&mut scene, Duration::ZERO).unwrap();
    assert_eq!(driver.frames(), 1);
}

#[test]
fn sleep_covers_requested_duration() {
    let source = CancellationSource::new();
    let mut driver = driver(&source);
    let mut scene = TestScene::new();
    driver.sleep(&mut scene, Duration::from_millis(35)).unwrap();
    assert_eq!(driver.now(), Duration::from_millis(40));
    assert_eq!(driver.frames(), 4);
}

#[test]
fn cancellation_observed_at_suspension_point() {
    let source = CancellationSource::new();
    let mut driver = driver(&source);
    let mut scene = TestScene::new();
    driver.next_frame(&mut scene).unwrap();
    source.cancel();
    assert!(driver.next_frame(&mut scene).is_err());
    assert!(driver.sleep(&mut scene, Duration::from_secs(1)).is_err());
    assert_eq!(driver.frames(), 1);
}

#[test]
fn scheduled_mutation_visible_after_yield() {
    let source = CancellationSource::new();
    let mut driver = driver(&source);
    let mut scene = TestScene::new();
    let root = scene.add_root(NodeSpec::new("Canvas"));
    let popup = scene.add_child(root, NodeSpec::new("Popup"));
    scene.schedule(Duration::from_millis(25), ScheduledAction::Destroy(popup));

    let mut env = Env::new(&mut scene, &mut driver);
    env.sleep(Duration::from_millis(20)).unwrap();
    assert!(env.scene.is_alive(popup));
    env.next_frame().unwrap();
    assert!(!env.scene.is_alive(popup));
}

#[test]
fn reborrowed_env_shares_clock() {
    let mut driver = Driver::manual(1);
    let mut scene = TestScene::new();
    let mut env = Env::new(&mut scene, &mut driver);
    {
        let mut inner = env.reborrow();
        inner.next_frame().unwrap();
    }
    env.next_frame().unwrap();
    assert_eq!(env.driver.frames(), 2);
}

#[test]
fn seeded_drivers_agree() {
    use rand::Rng;
    let mut a = Driver::manual(42);
    let mut b = Driver::manual(42);
    let xs: Vec<u32> = (0..8).map(|_| a.rng().random()).collect();
    let ys: Vec<u32> = (0..8).map(|_| b.rng().random()).collect();
    assert_eq!(xs, ys);
}
