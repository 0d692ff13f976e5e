#![forbid(unsafe_code)]

//! uimonkey public facade crate.
//!
//! Randomized "monkey" testing for interactive scene graphs: find nodes by
//! name, path glob or capability, pick an operable (node, gesture) pair at
//! random, and replay the exact pointer event sequence a human would produce.
//!
//! The host engine implements [`Scene`]. Everything else is driven through a
//! [`Driver`], which owns the clock, the cancellation token, the pointer id
//! pool and the random number generator.
//!
//! ```rust,ignore
//! use uimonkey::prelude::*;
//!
//! uimonkey::init_logging(LogFormat::from_env())?;
//! let config = MonkeyConfig::from_toml_file("monkey.toml")?;
//! let source = CancellationSource::new();
//! let summary = uimonkey::run(&mut my_scene, config, source.token())?;
//! println!("{} actions in {:?}", summary.actions, summary.elapsed);
//! ```

pub mod error;
pub mod logging;

pub use error::{Error, Result};
pub use logging::{LogFormat, init_logging};

// --- Core re-exports -------------------------------------------------------

pub use uimonkey_core::clock::{Clock, DEFAULT_FRAME_INTERVAL, ManualClock, SystemClock};
pub use uimonkey_core::{
    Annotation, CancellationSource, CancellationToken, Cancelled, Capability, CapabilityMatcher,
    CharacterKind, Control, Driver, Env, EventKind, EventKinds, Facet, HitResult, Matcher,
    NameMatcher, NodeId, PathMatcher, PointerEventData, Rect, Scene, ScrollAxes, TextConstraint,
    Vec2,
};

// --- Gesture re-exports ----------------------------------------------------

pub use uimonkey_gesture::{
    ClickAndHoldOperator, ClickOperator, ClickParams, DoubleClickOperator, DragAndDropOperator,
    GestureError, Operator, PointerClickSimulator, PointerDragSimulator, PointerScrollSimulator,
    ScrollWheelOperator, SwipeOperator, TextInputOperator, ToggleOperator, default_operators,
};

// --- Runtime re-exports ----------------------------------------------------

pub use uimonkey_runtime::{
    FindOptions, FinderConfig, FinderError, Found, GestureConfig, Monkey, MonkeyConfig,
    MonkeyError, ObjectFinder, Reason, RunConfig, RunSummary, ScreenshotConfig, ScreenshotHook,
    ScrollPaginator, detect_infinite_loop,
};

/// Run a monkey over `scene` in wall-clock time until the configured
/// lifetime elapses or `cancel` trips.
pub fn run(scene: &mut dyn Scene, config: MonkeyConfig, cancel: CancellationToken) -> Result<RunSummary> {
    let problems = config.validate();
    if !problems.is_empty() {
        return Err(Error::Config(uimonkey_runtime::ConfigError::Invalid(problems)));
    }
    let mut driver = config.run.driver(Box::new(SystemClock::default()), cancel);
    run_with_driver(scene, &mut driver, config)
}

/// [`run`] on a caller-supplied driver, e.g. one on a [`ManualClock`].
pub fn run_with_driver(
    scene: &mut dyn Scene,
    driver: &mut Driver,
    config: MonkeyConfig,
) -> Result<RunSummary> {
    let mut monkey = Monkey::new(config);
    let summary = monkey.run(Env::new(scene, driver), false)?;
    Ok(summary)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CancellationSource, CancellationToken, Driver, Env, Error, FindOptions, LogFormat,
        ManualClock, Monkey, MonkeyConfig, NodeId, ObjectFinder, Operator, Result, RunSummary,
        Scene, SystemClock,
    };

    pub use crate::{core, gesture, runtime};
}

pub use uimonkey_core as core;
pub use uimonkey_gesture as gesture;
pub use uimonkey_runtime as runtime;
