#![forbid(unsafe_code)]

//! Search, selection and the monkey loop.
//!
//! # Role in uimonkey
//! `uimonkey-runtime` decides *what* to operate. The [`ObjectFinder`] polls
//! the scene for one node matching a query, with backoff, optional
//! pagination and a deadline. The [`Monkey`] repeatedly enumerates every
//! operable (node, operator) pair, draws one at random while rejecting
//! ignored and occluded nodes, and hands it to `uimonkey-gesture`.
//!
//! # Failure model
//! Search failures carry a [`Reason`] so callers can tell a missing node from
//! a blocked one. Run failures are [`MonkeyError`]s; cancellation always
//! reports as `Cancelled`.

pub mod config;
pub mod error;
pub mod finder;
pub mod ignore;
pub mod interactable;
pub mod loop_detect;
pub mod lottery;
pub mod monkey;
pub mod paginator;
pub mod reachability;
pub mod screenshot;

pub use config::{ConfigError, FinderConfig, GestureConfig, MonkeyConfig, RunConfig, ScreenshotConfig};
pub use error::{FinderError, FinderResult, MonkeyError, Reason};
pub use finder::{FindOptions, Found, ObjectFinder};
pub use ignore::{IgnoreAnnotation, IgnoreStrategy};
pub use interactable::{InteractableComponentsFinder, SelectionEntry, is_interactable};
pub use loop_detect::{LoopHistory, detect_infinite_loop};
pub use lottery::{Candidate, get_lottery_entries, lottery_operator};
pub use monkey::{Monkey, RunSummary, Selection, StepOutcome};
pub use paginator::{Paginator, ScrollPaginator};
pub use reachability::{AlwaysReachable, Reachability, ReachabilityStrategy, TopmostHit};
pub use screenshot::{ScreenshotHook, screenshot_path};
