#![forbid(unsafe_code)]

//! The monkey control loop.
//!
//! # Run lifecycle
//!
//! ```text
//! Idle -> Stepping -> Stepping -> ... -> Finished   (lifetime reached, one-step mode)
//!                                    \-> Cancelled  (token tripped)
//!                                    \-> Faulted    (InfiniteLoop, NoInteractiveComponent,
//!                                                    screenshot or gesture failure)
//! ```
//!
//! Each step enumerates every (interactable node, applicable operator) entry,
//! draws one with [`lottery_operator`], and performs it. A step that finds
//! nothing to do is not an error; a run that finds nothing for longer than
//! the configured grace is.
//!
//! Cancellation always wins: any failure observed while the token is tripped
//! is reported as [`MonkeyError::Cancelled`].

use std::path::PathBuf;

use uimonkey_core::driver::Env;
use uimonkey_core::scene::{NodeId, Scene, describe_node};
use uimonkey_gesture::Operator;
use web_time::Duration;

use crate::config::MonkeyConfig;
use crate::error::MonkeyError;
use crate::ignore::{IgnoreAnnotation, IgnoreStrategy};
use crate::interactable::{InteractableComponentsFinder, SelectionEntry};
use crate::loop_detect::LoopHistory;
use crate::lottery::{get_lottery_entries, lottery_operator};
use crate::reachability::{ReachabilityStrategy, TopmostHit};
use crate::screenshot::{ScreenshotHook, screenshot_path};

/// What one step operated on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub node: NodeId,
    pub operator: &'static str,
    /// Index of the entry in the step's lottery list.
    pub index: usize,
    /// Screenshot written before the operation, if any.
    pub screenshot: Option<PathBuf>,
}

/// Result of [`Monkey::run_step`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Number of lottery entries the step drew from.
    pub entries: usize,
    /// `None` when nothing was operable.
    pub selection: Option<Selection>,
}

impl StepOutcome {
    pub fn acted(&self) -> bool {
        self.selection.is_some()
    }
}

/// Totals of a completed [`Monkey::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: u64,
    /// Steps that performed an operation.
    pub actions: u64,
    pub elapsed: Duration,
    pub last_selection: Option<Selection>,
}

pub struct Monkey {
    config: MonkeyConfig,
    operators: Vec<Box<dyn Operator>>,
    interactables: InteractableComponentsFinder,
    ignore: Box<dyn IgnoreStrategy>,
    reachability: Box<dyn ReachabilityStrategy>,
    screenshots: Option<Box<dyn ScreenshotHook>>,
    screenshot_seq: u32,
}

impl Monkey {
    /// A monkey with the operator set described by `config.gestures`.
    pub fn new(config: MonkeyConfig) -> Self {
        let operators = config.gestures.operators();
        Self {
            config,
            operators,
            interactables: InteractableComponentsFinder::new(),
            ignore: Box::new(IgnoreAnnotation),
            reachability: Box::new(TopmostHit::new()),
            screenshots: None,
            screenshot_seq: 0,
        }
    }

    #[must_use]
    pub fn with_operators(mut self, operators: Vec<Box<dyn Operator>>) -> Self {
        self.operators = operators;
        self
    }

    #[must_use]
    pub fn with_interactables(mut self, finder: InteractableComponentsFinder) -> Self {
        self.interactables = finder;
        self
    }

    #[must_use]
    pub fn with_ignore(mut self, strategy: Box<dyn IgnoreStrategy>) -> Self {
        self.ignore = strategy;
        self
    }

    #[must_use]
    pub fn with_reachability(mut self, strategy: Box<dyn ReachabilityStrategy>) -> Self {
        self.reachability = strategy;
        self
    }

    /// Install a screenshot hook. Paths come from `config.screenshots`, or
    /// [`ScreenshotConfig::default`](crate::config::ScreenshotConfig::default) when
    /// that section is absent.
    #[must_use]
    pub fn with_screenshot_hook(mut self, hook: Box<dyn ScreenshotHook>) -> Self {
        self.screenshots = Some(hook);
        self
    }

    pub fn config(&self) -> &MonkeyConfig {
        &self.config
    }

    pub fn operators(&self) -> &[Box<dyn Operator>] {
        &self.operators
    }

    /// Every entry the next step would draw from.
    pub fn lottery_entries<'s>(&'s self, scene: &dyn Scene) -> Vec<SelectionEntry<'s>> {
        get_lottery_entries(&self.interactables, scene, &self.operators)
    }

    /// Enumerate, select and operate once.
    pub fn run_step(&mut self, mut env: Env<'_>) -> Result<StepOutcome, MonkeyError> {
        env.driver.check_cancelled()?;

        let entries = get_lottery_entries(&self.interactables, &*env.scene, &self.operators);
        let candidate = lottery_operator(
            &entries,
            env.driver.rng(),
            &*env.scene,
            self.ignore.as_ref(),
            self.reachability.as_mut(),
        );
        let Some(candidate) = candidate else {
            tracing::debug!(
                target: "uimonkey.monkey",
                entries = entries.len(),
                "no interactive component"
            );
            return Ok(StepOutcome {
                entries: entries.len(),
                selection: None,
            });
        };

        let node = candidate.entry.node;
        let operator = candidate.entry.operator;

        let screenshot = match self.screenshots.as_mut() {
            Some(hook) => {
                let shots = self.config.screenshots.clone().unwrap_or_default();
                let path = screenshot_path(&shots.directory, &shots.prefix, self.screenshot_seq);
                self.screenshot_seq = self.screenshot_seq.wrapping_add(1);
                hook.take(&path).map_err(MonkeyError::Screenshot)?;
                Some(path)
            }
            None => None,
        };

        tracing::info!(
            target: "uimonkey.monkey",
            node = %describe_node(&*env.scene, node),
            operator = operator.name(),
            index = candidate.index,
            entries = entries.len(),
            "operate"
        );
        operator.operate(env.reborrow(), node, candidate.hit.as_ref())?;

        Ok(StepOutcome {
            entries: entries.len(),
            selection: Some(Selection {
                node,
                operator: operator.name(),
                index: candidate.index,
                screenshot,
            }),
        })
    }

    /// Step until the lifetime elapses, or once in `one_step_mode`.
    pub fn run(&mut self, mut env: Env<'_>, one_step_mode: bool) -> Result<RunSummary, MonkeyError> {
        let started = env.now();
        let mut summary = RunSummary::default();

        tracing::info!(
            target: "uimonkey.monkey",
            lifetime_ms = self.config.run.lifetime_ms,
            delay_ms = self.config.run.delay_ms,
            operators = self.operators.len(),
            one_step_mode,
            "run started"
        );

        let result = self.run_loop(env.reborrow(), started, one_step_mode, &mut summary);
        summary.elapsed = env.now() - started;

        match result {
            Ok(()) => {
                tracing::info!(
                    target: "uimonkey.monkey",
                    steps = summary.steps,
                    actions = summary.actions,
                    elapsed_ms = summary.elapsed.as_millis() as u64,
                    "run finished"
                );
                Ok(summary)
            }
            Err(_) if env.driver.cancellation().is_cancelled() => Err(MonkeyError::Cancelled),
            Err(err) => {
                tracing::error!(
                    target: "uimonkey.monkey",
                    steps = summary.steps,
                    error = %err,
                    "run failed"
                );
                Err(err)
            }
        }
    }

    fn run_loop(
        &mut self,
        mut env: Env<'_>,
        started: Duration,
        one_step_mode: bool,
        summary: &mut RunSummary,
    ) -> Result<(), MonkeyError> {
        let lifetime = self.config.run.lifetime();
        let delay = self.config.run.delay();
        let grace = self.config.run.no_interactive_grace();
        let mut history = LoopHistory::new(self.config.run.loop_window);
        let mut idle_since: Option<Duration> = None;

        while env.now() - started < lifetime {
            env.driver.check_cancelled()?;
            let step_started = env.now();
            let outcome = self.run_step(env.reborrow())?;
            summary.steps += 1;
            env.sleep(delay)?;

            match outcome.selection {
                Some(selection) => {
                    summary.actions += 1;
                    idle_since = None;
                    let looped = history.push(selection.index);
                    summary.last_selection = Some(selection);
                    if looped {
                        return Err(MonkeyError::InfiniteLoop {
                            window: history.snapshot(),
                        });
                    }
                }
                None if !grace.is_zero() => {
                    let since = *idle_since.get_or_insert(step_started);
                    let idle = env.now() - since;
                    if idle > grace {
                        return Err(MonkeyError::NoInteractiveComponent { elapsed: idle });
                    }
                }
                None => {}
            }

            if one_step_mode {
                break;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Monkey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Monkey")
            .field("config", &self.config)
            .field("operators", &self.operators)
            .field("screenshot_seq", &self.screenshot_seq)
            .finish_non_exhaustive()
    }
}

impl Default for Monkey {
    fn default() -> Self {
        Self::new(MonkeyConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_outcome_reports_action() {
        let idle = StepOutcome::default();
        assert!(!idle.acted());
        let acted = StepOutcome {
            entries: 3,
            selection: Some(Selection {
                node: NodeId(4),
                operator: "click",
                index: 1,
                screenshot: None,
            }),
        };
        assert!(acted.acted());
    }

    #[test]
    fn default_monkey_uses_full_operator_set() {
        let monkey = Monkey::default();
        assert_eq!(monkey.operators().len(), 8);
        assert_eq!(monkey.config().run.loop_window, 10);
    }

    #[test]
    fn with_operators_replaces_set() {
        let monkey = Monkey::default().with_operators(Vec::new());
        assert!(monkey.operators().is_empty());
    }
}
