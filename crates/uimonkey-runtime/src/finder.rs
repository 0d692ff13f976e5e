#![forbid(unsafe_code)]

//! Polling search for a single node.
//!
//! # State machine
//!
//! ```text
//! Searching --exactly one--------------> Found
//! Searching --more than one------------> MultipleMatching (immediate)
//! Searching --none, page available-----> Searching (next page, no wait)
//! Searching --none, no page------------> wait backoff(attempt) -> Searching
//! Searching --none, deadline passed----> TimedOut(reason)
//! ```
//!
//! Each attempt walks every active node of every root. Inactive nodes are
//! pruned together with their subtrees. Across attempts the most meaningful
//! failure [`Reason`] is kept; `NotFound` yields to any other reason.
//! Waits never extend past the deadline.

use uimonkey_core::backoff::Backoff;
use uimonkey_core::driver::Env;
use uimonkey_core::matcher::{Matcher, NameMatcher, PathMatcher};
use uimonkey_core::scene::{HitResult, NodeId, Scene, active_nodes};
use web_time::Duration;

use crate::error::{FinderError, FinderResult, Reason};
use crate::interactable::InteractableComponentsFinder;
use crate::paginator::Paginator;
use crate::reachability::{ReachabilityStrategy, TopmostHit};

/// Filters applied to structural matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FindOptions {
    pub reachable: bool,
    pub interactable: bool,
}

impl FindOptions {
    pub const ANY: FindOptions = FindOptions {
        reachable: false,
        interactable: false,
    };
    pub const OPERABLE: FindOptions = FindOptions {
        reachable: true,
        interactable: true,
    };
}

/// A located node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Found {
    pub node: NodeId,
    /// Reachability hit, when reachability was checked.
    pub hit: Option<HitResult>,
}

pub struct ObjectFinder {
    timeout: Duration,
    backoff: Backoff,
    reachability: Box<dyn ReachabilityStrategy>,
    interactables: InteractableComponentsFinder,
}

impl ObjectFinder {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            backoff: Backoff::default(),
            reachability: Box::new(TopmostHit::new()),
            interactables: InteractableComponentsFinder::new(),
        }
    }

    #[must_use]
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    #[must_use]
    pub fn with_reachability(mut self, strategy: Box<dyn ReachabilityStrategy>) -> Self {
        self.reachability = strategy;
        self
    }

    #[must_use]
    pub fn with_interactables(mut self, finder: InteractableComponentsFinder) -> Self {
        self.interactables = finder;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn find_by_name(
        &mut self,
        env: Env<'_>,
        name: &str,
        options: FindOptions,
        paginator: Option<&mut dyn Paginator>,
    ) -> FinderResult<Found> {
        self.find_by_matcher(env, &NameMatcher::new(name), options, paginator)
    }

    pub fn find_by_path(
        &mut self,
        env: Env<'_>,
        pattern: &str,
        options: FindOptions,
        paginator: Option<&mut dyn Paginator>,
    ) -> FinderResult<Found> {
        self.find_by_matcher(env, &PathMatcher::new(pattern), options, paginator)
    }

    pub fn find_by_matcher(
        &mut self,
        mut env: Env<'_>,
        matcher: &dyn Matcher,
        options: FindOptions,
        mut paginator: Option<&mut dyn Paginator>,
    ) -> FinderResult<Found> {
        let started = env.now();
        let deadline = started + self.timeout;
        let mut reason = Reason::NotFound;
        let mut attempt = 0u32;

        if let Some(p) = paginator.as_deref_mut() {
            p.reset(env.reborrow())?;
        }

        loop {
            env.driver.check_cancelled()?;
            match self.search_once(&*env.scene, matcher, options) {
                Ok(found) => {
                    tracing::debug!(
                        target: "uimonkey.finder",
                        query = %matcher.describe(),
                        node = %found.node,
                        attempts = attempt + 1,
                        "found"
                    );
                    return Ok(found);
                }
                Err((Reason::MultipleMatching, count)) => {
                    return Err(FinderError::MultipleMatching {
                        query: matcher.describe(),
                        count,
                    });
                }
                Err((r, _)) => {
                    if r.outranks(reason) {
                        reason = r;
                    }
                }
            }

            let now = env.now();
            if now >= deadline {
                let elapsed = now - started;
                tracing::debug!(
                    target: "uimonkey.finder",
                    query = %matcher.describe(),
                    %reason,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "timed out"
                );
                return Err(FinderError::TimedOut {
                    query: matcher.describe(),
                    reason,
                    elapsed,
                });
            }

            if let Some(p) = paginator.as_deref_mut()
                && p.next_page(env.reborrow())?
            {
                continue;
            }

            let wait = self.backoff.delay(attempt).min(deadline - now);
            attempt = attempt.saturating_add(1);
            env.sleep(wait)?;
        }
    }

    /// One pass over the scene. On failure returns the reason and the number
    /// of surviving candidates.
    fn search_once(
        &mut self,
        scene: &dyn Scene,
        matcher: &dyn Matcher,
        options: FindOptions,
    ) -> Result<Found, (Reason, usize)> {
        let matches: Vec<NodeId> = active_nodes(scene)
            .filter(|n| matcher.is_match(scene, *n))
            .collect();
        if matches.is_empty() {
            return Err((Reason::NotFound, 0));
        }

        let mut candidates: Vec<Found> = Vec::with_capacity(matches.len());
        for node in matches {
            if options.reachable {
                let r = self.reachability.is_reachable(scene, node);
                if r.reachable {
                    candidates.push(Found { node, hit: r.hit });
                }
            } else {
                candidates.push(Found { node, hit: None });
            }
        }
        if candidates.is_empty() {
            return Err((Reason::NotReachable, 0));
        }

        if options.interactable {
            candidates.retain(|c| self.interactables.is_node_interactable(scene, c.node));
            if candidates.is_empty() {
                return Err((Reason::NotInteractable, 0));
            }
        }

        match candidates.as_slice() {
            [only] => Ok(*only),
            many => Err((Reason::MultipleMatching, many.len())),
        }
    }
}

impl std::fmt::Debug for ObjectFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectFinder")
            .field("timeout", &self.timeout)
            .field("backoff", &self.backoff)
            .finish_non_exhaustive()
    }
}
