#![forbid(unsafe_code)]

//! Paging through scroll containers during a search.
//!
//! A paginator owns a forward-only cursor. The finder calls
//! [`reset`](Paginator::reset) once when a search starts and
//! [`next_page`](Paginator::next_page) after each failed attempt; it never
//! rewinds between pages.

use uimonkey_core::cancellation::Cancelled;
use uimonkey_core::driver::Env;
use uimonkey_core::geometry::Vec2;
use uimonkey_core::scene::NodeId;

pub trait Paginator {
    /// Rewind to the first page.
    fn reset(&mut self, env: Env<'_>) -> Result<(), Cancelled>;

    /// Advance one page. `Ok(false)` when already on the last page.
    fn next_page(&mut self, env: Env<'_>) -> Result<bool, Cancelled>;
}

/// Steps a scroll container's normalized position by a fixed page size.
#[derive(Debug, Clone)]
pub struct ScrollPaginator {
    container: NodeId,
    step: f32,
    vertical: bool,
}

impl ScrollPaginator {
    /// `step` is the page size as a fraction of the scrollable range.
    pub fn vertical(container: NodeId, step: f32) -> Self {
        Self {
            container,
            step: step.clamp(f32::EPSILON, 1.0),
            vertical: true,
        }
    }

    pub fn horizontal(container: NodeId, step: f32) -> Self {
        Self {
            vertical: false,
            ..Self::vertical(container, step)
        }
    }

    fn axis(&self, position: Vec2) -> f32 {
        if self.vertical { position.y } else { position.x }
    }

    fn with_axis(&self, position: Vec2, value: f32) -> Vec2 {
        if self.vertical {
            Vec2::new(position.x, value)
        } else {
            Vec2::new(value, position.y)
        }
    }
}

impl Paginator for ScrollPaginator {
    fn reset(&mut self, mut env: Env<'_>) -> Result<(), Cancelled> {
        let Some(position) = env.scene.scroll_position(self.container) else {
            return Ok(());
        };
        let start = self.with_axis(position, 0.0);
        env.scene.set_scroll_position(self.container, start);
        env.next_frame()
    }

    fn next_page(&mut self, mut env: Env<'_>) -> Result<bool, Cancelled> {
        let Some(position) = env.scene.scroll_position(self.container) else {
            return Ok(false);
        };
        let current = self.axis(position);
        if current >= 1.0 - f32::EPSILON {
            return Ok(false);
        }
        let next = (current + self.step).min(1.0);
        tracing::debug!(
            target: "uimonkey.finder",
            container = %self.container,
            from = current,
            to = next,
            "next page"
        );
        env.scene
            .set_scroll_position(self.container, self.with_axis(position, next));
        env.next_frame()?;
        Ok(true)
    }
}
