//! Horizontal row scrolling: directional affordances, step scrolls, hover
//! dwell auto-advance and pointer edge nudges.
//!
//! The controller never moves anything itself. It emits [`ScrollRequest`]s
//! for the view to apply and expects the resulting offset back through
//! [`CarouselController::on_scroll`].

use cinerow_model::{ScrollAffordances, ScrollWindow};
use parking_lot::Mutex;
use std::{sync::Arc, time::Duration};
use tokio::sync::{mpsc, watch};
use tracing::{debug, trace};

use crate::{
    config::TimingConfig,
    constants::{carousel, timing},
    task::TaskSlot,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Left,
    Right,
}

impl ScrollDirection {
    fn signum(self) -> f32 {
        match self {
            ScrollDirection::Left => -1.0,
            ScrollDirection::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// Relative scroll the view should apply to the row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub delta: f32,
    pub behavior: ScrollBehavior,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselConfig {
    pub step: f32,
    pub dwell: Duration,
    /// Card width plus gap. When set, hover dwell watches the first and
    /// last visible cards instead of the ends of the list.
    pub item_stride: Option<f32>,
    pub edge_zone: f32,
    pub edge_nudge: f32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            step: carousel::SCROLL_STEP,
            dwell: timing::HOVER_DWELL,
            item_stride: None,
            edge_zone: carousel::EDGE_ZONE,
            edge_nudge: carousel::EDGE_NUDGE,
        }
    }
}

impl CarouselConfig {
    pub fn from_timing(timing: &TimingConfig) -> Self {
        Self {
            dwell: timing.hover_dwell,
            ..Self::default()
        }
    }

    pub fn with_item_stride(mut self, stride: f32) -> Self {
        self.item_stride = (stride > 0.0).then_some(stride);
        self
    }
}

#[derive(Debug, Default)]
struct Layout {
    window: ScrollWindow,
    item_count: usize,
}

#[derive(Debug)]
pub struct CarouselController {
    config: CarouselConfig,
    layout: Mutex<Layout>,
    affordances: watch::Sender<ScrollAffordances>,
    requests: mpsc::UnboundedSender<ScrollRequest>,
    dwell: TaskSlot,
}

impl CarouselController {
    /// Controller plus the receiving end of its scroll requests.
    pub fn new(
        config: CarouselConfig,
    ) -> (Self, mpsc::UnboundedReceiver<ScrollRequest>) {
        let (requests, rx) = mpsc::unbounded_channel();
        let controller = Self {
            config,
            layout: Mutex::new(Layout::default()),
            affordances: watch::Sender::new(ScrollAffordances::default()),
            requests,
            dwell: TaskSlot::new(),
        };
        (controller, rx)
    }

    pub fn subscribe(&self) -> watch::Receiver<ScrollAffordances> {
        self.affordances.subscribe()
    }

    pub fn affordances(&self) -> ScrollAffordances {
        *self.affordances.borrow()
    }

    pub fn window(&self) -> ScrollWindow {
        self.layout.lock().window
    }

    pub fn on_scroll(&self, offset: f32) {
        self.update(|layout| {
            layout.window = ScrollWindow::new(
                offset,
                layout.window.viewport_width,
                layout.window.content_width,
            );
        });
    }

    pub fn on_resize(&self, viewport_width: f32) {
        self.update(|layout| {
            layout.window = ScrollWindow::new(
                layout.window.offset,
                viewport_width,
                layout.window.content_width,
            );
        });
    }

    /// The row's items changed and layout has settled at `content_width`.
    pub fn on_content_changed(&self, content_width: f32, item_count: usize) {
        self.update(|layout| {
            layout.item_count = item_count;
            layout.window = ScrollWindow::new(
                layout.window.offset,
                layout.window.viewport_width,
                content_width,
            );
        });
    }

    pub fn scroll_left(&self) -> bool {
        self.step(ScrollDirection::Left)
    }

    pub fn scroll_right(&self) -> bool {
        self.step(ScrollDirection::Right)
    }

    /// Emit one smooth step in `direction` if the row can move that way.
    pub fn step(&self, direction: ScrollDirection) -> bool {
        if !self.allows(direction) {
            return false;
        }
        self.emit(ScrollRequest {
            delta: direction.signum() * self.config.step,
            behavior: ScrollBehavior::Smooth,
        });
        true
    }

    /// Pointer entered card `index`. Any pending dwell is dropped; an edge
    /// card with room to scroll past it arms a fresh one.
    pub fn on_item_enter(&self, index: usize) {
        self.dwell.cancel();

        let Some(direction) = self.dwell_direction(index) else {
            return;
        };
        trace!(index, ?direction, "arming hover dwell");
        let request = ScrollRequest {
            delta: direction.signum() * self.config.step,
            behavior: ScrollBehavior::Smooth,
        };
        let requests = self.requests.clone();
        self.dwell.arm(self.config.dwell, async move {
            if requests.send(request).is_err() {
                debug!("scroll receiver dropped before dwell fired");
            }
        });
    }

    pub fn on_item_leave(&self, _index: usize) {
        self.dwell.cancel();
    }

    /// Pointer moved to `x`, relative to the row's left edge. Inside either
    /// edge zone the row is nudged a little in that direction.
    pub fn on_pointer_move(&self, x: f32) -> bool {
        let viewport = self.layout.lock().window.viewport_width;
        let direction = if x < self.config.edge_zone {
            ScrollDirection::Left
        } else if x > viewport - self.config.edge_zone {
            ScrollDirection::Right
        } else {
            return false;
        };
        if !self.allows(direction) {
            return false;
        }
        self.emit(ScrollRequest {
            delta: direction.signum() * self.config.edge_nudge,
            behavior: ScrollBehavior::Instant,
        });
        true
    }

    pub fn dwell_pending(&self) -> bool {
        self.dwell.is_armed()
    }

    fn dwell_direction(&self, index: usize) -> Option<ScrollDirection> {
        let layout = self.layout.lock();
        if layout.item_count == 0 || index >= layout.item_count {
            return None;
        }
        let (first, last) = match self.config.item_stride {
            Some(stride) => {
                let visible =
                    layout.window.visible_range(stride, layout.item_count);
                (visible.start, visible.end.saturating_sub(1))
            }
            None => (0, layout.item_count - 1),
        };
        let window = layout.window;
        if index == first && window.can_scroll_left() {
            Some(ScrollDirection::Left)
        } else if index == last && window.can_scroll_right() {
            Some(ScrollDirection::Right)
        } else {
            None
        }
    }

    fn allows(&self, direction: ScrollDirection) -> bool {
        let window = self.layout.lock().window;
        match direction {
            ScrollDirection::Left => window.can_scroll_left(),
            ScrollDirection::Right => window.can_scroll_right(),
        }
    }

    fn update(&self, apply: impl FnOnce(&mut Layout)) {
        let affordances = {
            let mut layout = self.layout.lock();
            apply(&mut layout);
            layout.window.affordances()
        };
        self.affordances.send_if_modified(|current| {
            if *current == affordances {
                return false;
            }
            *current = affordances;
            true
        });
    }

    fn emit(&self, request: ScrollRequest) {
        if self.requests.send(request).is_err() {
            debug!("scroll receiver dropped");
        }
    }
}
