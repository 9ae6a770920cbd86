//! Horizontal scroll window for a row of cards.

use std::ops::Range;

/// Slack applied to the right edge so sub-pixel rounding does not leave a
/// dangling "scroll right" affordance.
pub const SCROLL_EPSILON: f32 = 1.0;

/// Which directional affordances a row should currently show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAffordances {
    pub left: bool,
    pub right: bool,
}

/// `(offset, viewport_width, content_width)` of a horizontally scrolling
/// row.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollWindow {
    pub offset: f32,
    pub viewport_width: f32,
    pub content_width: f32,
}

impl ScrollWindow {
    pub fn new(offset: f32, viewport_width: f32, content_width: f32) -> Self {
        Self {
            offset: offset.max(0.0),
            viewport_width: viewport_width.max(0.0),
            content_width: content_width.max(0.0),
        }
    }

    pub fn can_scroll_left(&self) -> bool {
        self.offset > 0.0
    }

    pub fn can_scroll_right(&self) -> bool {
        self.offset + self.viewport_width < self.content_width - SCROLL_EPSILON
    }

    pub fn affordances(&self) -> ScrollAffordances {
        ScrollAffordances {
            left: self.can_scroll_left(),
            right: self.can_scroll_right(),
        }
    }

    /// Largest offset that still keeps the viewport inside the content.
    pub fn max_offset(&self) -> f32 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    /// Offset after scrolling by `delta`, clamped to the content.
    pub fn offset_after(&self, delta: f32) -> f32 {
        (self.offset + delta).clamp(0.0, self.max_offset())
    }

    /// Indices of items intersecting the viewport, for items laid out at a
    /// fixed `stride` (card width plus gap). Right-partial items count.
    pub fn visible_range(&self, stride: f32, total_items: usize) -> Range<usize> {
        if total_items == 0 || stride <= 0.0 {
            return 0..0;
        }
        let first = (self.offset / stride).floor() as usize;
        let viewport_end = self.offset + self.viewport_width;
        let start = first.min(total_items - 1);
        let end = ((viewport_end / stride).ceil() as usize).min(total_items);
        start..end.max(start + 1)
    }
}
