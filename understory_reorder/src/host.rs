// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capabilities the host provides: layout/measurement and scrolling.
//!
//! Both are injected when the engine is built. The engine never walks a view hierarchy
//! to find them.

use kurbo::Rect;

bitflags::bitflags! {
    /// Decorations of the resting layout that are stripped while an item is lifted.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Chrome: u8 {
        /// Outer padding above the first item.
        const OUTER_PADDING  = 0b0000_0001;
        /// An "add item" affordance shown next to the stack.
        const ADD_AFFORDANCE = 0b0000_0010;
    }
}

impl Default for Chrome {
    fn default() -> Self {
        Self::all()
    }
}

/// Layout and measurement of the stacked items.
///
/// Bounds are in content coordinates: the coordinate space of the scrolled content, so
/// an item's viewport position is its bounds shifted up by the current scroll offset.
/// Pointer coordinates handed to the engine live in the same space.
///
/// Mutations (`set_item_scale`, `set_chrome`, `move_item`) are allowed to take effect
/// lazily. After calling [`LayoutHost::request_layout`] the engine does not read bounds
/// again until the host reports the next layout pass through
/// [`DragReorder::on_pre_layout`](crate::DragReorder::on_pre_layout).
pub trait LayoutHost {
    /// Number of laid out items. Must match the attached sequence.
    fn item_count(&self) -> usize;

    /// Bounds of the item at `index`, or `None` when out of range.
    fn bounds_of(&self, index: usize) -> Option<Rect>;

    /// Total height of the laid out content, including padding.
    fn content_height(&self) -> f64;

    /// Height of the visible viewport.
    fn viewport_height(&self) -> f64;

    /// Index of the first item whose bottom edge lies below `y`.
    ///
    /// Returns `None` when `y` is at or below the bottom of the last item. The default
    /// scans linearly; implementations with an offset index should override it.
    fn index_at_y(&self, y: f64) -> Option<usize> {
        (0..self.item_count()).find(|&i| self.bounds_of(i).is_some_and(|r| r.y1 > y))
    }

    /// Multiplies every item's resting size by `scale` (1.0 restores the resting size).
    fn set_item_scale(&mut self, scale: f64);

    /// Shows exactly the given decorations.
    fn set_chrome(&mut self, chrome: Chrome);

    /// Moves the laid out item at `from` to `to`, mirroring a sequence move.
    fn move_item(&mut self, from: usize, to: usize);

    /// Schedules a layout pass.
    fn request_layout(&mut self);
}

/// Access to the scroll container hosting the stack.
pub trait ScrollProvider {
    /// Current vertical scroll offset.
    fn scroll_offset(&self) -> f64;

    /// Scrolls by `delta` (positive scrolls down). Implementations clamp to their range.
    fn scroll_by(&mut self, delta: f64);
}
