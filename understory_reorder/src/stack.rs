// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`LayoutHost`] for plain vertical stacks.

use alloc::vec::Vec;

use kurbo::{Rect, Size};

use crate::host::{Chrome, LayoutHost};

/// A [`LayoutHost`] that stacks items top to bottom, centered horizontally.
///
/// Every item has a resting size. A uniform item scale shrinks all of them while an item
/// is lifted, and [`Chrome::OUTER_PADDING`] controls a fixed gap above the first item.
///
/// Like a real toolkit, mutations are deferred: `set_item_scale`, `set_chrome`,
/// `move_item` and size changes only become visible through [`LayoutHost::bounds_of`]
/// after [`StackLayout::layout`] runs. Item offsets come from a prefix-sum cache that is
/// rebuilt from the first dirty index during that pass.
///
/// ```
/// use kurbo::{Rect, Size};
/// use understory_reorder::{Chrome, LayoutHost, StackLayout};
///
/// let mut stack = StackLayout::new(200.0, 300.0).with_padding_top(40.0);
/// stack.push(Size::new(200.0, 100.0));
/// stack.push(Size::new(100.0, 50.0));
/// stack.layout();
///
/// assert_eq!(stack.bounds_of(1), Some(Rect::new(50.0, 140.0, 150.0, 190.0)));
/// assert_eq!(stack.index_at_y(150.0), Some(1));
///
/// // Strip padding and shrink; nothing changes until the next pass.
/// stack.set_chrome(Chrome::empty());
/// stack.set_item_scale(0.5);
/// assert_eq!(stack.content_height(), 190.0);
/// stack.layout();
/// assert_eq!(stack.content_height(), 75.0);
/// ```
#[derive(Clone, Debug)]
pub struct StackLayout {
    sizes: Vec<Size>,
    /// Committed sizes and unscaled bottom edges, relative to the first item's top.
    slots: Vec<Slot>,
    dirty_from: Option<usize>,

    scale: f64,
    next_scale: f64,
    chrome: Chrome,
    next_chrome: Chrome,
    padding_top: f64,

    width: f64,
    viewport_height: f64,
    layout_requested: bool,
}

impl StackLayout {
    /// Creates an empty stack in a container `width` wide, seen through a viewport
    /// `viewport_height` tall.
    #[must_use]
    pub fn new(width: f64, viewport_height: f64) -> Self {
        Self {
            sizes: Vec::new(),
            slots: Vec::new(),
            dirty_from: None,
            scale: 1.0,
            next_scale: 1.0,
            chrome: Chrome::default(),
            next_chrome: Chrome::default(),
            padding_top: 0.0,
            width: width.max(0.0),
            viewport_height: viewport_height.max(0.0),
            layout_requested: false,
        }
    }

    /// Creates a laid out stack of `len` items of the same size.
    #[must_use]
    pub fn uniform(len: usize, size: Size, width: f64, viewport_height: f64) -> Self {
        let mut stack = Self::new(width, viewport_height);
        for _ in 0..len {
            stack.push(size);
        }
        stack.layout();
        stack
    }

    /// Sets the gap shown above the first item while [`Chrome::OUTER_PADDING`] is on.
    #[must_use]
    pub fn with_padding_top(mut self, padding: f64) -> Self {
        self.padding_top = padding.max(0.0);
        self
    }

    /// Appends an item with the given resting size.
    pub fn push(&mut self, size: Size) {
        let index = self.sizes.len();
        self.sizes.push(clamp_size(size));
        self.mark_dirty(index);
    }

    /// Removes the item at `index`, returning its resting size.
    pub fn remove(&mut self, index: usize) -> Option<Size> {
        if index >= self.sizes.len() {
            return None;
        }
        let size = self.sizes.remove(index);
        self.mark_dirty(index);
        Some(size)
    }

    /// Changes the resting size of the item at `index`.
    pub fn set_size(&mut self, index: usize, size: Size) {
        if let Some(slot) = self.sizes.get_mut(index) {
            *slot = clamp_size(size);
            self.mark_dirty(index);
        }
    }

    /// Resting size of the item at `index`.
    #[must_use]
    pub fn size_of(&self, index: usize) -> Option<Size> {
        self.sizes.get(index).copied()
    }

    /// Sets the viewport height.
    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height.max(0.0);
    }

    /// The item scale of the last layout pass.
    #[must_use]
    pub const fn item_scale(&self) -> f64 {
        self.scale
    }

    /// The decorations shown by the last layout pass.
    #[must_use]
    pub const fn chrome(&self) -> Chrome {
        self.chrome
    }

    /// Returns `true` if a layout pass has been requested or changes are pending.
    #[must_use]
    pub fn needs_layout(&self) -> bool {
        self.layout_requested
            || self.dirty_from.is_some()
            || self.next_chrome != self.chrome
            || self.next_scale != self.scale
    }

    /// Runs a layout pass, committing all pending changes.
    ///
    /// Returns `true` if anything was pending.
    pub fn layout(&mut self) -> bool {
        let pending = self.needs_layout();
        self.scale = self.next_scale;
        self.chrome = self.next_chrome;
        self.layout_requested = false;
        self.rebuild_prefix();
        pending
    }

    fn top_inset(&self) -> f64 {
        if self.chrome.contains(Chrome::OUTER_PADDING) {
            self.padding_top
        } else {
            0.0
        }
    }

    fn mark_dirty(&mut self, index: usize) {
        self.dirty_from = Some(self.dirty_from.unwrap_or(index).min(index));
    }

    fn rebuild_prefix(&mut self) {
        let len = self.sizes.len();
        self.slots.truncate(len);
        let Some(dirty_from) = self.dirty_from.take() else {
            return;
        };
        let dirty_from = dirty_from.min(self.slots.len());

        let mut end = if dirty_from == 0 {
            0.0
        } else {
            self.slots[dirty_from - 1].end
        };
        self.slots.truncate(dirty_from);
        for size in &self.sizes[dirty_from..] {
            end += size.height;
            self.slots.push(Slot { size: *size, end });
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct Slot {
    size: Size,
    end: f64,
}

fn clamp_size(size: Size) -> Size {
    // Sizes are expected to be finite; catch misuse in debug builds.
    debug_assert!(
        size.width.is_finite() && size.height.is_finite(),
        "StackLayout sizes must be finite; got {size:?}"
    );
    Size::new(size.width.max(0.0), size.height.max(0.0))
}

impl LayoutHost for StackLayout {
    fn item_count(&self) -> usize {
        self.slots.len()
    }

    fn bounds_of(&self, index: usize) -> Option<Rect> {
        let slot = self.slots.get(index)?;
        let height = slot.size.height * self.scale;
        let width = slot.size.width * self.scale;
        let y1 = self.top_inset() + slot.end * self.scale;
        let x0 = (self.width - width) / 2.0;
        Some(Rect::new(x0, y1 - height, x0 + width, y1))
    }

    fn content_height(&self) -> f64 {
        let total = self.slots.last().map_or(0.0, |slot| slot.end);
        self.top_inset() + total * self.scale
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn index_at_y(&self, y: f64) -> Option<usize> {
        let top = self.top_inset();
        let index = self
            .slots
            .partition_point(|slot| top + slot.end * self.scale <= y);
        (index < self.slots.len()).then_some(index)
    }

    fn set_item_scale(&mut self, scale: f64) {
        debug_assert!(scale > 0.0, "item scale must be positive; got {scale}");
        self.next_scale = scale;
    }

    fn set_chrome(&mut self, chrome: Chrome) {
        self.next_chrome = chrome;
    }

    fn move_item(&mut self, from: usize, to: usize) {
        let len = self.sizes.len();
        if from >= len || to >= len || from == to {
            return;
        }
        if from < to {
            self.sizes[from..=to].rotate_left(1);
        } else {
            self.sizes[to..=from].rotate_right(1);
        }
        self.mark_dirty(from.min(to));
    }

    fn request_layout(&mut self) {
        self.layout_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(heights: &[f64]) -> StackLayout {
        let mut s = StackLayout::new(100.0, 200.0);
        for &h in heights {
            s.push(Size::new(100.0, h));
        }
        s.layout();
        s
    }

    #[test]
    fn offsets_follow_prefix_sums() {
        let s = stack(&[10.0, 20.0, 30.0]);
        assert_eq!(s.item_count(), 3);
        assert_eq!(s.content_height(), 60.0);
        assert_eq!(s.bounds_of(0), Some(Rect::new(0.0, 0.0, 100.0, 10.0)));
        assert_eq!(s.bounds_of(2), Some(Rect::new(0.0, 30.0, 100.0, 60.0)));
        assert_eq!(s.bounds_of(3), None);
    }

    #[test]
    fn index_lookup_uses_bottom_edges() {
        let s = stack(&[10.0, 10.0, 10.0]);
        assert_eq!(s.index_at_y(-5.0), Some(0));
        assert_eq!(s.index_at_y(0.0), Some(0));
        assert_eq!(s.index_at_y(9.9), Some(0));
        assert_eq!(s.index_at_y(10.0), Some(1));
        assert_eq!(s.index_at_y(29.0), Some(2));
        assert_eq!(s.index_at_y(30.0), None);
    }

    #[test]
    fn moves_are_deferred_until_layout() {
        let mut s = stack(&[10.0, 20.0, 30.0]);
        s.move_item(0, 2);
        assert!(s.needs_layout());
        assert_eq!(s.bounds_of(0), Some(Rect::new(0.0, 0.0, 100.0, 10.0)));
        assert!(s.layout());
        assert_eq!(s.bounds_of(0), Some(Rect::new(0.0, 0.0, 100.0, 20.0)));
        assert_eq!(s.bounds_of(2), Some(Rect::new(0.0, 50.0, 100.0, 60.0)));
        assert!(!s.layout());
    }

    #[test]
    fn scale_and_padding_round_trip_exactly() {
        let mut s = stack(&[120.0, 80.0]).with_padding_top(30.0);
        s.layout();
        let before = [s.bounds_of(0), s.bounds_of(1)];

        s.set_item_scale(0.5);
        s.set_chrome(Chrome::empty());
        s.layout();
        assert_eq!(s.bounds_of(0), Some(Rect::new(25.0, 0.0, 75.0, 60.0)));

        s.set_item_scale(1.0);
        s.set_chrome(Chrome::all());
        s.layout();
        assert_eq!([s.bounds_of(0), s.bounds_of(1)], before);
    }

    #[test]
    fn negative_sizes_are_clamped_and_removal_reflows() {
        let mut s = stack(&[10.0, 10.0, 10.0]);
        s.set_size(1, Size::new(100.0, -4.0));
        assert_eq!(s.size_of(1), Some(Size::new(100.0, 0.0)));
        assert_eq!(s.remove(0), Some(Size::new(100.0, 10.0)));
        s.layout();
        assert_eq!(s.item_count(), 2);
        assert_eq!(s.content_height(), 10.0);
    }
}
