// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The floating stand-in for the lifted item.

use kurbo::{Point, Rect};

use crate::animation::AnimationTarget;
use crate::orchestrator::Batch;
use crate::snapshot::Displacement;

/// Floating representation of the lifted item, in viewport coordinates.
///
/// The controller only keeps state: content, resting bounds and visibility. The host
/// draws `content` at [`HoverElement::bounds`] plus whatever offset and scale the
/// animation provider currently applies to [`AnimationTarget::Hover`].
#[derive(Clone, Debug)]
pub struct HoverElement<C> {
    content: Option<C>,
    bounds: Rect,
    visible: bool,
}

impl<C> HoverElement<C> {
    /// Creates a hidden, empty hover element.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            content: None,
            bounds: Rect::ZERO,
            visible: false,
        }
    }

    /// Re-skins the element with `content` and shows it at `bounds`.
    pub fn show(&mut self, content: C, bounds: Rect) {
        self.content = Some(content);
        self.bounds = bounds;
        self.visible = true;
    }

    /// Places the element so that its center sits on `center`. Not animated.
    ///
    /// Returns the new bounds.
    pub fn move_to(&mut self, center: Point) -> Rect {
        self.bounds = Rect::from_center_size(center, self.bounds.size());
        self.bounds
    }

    /// Moves the element to `bounds`, adding tweens to `batch` so that it glides there
    /// from where it is currently drawn.
    pub fn animate_to(&mut self, bounds: Rect, batch: &mut Batch) {
        Displacement::between(self.bounds, bounds).push_tweens(AnimationTarget::Hover, batch);
        self.bounds = bounds;
    }

    /// Hides the element. The content is kept until the next [`HoverElement::show`].
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Current resting bounds.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Returns `true` while shown.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Content of the last lifted item.
    #[must_use]
    pub fn content(&self) -> Option<&C> {
        self.content.as_ref()
    }
}

impl<C> Default for HoverElement<C> {
    fn default() -> Self {
        Self::new()
    }
}
