// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry snapshots and the displacement animations derived from them.
//!
//! The protocol is always the same: capture item rectangles right before a
//! layout-affecting change, let the host lay out, then compare each item's new rectangle
//! with its captured one. The difference becomes a transient offset and scale that
//! animates back to identity, so items glide from where they were drawn to where they
//! now live instead of jumping.
//!
//! Rectangles are stored relative to the viewport (content bounds minus the scroll
//! offset at capture time), so a scroll between capture and comparison is accounted for.

use hashbrown::HashMap;
use kurbo::{Rect, Vec2};

use crate::animation::{AnimatedProperty, AnimationTarget};
use crate::host::LayoutHost;
use crate::orchestrator::Batch;

const EPSILON: f64 = 1e-6;

fn near(a: f64, b: f64) -> bool {
    let d = a - b;
    d < EPSILON && d > -EPSILON
}

/// Translation and scale that make a rectangle laid out at `new` look like it is at `old`.
///
/// Scaling is about the center of the new rectangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Displacement {
    /// Offset from the new center to the old center.
    pub translation: Vec2,
    /// Old width over new width.
    pub scale_x: f64,
    /// Old height over new height.
    pub scale_y: f64,
}

impl Displacement {
    /// No displacement.
    pub const IDENTITY: Self = Self {
        translation: Vec2::ZERO,
        scale_x: 1.0,
        scale_y: 1.0,
    };

    /// Computes the displacement between two rectangles in the same coordinate space.
    ///
    /// Degenerate (zero-sized) new rectangles get a scale of `1.0`.
    #[must_use]
    pub fn between(old: Rect, new: Rect) -> Self {
        let ratio = |old: f64, new: f64| if new > 0.0 { old / new } else { 1.0 };
        Self {
            translation: old.center() - new.center(),
            scale_x: ratio(old.width(), new.width()),
            scale_y: ratio(old.height(), new.height()),
        }
    }

    /// Returns `true` if applying this displacement would not move anything.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        near(self.translation.x, 0.0)
            && near(self.translation.y, 0.0)
            && near(self.scale_x, 1.0)
            && near(self.scale_y, 1.0)
    }

    /// Adds tweens that animate `target` from this displacement back to identity.
    ///
    /// Components that are already at identity are skipped.
    pub fn push_tweens(&self, target: AnimationTarget, batch: &mut Batch) {
        let components = [
            (AnimatedProperty::TranslationX, self.translation.x),
            (AnimatedProperty::TranslationY, self.translation.y),
            (AnimatedProperty::ScaleX, self.scale_x),
            (AnimatedProperty::ScaleY, self.scale_y),
        ];
        for (property, from) in components {
            if !near(from, property.identity()) {
                batch.push(target, property, from);
            }
        }
    }
}

/// Viewport-relative item rectangles captured at one point in time.
#[derive(Clone, Debug, Default)]
pub struct BoundsSnapshot {
    rects: HashMap<usize, Rect>,
}

impl BoundsSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures every item of `layout` as seen with the given scroll offset.
    #[must_use]
    pub fn capture<L: LayoutHost + ?Sized>(layout: &L, scroll_offset: f64) -> Self {
        Self::capture_indices(layout, scroll_offset, 0..layout.item_count())
    }

    /// Captures only the listed items.
    #[must_use]
    pub fn capture_indices<L, I>(layout: &L, scroll_offset: f64, indices: I) -> Self
    where
        L: LayoutHost + ?Sized,
        I: IntoIterator<Item = usize>,
    {
        let shift = Vec2::new(0.0, scroll_offset);
        let rects = indices
            .into_iter()
            .filter_map(|i| layout.bounds_of(i).map(|r| (i, r - shift)))
            .collect();
        Self { rects }
    }

    /// Captured rectangle of the item at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Rect> {
        self.rects.get(&index).copied()
    }

    /// Number of captured items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Returns `true` if nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Re-keys two entries after the items at `a` and `b` exchanged positions.
    pub fn swap(&mut self, a: usize, b: usize) {
        let ra = self.rects.remove(&a);
        let rb = self.rects.remove(&b);
        if let Some(r) = ra {
            self.rects.insert(b, r);
        }
        if let Some(r) = rb {
            self.rects.insert(a, r);
        }
    }

    /// Drops all captured rectangles.
    pub fn clear(&mut self) {
        self.rects.clear();
    }

    /// Displacement of the item at `index` between this snapshot and the current layout.
    #[must_use]
    pub fn displacement_of<L: LayoutHost + ?Sized>(
        &self,
        layout: &L,
        scroll_offset: f64,
        index: usize,
    ) -> Option<Displacement> {
        let old = self.get(index)?;
        let new = layout.bounds_of(index)? - Vec2::new(0.0, scroll_offset);
        Some(Displacement::between(old, new))
    }

    /// Adds displacement tweens for every captured item that moved or resized.
    ///
    /// Returns the number of items that were displaced.
    pub fn push_displacements<L: LayoutHost + ?Sized>(
        &self,
        layout: &L,
        scroll_offset: f64,
        batch: &mut Batch,
    ) -> usize {
        let mut moved = 0;
        let mut indices: smallvec::SmallVec<[usize; 16]> = self.rects.keys().copied().collect();
        indices.sort_unstable();
        for index in indices {
            let Some(displacement) = self.displacement_of(layout, scroll_offset, index) else {
                continue;
            };
            if !displacement.is_identity() {
                displacement.push_tweens(AnimationTarget::Item(index), batch);
                moved += 1;
            }
        }
        moved
    }
}
