// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge-triggered auto-scroll.
//!
//! While the hover element overlaps the top or bottom edge of the viewport, the list
//! scrolls by a fixed step. [`AutoScroller::update`] evaluates the edges on every move;
//! [`AutoScroller::tick`] keeps scrolling at a fixed cadence while the pointer rests in
//! an edge zone.
//!
//! ```
//! use understory_reorder::autoscroll::{AutoScroller, Edge, edge_test};
//!
//! // Viewport 400 tall at offset 0, hover element 100 tall.
//! assert_eq!(edge_test(10.0, 100.0, 0.0, 400.0), Some(Edge::Top));
//! assert_eq!(edge_test(390.0, 100.0, 0.0, 400.0), Some(Edge::Bottom));
//! assert_eq!(edge_test(200.0, 100.0, 0.0, 400.0), None);
//!
//! let mut scroller = AutoScroller::new(15.0, 16);
//! assert_eq!(scroller.update(390.0, 100.0, 0.0, 400.0), Some(15.0));
//! assert_eq!(scroller.tick(0), Some(15.0));
//! assert_eq!(scroller.tick(8), None);
//! assert_eq!(scroller.tick(16), Some(15.0));
//! ```

/// Viewport edge the hover element is pressing against.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Scroll up.
    Top,
    /// Scroll down.
    Bottom,
}

/// Decides whether the hover element, centered on `pointer_y`, overlaps a viewport edge.
///
/// `pointer_y` and `scroll_offset` are in content coordinates. The top edge wins if the
/// hover element is taller than the viewport.
#[must_use]
pub fn edge_test(
    pointer_y: f64,
    hover_height: f64,
    scroll_offset: f64,
    viewport_height: f64,
) -> Option<Edge> {
    let half = hover_height / 2.0;
    if pointer_y - half < scroll_offset {
        Some(Edge::Top)
    } else if pointer_y + half > scroll_offset + viewport_height {
        Some(Edge::Bottom)
    } else {
        None
    }
}

/// Auto-scroll state for one drag session.
#[derive(Clone, Debug)]
pub struct AutoScroller {
    step: f64,
    interval_ms: u64,
    edge: Option<Edge>,
    last_tick: Option<u64>,
}

impl AutoScroller {
    /// Creates an idle scroller moving `step` pixels per scroll, at most once every
    /// `interval_ms` when ticking.
    #[must_use]
    pub fn new(step: f64, interval_ms: u64) -> Self {
        Self {
            step: step.max(0.0),
            interval_ms,
            edge: None,
            last_tick: None,
        }
    }

    /// Re-evaluates the edges and returns the scroll delta to apply now, if any.
    pub fn update(
        &mut self,
        pointer_y: f64,
        hover_height: f64,
        scroll_offset: f64,
        viewport_height: f64,
    ) -> Option<f64> {
        self.refresh(pointer_y, hover_height, scroll_offset, viewport_height);
        self.delta()
    }

    /// Re-evaluates the edges without producing a scroll step, e.g. after a timed
    /// scroll moved the content.
    pub fn refresh(
        &mut self,
        pointer_y: f64,
        hover_height: f64,
        scroll_offset: f64,
        viewport_height: f64,
    ) {
        self.edge = edge_test(pointer_y, hover_height, scroll_offset, viewport_height);
    }

    /// Returns the delta for a timed repeat if an edge is active and the interval since
    /// the previous tick has elapsed.
    pub fn tick(&mut self, timestamp: u64) -> Option<f64> {
        self.edge?;
        if let Some(last) = self.last_tick {
            if timestamp.saturating_sub(last) < self.interval_ms {
                return None;
            }
        }
        self.last_tick = Some(timestamp);
        self.delta()
    }

    /// Stops scrolling until the next [`AutoScroller::update`] finds an edge.
    pub fn stop(&mut self) {
        self.edge = None;
        self.last_tick = None;
    }

    /// The active edge, if any.
    #[must_use]
    pub const fn edge(&self) -> Option<Edge> {
        self.edge
    }

    /// Returns `true` while an edge is active.
    #[must_use]
    pub const fn is_scrolling(&self) -> bool {
        self.edge.is_some()
    }

    /// Scroll step in pixels.
    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    fn delta(&self) -> Option<f64> {
        match self.edge? {
            Edge::Top => Some(-self.step),
            Edge::Bottom => Some(self.step),
        }
    }
}
