// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test doubles shared by the integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use kurbo::{Point, Size};
use understory_reorder::{
    AnimatedProperty, AnimationHandle, AnimationProvider, AnimationTarget, DragReorder,
    HasVisualContent, LayoutHost, ReorderConfig, ScrollProvider, StackLayout, Tween,
};

/// A reorderable item identified by a number.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tile(pub u32);

impl HasVisualContent for Tile {
    type Content = u32;

    fn visual_content(&self) -> u32 {
        self.0
    }
}

/// `Tile(0)..Tile(len)`.
pub fn tiles(len: usize) -> Vec<Tile> {
    (0_u32..).take(len).map(Tile).collect()
}

/// Records every request and keeps animations running until the test finishes them.
#[derive(Debug, Default)]
pub struct RecordingAnimator {
    next: u64,
    pub running: Vec<(AnimationHandle, Tween)>,
    pub started: Vec<Tween>,
    pub cancelled: Vec<AnimationHandle>,
    pub assigned: Vec<(AnimationTarget, AnimatedProperty, f64)>,
}

impl RecordingAnimator {
    /// Removes and returns every running handle.
    pub fn take_running(&mut self) -> Vec<AnimationHandle> {
        self.running.drain(..).map(|(handle, _)| handle).collect()
    }

    /// Running tweens for `target`.
    pub fn running_for(&self, target: AnimationTarget) -> Vec<Tween> {
        self.running
            .iter()
            .filter(|(_, t)| t.target == target)
            .map(|(_, t)| *t)
            .collect()
    }

    /// The last value assigned directly to a property.
    pub fn last_assigned(
        &self,
        target: AnimationTarget,
        property: AnimatedProperty,
    ) -> Option<f64> {
        self.assigned
            .iter()
            .rev()
            .find(|(t, p, _)| *t == target && *p == property)
            .map(|(_, _, v)| *v)
    }
}

impl AnimationProvider for RecordingAnimator {
    fn animate(&mut self, tween: &Tween) -> AnimationHandle {
        self.next += 1;
        let handle = AnimationHandle(self.next);
        self.running.push((handle, *tween));
        self.started.push(*tween);
        handle
    }

    fn cancel(&mut self, handle: AnimationHandle) {
        self.running.retain(|(h, _)| *h != handle);
        self.cancelled.push(handle);
    }

    fn set_value(&mut self, target: AnimationTarget, property: AnimatedProperty, value: f64) {
        self.assigned.push((target, property, value));
    }
}

/// A scroll container clamped to `0..=max`.
#[derive(Debug, Default)]
pub struct ClampedScroll {
    pub offset: f64,
    pub max: f64,
    pub requests: Vec<f64>,
}

impl ClampedScroll {
    pub fn new(max: f64) -> Self {
        Self {
            max,
            ..Self::default()
        }
    }
}

impl ScrollProvider for ClampedScroll {
    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn scroll_by(&mut self, delta: f64) {
        self.requests.push(delta);
        self.offset = (self.offset + delta).clamp(0.0, self.max);
    }
}

pub type Engine = DragReorder<Tile, StackLayout, ClampedScroll, RecordingAnimator>;

/// An engine over `heights.len()` tiles, 100 wide, in a viewport `viewport` tall.
pub fn engine_with_heights(heights: &[f64], viewport: f64) -> Engine {
    engine_with_config(heights, viewport, ReorderConfig::default())
}

/// Like [`engine_with_heights`], with a custom configuration.
pub fn engine_with_config(heights: &[f64], viewport: f64, config: ReorderConfig) -> Engine {
    let mut layout = StackLayout::new(100.0, viewport);
    for &h in heights {
        layout.push(Size::new(100.0, h));
    }
    layout.layout();
    let max = (layout.content_height() - viewport).max(0.0);
    let mut engine = DragReorder::new(
        layout,
        ClampedScroll::new(max),
        RecordingAnimator::default(),
        config,
    );
    engine.attach_sequence(tiles(heights.len()));
    engine
}

/// An engine over `len` tiles of the same height.
pub fn engine(len: usize, height: f64, viewport: f64) -> Engine {
    engine_with_heights(&vec![height; len], viewport)
}

/// Runs requested layout passes and finishes animations until nothing is pending.
pub fn pump(engine: &mut Engine) {
    loop {
        let mut progressed = false;
        if engine.layout().needs_layout() {
            engine.layout_mut().layout();
            engine.on_pre_layout();
            progressed = true;
        }
        let handles = engine.animator_mut().take_running();
        if !handles.is_empty() {
            progressed = true;
            for handle in handles {
                engine.on_animation_finished(handle);
            }
        }
        if !progressed {
            break;
        }
    }
}

/// Like [`pump`], but never finishes the animations in `held`.
pub fn pump_holding(engine: &mut Engine, held: &[AnimationHandle]) {
    loop {
        let mut progressed = false;
        if engine.layout().needs_layout() {
            engine.layout_mut().layout();
            engine.on_pre_layout();
            progressed = true;
        }
        let running = &mut engine.animator_mut().running;
        let handles: Vec<_> = running
            .iter()
            .map(|(handle, _)| *handle)
            .filter(|handle| !held.contains(handle))
            .collect();
        running.retain(|(handle, _)| held.contains(handle));
        if !handles.is_empty() {
            progressed = true;
            for handle in handles {
                engine.on_animation_finished(handle);
            }
        }
        if !progressed {
            break;
        }
    }
}

/// Presses at `at`, fires the long-press and lets the lift-off finish.
pub fn lift(engine: &mut Engine, at: Point) {
    engine.on_press(None, at);
    engine.on_long_press();
    pump(engine);
}

/// Current bounds of every laid out item.
pub fn all_bounds(engine: &Engine) -> Vec<kurbo::Rect> {
    let layout = engine.layout();
    (0..layout.item_count())
        .filter_map(|i| layout.bounds_of(i))
        .collect()
}
