// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The animation capability consumed by the engine.
//!
//! Every animated value is a transient offset on top of the laid out geometry:
//! translations animate towards `0.0` and scales towards `1.0`, scaling about the
//! center of the element. The engine therefore never has to read back in-flight values;
//! layout always holds the truth and animations only hide the jump.

use core::time::Duration;

/// The element an animation applies to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AnimationTarget {
    /// The item currently at this index of the sequence.
    Item(usize),
    /// The floating hover element.
    Hover,
}

/// A single animatable property.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AnimatedProperty {
    /// Horizontal offset from the laid out position.
    TranslationX,
    /// Vertical offset from the laid out position.
    TranslationY,
    /// Horizontal scale about the element center.
    ScaleX,
    /// Vertical scale about the element center.
    ScaleY,
    /// Opacity in `0.0..=1.0`.
    Opacity,
}

impl AnimatedProperty {
    /// The resting value of this property.
    #[must_use]
    pub const fn identity(self) -> f64 {
        match self {
            Self::TranslationX | Self::TranslationY => 0.0,
            Self::ScaleX | Self::ScaleY | Self::Opacity => 1.0,
        }
    }
}

/// One property animation request.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tween {
    /// Element to animate.
    pub target: AnimationTarget,
    /// Property to animate.
    pub property: AnimatedProperty,
    /// Start value.
    pub from: f64,
    /// End value.
    pub to: f64,
    /// Duration of the animation.
    pub duration: Duration,
}

/// Opaque handle for a running animation, chosen by the provider.
///
/// Handles must be unique among animations that are running at the same time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationHandle(pub u64);

/// Host animation facility.
///
/// Completion is reported back to the engine by the host, on the same thread, through
/// [`DragReorder::on_animation_finished`](crate::DragReorder::on_animation_finished).
/// Cancelled animations must not be reported; if they are, the report is ignored.
pub trait AnimationProvider {
    /// Starts an animation and returns its handle.
    fn animate(&mut self, tween: &Tween) -> AnimationHandle;

    /// Stops a running animation where it is.
    fn cancel(&mut self, handle: AnimationHandle);

    /// Assigns a property immediately, without animating.
    fn set_value(&mut self, target: AnimationTarget, property: AnimatedProperty, value: f64);
}
