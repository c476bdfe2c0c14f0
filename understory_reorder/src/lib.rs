// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_reorder --heading-base-level=0

//! Understory Reorder: a headless drag-to-reorder engine for vertical stacks.
//!
//! A long-press lifts an item: every item shrinks so the whole stack fits the viewport,
//! a floating hover element takes the lifted item's place under the pointer, and the
//! original slot stays behind as a translucent placeholder. Dragging past a neighbor's
//! edge swaps the two, the viewport auto-scrolls while the hover element touches an
//! edge, and releasing flies the hover element home before restoring the resting layout.
//!
//! The engine is renderer-agnostic. It never draws, never walks a view tree, and never
//! reads a clock. Everything it needs from the host is injected as a capability:
//!
//! - [`LayoutHost`]: item bounds, item scale, [`Chrome`] and deferred layout passes.
//! - [`ScrollProvider`]: the vertical scroll offset of the container.
//! - [`AnimationProvider`]: starts and cancels [`Tween`]s and reports completions.
//!
//! Layout always holds the truth. Animations are FLIP-style: after a layout change each
//! element is displaced back to where it used to be ([`Displacement`]) and tweened to
//! identity. The [`Orchestrator`] groups those tweens into transitions with a single
//! completion, and never runs two animations on the same property at once.
//!
//! ## Driving the engine
//!
//! The host forwards input and callbacks to [`DragReorder`]:
//!
//! - pointer down: [`DragReorder::on_press`]; a platform long-press (or the
//!   [`press::LongPressState`] recognizer): [`DragReorder::on_long_press`];
//! - pointer moves, releases and cancels: [`DragReorder::on_move`],
//!   [`DragReorder::on_pointer_up`], [`DragReorder::on_pointer_cancel`];
//! - after committing a layout pass requested by the engine:
//!   [`DragReorder::on_pre_layout`];
//! - animation completions: [`DragReorder::on_animation_finished`];
//! - every frame while dragging, for repeating auto-scroll: [`DragReorder::on_frame`].
//!
//! Order changes and lifecycle notifications are drained with
//! [`DragReorder::take_events`].
//!
//! [`StackLayout`] is a ready-made [`LayoutHost`] for simple stacks and tests.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod animation;
pub mod autoscroll;
mod config;
mod engine;
mod error;
mod host;
mod hover;
mod orchestrator;
pub mod press;
mod reorder;
mod sequence;
mod snapshot;
mod stack;

pub use animation::{AnimatedProperty, AnimationHandle, AnimationProvider, AnimationTarget, Tween};
pub use config::ReorderConfig;
pub use engine::{DragPhase, DragReorder, ReorderEvent};
pub use error::ReorderError;
pub use host::{Chrome, LayoutHost, ScrollProvider};
pub use hover::HoverElement;
pub use orchestrator::{Batch, Orchestrator, TransitionId};
pub use press::PointerId;
pub use reorder::{SwapDirection, neighbor_bounds, swap_test};
pub use sequence::{HasVisualContent, Sequence};
pub use snapshot::{BoundsSnapshot, Displacement};
pub use stack::StackLayout;
