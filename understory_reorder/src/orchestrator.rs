// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Batches per-element animations into transitions with a single completion.
//!
//! ## Usage
//!
//! 1) Collect tweens into a [`Batch`].
//! 2) Start it with [`Orchestrator::run`], tagging it with whatever the caller needs to
//!    know on completion.
//! 3) Forward every provider completion to [`Orchestrator::on_animation_finished`].
//! 4) Drain finished transitions with [`Orchestrator::take_completed`].
//!
//! At most one animation runs per (target, property). Starting a new one, or assigning
//! the property directly through [`Orchestrator::interrupt`], cancels the previous
//! animation and counts it as finished for the transition that owned it, so earlier
//! transitions still complete.
//!
//! ```
//! use core::time::Duration;
//! use understory_reorder::{
//!     AnimatedProperty, AnimationHandle, AnimationProvider, AnimationTarget, Batch,
//!     Orchestrator, Tween,
//! };
//!
//! #[derive(Default)]
//! struct Counter(u64);
//! impl AnimationProvider for Counter {
//!     fn animate(&mut self, _: &Tween) -> AnimationHandle {
//!         self.0 += 1;
//!         AnimationHandle(self.0)
//!     }
//!     fn cancel(&mut self, _: AnimationHandle) {}
//!     fn set_value(&mut self, _: AnimationTarget, _: AnimatedProperty, _: f64) {}
//! }
//!
//! let mut animator = Counter::default();
//! let mut orchestrator = Orchestrator::new();
//!
//! // An empty batch resolves immediately.
//! let empty = orchestrator.run(&mut animator, Batch::new(Duration::from_millis(300)), "noop");
//! assert_eq!(orchestrator.take_completed(), Some((empty, "noop")));
//!
//! let mut batch = Batch::new(Duration::from_millis(300));
//! batch.push(AnimationTarget::Item(0), AnimatedProperty::TranslationY, 40.0);
//! batch.push(AnimationTarget::Item(1), AnimatedProperty::TranslationY, -40.0);
//! let id = orchestrator.run(&mut animator, batch, "swap");
//!
//! orchestrator.on_animation_finished(AnimationHandle(1));
//! assert_eq!(orchestrator.take_completed(), None);
//! orchestrator.on_animation_finished(AnimationHandle(2));
//! assert_eq!(orchestrator.take_completed(), Some((id, "swap")));
//! ```

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::time::Duration;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::animation::{
    AnimatedProperty, AnimationHandle, AnimationProvider, AnimationTarget, Tween,
};

/// Identifier of a logical transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionId(u64);

type PropertyKey = (AnimationTarget, AnimatedProperty);

/// A set of tweens that start together and share one duration.
#[derive(Clone, Debug)]
pub struct Batch {
    duration: Duration,
    tweens: SmallVec<[Tween; 8]>,
}

impl Batch {
    /// Creates an empty batch whose tweens all last `duration`.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            tweens: SmallVec::new(),
        }
    }

    /// Adds a tween from `from` back to the property's identity value.
    pub fn push(&mut self, target: AnimationTarget, property: AnimatedProperty, from: f64) {
        self.push_between(target, property, from, property.identity());
    }

    /// Adds a tween between two explicit values.
    pub fn push_between(
        &mut self,
        target: AnimationTarget,
        property: AnimatedProperty,
        from: f64,
        to: f64,
    ) {
        self.tweens.push(Tween {
            target,
            property,
            from,
            to,
            duration: self.duration,
        });
    }

    /// The shared duration.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Number of tweens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// Returns `true` if the batch has no tweens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// The collected tweens.
    #[must_use]
    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }
}

#[derive(Clone, Debug)]
struct Transition<T> {
    id: TransitionId,
    tag: T,
    pending: usize,
}

#[derive(Copy, Clone, Debug)]
struct Running {
    transition: TransitionId,
    key: PropertyKey,
}

/// Tracks running transitions and the animation currently driving each property.
#[derive(Clone, Debug)]
pub struct Orchestrator<T> {
    next_id: u64,
    transitions: Vec<Transition<T>>,
    running: HashMap<AnimationHandle, Running>,
    active: HashMap<PropertyKey, AnimationHandle>,
    completed: VecDeque<(TransitionId, T)>,
}

impl<T: Copy> Orchestrator<T> {
    /// Creates an idle orchestrator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            transitions: Vec::new(),
            running: HashMap::new(),
            active: HashMap::new(),
            completed: VecDeque::new(),
        }
    }

    /// Starts every tween of `batch` as one transition tagged `tag`.
    ///
    /// An empty batch completes immediately; its completion is still queued exactly once.
    pub fn run<A: AnimationProvider + ?Sized>(
        &mut self,
        animator: &mut A,
        batch: Batch,
        tag: T,
    ) -> TransitionId {
        let id = TransitionId(self.next_id);
        self.next_id += 1;
        self.transitions.push(Transition {
            id,
            tag,
            pending: batch.len(),
        });

        for tween in &batch.tweens {
            let key = (tween.target, tween.property);
            self.supersede(animator, key);
            let handle = animator.animate(tween);
            self.active.insert(key, handle);
            self.running.insert(
                handle,
                Running {
                    transition: id,
                    key,
                },
            );
        }

        tracing::trace!(transition = id.0, tweens = batch.len(), "transition started");
        self.finish_if_done(id);
        id
    }

    /// Assigns `value` directly, cancelling any animation of that property.
    pub fn interrupt<A: AnimationProvider + ?Sized>(
        &mut self,
        animator: &mut A,
        target: AnimationTarget,
        property: AnimatedProperty,
        value: f64,
    ) {
        self.supersede(animator, (target, property));
        animator.set_value(target, property, value);
    }

    /// Records that the provider finished `handle`.
    ///
    /// Unknown or already cancelled handles are ignored.
    pub fn on_animation_finished(&mut self, handle: AnimationHandle) {
        self.retire(handle);
    }

    /// Pops the oldest completed transition.
    pub fn take_completed(&mut self) -> Option<(TransitionId, T)> {
        self.completed.pop_front()
    }

    /// Returns `true` if the transition has not completed yet.
    #[must_use]
    pub fn is_running(&self, id: TransitionId) -> bool {
        self.transitions.iter().any(|t| t.id == id)
    }

    /// Returns `true` while an animation drives the given property.
    #[must_use]
    pub fn is_animating(&self, target: AnimationTarget, property: AnimatedProperty) -> bool {
        self.active.contains_key(&(target, property))
    }

    /// Returns `true` when no transition is in flight.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Follows two items that exchanged indices so their running animations stay keyed
    /// to the right element.
    pub fn swap_items(&mut self, a: usize, b: usize) {
        let remap = |target: AnimationTarget| match target {
            AnimationTarget::Item(i) if i == a => AnimationTarget::Item(b),
            AnimationTarget::Item(i) if i == b => AnimationTarget::Item(a),
            other => other,
        };
        self.active = self
            .active
            .drain()
            .map(|((target, property), handle)| ((remap(target), property), handle))
            .collect();
        for running in self.running.values_mut() {
            running.key.0 = remap(running.key.0);
        }
    }

    fn supersede<A: AnimationProvider + ?Sized>(&mut self, animator: &mut A, key: PropertyKey) {
        if let Some(previous) = self.active.remove(&key) {
            animator.cancel(previous);
            self.retire(previous);
        }
    }

    fn retire(&mut self, handle: AnimationHandle) {
        let Some(running) = self.running.remove(&handle) else {
            return;
        };
        if self.active.get(&running.key) == Some(&handle) {
            self.active.remove(&running.key);
        }
        if let Some(transition) = self
            .transitions
            .iter_mut()
            .find(|t| t.id == running.transition)
        {
            transition.pending = transition.pending.saturating_sub(1);
        }
        self.finish_if_done(running.transition);
    }

    fn finish_if_done(&mut self, id: TransitionId) {
        let Some(pos) = self
            .transitions
            .iter()
            .position(|t| t.id == id && t.pending == 0)
        else {
            return;
        };
        let transition = self.transitions.remove(pos);
        tracing::trace!(transition = id.0, "transition finished");
        self.completed.push_back((transition.id, transition.tag));
    }
}

impl<T: Copy> Default for Orchestrator<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        next: u64,
        started: Vec<Tween>,
        cancelled: Vec<AnimationHandle>,
        assigned: Vec<(AnimationTarget, AnimatedProperty, f64)>,
    }

    impl AnimationProvider for Recorder {
        fn animate(&mut self, tween: &Tween) -> AnimationHandle {
            self.next += 1;
            self.started.push(*tween);
            AnimationHandle(self.next)
        }

        fn cancel(&mut self, handle: AnimationHandle) {
            self.cancelled.push(handle);
        }

        fn set_value(&mut self, target: AnimationTarget, property: AnimatedProperty, value: f64) {
            self.assigned.push((target, property, value));
        }
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn empty_batch_completes_exactly_once() {
        let mut animator = Recorder::default();
        let mut orch = Orchestrator::new();
        let id = orch.run(&mut animator, Batch::new(ms(300)), 7_u8);
        assert!(!orch.is_running(id));
        assert_eq!(orch.take_completed(), Some((id, 7)));
        assert_eq!(orch.take_completed(), None);
        assert!(animator.started.is_empty());
    }

    #[test]
    fn completion_waits_for_all_constituents() {
        let mut animator = Recorder::default();
        let mut orch = Orchestrator::new();
        let mut batch = Batch::new(ms(300));
        batch.push(AnimationTarget::Item(0), AnimatedProperty::TranslationY, 10.0);
        batch.push(AnimationTarget::Item(0), AnimatedProperty::ScaleX, 2.0);
        batch.push(AnimationTarget::Item(0), AnimatedProperty::ScaleY, 2.0);
        let id = orch.run(&mut animator, batch, ());
        assert_eq!(animator.started.len(), 3);
        assert!(animator.started.iter().all(|t| t.duration == ms(300)));
        assert_eq!(animator.started[1].to, 1.0);

        orch.on_animation_finished(AnimationHandle(1));
        orch.on_animation_finished(AnimationHandle(3));
        assert!(orch.is_running(id));
        assert_eq!(orch.take_completed(), None);

        orch.on_animation_finished(AnimationHandle(2));
        assert_eq!(orch.take_completed(), Some((id, ())));
        assert!(orch.is_idle());

        // Late duplicate reports are ignored.
        orch.on_animation_finished(AnimationHandle(2));
        assert_eq!(orch.take_completed(), None);
    }

    #[test]
    fn new_animation_supersedes_previous_one() {
        let mut animator = Recorder::default();
        let mut orch = Orchestrator::new();

        let mut first = Batch::new(ms(300));
        first.push(AnimationTarget::Item(2), AnimatedProperty::TranslationY, 50.0);
        let first_id = orch.run(&mut animator, first, 'a');

        let mut second = Batch::new(ms(300));
        second.push(AnimationTarget::Item(2), AnimatedProperty::TranslationY, -50.0);
        let second_id = orch.run(&mut animator, second, 'b');

        assert_eq!(animator.cancelled, [AnimationHandle(1)]);
        // The superseded transition still completes.
        assert_eq!(orch.take_completed(), Some((first_id, 'a')));
        assert!(orch.is_running(second_id));

        // A stale completion for the cancelled animation changes nothing.
        orch.on_animation_finished(AnimationHandle(1));
        assert!(orch.is_running(second_id));
        orch.on_animation_finished(AnimationHandle(2));
        assert_eq!(orch.take_completed(), Some((second_id, 'b')));
    }

    #[test]
    fn interrupt_assigns_and_cancels() {
        let mut animator = Recorder::default();
        let mut orch = Orchestrator::new();
        let mut batch = Batch::new(ms(100));
        batch.push(AnimationTarget::Hover, AnimatedProperty::TranslationX, 30.0);
        let id = orch.run(&mut animator, batch, 0_u8);
        assert!(orch.is_animating(AnimationTarget::Hover, AnimatedProperty::TranslationX));

        orch.interrupt(
            &mut animator,
            AnimationTarget::Hover,
            AnimatedProperty::TranslationX,
            0.0,
        );
        assert!(!orch.is_animating(AnimationTarget::Hover, AnimatedProperty::TranslationX));
        assert_eq!(animator.cancelled, [AnimationHandle(1)]);
        assert_eq!(
            animator.assigned,
            [(AnimationTarget::Hover, AnimatedProperty::TranslationX, 0.0)]
        );
        assert_eq!(orch.take_completed(), Some((id, 0)));

        // Nothing running: only the assignment happens.
        orch.interrupt(&mut animator, AnimationTarget::Item(0), AnimatedProperty::Opacity, 0.5);
        assert_eq!(animator.cancelled.len(), 1);
    }

    #[test]
    fn swapped_items_keep_their_running_animations() {
        let mut animator = Recorder::default();
        let mut orch = Orchestrator::new();
        let mut batch = Batch::new(ms(300));
        batch.push(AnimationTarget::Item(1), AnimatedProperty::TranslationY, 20.0);
        orch.run(&mut animator, batch, ());

        orch.swap_items(1, 2);

        // The element that moved to index 2 still owns handle 1.
        let mut next = Batch::new(ms(300));
        next.push(AnimationTarget::Item(2), AnimatedProperty::TranslationY, 5.0);
        orch.run(&mut animator, next, ());
        assert_eq!(animator.cancelled, [AnimationHandle(1)]);
    }
}
