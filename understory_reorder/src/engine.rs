// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag state machine.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};

use crate::ReorderError;
use crate::animation::{AnimatedProperty, AnimationHandle, AnimationProvider, AnimationTarget};
use crate::autoscroll::AutoScroller;
use crate::config::ReorderConfig;
use crate::host::{Chrome, LayoutHost, ScrollProvider};
use crate::hover::HoverElement;
use crate::orchestrator::{Batch, Orchestrator, TransitionId};
use crate::press::{PRIMARY_POINTER, PointerId};
use crate::reorder::{neighbor_bounds, swap_test};
use crate::sequence::{HasVisualContent, Sequence};
use crate::snapshot::BoundsSnapshot;

/// Lifecycle of a drag gesture.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DragPhase {
    /// No drag in progress.
    #[default]
    Idle,
    /// An item was lifted; the lift-off transition is still running.
    Lifted,
    /// The lifted item follows the pointer.
    Dragging,
    /// The pointer was released; the item is flying back and the layout is restored.
    Settling,
}

impl DragPhase {
    /// Returns `true` while the pointer drives the lifted item.
    #[must_use]
    pub const fn follows_pointer(self) -> bool {
        matches!(self, Self::Lifted | Self::Dragging)
    }
}

/// Notifications for the host, drained with [`DragReorder::take_events`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReorderEvent<T> {
    /// An item was lifted at `index`.
    DragStarted {
        /// Index of the lifted item.
        index: usize,
    },
    /// A swap was committed; carries the full new order.
    OrderChanged(Vec<T>),
    /// The drag fully settled and the resting layout is back.
    DragSettled,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Purpose {
    LiftOff,
    Swap,
    Release,
    Restore,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum PendingLayout {
    LiftOff,
    Swap,
    Restore,
}

/// Transient state of one drag gesture, from lift-off until settled.
#[derive(Clone, Debug)]
struct DragSession {
    mobile_index: usize,
    down_point: Point,
    last_pointer: Point,
    active_pointer: Option<PointerId>,
    scale_ratio: f64,
    /// Viewport top of the lifted item before lift-off.
    origin_top: Option<f64>,
    lift_transition: Option<TransitionId>,
    bounds_snapshot: Option<BoundsSnapshot>,
    pending_layout: Option<PendingLayout>,
    /// The pointer moved while geometry was stale.
    pointer_stale: bool,
    release_requested: bool,
}

/// Drag-to-reorder engine for a vertical stack.
///
/// The engine is driven entirely by the host, on one thread:
///
/// - gesture input: [`on_press`](Self::on_press), [`on_long_press`](Self::on_long_press),
///   [`on_move`](Self::on_move), [`on_pointer_up`](Self::on_pointer_up),
///   [`on_pointer_cancel`](Self::on_pointer_cancel);
/// - the one-shot layout hook: [`on_pre_layout`](Self::on_pre_layout), called once the
///   layout pass requested through [`LayoutHost::request_layout`] has been committed;
/// - animation completions: [`on_animation_finished`](Self::on_animation_finished);
/// - an optional frame clock for repeating auto-scroll: [`on_frame`](Self::on_frame).
///
/// Pointer positions are in content coordinates (the space of
/// [`LayoutHost::bounds_of`]). Internal inconsistencies never surface as errors: they
/// are logged and the drag simply does nothing further.
///
/// ## Example
///
/// ```
/// use kurbo::{Point, Size};
/// use understory_reorder::{
///     AnimatedProperty, AnimationHandle, AnimationProvider, AnimationTarget, DragPhase,
///     DragReorder, HasVisualContent, ReorderConfig, ReorderEvent, ScrollProvider,
///     StackLayout, Tween,
/// };
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Photo(&'static str);
/// impl HasVisualContent for Photo {
///     type Content = &'static str;
///     fn visual_content(&self) -> &'static str { self.0 }
/// }
///
/// struct Fixed;
/// impl ScrollProvider for Fixed {
///     fn scroll_offset(&self) -> f64 { 0.0 }
///     fn scroll_by(&mut self, _: f64) {}
/// }
///
/// // Finishes every animation instantly by never starting one.
/// #[derive(Default)]
/// struct Instant(Vec<AnimationHandle>, u64);
/// impl AnimationProvider for Instant {
///     fn animate(&mut self, _: &Tween) -> AnimationHandle {
///         self.1 += 1;
///         self.0.push(AnimationHandle(self.1));
///         AnimationHandle(self.1)
///     }
///     fn cancel(&mut self, h: AnimationHandle) { self.0.retain(|x| *x != h); }
///     fn set_value(&mut self, _: AnimationTarget, _: AnimatedProperty, _: f64) {}
/// }
///
/// fn pump(engine: &mut DragReorder<Photo, StackLayout, Fixed, Instant>) {
///     loop {
///         if engine.layout_mut().layout() {
///             engine.on_pre_layout();
///         }
///         let done: Vec<_> = engine.animator_mut().0.drain(..).collect();
///         if done.is_empty() && !engine.layout().needs_layout() {
///             break;
///         }
///         for handle in done {
///             engine.on_animation_finished(handle);
///         }
///     }
/// }
///
/// let layout = StackLayout::uniform(3, Size::new(100.0, 100.0), 100.0, 300.0);
/// let mut engine = DragReorder::new(layout, Fixed, Instant::default(), ReorderConfig::default());
/// engine.attach_sequence(vec![Photo("a"), Photo("b"), Photo("c")]);
///
/// engine.on_press(None, Point::new(50.0, 150.0));
/// engine.on_long_press();
/// pump(&mut engine);
/// assert_eq!(engine.phase(), DragPhase::Dragging);
///
/// assert!(engine.on_move(None, Point::new(50.0, 210.0)));
/// pump(&mut engine);
/// engine.on_pointer_up(None);
/// pump(&mut engine);
///
/// assert_eq!(engine.phase(), DragPhase::Idle);
/// assert_eq!(engine.sequence().as_slice(), &[Photo("a"), Photo("c"), Photo("b")]);
/// let events = engine.take_events();
/// assert!(events.contains(&ReorderEvent::DragSettled));
/// ```
pub struct DragReorder<T, L, S, A>
where
    T: HasVisualContent,
{
    config: ReorderConfig,
    sequence: Sequence<T>,
    layout: L,
    scroll: S,
    animator: A,
    orchestrator: Orchestrator<Purpose>,
    hover: HoverElement<T::Content>,
    autoscroll: AutoScroller,
    phase: DragPhase,
    press: Option<(PointerId, Point)>,
    session: Option<DragSession>,
    events: Vec<ReorderEvent<T>>,
}

impl<T, L, S, A> core::fmt::Debug for DragReorder<T, L, S, A>
where
    T: HasVisualContent,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DragReorder")
            .field("phase", &self.phase)
            .field("len", &self.sequence.len())
            .field("mobile_index", &self.session.as_ref().map(|s| s.mobile_index))
            .field("pending_events", &self.events.len())
            .finish_non_exhaustive()
    }
}

impl<T, L, S, A> DragReorder<T, L, S, A>
where
    T: HasVisualContent + Clone,
    L: LayoutHost,
    S: ScrollProvider,
    A: AnimationProvider,
{
    /// Creates an idle engine over the given capabilities with an empty sequence.
    pub fn new(layout: L, scroll: S, animator: A, config: ReorderConfig) -> Self {
        Self {
            autoscroll: AutoScroller::new(
                config.edge_scroll_step(),
                config.auto_scroll_interval_ms,
            ),
            config,
            sequence: Sequence::new(),
            layout,
            scroll,
            animator,
            orchestrator: Orchestrator::new(),
            hover: HoverElement::new(),
            phase: DragPhase::Idle,
            press: None,
            session: None,
            events: Vec::new(),
        }
    }

    /// Binds the reorderable items. Ignored while a drag is in progress.
    pub fn attach_sequence(&mut self, items: impl Into<Sequence<T>>) {
        if self.phase != DragPhase::Idle {
            let err = ReorderError::InvalidGestureState("sequence attached during a drag");
            tracing::warn!(%err, "attach ignored");
            return;
        }
        self.sequence = items.into();
    }

    /// The items in their current order.
    #[must_use]
    pub fn sequence(&self) -> &Sequence<T> {
        &self.sequence
    }

    /// Mutable access to the items, only while idle.
    pub fn sequence_mut(&mut self) -> Option<&mut Sequence<T>> {
        (self.phase == DragPhase::Idle).then_some(&mut self.sequence)
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Index of the lifted item, while a session is active.
    #[must_use]
    pub fn mobile_index(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.mobile_index)
    }

    /// Item scale applied for this session.
    #[must_use]
    pub fn scale_ratio(&self) -> Option<f64> {
        self.session.as_ref().map(|s| s.scale_ratio)
    }

    /// Pointer position recorded at lift-off.
    #[must_use]
    pub fn down_point(&self) -> Option<Point> {
        self.session.as_ref().map(|s| s.down_point)
    }

    /// Last tracked pointer position.
    #[must_use]
    pub fn last_pointer(&self) -> Option<Point> {
        self.session.as_ref().map(|s| s.last_pointer)
    }

    /// The snapshot awaiting the next layout pass, if any.
    #[must_use]
    pub fn bounds_snapshot(&self) -> Option<&BoundsSnapshot> {
        self.session.as_ref()?.bounds_snapshot.as_ref()
    }

    /// Returns `true` if the engine waits for [`on_pre_layout`](Self::on_pre_layout).
    #[must_use]
    pub fn awaits_layout(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.pending_layout.is_some())
    }

    /// The floating stand-in for the lifted item.
    #[must_use]
    pub fn hover(&self) -> &HoverElement<T::Content> {
        &self.hover
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ReorderConfig {
        &self.config
    }

    /// The layout capability.
    #[must_use]
    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// Mutable access to the layout capability.
    pub fn layout_mut(&mut self) -> &mut L {
        &mut self.layout
    }

    /// The scroll capability.
    #[must_use]
    pub fn scroll(&self) -> &S {
        &self.scroll
    }

    /// Mutable access to the scroll capability.
    pub fn scroll_mut(&mut self) -> &mut S {
        &mut self.scroll
    }

    /// The animation capability.
    #[must_use]
    pub fn animator(&self) -> &A {
        &self.animator
    }

    /// Mutable access to the animation capability.
    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    /// Drains queued notifications.
    pub fn take_events(&mut self) -> Vec<ReorderEvent<T>> {
        core::mem::take(&mut self.events)
    }

    /// Records a pointer going down. `None` means the primary pointer.
    pub fn on_press(&mut self, pointer_id: Option<PointerId>, position: Point) {
        if self.phase != DragPhase::Idle {
            tracing::trace!("press ignored during a drag");
            return;
        }
        self.press = Some((pointer_id.unwrap_or(PRIMARY_POINTER), position));
    }

    /// Lifts the item under the recorded press.
    pub fn on_long_press(&mut self) {
        if let Err(err) = self.lift() {
            tracing::debug!(%err, "lift-off skipped");
        }
        self.drain_transitions();
    }

    /// Tracks the pointer. Returns `true` when the event belongs to an active drag and
    /// default scroll/click handling should be suppressed.
    pub fn on_move(&mut self, pointer_id: Option<PointerId>, position: Point) -> bool {
        let pointer_id = pointer_id.unwrap_or(PRIMARY_POINTER);
        let phase = self.phase;
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.active_pointer != Some(pointer_id) || !phase.follows_pointer() {
            let err = ReorderError::InvalidGestureState("move without the active pointer");
            tracing::trace!(%err, "move ignored");
            return true;
        }
        session.last_pointer = position;
        let stale = session.pending_layout.is_some();
        session.pointer_stale |= stale;

        self.move_hover();
        // The swap test needs committed geometry; it is replayed after the layout hook.
        if !stale {
            self.reorder();
        }
        if let Some(delta) = self.evaluate_edges() {
            self.apply_scroll(delta);
        }
        self.drain_transitions();
        true
    }

    /// Ends the drag if `pointer_id` is the pointer driving it.
    pub fn on_pointer_up(&mut self, pointer_id: Option<PointerId>) {
        let pointer_id = pointer_id.unwrap_or(PRIMARY_POINTER);
        if self.press.is_some_and(|(p, _)| p == pointer_id) {
            self.press = None;
        }
        let tracked = self
            .session
            .as_ref()
            .is_some_and(|s| s.active_pointer == Some(pointer_id));
        if !tracked {
            tracing::trace!("pointer up for an untracked pointer");
            return;
        }
        if let Err(err) = self.release() {
            tracing::debug!(%err, "release ignored");
        }
        self.drain_transitions();
    }

    /// Ends the drag the same way as a release. Swaps already made are kept.
    pub fn on_pointer_cancel(&mut self) {
        self.press = None;
        if self.session.is_none() {
            return;
        }
        if let Err(err) = self.release() {
            tracing::debug!(%err, "cancel ignored");
        }
        self.drain_transitions();
    }

    /// One-shot hook: the layout pass requested by the engine has been committed.
    pub fn on_pre_layout(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(pending) = session.pending_layout.take() else {
            return;
        };
        let snapshot = session.bounds_snapshot.take().unwrap_or_default();
        let mobile = session.mobile_index;
        let pointer = session.last_pointer;
        let origin_top = session.origin_top;
        let stale = core::mem::take(&mut session.pointer_stale);

        match pending {
            PendingLayout::LiftOff => {
                let id = self.animate_lift(&snapshot, mobile, pointer);
                if let Some(session) = self.session.as_mut() {
                    session.lift_transition = Some(id);
                }
            }
            PendingLayout::Swap => {
                let mut batch = Batch::new(self.config.swap_duration);
                snapshot.push_displacements(&self.layout, self.scroll.scroll_offset(), &mut batch);
                self.orchestrator.run(&mut self.animator, batch, Purpose::Swap);
            }
            PendingLayout::Restore => self.animate_restore(&snapshot, mobile, origin_top),
        }

        let release_requested = self
            .session
            .as_mut()
            .is_some_and(|s| core::mem::take(&mut s.release_requested));
        if release_requested {
            self.settle();
        } else if stale && self.phase.follows_pointer() {
            self.reorder();
        }
        self.drain_transitions();
    }

    /// Reports a finished animation.
    pub fn on_animation_finished(&mut self, handle: AnimationHandle) {
        self.orchestrator.on_animation_finished(handle);
        self.drain_transitions();
    }

    /// Frame clock for repeating auto-scroll while the pointer rests in an edge zone.
    pub fn on_frame(&mut self, timestamp_ms: u64) {
        if !self.phase.follows_pointer() || self.awaits_layout() {
            return;
        }
        let Some(delta) = self.autoscroll.tick(timestamp_ms) else {
            return;
        };
        self.apply_scroll(delta);
        self.reorder();
        self.refresh_edges();
        self.drain_transitions();
    }

    fn lift(&mut self) -> Result<(), ReorderError> {
        if self.phase != DragPhase::Idle {
            return Err(ReorderError::InvalidGestureState("lift-off during a drag"));
        }
        let (pointer, down) = self
            .press
            .ok_or(ReorderError::InvalidGestureState("long-press without a press"))?;
        if self.sequence.is_empty() {
            return Err(ReorderError::EmptySequence);
        }
        let len = self.sequence.len();
        let laid_out = self.layout.item_count();
        if laid_out != len {
            let err = ReorderError::IndexOutOfRange {
                index: laid_out,
                len,
            };
            tracing::warn!(%err, "layout and sequence disagree");
            return Err(err);
        }
        let mobile = self
            .layout
            .index_at_y(down.y)
            .ok_or(ReorderError::PointOutsideSequence)?;

        let snapshot = BoundsSnapshot::capture(&self.layout, self.scroll.scroll_offset());
        let ratio = self
            .config
            .scale_ratio(self.layout.viewport_height(), self.layout.content_height());

        self.orchestrator.interrupt(
            &mut self.animator,
            AnimationTarget::Item(mobile),
            AnimatedProperty::Opacity,
            self.config.lifted_opacity,
        );
        self.layout.set_chrome(Chrome::empty());
        self.layout.set_item_scale(ratio);
        self.layout.request_layout();

        self.session = Some(DragSession {
            mobile_index: mobile,
            down_point: down,
            last_pointer: down,
            active_pointer: Some(pointer),
            scale_ratio: ratio,
            origin_top: snapshot.get(mobile).map(|r| r.y0),
            lift_transition: None,
            bounds_snapshot: Some(snapshot),
            pending_layout: Some(PendingLayout::LiftOff),
            pointer_stale: false,
            release_requested: false,
        });
        self.press = None;
        self.phase = DragPhase::Lifted;
        self.events.push(ReorderEvent::DragStarted { index: mobile });
        tracing::debug!(index = mobile, ratio, "lifted");
        Ok(())
    }

    fn animate_lift(
        &mut self,
        snapshot: &BoundsSnapshot,
        mobile: usize,
        pointer: Point,
    ) -> TransitionId {
        let scroll_offset = self.scroll.scroll_offset();
        let mut batch = Batch::new(self.config.lift_duration);
        snapshot.push_displacements(&self.layout, scroll_offset, &mut batch);

        let to_viewport = Vec2::new(0.0, scroll_offset);
        match (self.layout.bounds_of(mobile), self.sequence.get(mobile)) {
            (Some(resting), Some(item)) => {
                let resting = resting - to_viewport;
                let origin = snapshot.get(mobile).unwrap_or(resting);
                self.hover.show(item.visual_content(), origin);
                let under_pointer = Rect::from_center_size(pointer - to_viewport, resting.size());
                self.hover.animate_to(under_pointer, &mut batch);
            }
            _ => {
                let err = ReorderError::IndexOutOfRange {
                    index: mobile,
                    len: self.layout.item_count(),
                };
                tracing::warn!(%err, "hover element not shown");
            }
        }
        self.orchestrator
            .run(&mut self.animator, batch, Purpose::LiftOff)
    }

    fn animate_restore(
        &mut self,
        snapshot: &BoundsSnapshot,
        mobile: usize,
        origin_top: Option<f64>,
    ) {
        // Put the dragged item back where it was on screen before lift-off.
        if let (Some(origin_top), Some(new)) = (origin_top, self.layout.bounds_of(mobile)) {
            let max_offset =
                (self.layout.content_height() - self.layout.viewport_height()).max(0.0);
            let target = (new.y0 - origin_top).clamp(0.0, max_offset);
            let current = self.scroll.scroll_offset();
            if target != current {
                self.scroll.scroll_by(target - current);
            }
        }
        let mut batch = Batch::new(self.config.restore_duration);
        snapshot.push_displacements(&self.layout, self.scroll.scroll_offset(), &mut batch);
        self.orchestrator
            .run(&mut self.animator, batch, Purpose::Restore);
    }

    fn move_hover(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if !self.hover.is_visible() {
            return;
        }
        let center = session.last_pointer - Vec2::new(0.0, self.scroll.scroll_offset());
        self.hover.move_to(center);
        for property in [AnimatedProperty::TranslationX, AnimatedProperty::TranslationY] {
            if self.orchestrator.is_animating(AnimationTarget::Hover, property) {
                self.orchestrator.interrupt(
                    &mut self.animator,
                    AnimationTarget::Hover,
                    property,
                    property.identity(),
                );
            }
        }
    }

    fn reorder(&mut self) {
        if let Err(err) = self.try_swap() {
            tracing::warn!(%err, "swap aborted");
        }
    }

    fn try_swap(&mut self) -> Result<(), ReorderError> {
        let Some(session) = self.session.as_ref() else {
            return Ok(());
        };
        if session.pending_layout.is_some() {
            return Ok(());
        }
        let from = session.mobile_index;
        let (above, below) = neighbor_bounds(&self.layout, from);
        let Some(direction) = swap_test(session.last_pointer.y, above, below) else {
            return Ok(());
        };
        let to = direction.destination(from, self.sequence.len())?;

        let mut snapshot =
            BoundsSnapshot::capture_indices(&self.layout, self.scroll.scroll_offset(), [from, to]);
        self.sequence.move_item(from, to)?;
        self.layout.move_item(from, to);
        self.layout.request_layout();
        snapshot.swap(from, to);
        self.orchestrator.swap_items(from, to);

        if let Some(session) = self.session.as_mut() {
            session.mobile_index = to;
            session.bounds_snapshot = Some(snapshot);
            session.pending_layout = Some(PendingLayout::Swap);
        }
        self.events
            .push(ReorderEvent::OrderChanged(self.sequence.as_slice().to_vec()));
        tracing::debug!(from, to, ?direction, "swapped");
        Ok(())
    }

    fn evaluate_edges(&mut self) -> Option<f64> {
        let pointer_y = self.session.as_ref()?.last_pointer.y;
        self.autoscroll.update(
            pointer_y,
            self.hover_height(),
            self.scroll.scroll_offset(),
            self.layout.viewport_height(),
        )
    }

    /// Height of the hover element, or zero before lift-off has shown it.
    fn hover_height(&self) -> f64 {
        if self.hover.is_visible() {
            self.hover.bounds().height()
        } else {
            0.0
        }
    }

    /// Re-reads the active edge after a timed scroll without scrolling again.
    fn refresh_edges(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        self.autoscroll.refresh(
            session.last_pointer.y,
            self.hover_height(),
            self.scroll.scroll_offset(),
            self.layout.viewport_height(),
        );
    }

    fn apply_scroll(&mut self, delta: f64) {
        let before = self.scroll.scroll_offset();
        self.scroll.scroll_by(delta);
        let applied = self.scroll.scroll_offset() - before;
        // The content under a resting pointer moves with the scroll.
        if let Some(session) = self.session.as_mut() {
            session.last_pointer.y += applied;
        }
        tracing::trace!(delta, applied, "auto-scrolled");
    }

    fn release(&mut self) -> Result<(), ReorderError> {
        if !self.phase.follows_pointer() {
            return Err(ReorderError::InvalidGestureState("release with nothing lifted"));
        }
        self.autoscroll.stop();
        let Some(session) = self.session.as_mut() else {
            return Err(ReorderError::InvalidGestureState("release without a session"));
        };
        session.active_pointer = None;
        if session.pending_layout.is_some() {
            session.release_requested = true;
            return Ok(());
        }
        self.settle();
        Ok(())
    }

    fn settle(&mut self) {
        let Some(mobile) = self.mobile_index() else {
            return;
        };
        self.phase = DragPhase::Settling;
        self.autoscroll.stop();
        let mut batch = Batch::new(self.config.release_duration);
        match self.layout.bounds_of(mobile) {
            Some(resting) => {
                let resting = resting - Vec2::new(0.0, self.scroll.scroll_offset());
                self.hover.animate_to(resting, &mut batch);
            }
            None => {
                let err = ReorderError::IndexOutOfRange {
                    index: mobile,
                    len: self.layout.item_count(),
                };
                tracing::warn!(%err, "settling without a resting slot");
            }
        }
        tracing::debug!(index = mobile, "settling");
        self.orchestrator
            .run(&mut self.animator, batch, Purpose::Release);
    }

    fn finish_release(&mut self) {
        let Some(mobile) = self.mobile_index() else {
            return;
        };
        self.hover.hide();
        self.orchestrator.interrupt(
            &mut self.animator,
            AnimationTarget::Item(mobile),
            AnimatedProperty::Opacity,
            AnimatedProperty::Opacity.identity(),
        );

        let snapshot = BoundsSnapshot::capture(&self.layout, self.scroll.scroll_offset());
        self.layout.set_item_scale(1.0);
        self.layout.set_chrome(self.config.resting_chrome);
        self.layout.request_layout();
        if let Some(session) = self.session.as_mut() {
            session.bounds_snapshot = Some(snapshot);
            session.pending_layout = Some(PendingLayout::Restore);
        }
    }

    fn drain_transitions(&mut self) {
        while let Some((id, purpose)) = self.orchestrator.take_completed() {
            match purpose {
                Purpose::LiftOff => {
                    let current = self
                        .session
                        .as_ref()
                        .is_some_and(|s| s.lift_transition == Some(id));
                    if current && self.phase == DragPhase::Lifted {
                        self.phase = DragPhase::Dragging;
                        tracing::debug!("dragging");
                    }
                }
                Purpose::Swap => {}
                Purpose::Release => self.finish_release(),
                Purpose::Restore => {
                    self.session = None;
                    self.phase = DragPhase::Idle;
                    self.autoscroll.stop();
                    self.events.push(ReorderEvent::DragSettled);
                    tracing::debug!("settled");
                }
            }
        }
    }
}

