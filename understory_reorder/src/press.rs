// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Long-press recognition for hosts without a platform recognizer.
//!
//! A press becomes a long-press once it has been held for [`LongPressConfig::delay_ms`]
//! without moving further than [`LongPressConfig::slop`] from where it went down. Time is
//! supplied by the caller, so the recognizer works the same under test clocks and real
//! event timestamps.
//!
//! ## Usage
//!
//! ```
//! use kurbo::Point;
//! use understory_reorder::press::{LongPressConfig, LongPressState};
//!
//! let mut state = LongPressState::new(LongPressConfig::default());
//!
//! state.on_down(None, Point::new(40.0, 120.0), 1_000);
//! assert!(state.poll(1_200).is_none()); // Still a plain press.
//!
//! // A little jitter is fine.
//! assert!(!state.on_move(None, Point::new(43.0, 118.0)));
//!
//! let press = state.poll(1_500).unwrap();
//! assert_eq!(press.position, Point::new(40.0, 120.0));
//!
//! // Each press fires at most once.
//! assert!(state.poll(2_000).is_none());
//! ```
//!
//! ## Multi-Pointer Support
//!
//! Each pointer is tracked independently; [`LongPressState::poll`] reports the earliest
//! press that has become due.

use alloc::collections::BTreeMap;
use core::num::NonZeroU64;

use kurbo::Point;

/// Pointer identifier for tracking multiple concurrent presses.
pub type PointerId = NonZeroU64;

/// The pointer id assumed when a caller passes `None`.
pub(crate) const PRIMARY_POINTER: PointerId = NonZeroU64::MIN;

/// Thresholds for long-press recognition.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LongPressConfig {
    /// Distance the pointer may travel before the press stops counting.
    pub slop: f64,
    /// Hold time in milliseconds.
    pub delay_ms: u64,
}

impl Default for LongPressConfig {
    fn default() -> Self {
        Self {
            slop: 8.0,
            delay_ms: 500,
        }
    }
}

/// A recognized long-press.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LongPress {
    /// Pointer that performed the press.
    pub pointer_id: PointerId,
    /// Where the pointer went down.
    pub position: Point,
    /// Timestamp of the pointer down, in milliseconds.
    pub down_time: u64,
}

#[derive(Copy, Clone, Debug)]
struct Pending {
    position: Point,
    down_time: u64,
    /// Moved beyond the slop or already reported.
    spent: bool,
}

/// Long-press recognizer state.
#[derive(Clone, Debug)]
pub struct LongPressState {
    presses: BTreeMap<PointerId, Pending>,
    config: LongPressConfig,
}

impl LongPressState {
    /// Creates a recognizer with the given thresholds.
    #[must_use]
    pub fn new(config: LongPressConfig) -> Self {
        Self {
            presses: BTreeMap::new(),
            config,
        }
    }

    /// The thresholds in use.
    #[must_use]
    pub const fn config(&self) -> LongPressConfig {
        self.config
    }

    /// Record a pointer down event. A new down on the same pointer restarts its press.
    pub fn on_down(&mut self, pointer_id: Option<PointerId>, position: Point, timestamp: u64) {
        self.presses.insert(
            pointer_id.unwrap_or(PRIMARY_POINTER),
            Pending {
                position,
                down_time: timestamp,
                spent: false,
            },
        );
    }

    /// Process a pointer move.
    ///
    /// Returns `true` if this move pushed a pending press past the slop, cancelling it.
    pub fn on_move(&mut self, pointer_id: Option<PointerId>, position: Point) -> bool {
        let pointer_id = pointer_id.unwrap_or(PRIMARY_POINTER);
        let Some(press) = self.presses.get_mut(&pointer_id) else {
            return false;
        };
        if press.spent || press.position.distance(position) <= self.config.slop {
            return false;
        }
        press.spent = true;
        true
    }

    /// Process a pointer up. Returns `true` if the pointer had a press.
    pub fn on_up(&mut self, pointer_id: Option<PointerId>) -> bool {
        self.presses
            .remove(&pointer_id.unwrap_or(PRIMARY_POINTER))
            .is_some()
    }

    /// Report the earliest press that has been held long enough, at most once per press.
    pub fn poll(&mut self, timestamp: u64) -> Option<LongPress> {
        let delay = self.config.delay_ms;
        let (pointer_id, press) = self
            .presses
            .iter_mut()
            .filter(|(_, p)| !p.spent && timestamp.saturating_sub(p.down_time) >= delay)
            .min_by_key(|(_, p)| p.down_time)?;
        press.spent = true;
        Some(LongPress {
            pointer_id: *pointer_id,
            position: press.position,
            down_time: press.down_time,
        })
    }

    /// Check if a pointer has a press that can still become a long-press.
    #[must_use]
    pub fn is_pending(&self, pointer_id: Option<PointerId>) -> bool {
        self.presses
            .get(&pointer_id.unwrap_or(PRIMARY_POINTER))
            .is_some_and(|p| !p.spent)
    }

    /// Clear all presses.
    pub fn clear(&mut self) {
        self.presses.clear();
    }
}

impl Default for LongPressState {
    fn default() -> Self {
        Self::new(LongPressConfig::default())
    }
}
