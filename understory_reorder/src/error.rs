// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error taxonomy for gesture handling.
//!
//! None of these reach the host as failures: the public gesture entry points on
//! [`DragReorder`](crate::DragReorder) absorb them, log them through `tracing`, and leave
//! the drag in a state where it simply does nothing further.

/// Internal failure while processing a gesture.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReorderError {
    /// Input arrived that the current phase cannot accept (for example a move with no
    /// active pointer, or a lift-off while a session is already running).
    #[error("invalid gesture state: {0}")]
    InvalidGestureState(&'static str),
    /// A computed index fell outside `0..len`.
    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Sequence length at the time.
        len: usize,
    },
    /// A long-press was recognized with no items attached.
    #[error("sequence is empty")]
    EmptySequence,
    /// The press point lies below the last item of the stack.
    #[error("press point is outside the stacked items")]
    PointOutsideSequence,
}
