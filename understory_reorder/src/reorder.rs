// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Neighbor swap decisions.
//!
//! The lifted item only ever trades places with an adjacent item. Every move event asks
//! [`swap_test`] whether the pointer has crossed into the neighbor below (past its top
//! edge) or the neighbor above (past its bottom edge). After a swap the neighbors are
//! different items, so with equal heights staying past the same line does not keep
//! swapping.
//!
//! With unequal heights the item that just moved past the pointer can still cover it,
//! and the next move swaps the pair back. The engine runs the test at most once per
//! move, so this never loops on its own.

use kurbo::Rect;

use crate::ReorderError;
use crate::host::LayoutHost;

/// Which neighbor the lifted item trades places with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SwapDirection {
    /// Trade places with the item above.
    Up,
    /// Trade places with the item below.
    Down,
}

impl SwapDirection {
    /// Index the mobile item moves to, checked against `len`.
    pub fn destination(self, mobile_index: usize, len: usize) -> Result<usize, ReorderError> {
        let index = match self {
            Self::Up => mobile_index.checked_sub(1),
            Self::Down => mobile_index.checked_add(1),
        };
        match index {
            Some(index) if index < len && mobile_index < len => Ok(index),
            Some(index) => Err(ReorderError::IndexOutOfRange { index, len }),
            None => Err(ReorderError::IndexOutOfRange {
                index: mobile_index,
                len,
            }),
        }
    }
}

/// Bounds of the items directly above and below `mobile_index`, if any.
#[must_use]
pub fn neighbor_bounds<L: LayoutHost + ?Sized>(
    layout: &L,
    mobile_index: usize,
) -> (Option<Rect>, Option<Rect>) {
    let above = mobile_index
        .checked_sub(1)
        .and_then(|i| layout.bounds_of(i));
    let below = layout.bounds_of(mobile_index + 1);
    (above, below)
}

/// Decides whether the pointer has crossed into a neighbor.
///
/// - Down when a neighbor below exists and `pointer_y > below.y0`.
/// - Up when a neighbor above exists and `pointer_y < above.y1`.
/// - Down wins if both hold.
///
/// The test is stateless: a short item dragged past a taller neighbor can satisfy the
/// opposite condition right after the swap.
#[must_use]
pub fn swap_test(
    pointer_y: f64,
    above: Option<Rect>,
    below: Option<Rect>,
) -> Option<SwapDirection> {
    if below.is_some_and(|b| pointer_y > b.y0) {
        return Some(SwapDirection::Down);
    }
    if above.is_some_and(|a| pointer_y < a.y1) {
        return Some(SwapDirection::Up);
    }
    None
}
