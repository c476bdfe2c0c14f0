// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the drag engine.
//!
//! 1. A long-press lifts the first item whose bottom edge lies below the press.
//! 2. Arbitrary drags only ever permute the items, and the layout follows the sequence.
//! 3. With uniform heights, repeating a move once the lifted item reached the pointer
//!    never swaps again.
//! 4. Lifting any item and releasing in place restores every item's bounds and the
//!    scroll offset exactly.

mod common;

use kurbo::Point;
use proptest::prelude::*;
use understory_reorder::{DragPhase, LayoutHost, ReorderEvent};

use common::{Tile, all_bounds, engine_with_heights, lift, pump};

// ── Strategies ──────────────────────────────────────────────────────────

/// Whole-number heights keep every prefix sum exact.
fn heights_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((10_u32..200).prop_map(f64::from), 1..12)
}

fn viewport_strategy() -> impl Strategy<Value = f64> {
    (100_u32..1_500).prop_map(f64::from)
}

fn content_height(heights: &[f64]) -> f64 {
    heights.iter().sum()
}

fn expected_index(heights: &[f64], y: f64) -> Option<usize> {
    let mut end = 0.0;
    heights.iter().position(|h| {
        end += h;
        end > y
    })
}

fn sorted_ids(tiles: &[Tile]) -> Vec<u32> {
    let mut ids: Vec<u32> = tiles.iter().map(|t| t.0).collect();
    ids.sort_unstable();
    ids
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Index resolution
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn lifts_the_item_under_the_press(
        heights in heights_strategy(),
        viewport in viewport_strategy(),
        fraction in 0.0_f64..1.0,
    ) {
        let mut e = engine_with_heights(&heights, viewport);
        let y = fraction * content_height(&heights);
        e.on_press(None, Point::new(50.0, y));
        e.on_long_press();

        let expected = expected_index(&heights, y);
        prop_assert_eq!(e.mobile_index(), expected);
        prop_assert_eq!(e.phase() == DragPhase::Lifted, expected.is_some());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Drags permute, layout mirrors the sequence
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn drags_only_permute(
        heights in heights_strategy(),
        viewport in viewport_strategy(),
        start in 0.0_f64..1.0,
        moves in prop::collection::vec(-0.2_f64..1.2, 0..24),
        cancel in any::<bool>(),
    ) {
        let mut e = engine_with_heights(&heights, viewport);
        let total = content_height(&heights);
        lift(&mut e, Point::new(50.0, start * total));

        for m in &moves {
            // Pointer positions cover the shrunk stack plus a margin on both ends.
            let y = m * e.layout().content_height();
            e.on_move(None, Point::new(50.0, y));
            pump(&mut e);
            prop_assert_eq!(e.sequence().len(), heights.len());
            prop_assert_eq!(e.layout().item_count(), heights.len());
        }

        if cancel {
            e.on_pointer_cancel();
        } else {
            e.on_pointer_up(None);
        }
        pump(&mut e);

        prop_assert_eq!(e.phase(), DragPhase::Idle);
        let order = e.sequence().as_slice().to_vec();
        prop_assert_eq!(sorted_ids(&order), (0..heights.len() as u32).collect::<Vec<_>>());
        for (slot, tile) in order.iter().enumerate() {
            let size = e.layout().size_of(slot).map(|s| s.height);
            prop_assert_eq!(size, Some(heights[tile.0 as usize]));
        }

        // Every reported order is the order at that moment; the last one is final.
        let events = e.take_events();
        let last_order = events.iter().rev().find_map(|ev| match ev {
            ReorderEvent::OrderChanged(order) => Some(order.clone()),
            _ => None,
        });
        if let Some(last) = last_order {
            prop_assert_eq!(last, order);
        }
        prop_assert_eq!(events.last(), Some(&ReorderEvent::DragSettled));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Swap idempotence
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn repeated_moves_do_not_swap_again(
        len in 1_usize..10,
        height in (10_u32..200).prop_map(f64::from),
        start in 0.0_f64..1.0,
        target in 0.0_f64..1.0,
    ) {
        // Uniform heights in a tall viewport: nothing shrinks and nothing scrolls.
        let heights = vec![height; len];
        let total = content_height(&heights);
        let mut e = engine_with_heights(&heights, total + 1_000.0);
        lift(&mut e, Point::new(50.0, start * total));
        let pos = Point::new(50.0, target * total);

        // One swap per move until the lifted item sits under the pointer.
        for _ in 0..len {
            e.on_move(None, pos);
            pump(&mut e);
        }
        let settled = e.sequence().as_slice().to_vec();
        let resting = e.mobile_index().and_then(|i| e.layout().bounds_of(i));
        prop_assert!(resting.is_some_and(|r| r.y0 <= pos.y && pos.y <= r.y1));
        e.take_events();

        for _ in 0..3 {
            e.on_move(None, pos);
            pump(&mut e);
        }
        prop_assert!(e.take_events().is_empty());
        prop_assert_eq!(e.sequence().as_slice(), settled.as_slice());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Round trip
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn release_in_place_round_trips(
        heights in heights_strategy(),
        viewport in viewport_strategy(),
        fraction in 0.0_f64..1.0,
    ) {
        let mut e = engine_with_heights(&heights, viewport);
        let before = all_bounds(&e);

        lift(&mut e, Point::new(50.0, fraction * content_height(&heights)));
        prop_assert_eq!(e.phase(), DragPhase::Dragging);
        e.on_pointer_up(None);
        pump(&mut e);

        prop_assert_eq!(e.phase(), DragPhase::Idle);
        prop_assert_eq!(all_bounds(&e), before);
        prop_assert_eq!(e.scroll().offset, 0.0);
        let expected = common::tiles(heights.len());
        prop_assert_eq!(e.sequence().as_slice(), expected.as_slice());
    }
}
