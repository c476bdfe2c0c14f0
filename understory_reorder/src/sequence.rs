// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered collection of item handles being reordered.

use alloc::vec::Vec;

use crate::ReorderError;

/// Capability for items that can lend their visual content to the hover element.
///
/// The hover element is re-skinned with this content on every lift-off. Hosts typically
/// return a cheap handle (an image id, an `Rc` to a texture, a display-list key).
pub trait HasVisualContent {
    /// Handle to whatever the host draws for this item.
    type Content: Clone;

    /// Returns the content currently displayed by this item.
    fn visual_content(&self) -> Self::Content;
}

/// Ordered list of opaque item handles.
///
/// Identity is positional. While a drag session is active the engine is the only writer
/// and only ever moves items; hosts add and remove items between gestures through
/// [`DragReorder::sequence_mut`](crate::DragReorder::sequence_mut).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sequence<T> {
    items: Vec<T>,
}

impl<T> Sequence<T> {
    /// Creates an empty sequence.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the item at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Items in order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterates the items in order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Appends an item.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Inserts an item at `index`, shifting later items down.
    pub fn insert(&mut self, index: usize, item: T) -> Result<(), ReorderError> {
        if index > self.items.len() {
            return Err(ReorderError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.items.insert(index, item);
        Ok(())
    }

    /// Removes and returns the item at `index`.
    pub fn remove(&mut self, index: usize) -> Result<T, ReorderError> {
        if index >= self.items.len() {
            return Err(ReorderError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Moves the item at `from` so that it ends up at `to`.
    ///
    /// Both indices must be in `0..len`; the length never changes.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), ReorderError> {
        let len = self.items.len();
        for index in [from, to] {
            if index >= len {
                return Err(ReorderError::IndexOutOfRange { index, len });
            }
        }
        if from < to {
            self.items[from..=to].rotate_left(1);
        } else {
            self.items[to..=from].rotate_right(1);
        }
        Ok(())
    }

    /// Consumes the sequence, returning the items in order.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
