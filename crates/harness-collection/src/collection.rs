//! The managed collection: an owned, ordered sequence of `i32`.
//!
//! A thin wrapper over `Vec<i32>` that exposes the classic dynamic-array
//! surface (`size`, `capacity`, `max_size`, `resize`, `reserve`, `erase`,
//! bounds-checked `at`) with explicit error values instead of panics. Growth
//! strategy and memory layout are whatever `Vec` does.

use std::ops::{Bound, RangeBounds};

use thiserror::Error;

/// Errors signalled by [`ManagedCollection`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// Bounds-checked access outside `[0, size)`.
    #[error("index {index} out of range for collection of size {size}")]
    OutOfRange { index: usize, size: usize },

    /// `erase` with a range that is reversed or extends past the end.
    #[error("range {start}..{end} is invalid for collection of size {size}")]
    InvalidRange { start: usize, end: usize, size: usize },

    /// `reserve` beyond `max_size`, or the allocator refused.
    #[error("cannot reserve capacity for {requested} elements (max_size {max_size})")]
    CapacityOverflow { requested: usize, max_size: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagedCollection {
    items: Vec<i32>,
}

impl ManagedCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Largest element count an allocation can ever hold.
    pub fn max_size(&self) -> usize {
        isize::MAX as usize / std::mem::size_of::<i32>()
    }

    pub fn empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push_back(&mut self, value: i32) {
        self.items.push(value);
    }

    /// Grow with zeroes or truncate to `len`, keeping the leading elements.
    pub fn resize(&mut self, len: usize) {
        self.items.resize(len, 0);
    }

    /// Drop every element. Capacity is left to `Vec`.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Remove the elements in `range`, shifting the tail down.
    pub fn erase(&mut self, range: impl RangeBounds<usize>) -> Result<(), CollectionError> {
        let size = self.size();
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => size,
        };
        if start > end || end > size {
            return Err(CollectionError::InvalidRange { start, end, size });
        }
        self.items.drain(start..end);
        Ok(())
    }

    /// Ensure room for `capacity` elements in total. Never shrinks; when it
    /// grows, the new capacity is exactly `capacity`.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), CollectionError> {
        let overflow = CollectionError::CapacityOverflow {
            requested: capacity,
            max_size: self.max_size(),
        };
        if capacity > self.max_size() {
            return Err(overflow);
        }
        if capacity <= self.capacity() {
            return Ok(());
        }
        self.items
            .try_reserve_exact(capacity - self.items.len())
            .map_err(|_| overflow)
    }

    /// Bounds-checked element access.
    pub fn at(&self, index: usize) -> Result<i32, CollectionError> {
        self.items
            .get(index)
            .copied()
            .ok_or(CollectionError::OutOfRange {
                index,
                size: self.size(),
            })
    }

    pub fn front(&self) -> Option<i32> {
        self.items.first().copied()
    }

    pub fn back(&self) -> Option<i32> {
        self.items.last().copied()
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, i32> {
        self.items.iter()
    }

    /// `capacity >= size` and `max_size >= size`.
    pub fn invariants_hold(&self) -> bool {
        self.capacity() >= self.size() && self.max_size() >= self.size()
    }
}

impl From<Vec<i32>> for ManagedCollection {
    fn from(items: Vec<i32>) -> Self {
        Self { items }
    }
}

impl<'a> IntoIterator for &'a ManagedCollection {
    type Item = &'a i32;
    type IntoIter = std::slice::Iter<'a, i32>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
