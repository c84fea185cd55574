//! Internal primitives powering the public walker API.
//!
//! Both the event iterator and the visitor-driven [`walk`](super::walk) keep one [`Frame`] per
//! open sequence: the slice of its children plus a cursor into it. Suspended frames live in a
//! [`WalkerStack`], whose inline capacity covers the common shallow case without allocating.
use std::{iter::Enumerate, slice};

use smallvec::SmallVec;

use crate::node::Node;

/// Inline capacity of the traversal stack before spilling to the heap.
pub(super) const INLINE_FRAMES: usize = 16;

/// A sequence being traversed: its remaining children and its own depth.
pub(super) struct Frame<'a, T> {
    pub(super) items: Enumerate<slice::Iter<'a, Node<T>>>,
    pub(super) depth: usize,
}

impl<'a, T> Frame<'a, T> {
    #[inline]
    pub(super) fn new(items: &'a [Node<T>], depth: usize) -> Self {
        Self {
            items: items.iter().enumerate(),
            depth,
        }
    }

    /// Next child with its index and depth, advancing the cursor.
    #[inline]
    pub(super) fn next_child(&mut self) -> Option<(usize, usize, &'a Node<T>)> {
        let depth = self.depth + 1;
        self.items.next().map(|(index, node)| (index, depth, node))
    }
}

pub(super) type WalkerStack<'a, T> = SmallVec<Frame<'a, T>, INLINE_FRAMES>;
