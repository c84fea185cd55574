//! The nested-sequence data model.
//!
//! A [`Node`] is either a leaf value or an ordered sequence of further nodes. Ownership of the
//! children is exclusive (`Vec`), so every `Node` is a finite tree and cycles cannot be built.
//!
//! Every structural query in this module (`depth`, `leaf_count`, `map`, ...) walks the tree with
//! an explicit stack; none of them recurse on the call stack. The same holds for `Clone`,
//! `PartialEq`, `Hash` and `Drop`. Only the derived `Debug` and serde impls recurse.
use std::{
    hash::{Hash, Hasher},
    mem::{self, ManuallyDrop},
    ptr,
};

use either::Either;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use strum::EnumIs;

use crate::walker::{WalkEvent, events};

/// A leaf or an ordered sequence of nested nodes.
///
/// Serialized untagged: a leaf is written as its value and a sequence as an array, so
/// `[1, [2, 3]]` in JSON deserializes straight into a `Node<i64>`.
///
/// ```
/// use hyflat::node::Node;
///
/// let tree = Node::seq([Node::leaf(1), Node::seq([Node::leaf(2), Node::leaf(3)])]);
/// assert_eq!(tree.depth(), 2);
/// assert_eq!(tree.leaf_count(), 3);
/// ```
#[derive(Debug, EnumIs, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node<T> {
    Leaf(T),
    Seq(Vec<Node<T>>),
}

impl<T> Node<T> {
    #[inline]
    pub fn leaf(value: T) -> Self {
        Node::Leaf(value)
    }

    #[inline]
    pub fn seq(items: impl IntoIterator<Item = Node<T>>) -> Self {
        Node::Seq(items.into_iter().collect())
    }

    /// The empty sequence `[]`.
    #[inline]
    pub fn empty() -> Self {
        Node::Seq(Vec::new())
    }

    /// Wrap every value of `values` as a leaf of a single flat sequence.
    pub fn from_leaves(values: impl IntoIterator<Item = T>) -> Self {
        Node::Seq(values.into_iter().map(Node::Leaf).collect())
    }

    pub fn as_leaf(&self) -> Option<&T> {
        match self {
            Node::Leaf(value) => Some(value),
            Node::Seq(_) => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Node<T>]> {
        match self {
            Node::Leaf(_) => None,
            Node::Seq(items) => Some(items),
        }
    }

    pub fn as_seq_mut(&mut self) -> Option<&mut Vec<Node<T>>> {
        match self {
            Node::Leaf(_) => None,
            Node::Seq(items) => Some(items),
        }
    }

    /// Move the leaf value or the children out of this node.
    ///
    /// `Node` implements `Drop`, so it cannot be destructured by value; this is the way to take
    /// ownership of its contents.
    pub fn into_inner(self) -> Either<T, Vec<Node<T>>> {
        let mut this = ManuallyDrop::new(self);
        match &mut *this {
            // SAFETY: `this` is never dropped, so the value is moved out exactly once.
            Node::Leaf(value) => Either::Left(unsafe { ptr::read(value) }),
            // Leaves an empty, unallocated vector behind.
            Node::Seq(items) => Either::Right(mem::take(items)),
        }
    }

    /// Nesting depth: a leaf has depth 0 and a sequence is one deeper than its deepest child.
    /// The empty sequence has depth 1.
    pub fn depth(&self) -> usize {
        events(self)
            .map(|event| match event {
                WalkEvent::Enter { depth, .. } => depth + 1,
                WalkEvent::Leaf { depth, .. } | WalkEvent::Exit { depth } => depth,
            })
            .max()
            .unwrap_or(0)
    }

    /// Number of leaves reachable from this node.
    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Number of nodes (leaves and sequences, including `self`).
    pub fn node_count(&self) -> usize {
        events(self)
            .filter(|event| !matches!(event, WalkEvent::Exit { .. }))
            .count()
    }

    /// Apply `f` to every leaf, keeping the shape of the tree.
    pub fn map<U, F>(&self, mut f: F) -> Node<U>
    where
        F: FnMut(&T) -> U,
    {
        let items = match self {
            Node::Leaf(value) => return Node::Leaf(f(value)),
            Node::Seq(items) => items,
        };

        // `current` is the sequence being rebuilt; `parents` holds the suspended outer ones.
        let mut current = (items.iter(), Vec::with_capacity(items.len()));
        let mut parents: SmallVec<_, 16> = SmallVec::new();

        loop {
            match current.0.next() {
                Some(Node::Leaf(value)) => current.1.push(Node::Leaf(f(value))),
                Some(Node::Seq(children)) => {
                    let inner = (children.iter(), Vec::with_capacity(children.len()));
                    parents.push(mem::replace(&mut current, inner));
                }
                None => match parents.pop() {
                    Some(parent) => {
                        let (_, finished) = mem::replace(&mut current, parent);
                        current.1.push(Node::Seq(finished));
                    }
                    None => return Node::Seq(current.1),
                },
            }
        }
    }
}

impl<T> Drop for Node<T> {
    fn drop(&mut self) {
        let Node::Seq(items) = self else {
            return;
        };
        if items.iter().all(Node::is_leaf) {
            return;
        }

        // Detach every nested sequence before it is dropped, so each node dies childless.
        let mut pending = mem::take(items);
        while let Some(mut node) = pending.pop() {
            if let Node::Seq(children) = &mut node {
                pending.append(children);
            }
        }
    }
}

impl<T: Clone> Clone for Node<T> {
    fn clone(&self) -> Self {
        self.map(T::clone)
    }
}

impl<T: PartialEq> PartialEq for Node<T> {
    /// Two trees are equal when their pre-order event streams are: the `len` carried by each
    /// `Enter` pins down the shape.
    fn eq(&self, other: &Self) -> bool {
        events(self).eq(events(other))
    }
}

impl<T: Eq> Eq for Node<T> {}

impl<T: Hash> Hash for Node<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for event in events(self) {
            match event {
                WalkEvent::Enter { len, .. } => {
                    state.write_u8(0);
                    state.write_usize(len);
                }
                WalkEvent::Leaf { value, .. } => {
                    state.write_u8(1);
                    value.hash(state);
                }
                WalkEvent::Exit { .. } => state.write_u8(2),
            }
        }
    }
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Node::empty()
    }
}

impl<T> From<Vec<Node<T>>> for Node<T> {
    fn from(items: Vec<Node<T>>) -> Self {
        Node::Seq(items)
    }
}

impl<T> FromIterator<Node<T>> for Node<T> {
    fn from_iter<I: IntoIterator<Item = Node<T>>>(iter: I) -> Self {
        Node::seq(iter)
    }
}
