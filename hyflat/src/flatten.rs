//! The flattener: collapse a nested sequence into the ordered list of its leaves.
//!
//! Semantics
//! - Leaves are produced in depth-first pre-order, left to right: for each element of a
//!   sequence, in order, a nested sequence contributes all of its own leaves and a leaf
//!   contributes itself.
//! - The empty sequence flattens to nothing; an already flat sequence flattens to a copy of its
//!   elements. A bare leaf at the top is treated as a one-element sequence.
//! - The input is never modified. [`Node::into_flattened`] consumes the tree instead and moves
//!   the leaves out without cloning them.
//!
//! Every function here except [`flatten_recursive`] keeps its pending sequences on an explicit
//! stack, so arbitrarily deep nesting cannot overflow the call stack.
//!
//! Example
//! ```
//! use hyflat::node::Node;
//! use hyflat::flatten::flatten;
//!
//! let tree = Node::seq([
//!     Node::leaf(12),
//!     Node::seq([Node::leaf(2), Node::seq([Node::leaf(5)])]),
//!     Node::seq([Node::leaf(3)]),
//! ]);
//! assert_eq!(flatten(&tree), [12, 2, 5, 3]);
//! ```
use std::{mem, slice, vec};

use either::Either;
use log::{debug, trace};
use smallvec::SmallVec;

use crate::{config::FlattenConfig, error::Result, node::Node};

/// Inline capacity of the pending-sequence stack.
const INLINE_PENDING: usize = 16;

/// Flatten `node` into a fresh vector of cloned leaves.
pub fn flatten<T: Clone>(node: &Node<T>) -> Vec<T> {
    let mut out = Vec::new();
    flatten_into(node, &mut out);
    out
}

/// Append the leaves of `node`, in flattening order, to `out`.
pub fn flatten_into<T: Clone>(node: &Node<T>, out: &mut Vec<T>) {
    let items = match node {
        Node::Leaf(value) => {
            out.push(value.clone());
            return;
        }
        Node::Seq(items) => items,
    };

    let before = out.len();
    let mut current = items.iter();
    let mut pending: SmallVec<slice::Iter<'_, Node<T>>, INLINE_PENDING> = SmallVec::new();

    loop {
        match current.next() {
            Some(Node::Leaf(value)) => out.push(value.clone()),
            Some(Node::Seq(children)) => pending.push(mem::replace(&mut current, children.iter())),
            None => match pending.pop() {
                Some(parent) => current = parent,
                None => break,
            },
        }
    }

    trace!("flattened {} leaves", out.len() - before);
}

/// Consume `node` and return its leaves in flattening order, without cloning them.
pub fn into_flattened<T>(node: Node<T>) -> Vec<T> {
    let items = match node.into_inner() {
        Either::Left(value) => return vec![value],
        Either::Right(items) => items,
    };

    let mut out = Vec::new();
    let mut current = items.into_iter();
    let mut pending: SmallVec<vec::IntoIter<Node<T>>, INLINE_PENDING> = SmallVec::new();

    loop {
        match current.next().map(Node::into_inner) {
            Some(Either::Left(value)) => out.push(value),
            Some(Either::Right(children)) => {
                pending.push(mem::replace(&mut current, children.into_iter()))
            }
            None => match pending.pop() {
                Some(parent) => current = parent,
                None => break,
            },
        }
    }

    trace!("flattened {} owned leaves", out.len());
    out
}

/// Flatten at most `levels` levels of nesting, keeping deeper sequences as they are.
///
/// With `levels == 0` the top-level elements are returned unchanged; once `levels` reaches
/// `node.depth() - 1` only leaves remain.
///
/// ```
/// use hyflat::node::Node;
/// use hyflat::flatten::flatten_levels;
///
/// // [1, [2, [3]]]
/// let tree = Node::seq([Node::leaf(1), Node::seq([Node::leaf(2), Node::seq([Node::leaf(3)])])]);
/// assert_eq!(
///     flatten_levels(&tree, 1),
///     [Node::leaf(1), Node::leaf(2), Node::seq([Node::leaf(3)])]
/// );
/// ```
pub fn flatten_levels<T: Clone>(node: &Node<T>, levels: usize) -> Vec<Node<T>> {
    let items = match node {
        Node::Leaf(value) => return vec![Node::Leaf(value.clone())],
        Node::Seq(items) => items,
    };

    let mut out = Vec::new();
    // Each entry carries how many more levels may still be opened below it.
    let mut current = (items.iter(), levels);
    let mut pending: SmallVec<(slice::Iter<'_, Node<T>>, usize), INLINE_PENDING> = SmallVec::new();

    loop {
        match current.0.next() {
            Some(Node::Seq(children)) if current.1 > 0 => {
                let budget = current.1 - 1;
                pending.push(mem::replace(&mut current, (children.iter(), budget)));
            }
            Some(other) => out.push(other.clone()),
            None => match pending.pop() {
                Some(parent) => current = parent,
                None => break,
            },
        }
    }

    debug!(
        "flattened {} level(s) into {} element(s)",
        levels,
        out.len()
    );
    out
}

/// Flatten `node` while enforcing the limits of `config`.
///
/// Fails with [`Error::DepthLimitExceeded`](crate::error::Error::DepthLimitExceeded) as soon as a
/// sequence nested beyond `config.max_depth` is reached, and with
/// [`Error::LeafLimitExceeded`](crate::error::Error::LeafLimitExceeded) as soon as one more leaf
/// than `config.max_leaves` would be produced.
pub fn flatten_with<T: Clone>(node: &Node<T>, config: &FlattenConfig) -> Result<Vec<T>> {
    let items = match node {
        Node::Leaf(value) => {
            config.check_leaves(1)?;
            return Ok(vec![value.clone()]);
        }
        Node::Seq(items) => items,
    };

    // `level` is the depth of the sequence `current` iterates over.
    let mut level = 1;
    config.check_depth(level)?;

    let mut out = Vec::new();
    let mut current = items.iter();
    let mut pending: SmallVec<slice::Iter<'_, Node<T>>, INLINE_PENDING> = SmallVec::new();

    loop {
        match current.next() {
            Some(Node::Leaf(value)) => {
                config.check_leaves(out.len() + 1)?;
                out.push(value.clone());
            }
            Some(Node::Seq(children)) => {
                level += 1;
                if let Err(e) = config.check_depth(level) {
                    debug!("rejected nesting at depth {level}");
                    return Err(e);
                }
                pending.push(mem::replace(&mut current, children.iter()));
            }
            None => match pending.pop() {
                Some(parent) => {
                    level -= 1;
                    current = parent;
                }
                None => break,
            },
        }
    }

    Ok(out)
}

/// The direct recursive definition of flattening.
///
/// Produces exactly what [`flatten`] produces, but uses one call frame per nesting level. Kept as
/// the reference the iterative versions are checked and benchmarked against.
pub fn flatten_recursive<T: Clone>(node: &Node<T>) -> Vec<T> {
    match node {
        Node::Leaf(value) => vec![value.clone()],
        Node::Seq(items) => items.iter().flat_map(flatten_recursive).collect(),
    }
}

impl<T> Node<T> {
    /// See [`flatten`].
    #[inline]
    pub fn flatten(&self) -> Vec<T>
    where
        T: Clone,
    {
        flatten(self)
    }

    /// See [`into_flattened`].
    #[inline]
    pub fn into_flattened(self) -> Vec<T> {
        into_flattened(self)
    }

    /// See [`flatten_levels`].
    #[inline]
    pub fn flatten_levels(&self, levels: usize) -> Vec<Node<T>>
    where
        T: Clone,
    {
        flatten_levels(self, levels)
    }
}
