use std::ops::Deref;

use crate::node::Node;

use super::internal::{Frame, WalkerStack};

/// Decision returned by a [`walk`] visitor for the node it was handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visit {
    /// Descend into the node if it is a sequence, then carry on with its siblings.
    #[default]
    Continue,
    /// Do not descend into this node; carry on with its siblings.
    Skip,
    /// Stop the whole traversal.
    Break,
}

/// Lightweight handle passed to the visitor, representing the current node and its position.
///
/// Deref to reach the underlying [`Node`].
pub struct WalkerHandle<'a, T> {
    node: &'a Node<T>,
    depth: usize,
    index: Option<usize>,
}

impl<'a, T> WalkerHandle<'a, T> {
    /// Distance from the root (the root is at depth 0).
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Position of this node within its parent sequence, `None` for the root.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Check if this node is the root of the tree.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.index.is_none()
    }

    /// The visited node, with the lifetime of the tree rather than of the handle.
    #[inline]
    pub fn node(&self) -> &'a Node<T> {
        self.node
    }
}

impl<T> AsRef<Node<T>> for WalkerHandle<'_, T> {
    fn as_ref(&self) -> &Node<T> {
        self.node
    }
}

impl<T> Deref for WalkerHandle<'_, T> {
    type Target = Node<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.node
    }
}

/// Walk `node` depth-first, letting the visitor prune the traversal.
///
/// The visitor is called once per node in pre-order (a sequence before its children, children
/// left to right) and decides through [`Visit`] whether to descend, skip the subtree, or stop.
/// Returns `false` if the traversal was stopped by [`Visit::Break`], `true` otherwise.
///
/// Traversal uses an explicit stack: memory is O(depth) and the call stack does not grow with
/// nesting.
///
/// Example: collect leaves above a depth cut-off
/// ```
/// use hyflat::node::Node;
/// use hyflat::walker::{Visit, walk};
///
/// let tree = Node::seq([Node::leaf(1), Node::seq([Node::leaf(2), Node::seq([Node::leaf(3)])])]);
/// let mut shallow = Vec::new();
/// walk(&tree, |node| {
///     if let Some(v) = node.as_leaf() {
///         shallow.push(*v);
///     }
///     if node.depth() >= 2 { Visit::Skip } else { Visit::Continue }
/// });
/// assert_eq!(shallow, [1, 2]);
/// ```
pub fn walk<T, F>(node: &Node<T>, mut visitor: F) -> bool
where
    F: FnMut(&WalkerHandle<'_, T>) -> Visit,
{
    let root = WalkerHandle {
        node,
        depth: 0,
        index: None,
    };
    match visitor(&root) {
        Visit::Break => return false,
        Visit::Skip => return true,
        Visit::Continue => {}
    }

    let mut stack = WalkerStack::new();
    if let Node::Seq(items) = node {
        stack.push(Frame::new(items, 0));
    }

    while let Some(frame) = stack.last_mut() {
        let Some((index, depth, child)) = frame.next_child() else {
            stack.pop();
            continue;
        };

        let handle = WalkerHandle {
            node: child,
            depth,
            index: Some(index),
        };
        match visitor(&handle) {
            Visit::Break => return false,
            Visit::Skip => {}
            Visit::Continue => {
                if let Node::Seq(items) = child {
                    stack.push(Frame::new(items, depth));
                }
            }
        }
    }

    true
}
