use crate::node::Node;

use super::internal::{Frame, WalkerStack};

/// One step of a pre-order traversal.
///
/// `depth` is the distance from the root: the root itself is at depth 0 and the children of a
/// sequence at depth `d` are at depth `d + 1`.
#[derive(Debug, PartialEq)]
pub enum WalkEvent<'a, T> {
    /// A sequence of `len` children is entered; its children follow.
    Enter { depth: usize, len: usize },
    /// A leaf is visited.
    Leaf { depth: usize, value: &'a T },
    /// The sequence entered at the same depth is complete.
    Exit { depth: usize },
}

// Derive would require `T: Clone`; only a reference is held.
impl<T> Clone for WalkEvent<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for WalkEvent<'_, T> {}

/// Pre-order event iterator over a [`Node`], see [`events`].
pub struct Events<'a, T> {
    root: Option<&'a Node<T>>,
    stack: WalkerStack<'a, T>,
}

impl<'a, T> Events<'a, T> {
    fn enter(&mut self, node: &'a Node<T>, depth: usize) -> WalkEvent<'a, T> {
        match node {
            Node::Leaf(value) => WalkEvent::Leaf { depth, value },
            Node::Seq(items) => {
                self.stack.push(Frame::new(items, depth));
                WalkEvent::Enter {
                    depth,
                    len: items.len(),
                }
            }
        }
    }
}

impl<'a, T> Iterator for Events<'a, T> {
    type Item = WalkEvent<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            return Some(self.enter(root, 0));
        }

        let frame = self.stack.last_mut()?;
        match frame.next_child() {
            Some((_, depth, child)) => Some(self.enter(child, depth)),
            None => {
                let depth = frame.depth;
                self.stack.pop();
                Some(WalkEvent::Exit { depth })
            }
        }
    }
}

/// Iterate over the pre-order traversal of `node` as [`WalkEvent`]s.
///
/// Every `Enter` is matched by an `Exit` once all children of that sequence have been reported.
/// Memory is O(depth); no recursion is involved.
///
/// ```
/// use hyflat::node::Node;
/// use hyflat::walker::{WalkEvent, events};
///
/// let tree = Node::seq([Node::leaf(1), Node::empty()]);
/// let trace: Vec<_> = events(&tree).collect();
/// assert_eq!(
///     trace,
///     [
///         WalkEvent::Enter { depth: 0, len: 2 },
///         WalkEvent::Leaf { depth: 1, value: &1 },
///         WalkEvent::Enter { depth: 1, len: 0 },
///         WalkEvent::Exit { depth: 1 },
///         WalkEvent::Exit { depth: 0 },
///     ]
/// );
/// ```
pub fn events<T>(node: &Node<T>) -> Events<'_, T> {
    Events {
        root: Some(node),
        stack: WalkerStack::new(),
    }
}

/// Lazy flattening: the leaves of a [`Node`] in depth-first, left-to-right order.
pub struct Leaves<'a, T> {
    events: Events<'a, T>,
}

impl<'a, T> Iterator for Leaves<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.events.find_map(|event| match event {
            WalkEvent::Leaf { value, .. } => Some(value),
            _ => None,
        })
    }
}

/// Iterate over the leaves of `node` in flattening order, without materializing them.
pub fn leaves<T>(node: &Node<T>) -> Leaves<'_, T> {
    Leaves {
        events: events(node),
    }
}

impl<T> Node<T> {
    /// See [`events`].
    #[inline]
    pub fn events(&self) -> Events<'_, T> {
        events(self)
    }

    /// See [`leaves`].
    #[inline]
    pub fn leaves(&self) -> Leaves<'_, T> {
        leaves(self)
    }
}
