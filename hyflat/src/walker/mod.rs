//! Iterative, zero-copy walkers over nested sequences.
//!
//! This module provides three traversal helpers over a borrowed [`Node`](crate::node::Node)
//! that never clone the tree:
//! - [`events`]: a pre-order iterator of [`WalkEvent`]s (enter sequence, leaf, exit sequence).
//! - [`leaves`]: the leaves alone, in flattening order; a lazy `flatten`.
//! - [`walk`]: a visitor called on every node, which controls the traversal through [`Visit`]
//!   (descend, skip the subtree, or stop).
//!
//! Traversal strategy
//! - An explicit stack of pending sequences, each with a cursor into its children. No recursion:
//!   nesting depth is bounded by memory, not by the thread's call stack.
//! - Children are visited left to right and a sequence is reported before its children, which
//!   yields a stable pre-order across runs.
//!
//! Performance and memory footprint
//! - Time: O(n) in the number of nodes.
//! - Memory: O(depth) for the stack; the first 16 levels are kept inline.
//!
//! Example: count nodes per depth
//! ```
//! use hyflat::node::Node;
//! use hyflat::walker::{Visit, walk};
//!
//! let tree = Node::seq([Node::leaf('a'), Node::seq([Node::leaf('b'), Node::leaf('c')])]);
//! let mut per_depth = [0usize; 3];
//! walk(&tree, |node| {
//!     per_depth[node.depth()] += 1;
//!     Visit::Continue
//! });
//! assert_eq!(per_depth, [1, 2, 2]);
//! ```
mod events;
mod internal;
mod visit;

pub use events::*;
pub use visit::*;
