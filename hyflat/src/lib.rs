//! Hyflat: nested sequences and their depth-first flattening.
//!
//! A [`Node`](node::Node) is a tagged union: either a leaf value or an ordered sequence of
//! further nodes. Flattening produces every leaf, in depth-first pre-order, left to right:
//! `[12, 3, [2, [5]], [3]]` flattens to `[12, 3, 2, 5, 3]`.
//!
//! Traversal shape
//!  - Flattening, walking, cloning, comparing, hashing, dropping, parsing and printing keep
//!    pending sequences on an explicit stack of `(children, cursor)` frames instead of the call
//!    stack, so for them nesting depth is limited by memory only.
//!  - Trees deeper than [`MAX_LAYOUT_DEPTH`](pretty::MAX_LAYOUT_DEPTH) are printed on a single
//!    line. `Debug`, serde and [`flatten_recursive`](flatten::flatten_recursive) recurse.
//!  - Stacks are `smallvec`-backed and keep 16 frames inline before spilling to the heap.
//!
//! Beyond flattening, the crate reads and writes a literal syntax for dynamically typed trees
//! ([`Value`](scalar::Value)), and offers limits ([`FlattenConfig`](config::FlattenConfig)) for
//! untrusted input.
//!
//! Example
//! ```
//! use hyflat::prelude::*;
//!
//! let value: Value = "[12, 3, 4, [2, 3, 4, [2, 3, 4, 5]], [3, 3, 3]]".parse().unwrap();
//! let flat: Vec<i64> = value
//!     .leaves()
//!     .filter_map(|s| match s {
//!         Scalar::Int(i) => Some(*i),
//!         _ => None,
//!     })
//!     .collect();
//! assert_eq!(flat, [12, 3, 4, 2, 3, 4, 2, 3, 4, 5, 3, 3, 3]);
//!
//! let tree = Node::seq([Node::leaf(1), Node::seq([Node::leaf(2), Node::seq([Node::leaf(3)])])]);
//! assert_eq!(flatten(&tree), [1, 2, 3]);
//! assert_eq!(tree.to_string(), "[1, [2, [3]]]");
//! ```

/// Limits for flattening and parsing.
pub mod config;
/// Error type shared by the fallible operations.
pub mod error;
/// The flattener.
pub mod flatten;
/// The nested-sequence data model.
pub mod node;
/// Parser for the literal syntax.
pub mod parser;
/// Width-aware, colored rendering.
pub mod pretty;
/// Dynamically typed leaves.
pub mod scalar;
/// Tree walkers for traversing nested sequences.
pub mod walker;

pub use error::{Error, Result};

pub mod prelude {
    //! Convenient re-exports for end users.
    //!
    //! - `Node` and the dynamic `Scalar`/`Value` leaves
    //! - Flattening entry points
    //! - Walkers
    //! - Pretty-printing via `PrettyNode`
    pub use crate::node::Node;
    pub use crate::scalar::{Scalar, Value};

    pub use crate::flatten::{
        flatten, flatten_into, flatten_levels, flatten_with, into_flattened,
    };

    // Walker ergonomics
    pub use crate::walker::{Visit, WalkEvent, WalkerHandle, events, leaves, walk};

    pub use crate::config::FlattenConfig;
    pub use crate::pretty::PrettyNode;

    // Parser entrypoint
    pub use crate::parser::{parse, parse_with};
}
