use hyflat::config::FlattenConfig;
use hyflat::error::Error;
use hyflat::flatten::*;
use hyflat::node::Node;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn n(v: i32) -> Node<i32> {
    Node::leaf(v)
}

fn s<const N: usize>(items: [Node<i32>; N]) -> Node<i32> {
    Node::seq(items)
}

/// Random tree whose leaves are numbered 1, 2, 3, ... in pre-order, so that a correct
/// flattening is exactly `1..=leaf_count`.
fn numbered_tree(rng: &mut ChaCha20Rng, budget: usize, next: &mut u32) -> Node<u32> {
    if budget == 0 || rng.random_bool(0.3) {
        *next += 1;
        return Node::leaf(*next);
    }
    let len = rng.random_range(0..5);
    let mut items = Vec::with_capacity(len);
    for _ in 0..len {
        items.push(numbered_tree(rng, budget - 1, next));
    }
    Node::Seq(items)
}

fn random_trees(count: u64) -> impl Iterator<Item = (Node<u32>, u32)> {
    (0..count).map(|seed| {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut next = 0;
        let len = rng.random_range(0..6);
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(numbered_tree(&mut rng, 7, &mut next));
        }
        (Node::Seq(items), next)
    })
}

/// `[[[...[leaf]...]]]` with `depth` sequences, built without recursion.
fn deep_tree(depth: usize) -> Node<u32> {
    let mut node = Node::leaf(7);
    for _ in 0..depth {
        node = Node::Seq(vec![node]);
    }
    node
}

#[test]
fn flattens_mixed_nesting() {
    let tree = s([
        n(12),
        n(3),
        n(4),
        s([n(2), n(3), n(4), s([n(2), n(3), n(4), n(5)])]),
        s([n(3), n(3), n(3)]),
    ]);
    assert_eq!(flatten(&tree), [12, 3, 4, 2, 3, 4, 2, 3, 4, 5, 3, 3, 3]);
}

#[test]
fn flattens_single_chain() {
    let tree = s([s([n(1), s([n(2), s([n(3), s([n(4)])])])])]);
    assert_eq!(flatten(&tree), [1, 2, 3, 4]);
}

#[test]
fn flat_input_is_copied() {
    let tree = s([n(1), n(2), n(3)]);
    assert_eq!(flatten(&tree), [1, 2, 3]);
    // The input is left untouched.
    assert_eq!(tree, s([n(1), n(2), n(3)]));
}

#[test]
fn empty_input_flattens_to_empty() {
    assert!(flatten(&Node::<i32>::empty()).is_empty());
    assert!(flatten(&s([Node::empty(), s([Node::empty()])])).is_empty());
}

#[test]
fn random_trees_flatten_in_preorder() {
    for (tree, count) in random_trees(200) {
        let expected: Vec<u32> = (1..=count).collect();
        assert_eq!(flatten(&tree), expected);
        assert_eq!(flatten_recursive(&tree), expected);
        assert_eq!(tree.leaves().copied().collect::<Vec<_>>(), expected);
        assert_eq!(tree.leaf_count(), count as usize);
        assert_eq!(tree.clone().into_flattened(), expected);
    }
}

#[test]
fn flattening_is_idempotent() {
    for (tree, _) in random_trees(50) {
        let once = flatten(&tree);
        let twice = flatten(&Node::from_leaves(once.clone()));
        assert_eq!(once, twice);
    }
}

#[test]
fn full_level_flattening_leaves_no_sequences() {
    for (tree, _) in random_trees(50) {
        let all = flatten_levels(&tree, tree.depth());
        assert!(all.iter().all(Node::is_leaf));
        assert_eq!(Node::Seq(all).into_flattened(), flatten(&tree));
    }
}

#[test]
fn partial_levels_preserve_leaves() {
    for (tree, _) in random_trees(50) {
        let full = flatten(&tree);
        for levels in 0..4 {
            let partial = Node::Seq(flatten_levels(&tree, levels));
            assert_eq!(flatten(&partial), full);
            assert!(partial.depth() <= tree.depth().saturating_sub(levels).max(1));
        }
    }
}

#[test]
fn deep_nesting_does_not_overflow() {
    const DEPTH: usize = 100_000;
    let deep = deep_tree(DEPTH);

    assert_eq!(deep.depth(), DEPTH);
    assert_eq!(flatten(&deep), [7]);
    assert_eq!(deep.leaves().count(), 1);
    assert_eq!(
        flatten_with(&deep, &FlattenConfig::default()),
        Err(Error::DepthLimitExceeded {
            depth: hyflat::config::DEFAULT_MAX_DEPTH + 1,
            max: hyflat::config::DEFAULT_MAX_DEPTH,
        })
    );
    assert_eq!(flatten_with(&deep, &FlattenConfig::unlimited()), Ok(vec![7]));
    assert_eq!(deep.into_flattened(), [7]);
}

#[test]
fn deep_tree_drops_without_overflow() {
    let deep = deep_tree(100_000);
    assert_eq!(flatten(&deep), [7]);
    drop(deep);

    // Wider spine: every level also owns a leaf and an empty sequence.
    let mut node = Node::leaf(0);
    for i in 1..100_000 {
        node = Node::seq([Node::leaf(i), node, Node::empty()]);
    }
    assert_eq!(node.leaf_count(), 100_000);
}

#[test]
fn deep_tree_clones_and_compares_without_overflow() {
    let deep = deep_tree(100_000);
    let copy = deep.clone();
    assert!(copy == deep);

    let shallower = deep_tree(99_999);
    assert!(shallower != deep);
}

#[test]
fn leaf_limit_counts_across_nesting() {
    let tree = s([n(1), s([n(2), s([n(3)])]), n(4)]);
    let config = FlattenConfig::unlimited().with_max_leaves(3);
    assert_eq!(
        flatten_with(&tree, &config),
        Err(Error::LeafLimitExceeded { max: 3 })
    );
}

#[test]
fn works_with_owned_leaves() {
    let tree = Node::seq([
        Node::leaf(String::from("a")),
        Node::seq([Node::leaf(String::from("b"))]),
    ]);
    assert_eq!(tree.flatten(), ["a", "b"]);
    assert_eq!(tree.into_flattened(), ["a", "b"]);
}
