use criterion::{Criterion, black_box, criterion_group, criterion_main};

use hyflat::{flatten::flatten_recursive, prelude::*};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn build_wide_tree() -> Node<u64> {
    // Bushy tree of moderate depth. Use randomness seeded for determinism.
    let mut rng = ChaCha20Rng::seed_from_u64(0x42);

    fn next_create(budget: usize, rng: &mut impl Rng) -> Node<u64> {
        if budget == 0 || rng.random_bool(0.25) {
            return Node::leaf(rng.next_u64());
        }
        let len = rng.random_range(0..=6);
        Node::Seq((0..len).map(|_| next_create(budget - 1, rng)).collect())
    }

    Node::Seq((0..64).map(|_| next_create(8, &mut rng)).collect())
}

fn build_deep_tree(depth: usize) -> Node<u64> {
    // A spine of `depth` sequences, each with a leaf on either side.
    let mut node = Node::leaf(0);
    for i in 1..depth as u64 {
        node = Node::seq([Node::leaf(i), node, Node::leaf(i)]);
    }
    node
}

fn bench_flatten(c: &mut Criterion) {
    let wide = build_wide_tree();
    let deep = build_deep_tree(512);

    c.bench_function("flatten_wide", |b| {
        b.iter(|| black_box(flatten(black_box(&wide))))
    });
    c.bench_function("flatten_recursive_wide", |b| {
        b.iter(|| black_box(flatten_recursive(black_box(&wide))))
    });
    c.bench_function("leaves_sum_wide", |b| {
        b.iter(|| black_box(wide.leaves().fold(0u64, |acc, v| acc.wrapping_add(*v))))
    });
    c.bench_function("into_flattened_wide", |b| {
        b.iter_batched(
            || wide.clone(),
            |tree| black_box(tree.into_flattened()),
            criterion::BatchSize::LargeInput,
        )
    });

    c.bench_function("flatten_deep", |b| {
        b.iter(|| black_box(flatten(black_box(&deep))))
    });
    c.bench_function("flatten_recursive_deep", |b| {
        b.iter(|| black_box(flatten_recursive(black_box(&deep))))
    });
}

fn bench_parse(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(0x43);
    let value: Value = build_wide_tree().map(|v| {
        if rng.random_bool(0.5) {
            Scalar::Int((v >> 1) as i64)
        } else {
            Scalar::Str(format!("s{}", v % 1000))
        }
    });
    let src = value.to_string();

    c.bench_function("parse_wide", |b| {
        b.iter(|| black_box(parse(black_box(&src)).is_ok()))
    });
    c.bench_function("print_wide", |b| b.iter(|| black_box(value.pretty_string(100))));
}

criterion_group!(benches, bench_flatten, bench_parse);
criterion_main!(benches);
