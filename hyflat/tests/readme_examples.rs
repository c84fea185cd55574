use hyflat::prelude::*;

#[test]
fn lib_rs_doc_example_compiles_and_behaves() {
    let value: Value = "[12, 3, 4, [2, 3, 4, [2, 3, 4, 5]], [3, 3, 3]]"
        .parse()
        .unwrap();
    let flat: Vec<i64> = value
        .leaves()
        .filter_map(|s| match s {
            Scalar::Int(i) => Some(*i),
            _ => None,
        })
        .collect();
    assert_eq!(flat, [12, 3, 4, 2, 3, 4, 2, 3, 4, 5, 3, 3, 3]);

    let tree = Node::seq([
        Node::leaf(1),
        Node::seq([Node::leaf(2), Node::seq([Node::leaf(3)])]),
    ]);
    assert_eq!(flatten(&tree), [1, 2, 3]);
    assert_eq!(tree.to_string(), "[1, [2, [3]]]");
}
