use hyflat::prelude::*;

fn main() {
    let value: Value = r#"[12, 3, [2, [5, "five", nil]], [3, [true, 2.5]], []]"#
        .parse()
        .unwrap();

    value.pretty_print().unwrap();
    println!();

    let flat = Node::from_leaves(value.flatten());
    println!("depth {} -> {}", value.depth(), flat);
    println!("one level: {}", Node::Seq(value.flatten_levels(1)));
}
