use gp_expressions::{Func, Node};
use gp_expressions::operators::{add, div, exp, log, mul, sqrt, square, sub};
use ndarray::{Array1, Array2, array};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;

/// Elementwise product without a partial kernel, as a user-defined function would be.
#[allow(dead_code)]
pub fn myprod() -> Func {
    Func::new("myprod", 2, |args: &[Array1<f64>]| &args[0] * &args[1])
}

/// -(myprod(x1, 1.0), myprod(-1.0, x2))
#[allow(dead_code)]
pub fn expr_difference_of_products() -> Node {
    Node::internal(
        gp_expressions::operators::builtin::func::<gp_expressions::operators::builtin::Sub, 2>(),
        vec![
            Node::internal(myprod(), vec![Node::var("x1", 0), Node::constant(1.0)]),
            Node::internal(myprod(), vec![Node::constant(-1.0), Node::var("x2", 1)]),
        ],
    )
}

#[allow(dead_code)]
pub fn x_diagonal() -> Array2<f64> {
    array![[1.0, 1.0], [2.0, 2.0], [-1.0, -1.0], [-2.0, -2.0]]
}

#[allow(dead_code)]
pub fn make_x(n_rows: usize, n_features: usize) -> Array2<f64> {
    Array2::from_shape_fn((n_rows, n_features), |(row, feature)| {
        (row as f64 + 1.0) * (feature as f64 + 1.0) * 0.01
    })
}

#[allow(dead_code)]
const UNARY: [fn(Node) -> Node; 4] = [square, sqrt, exp, log];
#[allow(dead_code)]
const BINARY: [fn(Node, Node) -> Node; 4] = [add, sub, mul, div];

/// Variables `x1..xn`, constants in `[-5, 5)` and weighted variables.
#[allow(dead_code)]
pub fn arb_leaf(n_features: usize) -> BoxedStrategy<Node> {
    assert!(n_features > 0, "arb_leaf needs at least one feature");
    prop_oneof![
        (0..n_features).prop_map(|j| Node::var(format!("x{}", j + 1), j)),
        (-5.0f64..5.0).prop_map(Node::constant),
        (0..n_features, -2.0f64..2.0).prop_map(|(j, w)| Node::weighted_var(format!("x{}", j + 1), j, w)),
    ]
    .boxed()
}

/// Trees over the default function set with at most `depth + 1` levels.
#[allow(dead_code)]
pub fn arb_tree(n_features: usize, depth: u32, desired_size: u32) -> BoxedStrategy<Node> {
    arb_leaf(n_features)
        .prop_recursive(depth, desired_size, 2, |inner| {
            prop_oneof![
                (0..UNARY.len(), inner.clone()).prop_map(|(k, a)| UNARY[k](a)),
                (0..BINARY.len(), inner.clone(), inner).prop_map(|(k, a, b)| BINARY[k](a, b)),
            ]
        })
        .boxed()
}
