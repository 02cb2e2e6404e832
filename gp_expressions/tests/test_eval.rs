mod common;

use common::*;
use gp_expressions::operators::{add, div, exp, mul, sqrt, square};
use gp_expressions::{EvalError, Node, eval_tree_array, eval_tree_array_with_params};
use ndarray::array;
use rstest::rstest;

#[test]
fn difference_of_products_scenario() {
    let t = expr_difference_of_products();
    let x = x_diagonal();
    let y = eval_tree_array(&t, x.view()).unwrap();
    assert_eq!(y, array![2.0, 4.0, -2.0, -4.0]);
}

#[rstest]
#[case(0.0)]
#[case(-3.25)]
#[case(1e6)]
fn constant_fills_every_row(#[case] value: f64) {
    let x = make_x(17, 2);
    let y = eval_tree_array(&Node::constant(value), x.view()).unwrap();
    assert_eq!(y.len(), 17);
    assert!(y.iter().all(|&v| v == value));
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
fn var_returns_its_column(#[case] column: usize) {
    let x = make_x(9, 3);
    let y = eval_tree_array(&Node::var("x", column), x.view()).unwrap();
    assert_eq!(y, x.column(column).to_owned());
}

#[test]
fn composite_matches_manual() {
    // sqrt(square(x1) + exp(x2 / 2.0))
    let t = sqrt(add(
        square(Node::var("x1", 0)),
        exp(div(Node::var("x2", 1), Node::constant(2.0))),
    ));
    let x = make_x(50, 2);
    let y = eval_tree_array(&t, x.view()).unwrap();
    for (row, &v) in y.iter().enumerate() {
        let x1 = x[[row, 0]];
        let x2 = x[[row, 1]];
        let manual = (x1 * x1 + (x2 / 2.0).exp()).sqrt();
        assert!((v - manual).abs() < 1e-12);
    }
}

#[test]
fn arity_mismatch_is_reported() {
    let bad = Node::Internal {
        func: gp_expressions::FunctionSet::default_set().iter().next().unwrap().clone(),
        children: vec![std::sync::Arc::new(Node::var("x1", 0))],
    };
    let err = eval_tree_array(&bad, make_x(3, 1).view()).unwrap_err();
    assert!(matches!(err, EvalError::ArityMismatch { arity: 2, children: 1, .. }));
}

#[test]
fn params_override_without_touching_tree() {
    let t = mul(Node::constant(1.0), Node::weighted_var("x1", 0, 1.0));
    let x = array![[2.0], [4.0]];
    let y = eval_tree_array_with_params(&t, x.view(), &[0.5, 3.0]).unwrap();
    assert_eq!(y, array![3.0, 6.0]);
    assert_eq!(eval_tree_array(&t, x.view()).unwrap(), array![2.0, 4.0]);
}
