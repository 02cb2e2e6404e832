mod common;

use approx::assert_relative_eq;
use common::*;
use gp_expressions::{
    EvalError, eval_grad_finite_diff, eval_grad_tree_array, eval_jacobian, eval_tree_array, get_scalar_constants,
};
use proptest::prelude::*;

#[test]
fn jacobian_of_scenario_tree_uses_finite_differences() {
    let t = expr_difference_of_products();
    let x = x_diagonal();
    let p = get_scalar_constants(&t);
    assert!(matches!(
        eval_grad_tree_array(&t, x.view(), &p),
        Err(EvalError::MissingPartial { .. })
    ));
    // d/dc1 = x1, d/dc2 = -x2
    let g = eval_jacobian(&t, x.view(), &p).unwrap();
    for row in 0..x.nrows() {
        assert_relative_eq!(g.jac[[row, 0]], x[[row, 0]], epsilon = 1e-6);
        assert_relative_eq!(g.jac[[row, 1]], -x[[row, 1]], epsilon = 1e-6);
    }
    assert_eq!(g.value, eval_tree_array(&t, x.view()).unwrap());
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn forward_mode_matches_central_differences(t in arb_tree(2, 4, 12)) {
        let x = make_x(8, 2);
        let p = get_scalar_constants(&t);
        let fwd = eval_grad_tree_array(&t, x.view(), &p).unwrap();
        prop_assume!(fwd.value.iter().all(|v| v.is_finite()) && fwd.jac.iter().all(|v| v.is_finite()));
        prop_assume!(fwd.jac.iter().all(|v| v.abs() < 1e4));
        let fd = eval_grad_finite_diff(&t, x.view(), &p, 1e-6).unwrap();
        prop_assume!(fd.jac.iter().all(|v| v.is_finite()));
        for (a, b) in fwd.jac.iter().zip(fd.jac.iter()) {
            prop_assert!((a - b).abs() <= 1e-3 * (1.0 + a.abs()), "forward {} vs finite difference {}", a, b);
        }
    }
}
