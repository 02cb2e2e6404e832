use ndarray::{Array1, Array2, ArrayView2, Axis};

use crate::error::EvalError;
use crate::evaluate::{ParamCursor, check_arity, check_len, column, eval_tree_array_with_params};
use crate::node::{Leaf, Node};

/// Predictions plus their Jacobian with respect to the tree's tunable scalars.
///
/// `jac` has shape `(n_rows, n_params)`; column `k` is the derivative with respect to
/// the `k`-th scalar in pre-order.
#[derive(Clone, Debug)]
pub struct GradMatrix {
    pub value: Array1<f64>,
    pub jac: Array2<f64>,
}

fn grad_node(
    node: &Node,
    x: &ArrayView2<'_, f64>,
    params: &mut ParamCursor<'_>,
    n_params: usize,
) -> Result<GradMatrix, EvalError> {
    let n_rows = x.nrows();
    match node {
        Node::Terminal(Leaf::Const(c)) => {
            let (value, idx) = params.take(c.value());
            let mut jac = Array2::zeros((n_rows, n_params));
            jac.column_mut(idx).fill(1.0);
            Ok(GradMatrix {
                value: Array1::from_elem(n_rows, value),
                jac,
            })
        }
        Node::Terminal(Leaf::Var(v)) => Ok(GradMatrix {
            value: column(x, v.column())?.to_owned(),
            jac: Array2::zeros((n_rows, n_params)),
        }),
        Node::Terminal(Leaf::WeightedVar(w)) => {
            let col = column(x, w.column())?;
            let (weight, idx) = params.take(w.weight());
            let mut jac = Array2::zeros((n_rows, n_params));
            jac.column_mut(idx).assign(&col);
            Ok(GradMatrix {
                value: col.mapv(|xi| weight * xi),
                jac,
            })
        }
        Node::Internal { func, children } => {
            check_arity(func, children.len())?;
            let parts = children
                .iter()
                .map(|c| grad_node(c, x, params, n_params))
                .collect::<Result<Vec<_>, _>>()?;
            let (values, jacs): (Vec<Array1<f64>>, Vec<Array2<f64>>) =
                parts.into_iter().map(|g| (g.value, g.jac)).unzip();

            let value = func.apply(&values);
            check_len(func, n_rows, value.len())?;

            let mut jac = Array2::zeros((n_rows, n_params));
            for (j, child_jac) in jacs.iter().enumerate() {
                let d = func.partial(&values, j).ok_or_else(|| EvalError::MissingPartial {
                    func: func.name().to_string(),
                })?;
                check_len(func, n_rows, d.len())?;
                // Chain rule, row-wise: J += diag(d) * J_child.
                jac += &(child_jac * &d.view().insert_axis(Axis(1)));
            }
            Ok(GradMatrix { value, jac })
        }
    }
}

/// Forward-mode Jacobian through the functions' partial kernels.
///
/// Fails with [`EvalError::MissingPartial`] if any function lacks one.
pub fn eval_grad_tree_array(
    node: &Node,
    x: ArrayView2<'_, f64>,
    params: &[f64],
) -> Result<GradMatrix, EvalError> {
    let mut cursor = ParamCursor::from_params(node, params)?;
    grad_node(node, &x, &mut cursor, params.len())
}

/// Central finite differences with a step relative to each parameter's magnitude.
pub fn eval_grad_finite_diff(
    node: &Node,
    x: ArrayView2<'_, f64>,
    params: &[f64],
    rel_step: f64,
) -> Result<GradMatrix, EvalError> {
    let value = eval_tree_array_with_params(node, x, params)?;
    let mut jac = Array2::zeros((x.nrows(), params.len()));
    let mut shifted = params.to_vec();
    for k in 0..params.len() {
        let h = rel_step * params[k].abs().max(1.0);
        shifted[k] = params[k] + h;
        let plus = eval_tree_array_with_params(node, x, &shifted)?;
        shifted[k] = params[k] - h;
        let minus = eval_tree_array_with_params(node, x, &shifted)?;
        shifted[k] = params[k];
        jac.column_mut(k).assign(&((plus - minus) / (2.0 * h)));
    }
    Ok(GradMatrix { value, jac })
}

/// Jacobian by forward mode when every function has a partial kernel, otherwise by
/// central differences.
pub fn eval_jacobian(node: &Node, x: ArrayView2<'_, f64>, params: &[f64]) -> Result<GradMatrix, EvalError> {
    if node.has_all_partials() {
        eval_grad_tree_array(node, x, params)
    } else {
        eval_grad_finite_diff(node, x, params, f64::EPSILON.cbrt())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;
    use crate::operators::{Func, add, exp, mul};
    use crate::utils::get_scalar_constants;

    #[test]
    fn forward_mode_matches_hand_derivative() {
        // 2.0 + w*x1 ; d/dc = 1, d/dw = x1
        let t = add(Node::constant(2.0), Node::weighted_var("x1", 0, 3.0));
        let x = array![[1.0], [-2.0]];
        let g = eval_grad_tree_array(&t, x.view(), &[2.0, 3.0]).unwrap();
        assert_eq!(g.value, array![5.0, -4.0]);
        assert_eq!(g.jac, array![[1.0, 1.0], [1.0, -2.0]]);
    }

    #[test]
    fn forward_mode_agrees_with_finite_differences() {
        let t = mul(
            Node::constant(0.5),
            exp(mul(Node::weighted_var("x1", 0, 0.3), Node::constant(1.2))),
        );
        let x = array![[0.1], [0.7], [1.5]];
        let p = get_scalar_constants(&t);
        let fwd = eval_grad_tree_array(&t, x.view(), &p).unwrap();
        let fd = eval_grad_finite_diff(&t, x.view(), &p, 1e-6).unwrap();
        for (a, b) in fwd.jac.iter().zip(fd.jac.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-6, max_relative = 1e-5);
        }
    }

    #[test]
    fn missing_partial_falls_back_to_finite_differences() {
        let myprod = Func::new("myprod", 2, |a: &[Array1<f64>]| &a[0] * &a[1]);
        let t = Node::internal(myprod, vec![Node::var("x1", 0), Node::constant(2.0)]);
        let x = array![[1.0], [3.0]];
        assert!(matches!(
            eval_grad_tree_array(&t, x.view(), &[2.0]),
            Err(EvalError::MissingPartial { .. })
        ));
        let g = eval_jacobian(&t, x.view(), &[2.0]).unwrap();
        assert_relative_eq!(g.jac[[0, 0]], 1.0, epsilon = 1e-6);
        assert_relative_eq!(g.jac[[1, 0]], 3.0, epsilon = 1e-6);
    }
}
