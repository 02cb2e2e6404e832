use gp_expressions::operators::{add, mul};
use gp_expressions::{Node, eval_jacobian, eval_tree_array_with_params, get_scalar_constants, replace_const_nodes};
use ndarray::{ArrayView1, ArrayView2};

use crate::dataset::Dataset;
use crate::optim::{EvalBudget, LeastSquaresProblem, LmOptions, levenberg_marquardt};

/// `+(1.0, *(1.0, tree))`: an offset and a scale around `tree`.
pub fn wrap_linear_transform_box(tree: Node) -> Node {
    add(Node::constant(1.0), mul(Node::constant(1.0), tree))
}

/// The tree inside a box built by [`wrap_linear_transform_box`].
pub fn strip_linear_transform_box(wrapped: &Node) -> Option<Node> {
    let scaled = wrapped.children().get(1)?;
    let inner = scaled.children().get(1)?;
    Some(Node::clone(inner))
}

struct TreeResiduals<'t, 'x, 'y> {
    tree: &'t Node,
    x: ArrayView2<'x, f64>,
    y: ArrayView1<'y, f64>,
}

impl LeastSquaresProblem for TreeResiduals<'_, '_, '_> {
    fn n_residuals(&self) -> usize {
        self.y.len()
    }

    fn residuals(&mut self, params: &[f64], out: &mut [f64], budget: &mut EvalBudget) -> Option<()> {
        budget.f_calls += 1;
        let yhat = eval_tree_array_with_params(self.tree, self.x, params).ok()?;
        if yhat.len() != out.len() {
            return None;
        }
        for ((o, &a), &b) in out.iter_mut().zip(yhat.iter()).zip(self.y.iter()) {
            *o = a - b;
        }
        Some(())
    }

    fn jacobian(&mut self, params: &[f64], out: &mut [f64], budget: &mut EvalBudget) -> Option<()> {
        budget.j_calls += 1;
        let grad = eval_jacobian(self.tree, self.x, params).ok()?;
        for (o, &g) in out.iter_mut().zip(grad.jac.iter()) {
            *o = g;
        }
        Some(())
    }
}

#[derive(Clone, Debug)]
pub struct AdaptResult {
    pub tree: Node,
    /// Offset, scale, then the tree's own scalars in pre-order.
    pub initial_params: Vec<f64>,
    pub fitted: bool,
}

/// Fits every constant and variable weight of `tree`, plus an offset and a scale,
/// by bounded Levenberg-Marquardt on `(x, y)`.
///
/// When the fit fails (non-finite residuals or Jacobian, no solvable step, or no
/// convergence within `max_iterations`) the unfitted wrapped tree is used instead. With `keep_box` the offset and scale
/// stay in the result (four more nodes, two more levels); otherwise only the inner
/// tree is returned.
pub fn adapt_tree(
    tree: Node,
    x: ArrayView2<'_, f64>,
    y: ArrayView1<'_, f64>,
    max_iterations: usize,
    keep_box: bool,
) -> AdaptResult {
    let wrapped = wrap_linear_transform_box(tree);
    let initial_params = get_scalar_constants(&wrapped);

    let opts = LmOptions {
        iterations: max_iterations,
        ..LmOptions::default()
    };
    let fit = {
        let mut problem = TreeResiduals { tree: &wrapped, x, y };
        levenberg_marquardt(&initial_params, &mut problem, opts)
    };
    let (boxed, fitted) = match fit {
        Some(res) if res.converged => {
            log::trace!(
                "constant fit converged in {} iterations (sse {:.3e}, {} residual / {} jacobian calls)",
                res.iterations,
                res.minimum,
                res.budget.f_calls,
                res.budget.j_calls
            );
            (replace_const_nodes(&wrapped, &res.minimizer), true)
        }
        Some(res) => {
            log::debug!(
                "constant fit for {wrapped} did not converge in {} iterations; keeping unfitted tree",
                res.iterations
            );
            (wrapped, false)
        }
        None => {
            log::debug!("constant fit failed for {wrapped}; keeping unfitted tree");
            (wrapped, false)
        }
    };

    let tree = if keep_box {
        boxed
    } else {
        match strip_linear_transform_box(&boxed) {
            Some(inner) => inner,
            None => boxed,
        }
    };
    AdaptResult {
        tree,
        initial_params,
        fitted,
    }
}

/// [`adapt_tree`] against a dataset.
pub fn adapt_to_dataset(tree: Node, dataset: &Dataset, max_iterations: usize, keep_box: bool) -> AdaptResult {
    adapt_tree(tree, dataset.x.view(), dataset.y.view(), max_iterations, keep_box)
}
