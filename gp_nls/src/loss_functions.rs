use gp_expressions::{Node, eval_tree_array};
use ndarray::{ArrayView1, ArrayView2, Zip};

/// Root-mean-square error. Non-finite inputs propagate into the result.
pub fn rmse(yhat: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> f64 {
    debug_assert_eq!(yhat.len(), y.len());
    if y.is_empty() {
        return f64::INFINITY;
    }
    let mut sse = 0.0;
    Zip::from(&yhat).and(&y).for_each(|&a, &b| {
        let r = a - b;
        sse += r * r;
    });
    (sse / y.len() as f64).sqrt()
}

/// RMSE of `tree` against `(x, y)`; any evaluation failure or non-finite result is `+∞`.
pub fn fitness(tree: &Node, x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>) -> f64 {
    match eval_tree_array(tree, x) {
        Ok(yhat) if yhat.len() == y.len() => {
            let e = rmse(yhat.view(), y);
            if e.is_finite() { e } else { f64::INFINITY }
        }
        _ => f64::INFINITY,
    }
}
