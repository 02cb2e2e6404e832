use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::error::EvalError;
use crate::node::{Leaf, Node};
use crate::utils::count_scalar_constants;

/// Supplies tunable scalars in pre-order, either from the tree itself or from an
/// external parameter vector.
pub(crate) struct ParamCursor<'a> {
    values: Option<&'a [f64]>,
    next: usize,
}

impl<'a> ParamCursor<'a> {
    pub(crate) fn from_tree() -> Self {
        Self {
            values: None,
            next: 0,
        }
    }

    pub(crate) fn from_params(node: &Node, params: &'a [f64]) -> Result<Self, EvalError> {
        let expected = count_scalar_constants(node);
        if params.len() != expected {
            return Err(EvalError::ParamCountMismatch {
                expected,
                got: params.len(),
            });
        }
        Ok(Self {
            values: Some(params),
            next: 0,
        })
    }

    /// Next scalar, plus its index into the parameter vector.
    pub(crate) fn take(&mut self, own: f64) -> (f64, usize) {
        let idx = self.next;
        self.next += 1;
        match self.values {
            Some(v) => (v[idx], idx),
            None => (own, idx),
        }
    }
}

pub(crate) fn column<'x>(x: &ArrayView2<'x, f64>, column: usize) -> Result<ArrayView1<'x, f64>, EvalError> {
    if column >= x.ncols() {
        return Err(EvalError::ColumnOutOfRange {
            column,
            n_features: x.ncols(),
        });
    }
    Ok(x.clone().index_axis_move(ndarray::Axis(1), column))
}

pub(crate) fn check_arity(func: &crate::operators::Func, children: usize) -> Result<(), EvalError> {
    if children != func.arity() {
        return Err(EvalError::ArityMismatch {
            func: func.name().to_string(),
            arity: func.arity(),
            children,
        });
    }
    Ok(())
}

pub(crate) fn check_len(func: &crate::operators::Func, expected: usize, got: usize) -> Result<(), EvalError> {
    if got != expected {
        return Err(EvalError::LengthMismatch {
            func: func.name().to_string(),
            expected,
            got,
        });
    }
    Ok(())
}

fn eval_node(node: &Node, x: &ArrayView2<'_, f64>, params: &mut ParamCursor<'_>) -> Result<Array1<f64>, EvalError> {
    let n_rows = x.nrows();
    match node {
        Node::Terminal(Leaf::Const(c)) => {
            let (value, _) = params.take(c.value());
            Ok(Array1::from_elem(n_rows, value))
        }
        Node::Terminal(Leaf::Var(v)) => Ok(column(x, v.column())?.to_owned()),
        Node::Terminal(Leaf::WeightedVar(w)) => {
            let col = column(x, w.column())?;
            let (weight, _) = params.take(w.weight());
            Ok(col.mapv(|xi| weight * xi))
        }
        Node::Internal { func, children } => {
            check_arity(func, children.len())?;
            let args = children
                .iter()
                .map(|c| eval_node(c, x, params))
                .collect::<Result<Vec<_>, _>>()?;
            let out = func.apply(&args);
            check_len(func, n_rows, out.len())?;
            Ok(out)
        }
    }
}

/// Evaluate `node` over every row of `x` (rows are observations).
///
/// Structural faults are errors; NaN and infinities are returned as values.
pub fn eval_tree_array(node: &Node, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, EvalError> {
    eval_node(node, &x, &mut ParamCursor::from_tree())
}

/// As [`eval_tree_array`], substituting `params` positionally for the tree's tunable
/// scalars (pre-order over constants and variable weights) without rebuilding it.
pub fn eval_tree_array_with_params(
    node: &Node,
    x: ArrayView2<'_, f64>,
    params: &[f64],
) -> Result<Array1<f64>, EvalError> {
    let mut cursor = ParamCursor::from_params(node, params)?;
    eval_node(node, &x, &mut cursor)
}
