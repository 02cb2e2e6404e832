use gp_expressions::{Erc, FunctionSet, TerminalSet};
use ndarray::{Array1, Array2};

use crate::{Dataset, Options};

/// `y = 1.5 * x1 * x2 + 0.5` over a small grid.
pub(crate) fn product_dataset() -> Dataset {
    let n_rows = 40;
    let x = Array2::from_shape_fn((n_rows, 2), |(i, j)| 0.1 + (i as f64) * 0.05 + (j as f64) * 0.3);
    let y = Array1::from_shape_fn(n_rows, |i| 1.5 * x[(i, 0)] * x[(i, 1)] + 0.5);
    Dataset::new(x, y).unwrap()
}

pub(crate) fn arithmetic() -> FunctionSet {
    FunctionSet::from_names(&["+", "-", "*", "/"]).unwrap()
}

pub(crate) fn unit_terminals(n_features: usize) -> TerminalSet {
    TerminalSet::variables(n_features, Some(Erc::new(-1.0, 1.0).unwrap())).unwrap()
}

pub(crate) fn weighted_terminals(n_features: usize) -> TerminalSet {
    TerminalSet::weighted_variables(n_features, Some(Erc::new(-1.0, 1.0).unwrap())).unwrap()
}

pub(crate) fn small_options() -> Options {
    Options {
        seed: 7,
        pop_size: 30,
        generations: 5,
        max_depth: 4,
        max_size: 15,
        nls_max_iterations: 5,
        ..Default::default()
    }
}
