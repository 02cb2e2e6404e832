use gp_nls::prelude::*;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() {
    const N_FEATURES: usize = 3;
    let n_rows = 100;

    let mut rng = StdRng::seed_from_u64(0);

    let mut x = Array2::<f64>::zeros((n_rows, N_FEATURES));
    let mut y = Array1::<f64>::zeros(n_rows);

    for i in 0..n_rows {
        for j in 0..N_FEATURES {
            x[(i, j)] = rng.random_range(0.1..3.0);
        }
        let x0 = x[(i, 0)];
        let x2 = x[(i, 2)];
        y[i] = 2.5 * (0.4 * x0).exp() - 1.3 * x2 * x2 + 0.5;
    }

    let dataset = Dataset::new(x, y).expect("matching rows");
    let functions = FunctionSet::from_names(&["+", "-", "*", "exp", "square"]).expect("builtin names");
    let terminals = TerminalSet::weighted_variables(N_FEATURES, Some(Erc::new(-1.0, 1.0).expect("range")))
        .expect("non-empty");

    let options = Options {
        generations: 30,
        pop_size: 200,
        max_depth: 5,
        max_size: 25,
        verbose: true,
        ..Default::default()
    };

    let result = gp_search(dataset, functions, terminals, options).expect("search failed");

    println!("Generation\tBest RMSE");
    for (g, f) in result.history.iter().enumerate() {
        println!("{}\t{}", g + 1, f);
    }
    let best = &result.best;
    println!(
        "best: {} (rmse {}, {} nodes, {} true nodes, depth {})",
        best.tree,
        best.fitness,
        best.tree.count_nodes(),
        best.tree.count_nodes_true(),
        best.tree.depth()
    );
}
