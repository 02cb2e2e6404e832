use rstest::rstest;

use super::common::{arithmetic, product_dataset, small_options, unit_terminals, weighted_terminals};
use crate::initialization::InitMethod;
use crate::loss_functions::fitness;
use crate::{Options, SearchEngine, gp_search};

#[rstest]
#[case(InitMethod::Grow)]
#[case(InitMethod::Full)]
#[case(InitMethod::Ramped)]
#[case(InitMethod::Ptc2)]
fn search_runs_with_every_initializer(#[case] init_method: InitMethod) {
    let dataset = product_dataset();
    let options = Options {
        init_method,
        min_depth: 2,
        use_nls_optimization: false,
        ..small_options()
    };
    let result = gp_search(dataset.clone(), arithmetic(), unit_terminals(2), options).unwrap();
    assert_eq!(result.history.len(), 5);
    assert!(result.best.fitness.is_finite());
    assert_eq!(
        fitness(&result.best.tree, dataset.x.view(), dataset.y.view()),
        result.best.fitness
    );
}

#[test]
fn elitism_never_loses_the_best() {
    let options = Options {
        generations: 12,
        mutation_rate: 0.8,
        ..small_options()
    };
    let result = gp_search(product_dataset(), arithmetic(), weighted_terminals(2), options).unwrap();
    for w in result.history.windows(2) {
        assert!(w[1] <= w[0], "best fitness went up: {:?}", result.history);
    }
}

#[test]
fn fixed_seed_is_reproducible() {
    let run = || {
        gp_search(product_dataset(), arithmetic(), weighted_terminals(2), small_options()).unwrap()
    };
    let (a, b) = (run(), run());
    assert_eq!(a.best.tree.to_string(), b.best.tree.to_string());
    assert_eq!(a.history, b.history);
}

#[test]
fn stepping_matches_run_to_completion() {
    let mut engine = SearchEngine::new(product_dataset(), arithmetic(), unit_terminals(2), small_options()).unwrap();
    assert_eq!(engine.total_generations(), 5);
    assert_eq!(engine.step(2).unwrap(), 2);
    assert_eq!(engine.generations_completed(), 2);
    assert_eq!(engine.step(10).unwrap(), 3);
    assert!(engine.is_finished());
    assert_eq!(engine.step(1).unwrap(), 0);
    let history = engine.history().to_vec();
    let result = engine.run_to_completion().unwrap();
    assert_eq!(result.history, history);
}

#[test]
fn zero_generations_returns_best_initial_member() {
    let options = Options {
        generations: 0,
        ..small_options()
    };
    let engine = SearchEngine::new(product_dataset(), arithmetic(), unit_terminals(2), options).unwrap();
    let initial_best = engine.best().map(|m| m.fitness).unwrap();
    let result = engine.run_to_completion().unwrap();
    assert!(result.history.is_empty());
    assert_eq!(result.best.fitness, initial_best);
}
