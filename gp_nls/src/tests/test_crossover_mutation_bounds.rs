use gp_expressions::FunctionSet;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::common::weighted_terminals;
use crate::initialization::{full, grow};
use crate::mutate::{crossover, mutate};

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn crossover_child_fits_depth_and_parents_survive(
        seed in any::<u64>(),
        max_depth in 2usize..7,
        max_size in 1usize..40,
    ) {
        let fset = FunctionSet::default_set();
        let tset = weighted_terminals(2);
        let mut rng = StdRng::seed_from_u64(seed);
        let a = full(&fset, &tset, max_depth, &mut rng);
        let b = grow(&fset, &tset, max_depth, &mut rng);
        let (sa, sb) = (a.to_string(), b.to_string());

        for _ in 0..10 {
            let child = crossover(&a, &b, max_depth, max_size, &mut rng);
            prop_assert!(child.depth() <= max_depth);
        }
        prop_assert_eq!(a.to_string(), sa);
        prop_assert_eq!(b.to_string(), sb);
    }

    #[test]
    fn mutation_with_zero_rate_is_identity(seed in any::<u64>(), depth in 1usize..6) {
        let fset = FunctionSet::default_set();
        let tset = weighted_terminals(3);
        let mut rng = StdRng::seed_from_u64(seed);
        let tree = grow(&fset, &tset, depth, &mut rng);
        let before = tree.to_string();
        let out = mutate(tree, depth, 30, &fset, &tset, 0.0, &mut rng);
        prop_assert_eq!(out.to_string(), before);
    }

    #[test]
    fn mutation_keeps_depth_slack(seed in any::<u64>(), max_depth in 2usize..7) {
        let fset = FunctionSet::default_set();
        let tset = weighted_terminals(3);
        let mut rng = StdRng::seed_from_u64(seed);
        let tree = grow(&fset, &tset, max_depth, &mut rng);
        let out = mutate(tree, max_depth, 25, &fset, &tset, 1.0, &mut rng);
        prop_assert!(out.depth() <= max_depth + 1);
    }
}
