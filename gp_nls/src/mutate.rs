use gp_expressions::{FunctionSet, Node, TerminalSet};
use rand::Rng;

use crate::initialization::ptc2;

/// Subtree crossover. Borrows both parents and returns a new tree.
///
/// A cut point `p` is drawn uniformly from `parent_a`. The donor subtree comes from
/// `parent_b` and must fit what `parent_a` leaves of the budgets: true size at most
/// `max_size - (true_size(a) - true_size(a[p]))` and depth at most
/// `max_depth - level(p)`, each floored at 1. With no such donor the result is a copy
/// of `parent_a`.
pub fn crossover<R: Rng + ?Sized>(
    parent_a: &Node,
    parent_b: &Node,
    max_depth: usize,
    max_size: usize,
    rng: &mut R,
) -> Node {
    let p = rng.random_range(1..=parent_a.count_nodes());
    let partial = parent_a.count_nodes_true() - parent_a.branch_at(p).count_nodes_true();
    let allowed_size = max_size.saturating_sub(partial).max(1);
    let allowed_depth = max_depth.saturating_sub(parent_a.level_at(p)).max(1);

    let candidates = parent_b.branches_in_limits(allowed_size, allowed_depth);
    if candidates.is_empty() {
        return parent_a.clone();
    }
    let q = candidates[rng.random_range(0..candidates.len())];
    parent_a.replace_at(p, parent_b.branch_at(q).deep_copy())
}

/// Subtree mutation. Takes the tree by value.
///
/// With probability `1 - mutation_rate` the tree comes back untouched. Otherwise the
/// subtree at a uniform point `p` is replaced by a PTC2 tree whose expected size is
/// drawn between the current subtree's true size and what `max_size` allows there.
#[allow(clippy::too_many_arguments)]
pub fn mutate<R: Rng + ?Sized>(
    tree: Node,
    max_depth: usize,
    max_size: usize,
    fset: &FunctionSet,
    tset: &TerminalSet,
    mutation_rate: f64,
    rng: &mut R,
) -> Node {
    if rng.random::<f64>() >= mutation_rate {
        return tree;
    }
    let p = rng.random_range(1..=tree.count_nodes());
    let current = tree.branch_at(p).count_nodes_true() as i64;
    let range = max_size as i64 - current;
    let expected = ((rng.random::<f64>() * range as f64).floor() as i64 + current).max(1) as usize;
    let allowed_depth = max_depth.saturating_sub(tree.level_at(p)).max(1);

    let replacement = ptc2(fset, tset, allowed_depth, expected, rng);
    tree.replace_at(p, replacement)
}
