use gp_expressions::{Func, FunctionSet, Leaf, Node, TerminalSet};
use rand::Rng;

/// Tree-creation strategy for the initial population.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InitMethod {
    Grow,
    Full,
    Ramped,
    #[default]
    Ptc2,
}

fn terminal<R: Rng + ?Sized>(tset: &TerminalSet, rng: &mut R) -> Node {
    Node::from(tset.random_leaf(rng))
}

/// Random tree that stops early at each node with probability `1 / max_depth`.
pub fn grow<R: Rng + ?Sized>(fset: &FunctionSet, tset: &TerminalSet, max_depth: usize, rng: &mut R) -> Node {
    if max_depth <= 1 || rng.random_bool(1.0 / max_depth as f64) {
        return terminal(tset, rng);
    }
    let func = fset.random(rng).clone();
    let children = (0..func.arity())
        .map(|_| grow(fset, tset, max_depth - 1, rng))
        .collect();
    Node::internal(func, children)
}

/// Random tree whose every terminal sits at depth `max_depth`.
pub fn full<R: Rng + ?Sized>(fset: &FunctionSet, tset: &TerminalSet, max_depth: usize, rng: &mut R) -> Node {
    if max_depth <= 1 {
        return terminal(tset, rng);
    }
    let func = fset.random(rng).clone();
    let children = (0..func.arity())
        .map(|_| full(fset, tset, max_depth - 1, rng))
        .collect();
    Node::internal(func, children)
}

enum Slot {
    Pending,
    Leaf(Leaf),
    Internal(Func, Vec<usize>),
}

fn open_children(slots: &mut Vec<Slot>, open: &mut Vec<(usize, usize)>, at: usize, depth: usize, func: Func) {
    let mut kids = Vec::with_capacity(func.arity());
    for _ in 0..func.arity() {
        kids.push(slots.len());
        open.push((slots.len(), depth + 1));
        slots.push(Slot::Pending);
    }
    slots[at] = Slot::Internal(func, kids);
}

fn assemble(slots: &mut [Slot], idx: usize) -> Node {
    match std::mem::replace(&mut slots[idx], Slot::Pending) {
        Slot::Leaf(leaf) => Node::from(leaf),
        Slot::Internal(func, kids) => {
            let children = kids.into_iter().map(|k| assemble(slots, k)).collect();
            Node::internal(func, children)
        }
        Slot::Pending => unreachable!("every slot is filled before assembly"),
    }
}

/// Probabilistic Tree Creator 2.
///
/// Grows from a random root by expanding uniformly chosen open slots until the
/// committed true size plus the open slots reaches `expected_size`, then closes the
/// remaining slots with terminals. Slots at depth `max_depth` always close, so the
/// result may have `max_depth + 1` levels; with unit-size terminals its true size is
/// at most `expected_size + fset.max_arity()`.
pub fn ptc2<R: Rng + ?Sized>(
    fset: &FunctionSet,
    tset: &TerminalSet,
    max_depth: usize,
    expected_size: usize,
    rng: &mut R,
) -> Node {
    if expected_size <= 1 || max_depth <= 1 {
        return terminal(tset, rng);
    }

    let mut slots: Vec<Slot> = Vec::with_capacity(expected_size + fset.max_arity());
    let mut open: Vec<(usize, usize)> = Vec::new();

    slots.push(Slot::Pending);
    let root = fset.random(rng).clone();
    open_children(&mut slots, &mut open, 0, 0, root);
    let mut size = 1;

    while !open.is_empty() && size + open.len() < expected_size {
        let (at, depth) = open.swap_remove(rng.random_range(0..open.len()));
        if depth >= max_depth {
            let leaf = tset.random_leaf(rng);
            size += leaf.true_size();
            slots[at] = Slot::Leaf(leaf);
        } else {
            let func = fset.random(rng).clone();
            size += 1;
            open_children(&mut slots, &mut open, at, depth, func);
        }
    }

    for (at, _) in open {
        slots[at] = Slot::Leaf(tset.random_leaf(rng));
    }

    assemble(&mut slots, 0)
}

/// Depth-ramped mix of `full` and `grow` trees over `min_depth..=max_depth`.
///
/// Each depth band gets `remaining / remaining_bands` trees; the first half of a band
/// is `full`, the rest (including an odd one) is `grow`.
pub fn ramped_half_half<R: Rng + ?Sized>(
    fset: &FunctionSet,
    tset: &TerminalSet,
    min_depth: usize,
    max_depth: usize,
    pop_size: usize,
    rng: &mut R,
) -> Vec<Node> {
    let min_depth = min_depth.max(1);
    let max_depth = max_depth.max(min_depth);
    let n_bands = max_depth - min_depth + 1;

    let mut out = Vec::with_capacity(pop_size);
    for (band, depth) in (min_depth..=max_depth).enumerate() {
        let remaining = pop_size - out.len();
        let band_size = remaining / (n_bands - band);
        let n_full = band_size / 2;
        for i in 0..band_size {
            let tree = if i < n_full {
                full(fset, tset, depth, rng)
            } else {
                grow(fset, tset, depth, rng)
            };
            out.push(tree);
        }
    }
    out
}

/// Builds `pop_size` trees with the chosen strategy.
#[allow(clippy::too_many_arguments)]
pub fn init_population<R: Rng + ?Sized>(
    method: InitMethod,
    fset: &FunctionSet,
    tset: &TerminalSet,
    min_depth: usize,
    max_depth: usize,
    expected_size: usize,
    pop_size: usize,
    rng: &mut R,
) -> Vec<Node> {
    match method {
        InitMethod::Grow => (0..pop_size).map(|_| grow(fset, tset, max_depth, rng)).collect(),
        InitMethod::Full => (0..pop_size).map(|_| full(fset, tset, max_depth, rng)).collect(),
        InitMethod::Ramped => ramped_half_half(fset, tset, min_depth, max_depth, pop_size, rng),
        InitMethod::Ptc2 => (0..pop_size)
            .map(|_| ptc2(fset, tset, max_depth, expected_size, rng))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use gp_expressions::Erc;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rstest::rstest;

    use super::*;

    fn sets() -> (FunctionSet, TerminalSet) {
        let erc = Erc::new(-1.0, 1.0).unwrap();
        (
            FunctionSet::default_set(),
            TerminalSet::variables(2, Some(erc)).unwrap(),
        )
    }

    #[test]
    fn full_reaches_exact_depth() {
        let (f, t) = sets();
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..50 {
            assert_eq!(full(&f, &t, 4, &mut rng).depth(), 4);
        }
    }

    #[test]
    fn grow_respects_depth() {
        let (f, t) = sets();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let d = grow(&f, &t, 5, &mut rng).depth();
            assert!((1..=5).contains(&d));
        }
        assert!(grow(&f, &t, 1, &mut rng).is_terminal());
    }

    #[test]
    fn ptc2_degenerate_budgets_give_a_terminal() {
        let (f, t) = sets();
        let mut rng = StdRng::seed_from_u64(2);
        assert!(ptc2(&f, &t, 1, 20, &mut rng).is_terminal());
        assert!(ptc2(&f, &t, 8, 1, &mut rng).is_terminal());
    }

    #[rstest]
    #[case(InitMethod::Grow)]
    #[case(InitMethod::Full)]
    #[case(InitMethod::Ramped)]
    #[case(InitMethod::Ptc2)]
    fn dispatch_builds_the_requested_count(#[case] method: InitMethod) {
        let (f, t) = sets();
        let mut rng = StdRng::seed_from_u64(3);
        let pop = init_population(method, &f, &t, 2, 5, 15, 37, &mut rng);
        assert_eq!(pop.len(), 37);
        assert!(pop.iter().all(|tree| tree.depth() <= 6));
    }

    #[test]
    fn ramped_splits_bands() {
        let (f, t) = sets();
        let mut rng = StdRng::seed_from_u64(4);
        // Bands for depths 2, 3, 4 get 3, 3 and 4 trees; full trees come first.
        let pop = ramped_half_half(&f, &t, 2, 4, 10, &mut rng);
        assert_eq!(pop.len(), 10);
        assert_eq!(pop[0].depth(), 2);
        assert_eq!(pop[3].depth(), 3);
        assert_eq!(pop[6].depth(), 4);
        assert_eq!(pop[7].depth(), 4);
    }
}
