use rand::Rng;

use crate::pop_member::Individual;

/// The fitter of two individuals. Strictly lower fitness wins; ties return `b`.
pub fn tournament<'a>(a: &'a Individual, b: &'a Individual) -> &'a Individual {
    if a.fitness < b.fitness { a } else { b }
}

/// Winner of a tournament between two members drawn with replacement.
pub fn binary_tournament<'a, R: Rng + ?Sized>(rng: &mut R, members: &'a [Individual]) -> &'a Individual {
    assert!(!members.is_empty(), "tournament over an empty population");
    let a = &members[rng.random_range(0..members.len())];
    let b = &members[rng.random_range(0..members.len())];
    tournament(a, b)
}

pub fn uniform<'a, R: Rng + ?Sized>(rng: &mut R, members: &'a [Individual]) -> &'a Individual {
    assert!(!members.is_empty(), "selection from an empty population");
    &members[rng.random_range(0..members.len())]
}

/// Survivor selection: `target` binary tournaments over `pool`.
pub fn reduce<R: Rng + ?Sized>(rng: &mut R, pool: &[Individual], target: usize) -> Vec<Individual> {
    if pool.is_empty() {
        return Vec::new();
    }
    (0..target).map(|_| binary_tournament(rng, pool).clone()).collect()
}

#[cfg(test)]
mod tests {
    use gp_expressions::Node;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn ind(f: f64) -> Individual {
        Individual {
            tree: Node::constant(f),
            fitness: f,
        }
    }

    #[test]
    fn lower_fitness_wins() {
        let (a, b) = (ind(1.0), ind(2.0));
        assert_eq!(tournament(&a, &b).fitness, 1.0);
        assert_eq!(tournament(&b, &a).fitness, 1.0);
        let inf = ind(f64::INFINITY);
        assert_eq!(tournament(&inf, &b).fitness, 2.0);
    }

    #[test]
    fn reduce_never_keeps_the_worst_of_two() {
        let pool = vec![ind(1.0), ind(5.0)];
        let mut rng = StdRng::seed_from_u64(0);
        let out = reduce(&mut rng, &pool, 200);
        assert_eq!(out.len(), 200);
        // 5.0 survives only when drawn twice: expected 50 of 200.
        let n_bad = out.iter().filter(|m| m.fitness == 5.0).count();
        assert!(n_bad < 90, "{n_bad}");
        assert!(reduce(&mut rng, &[], 3).is_empty());
    }
}
