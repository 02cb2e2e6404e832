use rayon::prelude::*;

use crate::dataset::Dataset;
use crate::pop_member::Individual;

#[derive(Clone, Debug, Default)]
pub struct Population {
    pub members: Vec<Individual>,
}

impl Population {
    pub fn new(members: Vec<Individual>) -> Self {
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn evaluate_all(&mut self, dataset: &Dataset) {
        self.members.par_iter_mut().for_each(|m| {
            m.evaluate(dataset);
        });
    }

    /// Drops members with non-finite fitness; returns how many were removed.
    pub fn retain_finite(&mut self) -> usize {
        let before = self.members.len();
        self.members.retain(Individual::is_viable);
        before - self.members.len()
    }

    /// Lowest fitness; the first one wins ties.
    pub fn best_index(&self) -> Option<usize> {
        self.members
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.fitness.total_cmp(&b.fitness))
            .map(|(i, _)| i)
    }

    pub fn best(&self) -> Option<&Individual> {
        self.best_index().map(|i| &self.members[i])
    }

    pub fn worst_index(&self) -> Option<usize> {
        self.members
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.fitness.total_cmp(&b.fitness))
            .map(|(i, _)| i)
    }

    pub fn replace_worst(&mut self, member: Individual) {
        if let Some(idx) = self.worst_index() {
            self.members[idx] = member;
        }
    }
}

#[cfg(test)]
mod tests {
    use gp_expressions::Node;

    use super::*;

    fn with_fitness(values: &[f64]) -> Population {
        Population::new(
            values
                .iter()
                .map(|&f| Individual {
                    tree: Node::constant(f),
                    fitness: f,
                })
                .collect(),
        )
    }

    #[test]
    fn best_and_worst() {
        let mut pop = with_fitness(&[3.0, 1.0, f64::INFINITY, 2.0]);
        assert_eq!(pop.best_index(), Some(1));
        assert_eq!(pop.worst_index(), Some(2));
        assert_eq!(pop.retain_finite(), 1);
        assert_eq!(pop.worst_index(), Some(0));

        pop.replace_worst(Individual {
            tree: Node::constant(0.5),
            fitness: 0.5,
        });
        assert_eq!(pop.best().map(|m| m.fitness), Some(0.5));
        assert_eq!(pop.len(), 3);
    }

    #[test]
    fn empty_population_has_no_best() {
        let pop = Population::default();
        assert!(pop.best().is_none());
        assert!(pop.worst_index().is_none());
    }
}
