use gp_expressions::Node;

use crate::dataset::Dataset;
use crate::loss_functions::fitness;

/// A tree with its cached fitness. Fitness is `+∞` until evaluated.
#[derive(Clone, Debug)]
pub struct Individual {
    pub tree: Node,
    pub fitness: f64,
}

impl Individual {
    pub fn new(tree: Node) -> Self {
        Self {
            tree,
            fitness: f64::INFINITY,
        }
    }

    /// Refreshes the cached fitness; returns whether it is finite.
    pub fn evaluate(&mut self, dataset: &Dataset) -> bool {
        self.fitness = fitness(&self.tree, dataset.x.view(), dataset.y.view());
        self.is_viable()
    }

    pub fn is_viable(&self) -> bool {
        self.fitness.is_finite()
    }

    /// Independent copy that shares no subtrees with `self`.
    pub fn deep_copy(&self) -> Self {
        Self {
            tree: self.tree.deep_copy(),
            fitness: self.fitness,
        }
    }
}
