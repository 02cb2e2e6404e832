use std::sync::Arc;

use crate::operators::Func;
use crate::terminals::{Const, Var, WeightedVar};

/// Content of a terminal node.
#[derive(Clone, Debug, PartialEq)]
pub enum Leaf {
    Const(Const),
    Var(Var),
    WeightedVar(WeightedVar),
}

impl Leaf {
    /// Node count of the leaf under the size-budget convention.
    pub fn true_size(&self) -> usize {
        match self {
            Leaf::WeightedVar(_) => 3,
            Leaf::Const(_) | Leaf::Var(_) => 1,
        }
    }

    pub fn true_depth(&self) -> usize {
        match self {
            Leaf::WeightedVar(_) => 2,
            Leaf::Const(_) | Leaf::Var(_) => 1,
        }
    }

    /// Whether the leaf carries a tunable scalar (constant value or variable weight).
    pub fn is_tunable(&self) -> bool {
        matches!(self, Leaf::Const(_) | Leaf::WeightedVar(_))
    }
}

/// Expression tree node.
///
/// Children are reference-counted: structural edits rebuild the path to the edit and
/// share every untouched subtree. `clone` is shallow; use [`Node::deep_copy`] for an
/// independent tree.
#[derive(Clone, Debug)]
pub enum Node {
    Internal { func: Func, children: Vec<Arc<Node>> },
    Terminal(Leaf),
}

impl Node {
    pub fn internal(func: Func, children: Vec<Node>) -> Self {
        assert_eq!(
            children.len(),
            func.arity(),
            "function `{}` expects {} children",
            func.name(),
            func.arity()
        );
        Node::Internal {
            func,
            children: children.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn constant(value: f64) -> Self {
        Node::Terminal(Leaf::Const(Const::new(value)))
    }

    pub fn var(name: impl Into<String>, column: usize) -> Self {
        Node::Terminal(Leaf::Var(Var::new(name, column)))
    }

    pub fn weighted_var(name: impl Into<String>, column: usize, weight: f64) -> Self {
        Node::Terminal(Leaf::WeightedVar(WeightedVar::new(name, column, weight)))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Node::Terminal(_))
    }

    pub fn children(&self) -> &[Arc<Node>] {
        match self {
            Node::Internal { children, .. } => children,
            Node::Terminal(_) => &[],
        }
    }
}

impl From<Leaf> for Node {
    fn from(leaf: Leaf) -> Self {
        Node::Terminal(leaf)
    }
}
