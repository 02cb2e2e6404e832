use std::sync::Arc;

use crate::node::{Leaf, Node};
use crate::node_utils::tree_mapreduce;
use crate::terminals::Const;

pub fn count_scalar_constants(node: &Node) -> usize {
    tree_mapreduce(
        node,
        &mut |leaf| usize::from(leaf.is_tunable()),
        &mut |_, ch: Vec<usize>| ch.iter().sum(),
    )
}

/// Pre-order list of every tunable scalar: constant values and variable weights.
pub fn get_scalar_constants(node: &Node) -> Vec<f64> {
    fn walk(node: &Node, out: &mut Vec<f64>) {
        match node {
            Node::Terminal(Leaf::Const(c)) => out.push(c.value()),
            Node::Terminal(Leaf::WeightedVar(w)) => out.push(w.weight()),
            Node::Terminal(Leaf::Var(_)) => {}
            Node::Internal { children, .. } => children.iter().for_each(|c| walk(c, out)),
        }
    }
    let mut out = Vec::new();
    walk(node, &mut out);
    out
}

fn rebuild(node: &Node, values: &[f64], next: &mut usize) -> Node {
    match node {
        Node::Terminal(Leaf::Const(_)) => {
            let v = values[*next];
            *next += 1;
            Node::Terminal(Leaf::Const(Const::new(v)))
        }
        Node::Terminal(Leaf::WeightedVar(w)) => {
            let v = values[*next];
            *next += 1;
            Node::Terminal(Leaf::WeightedVar(w.with_weight(v)))
        }
        Node::Terminal(Leaf::Var(v)) => Node::Terminal(Leaf::Var(v.clone())),
        Node::Internal { func, children } => Node::Internal {
            func: func.clone(),
            children: children.iter().map(|c| Arc::new(rebuild(c, values, next))).collect(),
        },
    }
}

/// New tree with `values` written back into the pre-order scalar slots of `node`.
pub fn replace_const_nodes(node: &Node, values: &[f64]) -> Node {
    assert_eq!(
        values.len(),
        count_scalar_constants(node),
        "one value per constant or weighted variable"
    );
    let mut next = 0;
    rebuild(node, values, &mut next)
}
