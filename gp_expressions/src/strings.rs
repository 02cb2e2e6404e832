use core::fmt;

use crate::node::{Leaf, Node};

/// Round to three decimals and print with the shortest round-trip form (`2.0`, `-0.5`).
pub fn format_scalar(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    // Avoid "-0.0" for tiny negatives.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:?}")
}

fn write_tree(out: &mut String, node: &Node) {
    match node {
        Node::Terminal(leaf) => out.push_str(&leaf.to_string()),
        Node::Internal { func, children } => {
            out.push_str(func.name());
            out.push('(');
            for (i, c) in children.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_tree(out, c);
            }
            out.push(')');
        }
    }
}

/// Prefix rendering: `name(child1, child2, ...)`.
pub fn string_tree(node: &Node) -> String {
    let mut out = String::new();
    write_tree(&mut out, node);
    out
}

pub fn print_tree(node: &Node) {
    println!("{}", string_tree(node));
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::Const(c) => f.write_str(c.label()),
            Leaf::Var(v) => f.write_str(v.name()),
            Leaf::WeightedVar(w) => f.write_str(w.label()),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&string_tree(self))
    }
}
