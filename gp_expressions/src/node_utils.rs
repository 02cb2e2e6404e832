use std::sync::Arc;

use crate::node::{Leaf, Node};
use crate::operators::Func;

/// Post-order fold: `f_leaf` maps terminals, `op` combines a function with its children's results.
pub fn tree_mapreduce<R>(
    node: &Node,
    f_leaf: &mut impl FnMut(&Leaf) -> R,
    op: &mut impl FnMut(&Func, Vec<R>) -> R,
) -> R {
    match node {
        Node::Terminal(leaf) => f_leaf(leaf),
        Node::Internal { func, children } => {
            let results = children.iter().map(|c| tree_mapreduce(c, f_leaf, op)).collect();
            op(func, results)
        }
    }
}

/// Locate 1-based pre-order offset `p` within a run of sibling subtrees.
///
/// Returns the index of the sibling that contains `p` and the residual 1-based offset
/// inside it. Offsets use the simple node count.
pub fn which_children(p: usize, children: &[Arc<Node>]) -> (usize, usize) {
    assert!(p >= 1, "pre-order positions start at 1");
    let mut residual = p;
    for (i, child) in children.iter().enumerate() {
        let size = child.count_nodes();
        if residual <= size {
            return (i, residual);
        }
        residual -= size;
    }
    panic!("position {p} is past the end of the sibling run");
}

#[derive(Copy, Clone, Debug)]
struct Extent {
    simple: usize,
    true_size: usize,
    depth: usize,
}

fn collect_in_limits(
    node: &Node,
    pos: usize,
    allowed_size: usize,
    allowed_depth: usize,
    out: &mut Vec<usize>,
) -> Extent {
    let ext = match node {
        Node::Terminal(leaf) => Extent {
            simple: 1,
            true_size: leaf.true_size(),
            depth: 1,
        },
        Node::Internal { children, .. } => {
            let mut ext = Extent {
                simple: 1,
                true_size: 1,
                depth: 0,
            };
            for child in children {
                let c = collect_in_limits(child, pos + ext.simple, allowed_size, allowed_depth, out);
                ext.simple += c.simple;
                ext.true_size += c.true_size;
                ext.depth = ext.depth.max(c.depth);
            }
            ext.depth += 1;
            ext
        }
    };
    if ext.true_size <= allowed_size && ext.depth <= allowed_depth {
        out.push(pos);
    }
    ext
}

impl Node {
    /// Node count with every leaf counted once.
    pub fn count_nodes(&self) -> usize {
        tree_mapreduce(self, &mut |_| 1, &mut |_, ch: Vec<usize>| 1 + ch.iter().sum::<usize>())
    }

    /// Node count with a weighted variable counted as its three-node product.
    pub fn count_nodes_true(&self) -> usize {
        tree_mapreduce(self, &mut Leaf::true_size, &mut |_, ch: Vec<usize>| {
            1 + ch.iter().sum::<usize>()
        })
    }

    /// Levels from the root to the deepest leaf; a single node has depth 1.
    pub fn depth(&self) -> usize {
        tree_mapreduce(self, &mut |_| 1, &mut |_, ch: Vec<usize>| {
            1 + ch.iter().copied().max().unwrap_or(0)
        })
    }

    /// As [`Node::depth`], with a weighted variable spanning two levels.
    pub fn depth_true(&self) -> usize {
        tree_mapreduce(self, &mut Leaf::true_depth, &mut |_, ch: Vec<usize>| {
            1 + ch.iter().copied().max().unwrap_or(0)
        })
    }

    /// Rebuild every node so the result shares no allocation with `self`.
    pub fn deep_copy(&self) -> Node {
        match self {
            Node::Terminal(leaf) => Node::Terminal(leaf.clone()),
            Node::Internal { func, children } => Node::Internal {
                func: func.clone(),
                children: children.iter().map(|c| Arc::new(c.deep_copy())).collect(),
            },
        }
    }

    pub fn has_all_partials(&self) -> bool {
        tree_mapreduce(self, &mut |_| true, &mut |f, ch: Vec<bool>| {
            f.has_partial() && ch.into_iter().all(|b| b)
        })
    }

    /// Subtree at 1-based pre-order position `p` (the root is 1).
    pub fn branch_at(&self, p: usize) -> &Node {
        assert!(p >= 1, "pre-order positions start at 1");
        let mut node = self;
        let mut p = p;
        while p > 1 {
            match node {
                Node::Internal { children, .. } => {
                    let (i, residual) = which_children(p - 1, children);
                    node = &children[i];
                    p = residual;
                }
                Node::Terminal(_) => panic!("position is past the end of the tree"),
            }
        }
        node
    }

    /// Copy of `self` with the subtree at position `p` replaced by `new`.
    ///
    /// Only the root-to-`p` path is rebuilt; all other subtrees are shared.
    #[must_use]
    pub fn replace_at(&self, p: usize, new: Node) -> Node {
        assert!(p >= 1, "pre-order positions start at 1");
        if p == 1 {
            return new;
        }
        match self {
            Node::Internal { func, children } => {
                let (i, residual) = which_children(p - 1, children);
                let mut rebuilt = children.clone();
                rebuilt[i] = Arc::new(children[i].replace_at(residual, new));
                Node::Internal {
                    func: func.clone(),
                    children: rebuilt,
                }
            }
            Node::Terminal(_) => panic!("position {p} is past the end of the tree"),
        }
    }

    /// Number of ancestors of position `p`; the root is at level 0.
    pub fn level_at(&self, p: usize) -> usize {
        assert!(p >= 1, "pre-order positions start at 1");
        let mut node = self;
        let mut p = p;
        let mut level = 0;
        while p > 1 {
            match node {
                Node::Internal { children, .. } => {
                    let (i, residual) = which_children(p - 1, children);
                    node = &children[i];
                    p = residual;
                    level += 1;
                }
                Node::Terminal(_) => panic!("position is past the end of the tree"),
            }
        }
        level
    }

    /// Pre-order positions of every subtree whose true size is at most `allowed_size`
    /// and whose depth is at most `allowed_depth`.
    pub fn branches_in_limits(&self, allowed_size: usize, allowed_depth: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let ext = collect_in_limits(self, 1, allowed_size, allowed_depth, &mut out);
        debug_assert!(out.iter().all(|&p| p <= ext.simple));
        out.sort_unstable();
        out
    }
}
