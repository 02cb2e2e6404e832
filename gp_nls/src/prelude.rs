//! Convenience re-exports for examples and quickstarts.

pub use crate::dataset::Dataset;
pub use crate::initialization::InitMethod;
pub use crate::loss_functions::fitness;
pub use crate::options::Options;
pub use crate::search_utils::{SearchEngine, SearchResult, gp_search};

// Re-export the expression types so callers (and examples) don't need to depend on
// `gp_expressions` directly.
pub use gp_expressions::operators::{add, cos, div, exp, log, mul, sin, sqrt, square, sub, tanh};
pub use gp_expressions::{Erc, Func, FunctionSet, Node, TerminalSet, eval_tree_array, print_tree, string_tree};
