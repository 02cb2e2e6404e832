pub mod error;
pub mod evaluate;
pub mod evaluate_derivative;
pub mod node;
pub mod node_utils;
pub mod operators;
pub mod strings;
pub mod terminals;
pub mod utils;

pub use paste;

pub use crate::error::{EvalError, SetError};
pub use crate::evaluate::{eval_tree_array, eval_tree_array_with_params};
pub use crate::evaluate_derivative::{GradMatrix, eval_grad_finite_diff, eval_grad_tree_array, eval_jacobian};
pub use crate::node::{Leaf, Node};
pub use crate::node_utils::{tree_mapreduce, which_children};
pub use crate::operators::{Func, FunctionSet};
pub use crate::strings::{format_scalar, print_tree, string_tree};
pub use crate::terminals::{Const, Erc, TerminalSet, TerminalSpec, Var, WeightedVar};
pub use crate::utils::{count_scalar_constants, get_scalar_constants, replace_const_nodes};
