pub mod builtin;

use std::fmt;
use std::sync::Arc;

use ndarray::Array1;
use rand::Rng;

use crate::error::SetError;
use crate::node::Node;

pub type Kernel = Arc<dyn Fn(&[Array1<f64>]) -> Array1<f64> + Send + Sync>;
pub type PartialKernel = Arc<dyn Fn(&[Array1<f64>], usize) -> Array1<f64> + Send + Sync>;

/// A named vectorized function of fixed arity.
///
/// Cloning shares the kernels. The partial kernel, when present, returns the derivative
/// with respect to argument `idx` evaluated row-wise.
#[derive(Clone)]
pub struct Func {
    name: Arc<str>,
    arity: usize,
    eval: Kernel,
    partial: Option<PartialKernel>,
}

impl Func {
    /// Wraps a column kernel.
    ///
    /// Kernels must not panic: report undefined rows as NaN or infinity and the row
    /// count stays that of the inputs. A wrong output length surfaces as an
    /// `EvalError`; a panic is not contained and aborts the search.
    pub fn new<F>(name: impl Into<String>, arity: usize, eval: F) -> Self
    where
        F: Fn(&[Array1<f64>]) -> Array1<f64> + Send + Sync + 'static,
    {
        assert!(arity >= 1, "functions must take at least one argument");
        Self {
            name: Arc::from(name.into()),
            arity,
            eval: Arc::new(eval),
            partial: None,
        }
    }

    #[must_use]
    pub fn with_partial<F>(mut self, partial: F) -> Self
    where
        F: Fn(&[Array1<f64>], usize) -> Array1<f64> + Send + Sync + 'static,
    {
        self.partial = Some(Arc::new(partial));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn has_partial(&self) -> bool {
        self.partial.is_some()
    }

    pub fn apply(&self, args: &[Array1<f64>]) -> Array1<f64> {
        debug_assert_eq!(args.len(), self.arity);
        (self.eval)(args)
    }

    pub fn partial(&self, args: &[Array1<f64>], idx: usize) -> Option<Array1<f64>> {
        debug_assert!(idx < self.arity);
        self.partial.as_ref().map(|p| p(args, idx))
    }
}

impl fmt::Debug for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Func")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("has_partial", &self.partial.is_some())
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct FunctionSet {
    funcs: Vec<Func>,
}

impl FunctionSet {
    pub fn new(funcs: Vec<Func>) -> Result<Self, SetError> {
        if funcs.is_empty() {
            return Err(SetError::EmptyFunctionSet);
        }
        Ok(Self { funcs })
    }

    /// Binary `+ - * /` and unary `square sqrt exp log`.
    pub fn default_set() -> Self {
        use builtin::*;
        Self {
            funcs: vec![
                func::<Add, 2>(),
                func::<Sub, 2>(),
                func::<Mul, 2>(),
                func::<Div, 2>(),
                func::<Square, 1>(),
                func::<Sqrt, 1>(),
                func::<Exp, 1>(),
                func::<Log, 1>(),
            ],
        }
    }

    /// Look up built-ins by display name (`"+"`, `"square"`, ...).
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, SetError> {
        let available = builtin::all();
        let funcs = names
            .iter()
            .map(|n| {
                let n = n.as_ref().trim();
                available
                    .iter()
                    .find(|f| f.name() == n)
                    .cloned()
                    .ok_or_else(|| SetError::UnknownFunction(n.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(funcs)
    }

    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> &Func {
        &self.funcs[rng.random_range(0..self.funcs.len())]
    }

    pub fn max_arity(&self) -> usize {
        self.funcs.iter().map(Func::arity).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.funcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Func> {
        self.funcs.iter()
    }
}

impl Default for FunctionSet {
    fn default() -> Self {
        Self::default_set()
    }
}

mod macros {
    macro_rules! unary_wrappers {
        ($( $fname:ident => $Op:ty ),* $(,)?) => {
            $(
                #[must_use]
                pub fn $fname(x: Node) -> Node {
                    Node::internal(builtin::func::<$Op, 1>(), vec![x])
                }
            )*
        };
    }

    macro_rules! binary_wrappers {
        ($( $fname:ident => $Op:ty ),* $(,)?) => {
            $(
                #[must_use]
                pub fn $fname(x: Node, y: Node) -> Node {
                    Node::internal(builtin::func::<$Op, 2>(), vec![x, y])
                }
            )*
        };
    }

    pub(crate) use {binary_wrappers, unary_wrappers};
}

use macros::{binary_wrappers, unary_wrappers};

unary_wrappers! {
    square => builtin::Square,
    sqrt => builtin::Sqrt,
    exp => builtin::Exp,
    log => builtin::Log,
    sin => builtin::Sin,
    cos => builtin::Cos,
    tanh => builtin::Tanh,
}

binary_wrappers! {
    add => builtin::Add,
    sub => builtin::Sub,
    mul => builtin::Mul,
    div => builtin::Div,
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn default_set_matches_expected_names() {
        let set = FunctionSet::default_set();
        let names: Vec<&str> = set.iter().map(Func::name).collect();
        assert_eq!(names, ["+", "-", "*", "/", "square", "sqrt", "exp", "log"]);
        assert_eq!(set.max_arity(), 2);
        assert!(set.iter().all(Func::has_partial));
    }

    #[test]
    fn from_names_rejects_unknown() {
        let set = FunctionSet::from_names(&["+", " cos"]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(
            FunctionSet::from_names(&["pow"]).unwrap_err(),
            SetError::UnknownFunction("pow".into())
        );
        assert_eq!(
            FunctionSet::from_names::<&str>(&[]).unwrap_err(),
            SetError::EmptyFunctionSet
        );
    }

    #[test]
    fn random_draws_from_the_set() {
        let set = FunctionSet::from_names(&["exp"]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(set.random(&mut rng).name(), "exp");
    }

    #[test]
    #[should_panic(expected = "at least one argument")]
    fn zero_arity_is_a_contract_violation() {
        let _ = Func::new("nullary", 0, |_: &[Array1<f64>]| Array1::zeros(0));
    }
}
