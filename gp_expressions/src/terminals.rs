use rand::Rng;

use crate::error::SetError;
use crate::node::Leaf;
use crate::strings::format_scalar;

/// A numeric constant. Its label is fixed at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Const {
    value: f64,
    label: String,
}

impl Const {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            label: format_scalar(value),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Reference to column `column` (0-based) of the observation matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Var {
    name: String,
    column: usize,
}

impl Var {
    pub fn new(name: impl Into<String>, column: usize) -> Self {
        Self {
            name: name.into(),
            column,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

/// `weight * variable`, kept as a single node by the structural operators.
///
/// It counts as one node and one level for generic inspection, and as the three-node,
/// two-level product it stands for wherever a size budget is enforced.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedVar {
    name: String,
    column: usize,
    weight: f64,
    label: String,
}

impl WeightedVar {
    pub fn new(name: impl Into<String>, column: usize, weight: f64) -> Self {
        let name = name.into();
        let label = format!("{}*{}", format_scalar(weight), name);
        Self {
            name,
            column,
            weight,
            label,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn with_weight(&self, weight: f64) -> Self {
        Self::new(self.name.clone(), self.column, weight)
    }
}

/// Ephemeral random constant: a sampling range that becomes a fresh [`Const`] every
/// time a terminal is drawn from it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Erc {
    pub lower: f64,
    pub upper: f64,
}

impl Erc {
    pub fn new(lower: f64, upper: f64) -> Result<Self, SetError> {
        if !(lower.is_finite() && upper.is_finite() && lower < upper) {
            return Err(SetError::InvalidErcRange { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Const {
        Const::new(rng.random_range(self.lower..self.upper))
    }
}

/// One entry of a terminal set.
#[derive(Clone, Debug, PartialEq)]
pub enum TerminalSpec {
    Const(Const),
    Var(Var),
    WeightedVar(WeightedVar),
    Erc(Erc),
}

impl TerminalSpec {
    pub fn instantiate<R: Rng + ?Sized>(&self, rng: &mut R) -> Leaf {
        match self {
            TerminalSpec::Const(c) => Leaf::Const(c.clone()),
            TerminalSpec::Var(v) => Leaf::Var(v.clone()),
            TerminalSpec::WeightedVar(w) => Leaf::WeightedVar(w.clone()),
            TerminalSpec::Erc(erc) => Leaf::Const(erc.sample(rng)),
        }
    }

    /// Largest column index this terminal reads, if any.
    pub fn column(&self) -> Option<usize> {
        match self {
            TerminalSpec::Var(v) => Some(v.column()),
            TerminalSpec::WeightedVar(w) => Some(w.column()),
            TerminalSpec::Const(_) | TerminalSpec::Erc(_) => None,
        }
    }
}

impl From<Const> for TerminalSpec {
    fn from(c: Const) -> Self {
        TerminalSpec::Const(c)
    }
}

impl From<Var> for TerminalSpec {
    fn from(v: Var) -> Self {
        TerminalSpec::Var(v)
    }
}

impl From<WeightedVar> for TerminalSpec {
    fn from(w: WeightedVar) -> Self {
        TerminalSpec::WeightedVar(w)
    }
}

impl From<Erc> for TerminalSpec {
    fn from(e: Erc) -> Self {
        TerminalSpec::Erc(e)
    }
}

#[derive(Clone, Debug)]
pub struct TerminalSet {
    terminals: Vec<TerminalSpec>,
}

impl TerminalSet {
    pub fn new(terminals: Vec<TerminalSpec>) -> Result<Self, SetError> {
        if terminals.is_empty() {
            return Err(SetError::EmptyTerminalSet);
        }
        for t in &terminals {
            if let TerminalSpec::Erc(erc) = t {
                Erc::new(erc.lower, erc.upper)?;
            }
        }
        Ok(Self { terminals })
    }

    /// One plain variable per column, named `x1..xn`, plus an optional ERC.
    pub fn variables(n_features: usize, erc: Option<Erc>) -> Result<Self, SetError> {
        let mut terminals: Vec<TerminalSpec> = (0..n_features)
            .map(|j| Var::new(format!("x{}", j + 1), j).into())
            .collect();
        terminals.extend(erc.map(TerminalSpec::from));
        Self::new(terminals)
    }

    /// One weighted variable (weight 1.0) per column, named `x1..xn`, plus an optional ERC.
    pub fn weighted_variables(n_features: usize, erc: Option<Erc>) -> Result<Self, SetError> {
        let mut terminals: Vec<TerminalSpec> = (0..n_features)
            .map(|j| WeightedVar::new(format!("x{}", j + 1), j, 1.0).into())
            .collect();
        terminals.extend(erc.map(TerminalSpec::from));
        Self::new(terminals)
    }

    pub fn random_leaf<R: Rng + ?Sized>(&self, rng: &mut R) -> Leaf {
        let idx = rng.random_range(0..self.terminals.len());
        self.terminals[idx].instantiate(rng)
    }

    pub fn max_column(&self) -> Option<usize> {
        self.terminals.iter().filter_map(TerminalSpec::column).max()
    }

    pub fn len(&self) -> usize {
        self.terminals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terminals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TerminalSpec> {
        self.terminals.iter()
    }
}
