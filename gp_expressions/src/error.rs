use thiserror::Error;

/// Structural faults raised while evaluating a tree.
///
/// Arithmetic trouble (NaN, infinities) is not an error here: it flows through the
/// returned values and is handled by whoever scores the prediction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    #[error("variable column {column} is out of range (matrix has {n_features} columns)")]
    ColumnOutOfRange { column: usize, n_features: usize },

    #[error("function `{func}` returned {got} values, expected {expected}")]
    LengthMismatch { func: String, expected: usize, got: usize },

    #[error("function `{func}` has arity {arity} but the node holds {children} children")]
    ArityMismatch { func: String, arity: usize, children: usize },

    #[error("parameter vector has {got} entries, tree has {expected} tunable scalars")]
    ParamCountMismatch { expected: usize, got: usize },

    #[error("function `{func}` has no partial-derivative kernel")]
    MissingPartial { func: String },
}

/// Contract violations when assembling function and terminal sets.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SetError {
    #[error("function set is empty")]
    EmptyFunctionSet,

    #[error("terminal set is empty")]
    EmptyTerminalSet,

    #[error("ephemeral constant range [{lower}, {upper}) is empty or not finite")]
    InvalidErcRange { lower: f64, upper: f64 },

    #[error("unknown function name {0:?}")]
    UnknownFunction(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_error_display() {
        let err = EvalError::ColumnOutOfRange {
            column: 3,
            n_features: 2,
        };
        assert_eq!(
            err.to_string(),
            "variable column 3 is out of range (matrix has 2 columns)"
        );

        let err = EvalError::ArityMismatch {
            func: "+".into(),
            arity: 2,
            children: 1,
        };
        assert!(err.to_string().contains("arity 2"));
    }

    #[test]
    fn set_error_display() {
        assert_eq!(SetError::EmptyTerminalSet.to_string(), "terminal set is empty");
        let err = SetError::InvalidErcRange {
            lower: 1.0,
            upper: -1.0,
        };
        assert_eq!(err.to_string(), "ephemeral constant range [1, -1) is empty or not finite");
    }
}
