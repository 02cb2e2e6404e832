use gp_expressions::SetError;
use thiserror::Error;

/// Contract violations detected before or during a search.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("invalid option `{name}`: {reason}")]
    InvalidOption { name: &'static str, reason: String },

    #[error(transparent)]
    Set(#[from] SetError),

    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("terminal set reads column {column} but the dataset has {n_features} features")]
    ColumnOutOfRange { column: usize, n_features: usize },

    #[error("no individual with finite fitness survived generation {generation}")]
    NoViableIndividuals { generation: usize },
}

impl Error {
    pub(crate) fn invalid_option(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidOption {
            name,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = Error::invalid_option("max_depth", "must be >= min_depth (3)");
        assert_eq!(err.to_string(), "invalid option `max_depth`: must be >= min_depth (3)");

        let err: Error = SetError::EmptyFunctionSet.into();
        assert_eq!(err.to_string(), "function set is empty");

        let err = Error::NoViableIndividuals { generation: 4 };
        assert!(err.to_string().contains("generation 4"));
    }
}
