use thiserror::Error;

/// Errors raised by the vectorizer, the scorers, the confidence resolver
/// and the pipeline.
///
/// Every variant is a local validation failure reported at the call that
/// broke the contract. None of them are transient.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// No usable training data (no documents, or no document yields a term)
    #[error("empty corpus: no usable terms in the training documents")]
    EmptyCorpus,

    /// `fit` was called on an instance that is already fitted
    #[error("already fitted: create a fresh instance to fit again")]
    AlreadyFitted,

    /// Inference was requested before `fit`
    #[error("not fitted: call fit before transform or predict")]
    NotFitted,

    /// Feature vector length differs from the length seen at fit time
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Probability distribution is empty, negative or does not sum to one
    #[error("invalid distribution: {0}")]
    InvalidDistribution(String),

    /// Malformed arguments such as a label count that differs from the row count
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Serialized state could not be read or written
    #[error("persist error: {0}")]
    Persist(String),
}

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, ClassifierError>;

impl ClassifierError {
    pub fn dimension_mismatch(expected: usize, found: usize) -> Self {
        ClassifierError::DimensionMismatch { expected, found }
    }

    pub fn invalid_distribution<S: Into<String>>(msg: S) -> Self {
        ClassifierError::InvalidDistribution(msg.into())
    }

    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        ClassifierError::InvalidInput(msg.into())
    }

    pub fn persist<S: Into<String>>(msg: S) -> Self {
        ClassifierError::Persist(msg.into())
    }
}

impl From<serde_cbor::Error> for ClassifierError {
    fn from(err: serde_cbor::Error) -> Self {
        ClassifierError::Persist(err.to_string())
    }
}
