use thiserror::Error;

/// Smallest tap count any filter accepts.
pub const MIN_TAPS: usize = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid filter length: requested {requested} taps, minimum is {minimum}")]
    InvalidLength { requested: usize, minimum: usize },

    #[error("Coefficient count mismatch: feedforward has {feedforward}, feedback has {feedback}")]
    CoefficientCount { feedforward: usize, feedback: usize },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FilterError {
    /// Validate a runtime tap count.
    pub fn check_length(requested: usize) -> Result<usize> {
        if requested < MIN_TAPS {
            return Err(FilterError::InvalidLength {
                requested,
                minimum: MIN_TAPS,
            });
        }
        Ok(requested)
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
