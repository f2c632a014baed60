//! Error types for the calculator

use thiserror::Error;

/// Why a day selector was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DayError {
    #[error("day must be an integer")]
    NotAnInteger,

    #[error("day out of range: {0} is not within 1-365")]
    OutOfRange(i64),
}

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Profile input is invalid: {0}")]
    InvalidProfile(String),

    #[error(transparent)]
    InvalidDay(#[from] DayError),

    /// A public operation failed; `source` holds the underlying error
    #[error("Failed to calculate {operation}: {source}")]
    Calculation {
        operation: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Wrap this error with the name of the operation that produced it
    pub fn in_operation(self, operation: impl ToString) -> Self {
        Error::Calculation {
            operation: operation.to_string(),
            source: Box::new(self),
        }
    }

    /// The innermost error, looking through operation wrappers
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Calculation { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub fn is_invalid_profile(&self) -> bool {
        matches!(self.root_cause(), Error::InvalidProfile(_))
    }

    pub fn is_invalid_day(&self) -> bool {
        matches!(self.root_cause(), Error::InvalidDay(_))
    }
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;
