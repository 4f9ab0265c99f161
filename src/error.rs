//! Error types for route optimization.
//!
//! Every structural problem with the inputs is reported as a [`SolveError`]
//! before the first generation runs. Once inputs are accepted the GA always
//! terminates with a feasible route, so the only runtime failures are
//! resource exhaustion and a lost worker thread.

use thiserror::Error;

/// Failure of a route optimization request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The distance or duration matrix is malformed.
    #[error("invalid matrix: {0}")]
    InvalidMatrix(String),

    /// A GA parameter is outside its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A pinned endpoint does not name a stop.
    #[error("{name} must be between 0 and {max} (got {index})", max = .size.saturating_sub(1))]
    IndexOutOfRange {
        name: &'static str,
        index: usize,
        size: usize,
    },

    /// Start and end were pinned to the same stop.
    #[error("start_index and end_index cannot be the same (both {0})")]
    SameEndpoints(usize),

    /// Memory for the population could not be reserved.
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),

    /// The background solver thread terminated abnormally.
    #[error("solver worker failed: {0}")]
    Worker(String),
}

impl SolveError {
    /// Returns `true` for errors caused by invalid input, as opposed to
    /// failures while optimizing.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SolveError::InvalidMatrix(_)
                | SolveError::InvalidConfig(_)
                | SolveError::IndexOutOfRange { .. }
                | SolveError::SameEndpoints(_)
        )
    }
}

pub type SolveResult<T> = Result<T, SolveError>;
