use thiserror::Error;

/// Result type returned by the scheduling core.
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Errors reported by validation, the policy engines and the aggregator.
///
/// Validation errors are raised before any simulation starts.
/// [`SchedulerError::IncompleteSimulation`] and [`SchedulerError::NegativeMetric`]
/// point to a defect in an engine and never occur for a validated process set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("invalid process {id:?}: {reason}")]
    InvalidProcess { id: String, reason: &'static str },

    #[error("duplicate process identifier {0:?}")]
    DuplicateIdentifier(String),

    #[error("invalid quantum {0}: must be at least 1")]
    InvalidQuantum(i64),

    #[error("no processes to schedule")]
    EmptyProcessSet,

    #[error("process {id:?} never completed")]
    IncompleteSimulation { id: String },

    #[error("process {id:?} completed before it could have run")]
    NegativeMetric { id: String },
}
