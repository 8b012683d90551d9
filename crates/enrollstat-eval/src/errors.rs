use thiserror::Error;

/// Errors emitted while computing statistics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A reduction was asked for over a slice with no values.
    #[error("no enrollments over {threshold}")]
    EmptyAggregation { threshold: u32 },
    #[error("school code '{0}' has no plane in the enrollment table")]
    UnknownSchool(String),
}
