use thiserror::Error;

/// Caller contract violations raised by the numeric core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RailError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("length mismatch: baseline has {baseline} samples, observed has {observed}")]
    LengthMismatch { baseline: usize, observed: usize },
    #[error("invalid thresholds: {0}")]
    InvalidThresholds(String),
}
