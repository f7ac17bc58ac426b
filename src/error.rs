//! Error types for the trigger-cluster library.

use thiserror::Error;

/// Result type alias for clustering operations.
pub type Result<T> = std::result::Result<T, ClusterError>;

/// Errors raised at the boundary of the clustering core.
///
/// The clustering engine itself never fails; these errors come from
/// timestamp conversion, configuration validation and trigger validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusterError {
    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Timestamp-related error.
    #[error("timestamp error: {0}")]
    TimestampError(String),

    /// A trigger carries a score that cannot be ranked.
    #[error("non-finite score {score} at trigger {index}")]
    NonFiniteScore { index: usize, score: f64 },
}
