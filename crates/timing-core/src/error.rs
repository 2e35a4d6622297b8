//! Timing errors.

use scriptreel_common::error::ReelError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimingError {
    #[error("No segments to schedule")]
    NoSegments,

    #[error("Target duration must be positive and finite, got {0}")]
    InvalidTarget(f64),

    #[error("Invalid duration {duration} for segment {index}")]
    InvalidDuration { index: usize, duration: f64 },

    #[error("Invalid timestamp: {0:?}")]
    InvalidTimestamp(String),
}

impl From<TimingError> for ReelError {
    fn from(err: TimingError) -> Self {
        ReelError::timing(err.to_string())
    }
}
