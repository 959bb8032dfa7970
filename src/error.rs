//! Error type for the boundary layers (input parsing, configuration, export).
//!
//! The integration core never returns errors; only code that accepts
//! untrusted input or touches the filesystem does.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PendulumError {
    /// Text that does not parse as a number.
    #[error("invalid {field}: '{value}'")]
    InvalidField {
        field: String,
        value: String,
    },

    /// A number outside the range a parameter accepts.
    #[error("{field} = {value} is out of range: {reason}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// An export was requested for a trajectory with no samples.
    #[error("trajectory has no samples")]
    EmptyTrajectory,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PendulumError {
    #[must_use]
    pub fn invalid_field(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub const fn out_of_range(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self::OutOfRange { field, value, reason }
    }
}

pub type Result<T> = std::result::Result<T, PendulumError>;
