//! Typed errors for the aggregation pipeline and prediction input checks.

use thiserror::Error;

/// Rejected arguments to a binning operation.
#[derive(Debug, Error, PartialEq)]
pub enum AggregateError {
    #[error("bin width must be finite and greater than zero, got {0}")]
    InvalidBinWidth(f64),

    #[error("value range needs {count} bins, more than the limit of {max}")]
    TooManyBins { count: f64, max: usize },
}

/// A prediction request field outside the range the service accepts.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not one of {allowed:?}")]
    NotAChoice {
        field: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },

    #[error("{field}: {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}
