// ============================================================================
// Rate Errors
// Error types for RAY arithmetic, table packing and lookups
// ============================================================================

use std::fmt;

/// Basis points of yearly rate (10_000 = 100%).
pub type Bps = u64;

/// Errors that can occur while building or reading a rate table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RateError {
    /// A line of the rate mapping could not be parsed
    Parse { line: usize, content: String },
    /// `rate - RAY` does not fit in an unsigned 64-bit field
    EncodingOverflow { bps: Bps },
    /// Rate is below unity where a non-negative delta is required
    BelowUnity,
    /// Table entries are not strictly ascending by bps
    Unsorted { previous: Bps, found: Bps },
    /// A bps value between 0 and MAX has no entry
    MissingEntry { bps: Bps },
    /// Nothing to pack
    EmptyTable,
    /// Lookup index exceeds the table's MAX
    OutOfRange { bps: Bps, max: Bps },
    /// Multiplication or rounding exceeded the 256-bit range
    ArithmeticOverflow,
    /// Conversion would lose significant digits
    PrecisionLoss,
    /// Input string or value is invalid
    InvalidInput,
    /// The rate mapping file could not be read
    Io { path: String, message: String },
    /// Generator configuration failed validation
    InvalidConfig(String),
}

impl fmt::Display for RateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateError::Parse { line, content } => {
                write!(f, "malformed rate mapping at line {}: {:?}", line, content)
            },
            RateError::EncodingOverflow { bps } => {
                write!(f, "rate difference too large for bps {}", bps)
            },
            RateError::BelowUnity => write!(f, "rate is below RAY"),
            RateError::Unsorted { previous, found } => write!(
                f,
                "entries must be strictly ascending: bps {} follows {}",
                found, previous
            ),
            RateError::MissingEntry { bps } => write!(f, "no rate for bps {}", bps),
            RateError::EmptyTable => write!(f, "rate table has no entries"),
            RateError::OutOfRange { bps, max } => {
                write!(f, "bps {} out of range: max is {}", bps, max)
            },
            RateError::ArithmeticOverflow => {
                write!(f, "arithmetic overflow: result exceeded 256 bits")
            },
            RateError::PrecisionLoss => write!(
                f,
                "precision loss: conversion would lose significant digits"
            ),
            RateError::InvalidInput => write!(f, "invalid input: could not parse value"),
            RateError::Io { path, message } => write!(f, "cannot read {}: {}", path, message),
            RateError::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
        }
    }
}

impl std::error::Error for RateError {}

/// Result type alias for rate operations
pub type RateResult<T> = Result<T, RateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            RateError::ArithmeticOverflow.to_string(),
            "arithmetic overflow: result exceeded 256 bits"
        );
        assert_eq!(
            RateError::OutOfRange { bps: 101, max: 100 }.to_string(),
            "bps 101 out of range: max is 100"
        );
        assert_eq!(
            RateError::EncodingOverflow { bps: 9000 }.to_string(),
            "rate difference too large for bps 9000"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(RateError::EmptyTable, RateError::EmptyTable);
        assert_ne!(
            RateError::MissingEntry { bps: 1 },
            RateError::MissingEntry { bps: 2 }
        );
    }
}
