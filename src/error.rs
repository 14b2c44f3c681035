use self::Error::*;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// This error occurs when converting between vectors and distribution or parameter types
    IncompatibleDistributionParameterCount(usize, usize),
    /// Two per-observation vectors that must be parallel have different lengths
    MismatchedLengths {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    /// The covariance matrix handed to the delta method is not square in the parameter count
    IncompatibleCovarianceShape(usize, usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            IncompatibleDistributionParameterCount(vec, dist) => write!(
                f,
                "Error converting between vector of {} elements and distribution with {} parameters",
                vec, dist
            ),
            MismatchedLengths {
                field,
                expected,
                actual,
            } => write!(
                f,
                "Expected `{}` to have {} elements to match the sample, found {}",
                field, expected, actual
            ),
            IncompatibleCovarianceShape(rows, cols) => write!(
                f,
                "Covariance matrix must be 2x2 over (log_location, log_shape), found {}x{}",
                rows, cols
            ),
        }
    }
}

impl std::error::Error for Error {}
