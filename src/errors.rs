//! Errors and error-related utilities.

use std::{error, fmt, result};

/// The result type used throughout this library.
pub type Result<T> = result::Result<T, Box<dyn error::Error + Send + Sync>>;

/// Invalid input data: badly ordered points, malformed files, bad ranks.
#[derive(Debug)]
pub struct InvalidInput(pub String);

/// Invalid parameter or command line argument.
#[derive(Debug)]
pub struct InvalidArgument(pub String);

/// The data cannot support the requested computation.
#[derive(Debug)]
pub struct DegenerateData {
    pub positives: u64,
    pub negatives: u64,
}

/// An internal consistency check failed.
#[derive(Debug)]
pub struct InvariantViolation(pub String);

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid input: {}", self.0)
    }
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid argument: {}", self.0)
    }
}

impl fmt::Display for DegenerateData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "degenerate data: there must be at least one positive and one negative example, got {} positive(s) and {} negative(s)",
            self.positives, self.negatives
        )
    }
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invariant violation: {}", self.0)
    }
}

impl error::Error for InvalidInput {}

impl error::Error for InvalidArgument {}

impl error::Error for DegenerateData {}

impl error::Error for InvariantViolation {}

/// A helper for constructing [InvalidInput].
pub fn invalid_input(s: String) -> Box<dyn error::Error + Send + Sync> {
    InvalidInput(s).into()
}

/// A helper for constructing [InvalidInput].
pub fn invalid_input_ref(s: &str) -> Box<dyn error::Error + Send + Sync> {
    InvalidInput(s.to_owned()).into()
}

/// A helper for constructing [InvalidArgument].
pub fn invalid_argument(s: String) -> Box<dyn error::Error + Send + Sync> {
    InvalidArgument(s).into()
}

/// A helper for constructing [InvalidArgument].
pub fn invalid_argument_ref(s: &str) -> Box<dyn error::Error + Send + Sync> {
    InvalidArgument(s.to_owned()).into()
}

/// A helper for constructing [InvariantViolation].
pub fn invariant_violation(s: String) -> Box<dyn error::Error + Send + Sync> {
    InvariantViolation(s).into()
}
