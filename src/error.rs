//! Errors surfaced to callers of the numeric utility

use core::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NumericError {
    /// `n` was negative or not an integer
    InvalidInput { input: String },
    /// Nearest-palindrome search gave up after `ceiling` offsets
    SearchExhausted { ceiling: u64 },
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { input } => write!(
                f,
                "please enter a valid non-negative integer (got {input:?})"
            ),
            Self::SearchExhausted { ceiling } => write!(
                f,
                "gap too large: no palindrome within {ceiling} of the value"
            ),
        }
    }
}

impl std::error::Error for NumericError {}
