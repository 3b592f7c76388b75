//! Input-length validation applied before any product runs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a piece of input text was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Input is empty")]
    Empty,

    #[error("Input must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Input must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },
}

/// Character-count bounds for product input.
///
/// Lengths are counted in Unicode scalar values, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputLimits {
    pub min_chars: usize,
    pub max_chars: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            min_chars: 10,
            max_chars: 10_000,
        }
    }
}

impl InputLimits {
    pub fn new(min_chars: usize, max_chars: usize) -> Self {
        Self {
            min_chars,
            max_chars,
        }
    }

    /// Checks `input` against the configured bounds.
    ///
    /// Whitespace-only input counts as empty.
    pub fn validate(&self, input: &str) -> Result<(), InputError> {
        if input.trim().is_empty() {
            return Err(InputError::Empty);
        }

        let actual = input.chars().count();
        if actual < self.min_chars {
            return Err(InputError::TooShort {
                min: self.min_chars,
                actual,
            });
        }
        if actual > self.max_chars {
            return Err(InputError::TooLong {
                max: self.max_chars,
                actual,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds() {
        let limits = InputLimits::default();
        assert_eq!(limits.min_chars, 10);
        assert_eq!(limits.max_chars, 10_000);
    }

    #[test]
    fn test_rejects_empty_and_blank() {
        let limits = InputLimits::default();
        assert_eq!(limits.validate(""), Err(InputError::Empty));
        assert_eq!(limits.validate("   \n\t"), Err(InputError::Empty));
    }

    #[test]
    fn test_rejects_short_and_long() {
        let limits = InputLimits::new(5, 8);
        assert_eq!(
            limits.validate("abc"),
            Err(InputError::TooShort { min: 5, actual: 3 })
        );
        assert_eq!(
            limits.validate("abcdefghi"),
            Err(InputError::TooLong { max: 8, actual: 9 })
        );
        assert!(limits.validate("abcdef").is_ok());
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        let limits = InputLimits::new(3, 3);
        assert!(limits.validate("äöü").is_ok());
    }
}
