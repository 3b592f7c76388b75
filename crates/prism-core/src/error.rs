//! Error types for the Prism toolkit.

use crate::input::InputError;
use thiserror::Error;

/// A shared error type for the entire Prism workspace.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone)]
pub enum PrismError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Data access error (repository/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input text rejected before any product ran
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// A product parameter had an unusable value
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParams { name: String, message: String },

    /// No strategy is registered under the requested product id
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// Daily allowance for the (product, user) pair is used up
    #[error("Daily limit of {limit} runs reached for product '{product_id}'")]
    QuotaExceeded { product_id: String, limit: u32 },

    /// Strategy execution failed
    #[error("Processing failed for product '{product_id}': {message}")]
    Processing { product_id: String, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PrismError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Creates an InvalidParams error
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParams {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Wraps a strategy failure with the product it came from.
    pub fn processing(product_id: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::Processing {
            product_id: product_id.into(),
            message: cause.to_string(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this error was raised by input validation
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Check if this is a QuotaExceeded error
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for PrismError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for PrismError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PrismError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for PrismError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (used at the infrastructure boundary)
impl From<anyhow::Error> for PrismError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{:#}", err))
    }
}

/// A type alias for `Result<T, PrismError>`.
pub type Result<T> = std::result::Result<T, PrismError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_converts() {
        let err: PrismError = InputError::TooShort { min: 10, actual: 3 }.into();
        assert!(err.is_invalid_input());
        assert_eq!(
            err.to_string(),
            "Invalid input: Input must be at least 10 characters (got 3)"
        );
    }

    #[test]
    fn test_processing_carries_cause() {
        let err = PrismError::processing("auto-rewrite", "bad things");
        assert_eq!(
            err.to_string(),
            "Processing failed for product 'auto-rewrite': bad things"
        );
    }

    #[test]
    fn test_not_found_names_the_entity() {
        let err = PrismError::not_found("Session", "sess_1");
        assert_eq!(err.to_string(), "Entity not found: Session 'sess_1'");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PrismError = io.into();
        assert!(matches!(err, PrismError::Io { .. }));
    }
}
