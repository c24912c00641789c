//! Collection Error Types
//!
//! Every explicit-form (`try_*`) operation returns [`CollectionResult`].
//! Plain-form operations swallow the error and hand back a documented zero
//! value instead, so the variants here are also what ends up in
//! [`pending_error`](crate::CollectionCore::pending_error).

use thiserror::Error;

/// Result type alias for collection operations
pub type CollectionResult<T> = Result<T, CollectionError>;

// ============================================================================
// MAIN ERROR TYPE
// ============================================================================

/// Collection operation errors
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// The operation has no meaning for the receiver's payload shape
    #[error("operation not implemented for this collection variant: {operation}")]
    NotImplemented { operation: &'static str },

    /// An operand or item has the wrong shape for the operation
    #[error("type mismatch in {operation}: expected {expected}, got {actual}")]
    TypeMismatch {
        operation: &'static str,
        expected: String,
        actual: String,
    },

    /// An argument is outside the operation's domain
    #[error("invalid argument to {operation}: {reason}")]
    InvalidArgument {
        operation: &'static str,
        reason: String,
    },

    /// The operation is undefined without at least one item
    #[error("{operation} is undefined for an empty collection")]
    EmptyCollection { operation: &'static str },

    /// Map key not found
    #[error("key not found: '{key}'")]
    KeyNotFound { key: String },

    /// Decimal arithmetic overflowed
    #[error("numeric overflow in {operation}")]
    Overflow { operation: &'static str },

    /// JSON encoding of the payload failed
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Structure mapping (payload -> caller type) failed
    #[error("mapping error: {0}")]
    Mapping(String),

    /// Writing a dump to its sink failed
    #[error("dump failed: {0}")]
    Dump(String),
}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl CollectionError {
    /// Create a not-implemented error for `operation`
    pub const fn not_implemented(operation: &'static str) -> Self {
        Self::NotImplemented { operation }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(
        operation: &'static str,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            operation,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            operation,
            reason: reason.into(),
        }
    }

    /// Create an empty collection error
    pub const fn empty(operation: &'static str) -> Self {
        Self::EmptyCollection { operation }
    }

    /// Create a key not found error
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound { key: key.into() }
    }

    /// Create an overflow error
    pub const fn overflow(operation: &'static str) -> Self {
        Self::Overflow { operation }
    }

    /// Wrap a JSON encoding failure
    pub fn serialization(error: &serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }

    /// Wrap a structure mapping failure
    pub fn mapping(error: &serde_json::Error) -> Self {
        Self::Mapping(error.to_string())
    }

    /// Wrap an I/O failure while dumping
    pub fn dump(error: &std::io::Error) -> Self {
        Self::Dump(error.to_string())
    }
}

// ============================================================================
// ERROR CLASSIFICATION
// ============================================================================

impl CollectionError {
    /// Check if this is a not-implemented error
    #[must_use]
    pub const fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented { .. })
    }

    /// Operation name carried by the error, if any
    #[must_use]
    pub const fn operation(&self) -> Option<&'static str> {
        match self {
            Self::NotImplemented { operation }
            | Self::TypeMismatch { operation, .. }
            | Self::InvalidArgument { operation, .. }
            | Self::EmptyCollection { operation }
            | Self::Overflow { operation } => Some(*operation),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_implemented_message_names_the_operation() {
        let err = CollectionError::not_implemented("take");
        assert_eq!(
            err.to_string(),
            "operation not implemented for this collection variant: take"
        );
        assert!(err.is_not_implemented());
        assert_eq!(err.operation(), Some("take"));
    }

    #[test]
    fn type_mismatch_message() {
        let err = CollectionError::type_mismatch("concat", "matrix", "items");
        assert_eq!(
            err.to_string(),
            "type mismatch in concat: expected matrix, got items"
        );
        assert!(!err.is_not_implemented());
    }

    #[test]
    fn serialization_keeps_the_underlying_message() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CollectionError::serialization(&source);
        assert!(err.to_string().starts_with("serialization error: "));
        assert!(err.to_string().contains(&source.to_string()));
        assert_eq!(err.operation(), None);
    }
}
