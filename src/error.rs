//! Error types for the AiDb encoding layer.

use thiserror::Error;

/// The result type used throughout the encoding layer.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for encoding and decoding operations.
///
/// Allocation failure is not represented here: the global allocator aborts
/// and any buffer size that overflows `usize` panics, so callers never see a
/// half-grown buffer.
#[derive(Debug, Error)]
pub enum Error {
    /// Input bytes do not form a valid encoding.
    #[error("Data corruption: {0}")]
    Corruption(String),

    /// An invalid argument was provided.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Creates a new corruption error.
    pub fn corruption(msg: impl Into<String>) -> Self {
        Error::Corruption(msg.into())
    }

    /// Creates a new invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Returns true if this error signals malformed input.
    pub fn is_corruption(&self) -> bool {
        matches!(self, Error::Corruption(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::corruption("unterminated packed integer");
        assert_eq!(err.to_string(), "Data corruption: unterminated packed integer");

        let err = Error::invalid_argument("initial_capacity must be a power of two");
        assert!(err.to_string().starts_with("Invalid argument:"));
    }

    #[test]
    fn test_every_variant_is_decode_or_config() {
        // No wildcard arm, so a new variant fails to compile here.
        for err in [Error::corruption("x"), Error::invalid_argument("y")] {
            match err {
                Error::Corruption(msg) => assert_eq!(msg, "x"),
                Error::InvalidArgument(msg) => assert_eq!(msg, "y"),
            }
        }
    }

    #[test]
    fn test_is_corruption() {
        assert!(Error::corruption("x").is_corruption());
        assert!(!Error::invalid_argument("x").is_corruption());
    }
}
