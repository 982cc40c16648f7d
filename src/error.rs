//! Error types for stile.

use thiserror::Error;

/// Common error type for stile infrastructure.
///
/// Request-level outcomes (validation failures, bad credentials, unknown
/// sessions) are modeled by the per-operation error types in [`crate::auth`];
/// this type covers the plumbing underneath them.
#[derive(Error, Debug)]
pub enum StileError {
    /// Database error.
    ///
    /// Wraps errors from the storage backend. sqlx errors are converted
    /// automatically.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for StileError {
    fn from(e: sqlx::Error) -> Self {
        StileError::Database(e.to_string())
    }
}

/// Result type alias for stile operations.
pub type Result<T> = std::result::Result<T, StileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_display() {
        let err = StileError::Database("connection refused".to_string());
        assert_eq!(err.to_string(), "database error: connection refused");
    }

    #[test]
    fn test_config_error_display() {
        let err = StileError::Config("missing section".to_string());
        assert_eq!(err.to_string(), "configuration error: missing section");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: StileError = io_err.into();
        assert!(matches!(err, StileError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        assert_eq!(sample_ok().unwrap(), 42);
    }
}
