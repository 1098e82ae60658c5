//! Error types for Strainer
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in Strainer
#[derive(Debug, Error)]
pub enum StrainerError {
    /// Referenced product or file absent
    #[error("not found: {0}")]
    NotFound(String),

    /// Target identifier already exists
    #[error("identifier already exists: {0}")]
    Conflict(String),

    /// Name derivation produced an empty identifier
    #[error("name {0:?} contains no usable characters")]
    InvalidName(String),

    /// Backup copy could not be created
    #[error("backup failed: {0}")]
    BackupFailed(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type alias for Strainer operations
pub type Result<T> = std::result::Result<T, StrainerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = StrainerError::NotFound("ogkush".to_string());
        assert_eq!(err.to_string(), "not found: ogkush");
    }

    #[test]
    fn test_conflict_error() {
        let err = StrainerError::Conflict("ogkush2".to_string());
        assert_eq!(err.to_string(), "identifier already exists: ogkush2");
    }

    #[test]
    fn test_invalid_name_error() {
        let err = StrainerError::InvalidName("!!!".to_string());
        assert_eq!(err.to_string(), "name \"!!!\" contains no usable characters");
    }

    #[test]
    fn test_backup_failed_error() {
        let err = StrainerError::BackupFailed("disk full".to_string());
        assert_eq!(err.to_string(), "backup failed: disk full");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: StrainerError = io_err.into();
        assert!(matches!(err, StrainerError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_parse_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: StrainerError = json_err.into();
        assert!(matches!(err, StrainerError::Parse(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(StrainerError::Conflict("test".to_string()))
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}
