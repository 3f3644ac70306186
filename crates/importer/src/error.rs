use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImporterError>;

#[derive(Error, Debug)]
pub enum ImporterError {
    #[error("Failed to parse JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Failed to read source file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    StorageError(#[from] storage::StorageError),

    #[error("Record error: {0}")]
    RecordError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::StorageError;

    fn reject() -> Result<()> {
        let stored: storage::Result<()> =
            Err(StorageError::ConstraintViolation("donor 13 rejected".to_string()));
        stored?;
        Ok(())
    }

    #[test]
    fn test_storage_errors_convert() {
        let error = reject().unwrap_err();
        assert!(matches!(error, ImporterError::StorageError(_)));
        assert_eq!(
            error.to_string(),
            "Storage error: Constraint violation: donor 13 rejected"
        );
    }

    #[test]
    fn test_json_errors_convert() {
        let error: ImporterError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(error, ImporterError::ParseError(_)));
    }
}
