use thiserror::Error;
use uuid::Uuid;

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    /// Postgres SQLSTATE, when the error came back from the server.
    pub fn sql_state(&self) -> Option<String> {
        match self {
            StorageError::Database(sqlx::Error::Database(e)) => e.code().map(|c| c.into_owned()),
            _ => None,
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        self.sql_state().as_deref() == Some(UNIQUE_VIOLATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_the_row() {
        let id = Uuid::nil();
        let error = StorageError::NotFound { entity: "donor", id };
        assert_eq!(error.to_string(), format!("donor {} not found", id));
        assert!(error.sql_state().is_none());
    }

    #[test]
    fn test_non_database_errors_are_not_unique_violations() {
        let error = StorageError::ConstraintViolation("place missing".to_string());
        assert!(!error.is_unique_violation());
    }
}
