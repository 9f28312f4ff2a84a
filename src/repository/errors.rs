use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A row targeted by an update or delete does not exist.
    #[error("record not found")]
    NotFound,
    /// A unique index rejected the write.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    /// Persisted data could not be converted into a domain value.
    #[error("validation error: {0}")]
    ValidationError(String),
    /// No connection could be obtained from the pool.
    #[error("connection error: {0}")]
    Connection(String),
    #[error("database error: {0}")]
    Database(DieselError),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                RepositoryError::ConstraintViolation(info.message().to_string())
            }
            other => RepositoryError::Database(other),
        }
    }
}

impl From<diesel::r2d2::PoolError> for RepositoryError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        RepositoryError::Connection(err.to_string())
    }
}
