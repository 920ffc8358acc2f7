use sdash_domain::repository::RepositoryError;
use std::borrow::Cow;
use thiserror::Error;

/// A specialized [`DatabaseError`] enum of this crate.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Validation errors.
    #[error("validation error: {0}")]
    Validation(Cow<'static, str>),

    /// Occurs when connectivity or health checks fail.
    #[error("database connection failed: {0}")]
    Connection(String),

    /// Occurs when authentication fails.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// A wrapper for underlying `SurrealDB` engine errors.
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    /// Migration failures or invariant violations.
    #[error("migration error: {0}")]
    Migration(String),

    /// Stored rows that cannot be mapped onto the domain model.
    #[error("mapping error: {0}")]
    Mapping(String),
}

impl From<DatabaseError> for RepositoryError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Mapping(message) => Self::Mapping(message.into()),
            other => Self::Storage(other.to_string().into()),
        }
    }
}
