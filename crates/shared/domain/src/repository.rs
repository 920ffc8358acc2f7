//! Persistence port for the student aggregate.

use crate::student::Student;
use std::borrow::Cow;
use std::future::Future;
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The underlying store failed (connectivity, query execution).
    #[error("storage error: {0}")]
    Storage(Cow<'static, str>),

    /// Stored data could not be mapped onto the domain model.
    #[error("mapping error: {0}")]
    Mapping(Cow<'static, str>),
}

/// Port for loading and saving students.
///
/// Implementations live in the infrastructure layer; the domain only
/// depends on this trait.
pub trait StudentRepository: Send + Sync {
    /// Loads the full aggregate, or `None` when the student does not exist.
    fn find_by_id(
        &self,
        student_id: i64,
    ) -> impl Future<Output = Result<Option<Student>, RepositoryError>> + Send;

    /// Persists the aggregate, replacing records and goals.
    fn save(&self, student: &Student)
    -> impl Future<Output = Result<(), RepositoryError>> + Send;
}
