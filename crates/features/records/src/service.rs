use crate::error::RecordsError;
use sdash_domain::events::GradeRecorded;
use sdash_domain::repository::StudentRepository;
use sdash_event_bus::EventBus;
use tracing::{info, warn};

/// Write side of the dashboard: loads the aggregate, applies the grade, and
/// persists the result before announcing it on the bus.
#[derive(Debug)]
pub struct RecordsService<R> {
    repo: R,
    events: EventBus,
}

impl<R: StudentRepository> RecordsService<R> {
    #[must_use]
    pub const fn new(repo: R, events: EventBus) -> Self {
        Self { repo, events }
    }

    /// Records `grade` for one course record of a student.
    ///
    /// Publishes [`GradeRecorded`] after the write committed; a publish
    /// failure is logged but never rolls back the grade.
    ///
    /// # Errors
    /// * [`RecordsError::StudentNotFound`] for unknown students.
    /// * [`RecordsError::Domain`] when the aggregate rejects the grade.
    /// * [`RecordsError::Repository`] when the store fails.
    pub async fn record_grade(
        &self,
        student_id: i64,
        record_id: i64,
        grade: f64,
    ) -> Result<(), RecordsError> {
        let mut student = self
            .repo
            .find_by_id(student_id)
            .await?
            .ok_or(RecordsError::StudentNotFound(student_id))?;

        student.record_grade(record_id, grade)?;
        self.repo.save(&student).await?;

        info!(student_id, record_id, grade, "Grade recorded");

        if let Err(error) = self.events.publish(GradeRecorded { student_id, record_id }) {
            warn!(student_id, record_id, %error, "Failed to publish GradeRecorded");
        }

        Ok(())
    }
}
