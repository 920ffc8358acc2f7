use thiserror::Error;

/// Violations of the study-progress rules.
#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    /// The referenced course record does not exist on the student.
    #[error("course record {0} not found")]
    RecordNotFound(i64),

    /// The record already carries a grade; grades are recorded once.
    #[error("a grade was already recorded for course record {0}")]
    GradeAlreadyRecorded(i64),

    /// The grade is outside the accepted scale.
    #[error("grade {0} is out of range (must be between 1.0 and 5.0)")]
    GradeOutOfRange(f64),
}
