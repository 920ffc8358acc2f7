//! Domain events exchanged between feature slices over the event bus.

/// Emitted after a grade was successfully persisted for a student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeRecorded {
    pub student_id: i64,
    pub record_id: i64,
}
